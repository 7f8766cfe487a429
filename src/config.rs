use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ColoringError, Result};

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV_VAR: &str = "COLORING_BOOK_CONFIG";

/// Tunable parameters of the coloring canvas.
///
/// Every field has a default, so a partial JSON file (or an older persisted
/// app state) only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColoringConfig {
    /// Width of the pixel buffers created for every template
    pub canvas_width: u32,
    /// Height of the pixel buffers created for every template
    pub canvas_height: u32,
    /// Maximum number of pixels a single flood fill may change
    pub fill_queue_cap: usize,
    /// A mask pixel whose R, G and B are all below this value is a boundary
    pub darkness_threshold: u8,
    /// `total_pixels = canvas area / progress_divisor`
    pub progress_divisor: u64,
    /// Thinnest brush the slider allows
    pub min_brush_width: f32,
    /// Thickest brush the slider allows
    pub max_brush_width: f32,
    /// Eraser radius relative to the brush radius
    pub eraser_scale: f32,
    /// Fewest samples taken along a segment when checking for boundaries
    pub min_boundary_samples: usize,
    /// Distance in pixels between boundary samples on long segments
    pub boundary_sample_spacing: f32,
    /// How long the outline glows after a warning
    pub glow_seconds: f64,
    /// Stroke width used when rasterizing built-in line art
    pub outline_width: f32,
    /// Number of undo snapshots kept
    pub history_depth: usize,
    /// Byte budget for saved artwork, mirrors browser local storage limits
    pub storage_quota_bytes: usize,
    /// Where downloaded PNGs are written on native builds
    pub export_dir: PathBuf,
}

impl Default for ColoringConfig {
    fn default() -> Self {
        Self {
            canvas_width: 500,
            canvas_height: 500,
            fill_queue_cap: 10_000,
            darkness_threshold: 50,
            progress_divisor: 3,
            min_brush_width: 1.0,
            max_brush_width: 60.0,
            eraser_scale: 1.5,
            min_boundary_samples: 5,
            boundary_sample_spacing: 2.0,
            glow_seconds: 1.5,
            outline_width: 4.0,
            history_depth: 20,
            storage_quota_bytes: 5 * 1024 * 1024,
            export_dir: PathBuf::from("."),
        }
    }
}

impl ColoringConfig {
    /// Read a config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load from the file named by `COLORING_BOOK_CONFIG`, if set.
    ///
    /// Returns `None` when the variable is unset or the file is unusable;
    /// the failure is logged and the caller falls back to other sources.
    pub fn from_env() -> Option<Self> {
        let path = std::env::var_os(CONFIG_ENV_VAR)?;
        match Self::load(Path::new(&path)) {
            Ok(config) => {
                log::info!("Loaded config from {}", Path::new(&path).display());
                Some(config)
            }
            Err(err) => {
                log::warn!("Ignoring config {}: {}", Path::new(&path).display(), err);
                None
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ColoringError::InvalidDimensions {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if !(self.min_brush_width > 0.0 && self.min_brush_width <= self.max_brush_width) {
            return Err(ColoringError::InvalidBrushWidths {
                min: self.min_brush_width,
                max: self.max_brush_width,
            });
        }
        Ok(())
    }
}
