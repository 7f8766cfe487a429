use thiserror::Error;

/// Errors raised while loading templates, configuration or exporting artwork
#[derive(Debug, Error)]
pub enum ColoringError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid brush widths: {min}..={max}")]
    InvalidBrushWidths { min: f32, max: f32 },

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Download failed: {0}")]
    Download(String),

    #[error(transparent)]
    Storage(#[from] crate::state::StorageError),
}

/// Result type for coloring operations
pub type Result<T> = std::result::Result<T, ColoringError>;
