use egui::Pos2;
use image::{Rgba, RgbaImage};

use crate::command::CanvasHistory;
use crate::config::ColoringConfig;
use crate::cue::{Warning, WarningCue};
use crate::error::Result;
use crate::event::{CanvasEvent, EventBus};
use crate::export::{self, DownloadTarget, SaveReport};
use crate::flood_fill::{FillOutcome, FillRejection, FloodFill};
use crate::input::CanvasPointer;
use crate::outline::OutlineMask;
use crate::pixels::{self, PixelBuffer, TRANSPARENT};
use crate::progress::ProgressEstimator;
use crate::state::ArtworkShelf;
use crate::template::Template;
use crate::tool::{Tool, ToolContext, ToolKind, ToolOutcome, ToolType};

/// The two buffers that exist while a template is loaded
#[derive(Debug)]
struct Surface {
    template_id: String,
    display_name: String,
    visible: PixelBuffer,
    mask: OutlineMask,
}

/// Controller for the coloring canvas.
///
/// Owns the visible buffer and outline mask of the loaded template, the
/// active tool and its settings, the progress estimate, the warning cue and
/// undo history. Pointer positions are in buffer coordinates (see
/// [`crate::input::display_to_buffer`]).
///
/// Until a template is loaded the canvas is unmounted and every pointer,
/// undo, clear and save call is a silent no-op.
#[derive(Debug)]
pub struct ColoringCanvas {
    config: ColoringConfig,
    surface: Option<Surface>,
    tool: ToolType,
    color: Rgba<u8>,
    brush_width: f32,
    boundary_help: bool,
    progress: ProgressEstimator,
    history: CanvasHistory,
    cue: WarningCue,
    events: EventBus,
    /// Pixels changed by the stroke in progress
    stroke_changed: u64,
    /// A stroke raises at most one boundary warning
    stroke_warned: bool,
    /// Pixels from before the active stroke, recorded once it changes something
    stroke_snapshot: Option<PixelBuffer>,
    revision: u64,
}

impl Default for ColoringCanvas {
    fn default() -> Self {
        Self::new(ColoringConfig::default())
    }
}

impl ColoringCanvas {
    pub fn new(config: ColoringConfig) -> Self {
        Self {
            tool: ToolType::new(ToolKind::Brush, &config),
            color: Rgba([231, 76, 60, 255]),
            brush_width: 10.0,
            boundary_help: true,
            progress: ProgressEstimator::new(config.canvas_width, config.canvas_height, config.progress_divisor),
            history: CanvasHistory::new(config.history_depth),
            cue: WarningCue::new(config.glow_seconds),
            events: EventBus::new(),
            stroke_changed: 0,
            stroke_warned: false,
            stroke_snapshot: None,
            revision: 0,
            surface: None,
            config,
        }
    }

    pub fn config(&self) -> &ColoringConfig {
        &self.config
    }

    /// Create fresh buffers for `template`, replacing the current ones.
    ///
    /// `saved` is earlier artwork for the same template; it is restored when
    /// its size matches the canvas and ignored otherwise.
    pub fn load_template(&mut self, template: &Template, saved: Option<RgbaImage>) -> Result<()> {
        let (width, height) = (self.config.canvas_width, self.config.canvas_height);
        let art = template.render_outline(width, height, self.config.outline_width)?;
        let mask = OutlineMask::from_art(&art, width, height, self.config.darkness_threshold);

        self.end_stroke();
        self.progress = ProgressEstimator::new(width, height, self.config.progress_divisor);
        self.history.clear();
        self.cue.clear();

        let mut visible = mask.to_buffer();
        let mut resumed = false;
        if let Some(saved) = saved {
            if saved.dimensions() == (width, height) {
                visible = PixelBuffer::from_image(saved);
                self.credit_resumed_pixels(&visible, &mask);
                resumed = true;
            } else {
                log::warn!(
                    "Ignoring saved artwork for {}: {:?} does not match {}x{}",
                    template.id,
                    saved.dimensions(),
                    width,
                    height
                );
            }
        }

        log::info!("Loaded template {} ({}x{})", template.id, width, height);
        self.surface = Some(Surface {
            template_id: template.id.clone(),
            display_name: template.display_name.clone(),
            visible,
            mask,
        });
        self.revision += 1;
        self.events.emit(CanvasEvent::TemplateLoaded {
            template_id: template.id.clone(),
            resumed,
        });
        Ok(())
    }

    /// Count pixels of resumed artwork that differ from the line art
    fn credit_resumed_pixels(&mut self, visible: &PixelBuffer, mask: &OutlineMask) {
        let outline = mask.to_buffer();
        for (painted, original) in visible.as_image().pixels().zip(outline.as_image().pixels()) {
            if painted != original && *painted != TRANSPARENT {
                self.progress.record(*painted, 1);
            }
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    pub fn template_id(&self) -> Option<&str> {
        self.surface.as_ref().map(|s| s.template_id.as_str())
    }

    pub fn display_name(&self) -> Option<&str> {
        self.surface.as_ref().map(|s| s.display_name.as_str())
    }

    pub fn visible(&self) -> Option<&PixelBuffer> {
        self.surface.as_ref().map(|s| &s.visible)
    }

    pub fn mask(&self) -> Option<&OutlineMask> {
        self.surface.as_ref().map(|s| &s.mask)
    }

    /// Buffer size, the configured size while unmounted
    pub fn buffer_size(&self) -> [u32; 2] {
        self.surface
            .as_ref()
            .map_or([self.config.canvas_width, self.config.canvas_height], |s| s.visible.size())
    }

    /// Bumped whenever the visible buffer changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn tool_kind(&self) -> ToolKind {
        self.tool.kind()
    }

    pub fn tool_state_name(&self) -> &'static str {
        self.tool.current_state_name()
    }

    pub fn select_tool(&mut self, kind: ToolKind) {
        let old = self.tool.kind();
        if old == kind {
            return;
        }
        self.end_stroke();
        self.tool = ToolType::new(kind, &self.config);
        log::debug!("Tool changed from {} to {}", old.label(), kind.label());
        self.events.emit(CanvasEvent::ToolChanged { old, new: kind });
    }

    pub fn color(&self) -> Rgba<u8> {
        self.color
    }

    pub fn set_color(&mut self, color: Rgba<u8>) {
        self.color = pixels::opaque(color);
    }

    pub fn brush_width(&self) -> f32 {
        self.brush_width
    }

    pub fn set_brush_width(&mut self, width: f32) {
        // Not `clamp`, an unvalidated config must not panic here
        self.brush_width = width.max(self.config.min_brush_width).min(self.config.max_brush_width);
    }

    pub fn boundary_help(&self) -> bool {
        self.boundary_help
    }

    pub fn set_boundary_help(&mut self, enabled: bool) {
        self.boundary_help = enabled;
    }

    pub fn handle(&mut self, pointer: CanvasPointer) {
        match pointer {
            CanvasPointer::Down(pos) => self.pointer_down(pos),
            CanvasPointer::Move(pos) => self.pointer_move(pos),
            CanvasPointer::Up => self.pointer_up(),
            CanvasPointer::Leave => self.pointer_leave(),
        }
    }

    /// Start a stroke, or run one fill when the fill tool is active.
    /// Non-finite positions are ignored.
    pub fn pointer_down(&mut self, pos: Pos2) {
        if self.surface.is_none() || !pos.is_finite() {
            return;
        }
        self.end_stroke();

        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        // A fill that will be rejected needs no snapshot
        let before = match self.tool.kind() {
            ToolKind::Fill => pixels::pixel_coords(pos)
                .filter(|&seed| FloodFill::check_seed(&surface.visible, &surface.mask, seed, self.color).is_ok())
                .map(|_| surface.visible.clone()),
            ToolKind::Brush | ToolKind::Eraser => Some(surface.visible.clone()),
        };
        let mut ctx = ToolContext {
            buffer: &mut surface.visible,
            mask: &surface.mask,
            config: &self.config,
            color: self.color,
            brush_width: self.brush_width,
            boundary_help: self.boundary_help,
        };
        let outcome = self.tool.on_pointer_down(pos, &mut ctx);

        match outcome {
            ToolOutcome::Nothing => {}
            ToolOutcome::Painted { .. } | ToolOutcome::Erased { .. } => {
                self.stroke_snapshot = before;
                self.events.emit(CanvasEvent::StrokeStarted { tool: self.tool.kind() });
                self.apply(outcome);
            }
            ToolOutcome::Filled(FillOutcome::Filled { changed, truncated }) => {
                if let Some(before) = before.filter(|_| changed > 0) {
                    self.history.record(before);
                }
                self.apply(outcome);
                self.events.emit(CanvasEvent::FillCompleted { changed, truncated });
            }
            ToolOutcome::Filled(FillOutcome::Rejected(rejection)) => {
                self.events.emit(CanvasEvent::FillRejected(rejection));
                if rejection == FillRejection::OnBoundary {
                    self.warn(Warning::FillOnBoundary);
                }
            }
        }
    }

    /// Extend the active stroke; ignored when no stroke is active or the
    /// position is not finite
    pub fn pointer_move(&mut self, pos: Pos2) {
        if !self.tool.is_active() || !pos.is_finite() {
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let mut ctx = ToolContext {
            buffer: &mut surface.visible,
            mask: &surface.mask,
            config: &self.config,
            color: self.color,
            brush_width: self.brush_width,
            boundary_help: self.boundary_help,
        };
        let outcome = self.tool.on_pointer_move(pos, &mut ctx);
        self.apply(outcome);
    }

    pub fn pointer_up(&mut self) {
        self.end_stroke();
    }

    pub fn pointer_leave(&mut self) {
        self.end_stroke();
    }

    fn end_stroke(&mut self) {
        if self.tool.on_pointer_up() {
            self.events.emit(CanvasEvent::StrokeCompleted {
                tool: self.tool.kind(),
                changed: self.stroke_changed,
            });
        }
        self.stroke_changed = 0;
        self.stroke_warned = false;
        self.stroke_snapshot = None;
    }

    /// Fold a tool outcome into progress, revision and warnings
    fn apply(&mut self, outcome: ToolOutcome) {
        let changed = outcome.changed();
        if changed > 0 {
            self.revision += 1;
            // First change of a stroke makes it undoable
            if let Some(before) = self.stroke_snapshot.take() {
                self.history.record(before);
            }
        }
        match outcome {
            ToolOutcome::Painted { changed, crossed_boundary } => {
                self.stroke_changed += changed;
                self.progress.record(self.color, changed);
                if crossed_boundary && !self.stroke_warned {
                    self.stroke_warned = true;
                    self.warn(Warning::CrossedBoundary);
                }
            }
            ToolOutcome::Erased { changed } => self.stroke_changed += changed,
            ToolOutcome::Filled(fill) => self.progress.record(self.color, fill.changed()),
            ToolOutcome::Nothing => {}
        }
    }

    fn warn(&mut self, warning: Warning) {
        self.cue.trigger(warning);
        self.events.emit(CanvasEvent::BoundaryWarning(warning));
    }

    /// Advance the glow timer
    pub fn tick(&mut self, now: f64) {
        self.cue.tick(now);
    }

    pub fn cue(&self) -> &WarningCue {
        &self.cue
    }

    pub fn can_undo(&self) -> bool {
        self.surface.is_some() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.surface.is_some() && self.history.can_redo()
    }

    /// Undo restores pixels but never lowers progress
    pub fn undo(&mut self) -> bool {
        self.end_stroke();
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let undone = self.history.undo(&mut surface.visible);
        if undone {
            self.revision += 1;
            self.events.emit(CanvasEvent::Undone);
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        self.end_stroke();
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let redone = self.history.redo(&mut surface.visible);
        if redone {
            self.revision += 1;
            self.events.emit(CanvasEvent::Redone);
        }
        redone
    }

    /// Back to the bare line art. Starts a new progress session.
    pub fn clear(&mut self) {
        self.end_stroke();
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.visible = surface.mask.to_buffer();
        self.history.clear();
        self.cue.clear();
        self.progress = ProgressEstimator::new(
            surface.visible.width(),
            surface.visible.height(),
            self.config.progress_divisor,
        );
        self.revision += 1;
        self.events.emit(CanvasEvent::CanvasCleared);
    }

    /// Save to `shelf` and produce the PNG download at `target`.
    /// Returns `Ok(None)` while unmounted.
    pub fn save(&self, shelf: &mut ArtworkShelf, target: DownloadTarget<'_>) -> Result<Option<SaveReport>> {
        let Some(surface) = self.surface.as_ref() else {
            return Ok(None);
        };
        let report = export::save_artwork(
            &surface.visible,
            &surface.template_id,
            &surface.display_name,
            shelf,
            target,
        )?;
        self.events.emit(CanvasEvent::ArtworkSaved {
            template_id: surface.template_id.clone(),
            stored: report.stored,
            download: report.download.clone(),
        });
        Ok(Some(report))
    }

    pub fn progress(&self) -> &ProgressEstimator {
        &self.progress
    }

    pub fn progress_percent(&self) -> f32 {
        self.progress.percent()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Events emitted since the last call
    pub fn drain_events(&self) -> Vec<CanvasEvent> {
        self.events.drain()
    }
}
