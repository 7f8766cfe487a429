use egui::Pos2;
use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::config::ColoringConfig;
use crate::flood_fill::FillOutcome;
use crate::outline::OutlineMask;
use crate::pixels::PixelBuffer;

/// The tools a child can pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Brush,
    Fill,
    Eraser,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [ToolKind::Brush, ToolKind::Fill, ToolKind::Eraser];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Brush => "Brush",
            Self::Fill => "Fill",
            Self::Eraser => "Eraser",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Brush => "🖌",
            Self::Fill => "🪣",
            Self::Eraser => "⌫",
        }
    }
}

/// Everything a tool may touch while handling one pointer event
pub struct ToolContext<'a> {
    pub buffer: &'a mut PixelBuffer,
    pub mask: &'a OutlineMask,
    pub config: &'a ColoringConfig,
    pub color: Rgba<u8>,
    pub brush_width: f32,
    pub boundary_help: bool,
}

/// What a pointer event did to the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolOutcome {
    #[default]
    Nothing,
    Painted { changed: u64, crossed_boundary: bool },
    Erased { changed: u64 },
    Filled(FillOutcome),
}

impl ToolOutcome {
    pub fn changed(&self) -> u64 {
        match self {
            Self::Nothing => 0,
            Self::Painted { changed, .. } | Self::Erased { changed } => *changed,
            Self::Filled(outcome) => outcome.changed(),
        }
    }
}

pub trait Tool {
    fn kind(&self) -> ToolKind;

    fn name(&self) -> &'static str {
        self.kind().label()
    }

    /// Pointer pressed on the canvas at a buffer position
    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> ToolOutcome;

    /// Pointer dragged while pressed
    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> ToolOutcome;

    /// Pointer released or left the canvas. Returns whether a stroke ended.
    fn on_pointer_up(&mut self) -> bool;

    /// Whether a stroke is in progress
    fn is_active(&self) -> bool;

    fn current_state_name(&self) -> &'static str;
}
