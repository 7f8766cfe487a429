pub mod brush;
pub mod eraser;
pub mod fill;

pub use brush::BrushTool;
pub use eraser::EraserTool;
pub use fill::FillTool;

use egui::Pos2;

use super::trait_def::{Tool, ToolContext, ToolKind, ToolOutcome};
use crate::config::ColoringConfig;

/// Enum over the concrete tools, avoids `Box<dyn Tool>` in the canvas
#[derive(Debug, Clone)]
pub enum ToolType {
    Brush(BrushTool),
    Eraser(EraserTool),
    Fill(FillTool),
}

impl ToolType {
    pub fn new(kind: ToolKind, config: &ColoringConfig) -> Self {
        match kind {
            ToolKind::Brush => Self::Brush(BrushTool::default()),
            ToolKind::Eraser => Self::Eraser(EraserTool::default()),
            ToolKind::Fill => Self::Fill(FillTool::new(config.fill_queue_cap)),
        }
    }
}

impl Default for ToolType {
    fn default() -> Self {
        Self::Brush(BrushTool::default())
    }
}

impl Tool for ToolType {
    fn kind(&self) -> ToolKind {
        match self {
            Self::Brush(tool) => tool.kind(),
            Self::Eraser(tool) => tool.kind(),
            Self::Fill(tool) => tool.kind(),
        }
    }

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        match self {
            Self::Brush(tool) => tool.on_pointer_down(pos, ctx),
            Self::Eraser(tool) => tool.on_pointer_down(pos, ctx),
            Self::Fill(tool) => tool.on_pointer_down(pos, ctx),
        }
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        match self {
            Self::Brush(tool) => tool.on_pointer_move(pos, ctx),
            Self::Eraser(tool) => tool.on_pointer_move(pos, ctx),
            Self::Fill(tool) => tool.on_pointer_move(pos, ctx),
        }
    }

    fn on_pointer_up(&mut self) -> bool {
        match self {
            Self::Brush(tool) => tool.on_pointer_up(),
            Self::Eraser(tool) => tool.on_pointer_up(),
            Self::Fill(tool) => tool.on_pointer_up(),
        }
    }

    fn is_active(&self) -> bool {
        match self {
            Self::Brush(tool) => tool.is_active(),
            Self::Eraser(tool) => tool.is_active(),
            Self::Fill(tool) => tool.is_active(),
        }
    }

    fn current_state_name(&self) -> &'static str {
        match self {
            Self::Brush(tool) => tool.current_state_name(),
            Self::Eraser(tool) => tool.current_state_name(),
            Self::Fill(tool) => tool.current_state_name(),
        }
    }
}
