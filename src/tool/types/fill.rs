use egui::Pos2;

use crate::flood_fill::{FillOutcome, FillRejection, FloodFill};
use crate::pixels;
use crate::tool::trait_def::{Tool, ToolContext, ToolKind, ToolOutcome};

/// Tap to fill a region. Each pointer-down runs exactly one fill;
/// dragging does nothing.
#[derive(Debug, Clone)]
pub struct FillTool {
    engine: FloodFill,
}

impl FillTool {
    pub fn new(cap: usize) -> Self {
        Self {
            engine: FloodFill::new(cap),
        }
    }
}

impl Tool for FillTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Fill
    }

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        let outcome = match pixels::pixel_coords(pos) {
            Some(seed) => self.engine.run(ctx.buffer, ctx.mask, seed, ctx.color),
            None => FillOutcome::Rejected(FillRejection::OutOfBounds),
        };
        ToolOutcome::Filled(outcome)
    }

    fn on_pointer_move(&mut self, _pos: Pos2, _ctx: &mut ToolContext<'_>) -> ToolOutcome {
        ToolOutcome::Nothing
    }

    fn on_pointer_up(&mut self) -> bool {
        false
    }

    fn is_active(&self) -> bool {
        false
    }

    fn current_state_name(&self) -> &'static str {
        self.engine.phase().name()
    }
}
