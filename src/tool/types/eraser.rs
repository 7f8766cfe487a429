use egui::Pos2;

use super::brush::stroke_to;
use crate::pixels::TRANSPARENT;
use crate::tool::trait_def::{Tool, ToolContext, ToolKind, ToolOutcome};

/// State for the eraser tool's current operation
#[derive(Debug, Clone, Copy)]
struct EraserState {
    last_position: Pos2,
}

/// Same geometry as the brush, but clears pixels to transparent with a
/// slightly larger radius. Erasing never raises boundary warnings.
#[derive(Debug, Clone, Default)]
pub struct EraserTool {
    current_state: Option<EraserState>,
}

impl EraserTool {
    fn erase(&self, from: Pos2, to: Pos2, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        let radius = ctx.brush_width / 2.0 * ctx.config.eraser_scale;
        let changed = stroke_to(ctx.buffer, from, to, radius, TRANSPARENT);
        ToolOutcome::Erased { changed }
    }
}

impl Tool for EraserTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Eraser
    }

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        self.current_state = Some(EraserState { last_position: pos });
        self.erase(pos, pos, ctx)
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        let Some(state) = self.current_state else {
            return ToolOutcome::Nothing;
        };
        self.current_state = Some(EraserState { last_position: pos });
        self.erase(state.last_position, pos, ctx)
    }

    fn on_pointer_up(&mut self) -> bool {
        self.current_state.take().is_some()
    }

    fn is_active(&self) -> bool {
        self.current_state.is_some()
    }

    fn current_state_name(&self) -> &'static str {
        if self.current_state.is_some() { "Erasing" } else { "Idle" }
    }
}
