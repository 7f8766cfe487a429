use egui::Pos2;
use image::Rgba;

use crate::pixels::{self, PixelBuffer};
use crate::tool::trait_def::{Tool, ToolContext, ToolKind, ToolOutcome};

/// State for the brush tool's current stroke
#[derive(Debug, Clone, Copy)]
struct BrushState {
    last_position: Pos2,
}

/// Paint one leg of a stroke: a round-capped segment from the previous
/// point, then a disc at the new point so fast motion leaves no gaps.
pub(crate) fn stroke_to(buffer: &mut PixelBuffer, from: Pos2, to: Pos2, radius: f32, color: Rgba<u8>) -> u64 {
    buffer.paint_segment(from, to, radius, color) + buffer.paint_disc(to, radius, color)
}

/// The brush tool for freehand coloring
#[derive(Debug, Clone, Default)]
pub struct BrushTool {
    current_state: Option<BrushState>,
}

impl BrushTool {
    fn paint(&self, from: Pos2, to: Pos2, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        let color = pixels::opaque(ctx.color);
        let changed = stroke_to(ctx.buffer, from, to, ctx.brush_width / 2.0, color);

        let crossed_boundary = ctx.boundary_help
            && ctx.mask.segment_crosses_boundary(
                from,
                to,
                ctx.config.min_boundary_samples,
                ctx.config.boundary_sample_spacing,
            );

        ToolOutcome::Painted {
            changed,
            crossed_boundary,
        }
    }
}

impl Tool for BrushTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Brush
    }

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        self.current_state = Some(BrushState { last_position: pos });
        self.paint(pos, pos, ctx)
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        let Some(state) = self.current_state else {
            return ToolOutcome::Nothing;
        };
        self.current_state = Some(BrushState { last_position: pos });
        self.paint(state.last_position, pos, ctx)
    }

    fn on_pointer_up(&mut self) -> bool {
        self.current_state.take().is_some()
    }

    fn is_active(&self) -> bool {
        self.current_state.is_some()
    }

    fn current_state_name(&self) -> &'static str {
        if self.current_state.is_some() { "Drawing" } else { "Idle" }
    }
}
