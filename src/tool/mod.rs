pub mod types;
mod trait_def;

pub use trait_def::{Tool, ToolContext, ToolKind, ToolOutcome};
pub use types::ToolType;

// Re-export specific tool implementations
pub use types::brush::BrushTool;
pub use types::eraser::EraserTool;
pub use types::fill::FillTool;
