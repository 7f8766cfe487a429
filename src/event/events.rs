use crate::cue::Warning;
use crate::export::Download;
use crate::flood_fill::FillRejection;
use crate::tool::ToolKind;

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    TemplateLoaded {
        template_id: String,
        resumed: bool,
    },
    ToolChanged {
        old: ToolKind,
        new: ToolKind,
    },
    StrokeStarted {
        tool: ToolKind,
    },
    StrokeCompleted {
        tool: ToolKind,
        changed: u64,
    },
    FillCompleted {
        changed: u64,
        truncated: bool,
    },
    FillRejected(FillRejection),
    /// Advisory only, the stroke stays on the canvas
    BoundaryWarning(Warning),
    CanvasCleared,
    Undone,
    Redone,
    ArtworkSaved {
        template_id: String,
        stored: bool,
        download: Option<Download>,
    },
}
