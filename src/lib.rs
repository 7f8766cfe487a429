#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod command;
pub mod components;
pub mod config;
pub mod cue;
pub mod error;
pub mod event;
pub mod export;
pub mod file_handler;
pub mod flood_fill;
pub mod input;
pub mod outline;
pub mod panels;
pub mod pixels;
pub mod progress;
pub mod renderer;
pub mod state;
pub mod template;
pub mod tool;

pub use app::ColoringApp;
pub use canvas::ColoringCanvas;
pub use command::CanvasHistory;
pub use config::ColoringConfig;
pub use cue::{GlowState, Warning, WarningCue};
pub use error::{ColoringError, Result};
pub use event::{CanvasEvent, EventBus};
pub use flood_fill::{FillOutcome, FillRejection, FloodFill};
pub use input::CanvasPointer;
pub use outline::OutlineMask;
pub use pixels::PixelBuffer;
pub use progress::ProgressEstimator;
pub use state::ArtworkShelf;
pub use template::{Template, TemplateStore};
pub use tool::{Tool, ToolKind};
