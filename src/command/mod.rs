mod history;

pub use history::CanvasHistory;
