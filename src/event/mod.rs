mod bus;
mod events;

pub use bus::EventBus;
pub use events::CanvasEvent;
