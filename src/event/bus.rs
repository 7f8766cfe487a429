use std::cell::RefCell;

use crate::event::CanvasEvent;

/// Queues canvas events until the host drains them once per frame.
///
/// Emitting only needs `&self`, so read-only canvas operations such as
/// saving can still report what they did.
#[derive(Default)]
pub struct EventBus {
    pending: RefCell<Vec<CanvasEvent>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("pending", &self.pending.borrow().len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: CanvasEvent) {
        log::debug!("Canvas event: {:?}", event);
        self.pending.borrow_mut().push(event);
    }

    /// Number of events waiting to be drained
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Take every event emitted since the last drain
    pub fn drain(&self) -> Vec<CanvasEvent> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }
}
