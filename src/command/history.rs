use std::collections::VecDeque;

use crate::pixels::PixelBuffer;

/// Snapshot-based undo/redo for the visible canvas.
///
/// A snapshot of the buffer is recorded right before each stroke or fill
/// mutates it. Only `limit` snapshots are kept; the oldest is dropped first.
#[derive(Debug, Clone)]
pub struct CanvasHistory {
    /// Snapshots that can be restored by undo, newest at the back
    undo_stack: VecDeque<PixelBuffer>,
    /// Snapshots that can be restored by redo
    redo_stack: Vec<PixelBuffer>,
    limit: usize,
}

impl CanvasHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit,
        }
    }

    /// Remember the canvas as it was before an edit
    pub fn record(&mut self, before: PixelBuffer) {
        if self.limit == 0 {
            return;
        }
        if self.undo_stack.len() == self.limit {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(before);
        self.redo_stack.clear(); // New edits invalidate the redo branch
    }

    /// Swap `current` with the previous snapshot
    pub fn undo(&mut self, current: &mut PixelBuffer) -> bool {
        match self.undo_stack.pop_back() {
            Some(previous) => {
                self.redo_stack.push(std::mem::replace(current, previous));
                true
            }
            None => false,
        }
    }

    /// Reapply the last undone edit
    pub fn redo(&mut self, current: &mut PixelBuffer) -> bool {
        match self.redo_stack.pop() {
            Some(next) => {
                self.undo_stack.push_back(std::mem::replace(current, next));
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
