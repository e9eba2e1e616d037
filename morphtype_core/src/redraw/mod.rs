//! Latest-wins redraw requests at the front-end boundary.
//!
//! UI ticks can arrive faster than frames render. Each new request replaces
//! the pending one, so the render loop always draws the newest state and the
//! pipeline itself never runs concurrently with another trigger.

use parking_lot::{Condvar, Mutex};

use crate::session::RenderRequest;

struct Slot {
    pending: Option<RenderRequest>,
    /// Requests replaced before they were taken.
    superseded: u64,
    closed: bool,
}

/// A single-slot queue shared between UI producers and the render loop.
pub struct RedrawQueue {
    slot: Mutex<Slot>,
    ready: Condvar,
}

impl RedrawQueue {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                pending: None,
                superseded: 0,
                closed: false,
            }),
            ready: Condvar::new(),
        }
    }

    /// Queue `request`, replacing any pending one.
    ///
    /// Returns `true` if a pending request was dropped. Requests after
    /// `close()` are ignored.
    pub fn request(&self, request: RenderRequest) -> bool {
        let mut slot = self.slot.lock();
        if slot.closed {
            return false;
        }
        let replaced = slot.pending.replace(request).is_some();
        if replaced {
            slot.superseded += 1;
        }
        drop(slot);
        self.ready.notify_one();
        replaced
    }

    /// Take the pending request without blocking.
    pub fn try_take(&self) -> Option<RenderRequest> {
        self.slot.lock().pending.take()
    }

    /// Block until a request is pending, or return `None` once the queue is
    /// closed and drained.
    pub fn wait(&self) -> Option<RenderRequest> {
        let mut slot = self.slot.lock();
        loop {
            if let Some(request) = slot.pending.take() {
                return Some(request);
            }
            if slot.closed {
                return None;
            }
            self.ready.wait(&mut slot);
        }
    }

    /// Stop accepting requests and wake the render loop.
    pub fn close(&self) {
        self.slot.lock().closed = true;
        self.ready.notify_all();
    }

    pub fn superseded(&self) -> u64 {
        self.slot.lock().superseded
    }
}

impl Default for RedrawQueue {
    fn default() -> Self {
        Self::new()
    }
}
