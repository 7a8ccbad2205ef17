//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (display refresh on web, manual stepping elsewhere)
//! - Input mapping

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

pub use input::{InputAction, action_for_key};

/// Callback invoked with the frame timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Identifies an outstanding frame request so it can be cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Something that calls back once per display frame
pub trait FrameScheduler {
    /// Run `callback` on the next frame
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;
    /// Drop a pending request; unknown or already-fired handles are ignored
    fn cancel_frame(&self, handle: FrameHandle);
}

/// Deterministic scheduler that only fires when told to.
///
/// Callbacks requested while a frame is being fired wait for the next
/// [`fire`](ManualScheduler::fire), and cancelling a callback that has not
/// run yet stops it even within the current frame, matching how
/// display-refresh callbacks behave.
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<VecDeque<(FrameHandle, FrameCallback)>>,
    /// Batch of the frame currently being fired
    firing: RefCell<VecDeque<(FrameHandle, FrameCallback)>>,
    next_handle: Cell<i32>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for the next frame
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Fire one frame at `timestamp_ms`; returns how many callbacks ran
    pub fn fire(&self, timestamp_ms: f64) -> usize {
        // Take the batch first so callbacks can request the next frame
        let batch = std::mem::take(&mut *self.queue.borrow_mut());
        *self.firing.borrow_mut() = batch;

        let mut count = 0;
        loop {
            let next = self.firing.borrow_mut().pop_front();
            let Some((_, callback)) = next else { break };
            callback(timestamp_ms);
            count += 1;
        }
        count
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle(self.next_handle.get() + 1);
        self.next_handle.set(handle.0);
        self.queue.borrow_mut().push_back((handle, callback));
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.queue.borrow_mut().retain(|(h, _)| *h != handle);
        self.firing.borrow_mut().retain(|(h, _)| *h != handle);
    }
}
