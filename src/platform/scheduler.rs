//! Frame scheduling primitives
//!
//! The host owns the frame clock. The engine only asks for the next frame
//! and cancels a pending one; the host calls `Engine::on_frame` when a
//! requested frame comes due.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Identifies one requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Request/cancel primitives driven by the host's refresh
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    /// Cancel a pending frame. Unknown or already-fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Debug, Default)]
struct Queue {
    next_id: i32,
    pending: VecDeque<FrameHandle>,
    requested: u64,
    cancelled: u64,
}

/// Scheduler driven by explicit calls (native loop and tests)
///
/// Clones share the same queue, so the host can keep one while the engine
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<Queue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the oldest pending frame, if any
    pub fn next_due(&self) -> Option<FrameHandle> {
        self.queue.borrow_mut().pending.pop_front()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Total frames ever requested
    pub fn requested(&self) -> u64 {
        self.queue.borrow().requested
    }

    /// Total frames cancelled while pending
    pub fn cancelled(&self) -> u64 {
        self.queue.borrow().cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let mut queue = self.queue.borrow_mut();
        queue.next_id += 1;
        let handle = FrameHandle(queue.next_id);
        queue.pending.push_back(handle);
        queue.requested += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut queue = self.queue.borrow_mut();
        let before = queue.pending.len();
        queue.pending.retain(|h| *h != handle);
        if queue.pending.len() < before {
            queue.cancelled += 1;
        }
    }
}
