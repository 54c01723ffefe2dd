//! `requestAnimationFrame` scheduler

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::scheduler::{FrameHandle, FrameScheduler};

/// Frame callback slot, filled by the host once the engine exists
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Schedules frames on the browser's display refresh
pub struct AnimationFrameScheduler {
    callback: FrameCallback,
}

impl AnimationFrameScheduler {
    /// Create a scheduler and the slot its callback is read from
    pub fn new() -> (Self, FrameCallback) {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        (
            Self {
                callback: callback.clone(),
            },
            callback,
        )
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let slot = self.callback.borrow();
        let id = match (web_sys::window(), slot.as_ref()) {
            (Some(window), Some(callback)) => window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .ok(),
            _ => None,
        };

        match id {
            Some(id) => FrameHandle(id),
            None => {
                log::warn!("requestAnimationFrame unavailable");
                FrameHandle(0)
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(handle.0);
        }
    }
}
