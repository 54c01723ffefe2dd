//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (`requestAnimationFrame` on web, manual elsewhere)
//! - Keyboard input translation

pub mod input;
pub mod scheduler;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{InputEvent, key_down, key_up};
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler};

#[cfg(target_arch = "wasm32")]
pub use web::AnimationFrameScheduler;
