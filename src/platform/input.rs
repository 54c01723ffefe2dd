//! Keyboard input translation
//!
//! Arrow keys steer while held, space starts, `p` toggles pause.

use serde::{Deserialize, Serialize};

use crate::sim::PaddleDirection;

/// A discrete player command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    Stop,
    /// Start a run or launch the ball
    Launch,
    TogglePause,
}

impl InputEvent {
    /// Paddle intent carried by this event, if any
    pub fn direction(&self) -> Option<PaddleDirection> {
        match self {
            InputEvent::MoveLeft => Some(PaddleDirection::Left),
            InputEvent::MoveRight => Some(PaddleDirection::Right),
            InputEvent::Stop => Some(PaddleDirection::Stop),
            InputEvent::Launch | InputEvent::TogglePause => None,
        }
    }
}

/// Map a `KeyboardEvent.key` value from a keydown
pub fn key_down(key: &str) -> Option<InputEvent> {
    match key {
        "ArrowLeft" => Some(InputEvent::MoveLeft),
        "ArrowRight" => Some(InputEvent::MoveRight),
        " " => Some(InputEvent::Launch),
        "p" => Some(InputEvent::TogglePause),
        _ => None,
    }
}

/// Map a `KeyboardEvent.key` value from a keyup
pub fn key_up(key: &str) -> Option<InputEvent> {
    match key {
        "ArrowLeft" | "ArrowRight" => Some(InputEvent::Stop),
        _ => None,
    }
}
