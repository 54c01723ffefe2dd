//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One fixed step per tick, no wall-clock time
//! - No randomness
//! - Stable iteration order (brick insertion order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{WallHit, ball_floor_collision, ball_paddle_collision, ball_wall_collision};
pub use state::{
    Ball, Brick, BrickId, BrickKind, GameEvent, GamePhase, GameState, GameStats, Paddle,
    PaddleDirection, Snapshot,
};
pub use tick::{generate_level, tick};
