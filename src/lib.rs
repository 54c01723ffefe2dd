//! Neon Breaker - A brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, level progression)
//! - `achievements`: Static achievement catalog and evaluator
//! - `engine`: Playback control, frame cadence and state publishing
//! - `renderer`: Painting state onto a 2D drawing surface
//! - `platform`: Frame scheduling and input translation
//! - `persistence`: Key-value storage for high score and achievements

pub mod achievements;
pub mod engine;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use engine::{Engine, Snapshot, SubscriptionId};
pub use error::EngineError;
pub use highscores::HighScore;
pub use settings::{ConfigUpdate, EngineConfig, Theme};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference canvas size
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Distance from the paddle's top edge to the canvas bottom
    pub const PADDLE_BOTTOM_OFFSET: f32 = 30.0;
    /// Horizontal velocity per pixel of offset from the paddle center
    pub const PADDLE_ENGLISH: f32 = 0.15;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 6.0;
    pub const BALL_START_SPEED: f32 = 4.0;
    /// Distance from the ball spawn point to the canvas bottom
    pub const BALL_BOTTOM_OFFSET: f32 = 50.0;

    /// Brick grid layout
    pub const BRICK_COLS: u32 = 8;
    pub const BRICK_BASE_ROWS: u32 = 3;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    /// Gap between the top padding and the first brick row
    pub const BRICK_TOP_OFFSET: f32 = 50.0;
    pub const BRICK_VALUE: u32 = 100;
    pub const BRICK_HEALTH: u32 = 1;

    /// Session defaults
    pub const STARTING_LIVES: u32 = 3;
    pub const STARTING_LEVEL: u32 = 1;
}

/// Ball spawn point for a canvas of the given size
#[inline]
pub fn ball_spawn(width: f32, height: f32) -> Vec2 {
    Vec2::new(width / 2.0, height - consts::BALL_BOTTOM_OFFSET)
}

/// Ball launch velocity for a level (level 0 is the opening serve)
#[inline]
pub fn launch_velocity(level: u32) -> Vec2 {
    let speed = consts::BALL_START_SPEED + level as f32;
    Vec2::new(speed, -speed)
}
