//! Collision detection and response
//!
//! Everything is axis-aligned: the canvas edges, the paddle's top band and
//! the brick rectangles. Responses are pure velocity sign changes with no
//! position correction, so a ball may overshoot an edge by one tick of travel.

use glam::Vec2;

use super::state::{Ball, Brick, Paddle};
use crate::consts::PADDLE_ENGLISH;

/// Which canvas edges the ball is past
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHit {
    /// Left or right edge
    pub side: bool,
    /// Top edge
    pub top: bool,
}

/// Check the ball against the left, right and top edges
pub fn ball_wall_collision(pos: Vec2, radius: f32, width: f32) -> WallHit {
    WallHit {
        side: pos.x - radius < 0.0 || pos.x + radius > width,
        top: pos.y - radius < 0.0,
    }
}

/// Whether the ball's bottom edge has passed the floor
pub fn ball_floor_collision(pos: Vec2, radius: f32, height: f32) -> bool {
    pos.y + radius > height
}

/// Ball vertical extent against the paddle band, center point against its width
pub fn ball_paddle_collision(pos: Vec2, radius: f32, paddle: &Paddle) -> bool {
    pos.y + radius >= paddle.pos.y
        && pos.y - radius <= paddle.pos.y + paddle.height
        && pos.x >= paddle.pos.x
        && pos.x <= paddle.pos.x + paddle.width
}

/// Velocity after bouncing off the paddle: always upward, with horizontal
/// speed proportional to the offset from the paddle center
pub fn paddle_bounce(ball: &Ball, paddle: &Paddle) -> Vec2 {
    let hit_point = ball.pos.x - paddle.center_x();
    Vec2::new(hit_point * PADDLE_ENGLISH, -ball.vel.y.abs())
}

/// Index of the brick the point hits, scanning newest first
pub fn find_brick_hit(point: Vec2, bricks: &[Brick]) -> Option<usize> {
    bricks.iter().rposition(|b| b.contains(point))
}

/// Flip the velocity components for the edges that were hit
pub fn reflect_walls(vel: Vec2, hit: WallHit) -> Vec2 {
    Vec2::new(
        if hit.side { -vel.x } else { vel.x },
        if hit.top { -vel.y } else { vel.y },
    )
}
