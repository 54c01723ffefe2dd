//! Demo autopilot
//!
//! Steers the paddle under the ball so a session can run unattended.

use super::state::{GameState, PaddleDirection};

/// Pick a paddle direction that keeps the ball over the paddle.
///
/// Aims slightly off-center toward the side the ball is drifting to so the
/// bounce sends it back across the field.
pub fn steer(state: &GameState) -> PaddleDirection {
    let paddle = &state.paddle;
    let ball = &state.ball;

    let lead = if ball.vel.x == 0.0 {
        0.0
    } else {
        ball.vel.x.signum() * paddle.width * 0.1
    };
    let target = ball.pos.x + lead;
    let offset = target - paddle.center_x();

    // Dead zone avoids jittering around the target
    if offset.abs() <= paddle.speed {
        PaddleDirection::Stop
    } else if offset < 0.0 {
        PaddleDirection::Left
    } else {
        PaddleDirection::Right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::tick;

    #[test]
    fn test_steers_toward_ball() {
        let mut state = GameState::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        state.ball.pos.x = 100.0;
        assert_eq!(steer(&state), PaddleDirection::Left);
        state.ball.pos.x = 700.0;
        assert_eq!(steer(&state), PaddleDirection::Right);
        state.ball.pos.x = 400.0;
        state.ball.vel.x = 0.0;
        assert_eq!(steer(&state), PaddleDirection::Stop);
    }

    #[test]
    fn test_autopilot_breaks_bricks() {
        let mut state = GameState::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        state.begin();
        for _ in 0..5_000 {
            let direction = steer(&state);
            state.paddle.steer(direction);
            tick(&mut state);
            if state.game_over {
                break;
            }
        }
        assert!(state.stats.bricks_broken > 0);
    }
}
