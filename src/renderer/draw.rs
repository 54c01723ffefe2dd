//! Paints the game state
//!
//! Draw order is paddle, ball, bricks. Glow is switched off after every
//! glowing shape so the ball never inherits it.

use super::{Glow, Palette, Surface};
use crate::settings::Theme;
use crate::sim::GameState;

/// Clear the surface and draw the current frame
pub fn render(state: &GameState, theme: Theme, surface: &mut dyn Surface) {
    let palette = Palette::for_theme(theme);
    let glows = theme.glows();

    surface.clear();

    // Paddle
    let paddle = &state.paddle;
    if glows {
        surface.set_glow(Some(Glow {
            blur: palette.paddle_glow,
            color: palette.paddle,
        }));
    }
    surface.fill_rect(paddle.pos, paddle.width, paddle.height, palette.paddle);
    surface.set_glow(None);

    // Ball
    let ball = &state.ball;
    surface.fill_circle(ball.pos, ball.radius, palette.ball);

    // Bricks
    for brick in &state.bricks {
        let color = Palette::brick(brick.hue);
        if glows {
            surface.set_glow(Some(Glow {
                blur: palette.brick_glow,
                color,
            }));
        }
        surface.fill_rect(brick.pos, brick.width, brick.height, color);
        surface.set_glow(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::renderer::{DrawCommand, RecordingSurface};

    fn frame(theme: Theme) -> (GameState, Vec<DrawCommand>) {
        let state = GameState::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        let mut surface = RecordingSurface::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        render(&state, theme, &mut surface);
        (state, surface.take_commands())
    }

    #[test]
    fn test_clears_first_then_draws_everything() {
        let (state, commands) = frame(Theme::Dark);
        assert_eq!(commands.first(), Some(&DrawCommand::Clear));
        assert_eq!(commands.iter().filter(|c| **c == DrawCommand::Clear).count(), 1);

        let rects = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .count();
        assert_eq!(rects, 1 + state.bricks.len());

        let circles = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count();
        assert_eq!(circles, 1);
    }

    #[test]
    fn test_dark_theme_glows_paddle_and_bricks_only() {
        let (state, commands) = frame(Theme::Dark);
        let surface_glows = RecordingSurface::glow_per_fill(&commands);

        // Paddle, then ball, then bricks
        assert!(surface_glows[0].is_some());
        assert!(surface_glows[1].is_none());
        assert_eq!(surface_glows.len(), 2 + state.bricks.len());
        assert!(surface_glows[2..].iter().all(|g| g.is_some()));
        assert_eq!(surface_glows[0].map(|g| g.blur), Some(15.0));
        assert_eq!(surface_glows[2].map(|g| g.blur), Some(10.0));
    }

    #[test]
    fn test_light_theme_has_no_glow() {
        let (_, commands) = frame(Theme::Light);
        let glows = RecordingSurface::glow_per_fill(&commands);
        assert!(glows.iter().all(|g| g.is_none()));
    }

    #[test]
    fn test_render_does_not_mutate() {
        let state = GameState::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        let before = state.snapshot();
        let mut surface = RecordingSurface::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        render(&state, Theme::Dark, &mut surface);
        render(&state, Theme::Dark, &mut surface);
        assert_eq!(state.snapshot(), before);
        assert_eq!(surface.frames(), 2);
    }
}
