//! Engine configuration and display preferences
//!
//! The theme is applied immediately on update and never persisted.

use serde::{Deserialize, Serialize};

use crate::consts::{BRICK_COLS, BRICK_PADDING, CANVAS_HEIGHT, CANVAS_WIDTH, PADDLE_WIDTH};
use crate::error::EngineError;

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other theme (for the toggle button)
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Whether paddle and bricks get a glow effect
    pub fn glows(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Canvas width in pixels
    pub canvas_width: f32,
    /// Canvas height in pixels
    pub canvas_height: f32,
    /// Color theme
    pub theme: Theme,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            theme: Theme::Dark,
        }
    }
}

impl EngineConfig {
    /// Reject canvases too small for the paddle or the brick grid
    pub fn validate(&self) -> Result<(), EngineError> {
        let min_width = PADDLE_WIDTH.max((BRICK_COLS + 1) as f32 * BRICK_PADDING);
        let valid = self.canvas_width.is_finite()
            && self.canvas_height.is_finite()
            && self.canvas_width > min_width
            && self.canvas_height > 0.0;
        if valid {
            Ok(())
        } else {
            Err(EngineError::InvalidConfig {
                width: self.canvas_width,
                height: self.canvas_height,
            })
        }
    }

    /// Merge a partial update into this config
    pub fn apply(&mut self, update: &ConfigUpdate) {
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
    }
}

/// Partial configuration update from the shell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub theme: Option<Theme>,
}

impl ConfigUpdate {
    pub fn theme(theme: Theme) -> Self {
        Self { theme: Some(theme) }
    }
}
