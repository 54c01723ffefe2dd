//! RGBA colors and theme palette

use crate::settings::Theme;

/// Linear RGBA color, components in 0-1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// From a 0xRRGGBB literal
    pub fn from_hex(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        )
    }

    /// From hue in degrees, saturation and lightness in 0-1
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());

        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        let m = lightness - chroma / 2.0;
        Self::rgb(r + m, g + m, b + m)
    }

    /// CSS `rgba()` string for the canvas backend
    pub fn to_css(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {})",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            self.a
        )
    }
}

/// Colors and glow strengths for one theme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub paddle: Color,
    pub ball: Color,
    /// Glow blur radius for the paddle
    pub paddle_glow: f32,
    /// Glow blur radius for bricks
    pub brick_glow: f32,
}

/// Neon cyan used for the dark-theme paddle
const NEON_CYAN: u32 = 0x00f3ff;
const CHARCOAL: u32 = 0x333333;

/// Brick saturation and lightness
pub const BRICK_SATURATION: f32 = 0.7;
pub const BRICK_LIGHTNESS: f32 = 0.6;

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                paddle: Color::from_hex(NEON_CYAN),
                ball: Color::WHITE,
                paddle_glow: 15.0,
                brick_glow: 10.0,
            },
            Theme::Light => Self {
                paddle: Color::from_hex(CHARCOAL),
                ball: Color::WHITE,
                paddle_glow: 0.0,
                brick_glow: 0.0,
            },
        }
    }

    pub fn brick(hue: f32) -> Color {
        Color::from_hsl(hue, BRICK_SATURATION, BRICK_LIGHTNESS)
    }
}
