//! Rendering module
//!
//! The game paints through the [`Surface`] trait: clear, filled rectangles,
//! filled circles and a glow (shadow blur) setting. Backends are the browser
//! canvas on web and a command recorder everywhere else.

pub mod color;
pub mod draw;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use color::{Color, Palette};
pub use draw::render;
pub use recording::{DrawCommand, RecordingSurface};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

/// Glow applied to subsequent fills until cleared
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub blur: f32,
    pub color: Color,
}

/// A fixed-size 2D drawing target
pub trait Surface {
    /// Size in pixels
    fn size(&self) -> (f32, f32);
    /// Erase everything
    fn clear(&mut self);
    /// Set or remove the glow for following fills
    fn set_glow(&mut self, glow: Option<Glow>);
    fn fill_rect(&mut self, pos: Vec2, width: f32, height: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
}
