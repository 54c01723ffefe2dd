//! Headless surface that records draw calls

use glam::Vec2;

use super::{Color, Glow, Surface};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Glow(Option<Glow>),
    Rect {
        pos: Vec2,
        width: f32,
        height: f32,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
}

/// Surface that keeps every command since the last [`take_commands`]
///
/// [`take_commands`]: RecordingSurface::take_commands
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            frames: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of clears seen (one per rendered frame)
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The glow in effect for each fill, in draw order
    pub fn glow_per_fill(commands: &[DrawCommand]) -> Vec<Option<Glow>> {
        let mut current = None;
        let mut glows = Vec::new();
        for command in commands {
            match command {
                DrawCommand::Clear => current = None,
                DrawCommand::Glow(glow) => current = *glow,
                DrawCommand::Rect { .. } | DrawCommand::Circle { .. } => glows.push(current),
            }
        }
        glows
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        // Only the latest frame matters for a headless target
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.frames += 1;
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.commands.push(DrawCommand::Glow(glow));
    }

    fn fill_rect(&mut self, pos: Vec2, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::Rect {
            pos,
            width,
            height,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }
}
