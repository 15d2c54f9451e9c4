// Drawing interface between the game and the renderer
//
// The game issues draw commands in world or screen space; the renderer decides
// how they reach the GPU. Tests use `RecordingCanvas` to check what was drawn.

use glam::{Vec2, Vec4};

use super::camera::Camera;
use super::texture::TextureHandle;

/// 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GOLD: Color = Color::rgb(255, 203, 0);

    /// Opaque color from sRGB components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Linear-light RGBA, as expected by an sRGB render target
    pub fn to_linear(self) -> Vec4 {
        Vec4::new(
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
            self.a as f32 / 255.0,
        )
    }
}

fn srgb_to_linear(component: u8) -> f32 {
    let c = component as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// A textured rectangle placed like a rotated sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexturedQuad {
    /// Where `origin` lands in the current space
    pub position: Vec2,
    /// Drawn size
    pub size: Vec2,
    /// Pivot, relative to the rectangle's top-left corner
    pub origin: Vec2,
    /// Clockwise rotation around the pivot, in degrees
    pub rotation: f32,
    pub tint: Color,
}

impl TexturedQuad {
    /// Corners (top-left, top-right, bottom-right, bottom-left) after rotation
    pub fn corners(&self) -> [Vec2; 4] {
        let rotation = Vec2::from_angle(self.rotation.to_radians());
        let local = [
            Vec2::ZERO,
            Vec2::new(self.size.x, 0.0),
            self.size,
            Vec2::new(0.0, self.size.y),
        ];
        local.map(|corner| self.position + rotation.rotate(corner - self.origin))
    }
}

/// Presentation sink for one frame
pub trait Canvas {
    /// Color behind everything drawn this frame
    fn clear_background(&mut self, color: Color);

    /// Start drawing in world space through `camera`
    fn begin_world(&mut self, camera: &Camera);

    /// Return to screen space (pixels, origin top-left)
    fn end_world(&mut self);

    /// Cover `[0, area]` with copies of `texture` at its native size
    fn draw_tiled(&mut self, texture: TextureHandle, area: Vec2);

    fn draw_texture(&mut self, texture: TextureHandle, quad: TexturedQuad);

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Text with its top-left corner at `position`; `size` is the line height
    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, color: Color);
}

/// A draw call captured by `RecordingCanvas`
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    BeginWorld { target: Vec2 },
    EndWorld,
    Tiled { texture: TextureHandle, area: Vec2 },
    Texture { texture: TextureHandle, quad: TexturedQuad },
    Circle { center: Vec2, radius: f32, color: Color },
    Text { text: String, position: Vec2, size: f32, color: Color },
}

/// Canvas that only records what it was asked to draw
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

#[cfg(test)]
impl Canvas for RecordingCanvas {
    fn clear_background(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn begin_world(&mut self, camera: &Camera) {
        self.commands.push(DrawCommand::BeginWorld {
            target: camera.target,
        });
    }

    fn end_world(&mut self) {
        self.commands.push(DrawCommand::EndWorld);
    }

    fn draw_tiled(&mut self, texture: TextureHandle, area: Vec2) {
        self.commands.push(DrawCommand::Tiled { texture, area });
    }

    fn draw_texture(&mut self, texture: TextureHandle, quad: TexturedQuad) {
        self.commands.push(DrawCommand::Texture { texture, quad });
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            size,
            color,
        });
    }
}
