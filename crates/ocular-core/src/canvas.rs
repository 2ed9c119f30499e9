//! Draw primitives the level renders through.
//!
//! The level never talks to a graphics API. A host backend implements
//! [`Canvas`]; textures are opaque handles handed out by the resource layer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::types::Rect;

/// Opaque texture handle. Id 0 is the null handle used when a load failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle {
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

impl TextureHandle {
    pub const NULL: TextureHandle = TextureHandle {
        id: 0,
        width: 0,
        height: 0,
    };

    pub fn is_null(&self) -> bool {
        self.id == 0
    }
}

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(230, 41, 55);
    pub const MAROON: Color = Color::rgb(190, 33, 55);
    pub const YELLOW: Color = Color::rgb(253, 249, 0);
    pub const ORANGE: Color = Color::rgb(255, 161, 0);
    pub const VIOLET: Color = Color::rgb(135, 60, 190);
    pub const BLUE: Color = Color::rgb(0, 121, 241);
    pub const DARKBLUE: Color = Color::rgb(0, 82, 172);
    pub const DARKGRAY: Color = Color::rgb(80, 80, 80);
}

/// Side-effecting draw primitives provided by the host.
pub trait Canvas {
    fn clear(&mut self, color: Color);

    /// Enter world space: everything until [`Canvas::end_camera`] is drawn
    /// relative to `target`, placed at screen `offset`.
    fn begin_camera(&mut self, target: Vec2, offset: Vec2, zoom: f32);

    fn end_camera(&mut self);

    fn draw_texture(&mut self, texture: TextureHandle, source: Rect, dest: Rect, tint: Color);

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn draw_circle_lines(&mut self, center: Vec2, radius: f32, color: Color);

    fn draw_rect(&mut self, rect: Rect, color: Color);

    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, color: Color);
}

/// Draw a texture only when the handle is live.
pub fn draw_texture_checked(
    canvas: &mut dyn Canvas,
    texture: TextureHandle,
    source: Rect,
    dest: Rect,
    tint: Color,
) {
    if texture.is_null() {
        return;
    }
    canvas.draw_texture(texture, source, dest, tint);
}
