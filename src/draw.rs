//! Abstract drawing seam
//!
//! Bodies know how to draw themselves onto a [`DrawSurface`]; what a surface
//! actually is (a window, a framebuffer, nothing at all) is someone else's
//! problem. Purely cosmetic: nothing in the physics reads a color.

use serde::{Deserialize, Serialize};

use crate::sim::geometry::{Point, Rect};

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const DARK_GRAY: Color = Color::rgb(64, 64, 64);
    pub const RED: Color = Color::rgb(220, 50, 50);
    pub const GREEN: Color = Color::rgb(50, 200, 80);
    pub const BLUE: Color = Color::rgb(60, 100, 230);
    pub const YELLOW: Color = Color::rgb(240, 220, 60);
    pub const ORANGE: Color = Color::rgb(255, 160, 30);
    pub const CYAN: Color = Color::rgb(70, 210, 220);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// How a block face is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    pub color: Color,
}

impl Fill {
    pub const fn solid(color: Color) -> Self {
        Self { color }
    }
}

/// The surface bodies draw themselves onto
pub trait DrawSurface {
    fn fill_rect(&mut self, rect: &Rect, color: Color);
    fn draw_rect(&mut self, rect: &Rect, color: Color);
    fn fill_circle(&mut self, center: Point, radius: i32, color: Color);
    fn draw_circle(&mut self, center: Point, radius: i32, color: Color);
    fn draw_text(&mut self, x: f32, y: f32, text: &str, size: u32, color: Color);
}

/// Anything that can paint itself onto a surface
pub trait Drawable {
    fn draw(&self, surface: &mut dyn DrawSurface);
}

/// A surface that discards everything, for headless runs and tests
#[derive(Debug, Default)]
pub struct NullSurface;

impl DrawSurface for NullSurface {
    fn fill_rect(&mut self, _rect: &Rect, _color: Color) {}
    fn draw_rect(&mut self, _rect: &Rect, _color: Color) {}
    fn fill_circle(&mut self, _center: Point, _radius: i32, _color: Color) {}
    fn draw_circle(&mut self, _center: Point, _radius: i32, _color: Color) {}
    fn draw_text(&mut self, _x: f32, _y: f32, _text: &str, _size: u32, _color: Color) {}
}
