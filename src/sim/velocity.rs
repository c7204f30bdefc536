//! Ball velocity: a 2-D displacement per second
//!
//! Speed is an invariant of reflection: `reverse_x`/`reverse_y` flip one
//! component and leave the magnitude untouched. Only an explicit angle
//! reassignment recomputes the components, and it does so from the current
//! speed, never from a configured constant.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// Velocity in pixels per second
///
/// Angles are measured in radians from vertical-up: 0 points straight up the
/// screen, positive angles lean right (screen y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Velocity(Vec2);

impl Velocity {
    /// Velocity from per-axis components
    pub fn new(dx: f32, dy: f32) -> Self {
        Self(Vec2::new(dx, dy))
    }

    /// Velocity from a direction angle (radians from vertical-up) and speed
    pub fn from_angle_and_speed(angle: f32, speed: f32) -> Self {
        Self(Vec2::new(angle.sin() * speed, -angle.cos() * speed))
    }

    #[inline]
    pub fn dx(&self) -> f32 {
        self.0.x
    }

    #[inline]
    pub fn dy(&self) -> f32 {
        self.0.y
    }

    /// Current speed (vector magnitude)
    pub fn speed(&self) -> f32 {
        self.0.length()
    }

    /// Reflect off a vertical surface
    pub fn reverse_x(&mut self) {
        self.0.x = -self.0.x;
    }

    /// Reflect off a horizontal surface
    pub fn reverse_y(&mut self) {
        self.0.y = -self.0.y;
    }

    /// Point the velocity in a new direction, preserving the current speed
    pub fn set_angle(&mut self, angle: f32) {
        let speed = self.speed();
        self.0 = Vec2::new(angle.sin() * speed, -angle.cos() * speed);
    }

    /// Where a point ends up after `dt` seconds at this velocity
    pub fn apply_to(&self, point: Point, dt: f32) -> Point {
        Point::from_vec2(point.to_vec2() + self.0 * dt)
    }

    #[inline]
    pub fn to_vec2(&self) -> Vec2 {
        self.0
    }
}
