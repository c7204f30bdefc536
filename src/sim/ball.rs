//! Ball motion and collision resolution
//!
//! Each tick a ball computes the segment it intends to traverse, asks the
//! environment for the nearest body in the way, and either completes the move
//! or stops just short of the impact, lets the struck body rewrite its
//! velocity, and notifies the body's hit listeners.

use super::environment::{CollisionInfo, SharedEnvironment};
use super::geometry::{Line, Point};
use super::velocity::Velocity;
use crate::draw::{Color, DrawSurface, Drawable};

/// Fraction of the per-tick displacement to back off from a collision point,
/// so floating overshoot cannot re-collide with the same surface next tick
const BACKOFF: f32 = 0.01;

/// A moving ball
///
/// The environment handle is attached after construction and before the first
/// tick; stepping a ball without one is a programming error and fails fast.
#[derive(Debug, Clone)]
pub struct Ball {
    center: Point,
    radius: i32,
    color: Color,
    velocity: Velocity,
    environment: Option<SharedEnvironment>,
    in_play: bool,
}

impl Ball {
    /// Create a stationary ball; give it a velocity and an environment before
    /// stepping it
    pub fn new(center: Point, radius: i32, color: Color) -> Self {
        Self {
            center,
            radius,
            color,
            velocity: Velocity::new(0.0, 0.0),
            environment: None,
            in_play: true,
        }
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    #[inline]
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Velocity) {
        self.velocity = velocity;
    }

    pub fn set_center(&mut self, x: f32, y: f32) {
        self.center = Point::new(x, y);
    }

    /// Attach the environment this ball collides against
    pub fn set_environment(&mut self, environment: SharedEnvironment) {
        self.environment = Some(environment);
    }

    /// Whether the ball is still in play
    pub fn in_play(&self) -> bool {
        self.in_play
    }

    /// Take the ball out of play at the end of its current tick
    pub fn retire(&mut self) {
        self.in_play = false;
    }

    /// Advance one tick: move freely, or resolve the nearest collision
    pub fn move_one_step(&mut self, dt: f32) {
        let environment = self
            .environment
            .clone()
            .expect("ball stepped before an environment was attached");

        let trajectory = self.trajectory(dt);
        let collision = environment.borrow().closest_collision(&trajectory);

        match collision {
            None => self.center = trajectory.end(),
            Some(info) => self.resolve_collision(&environment, info, dt),
        }
    }

    /// The segment this ball intends to traverse in one tick
    fn trajectory(&self, dt: f32) -> Line {
        Line::new(self.center, self.velocity.apply_to(self.center, dt))
    }

    fn resolve_collision(&mut self, environment: &SharedEnvironment, info: CollisionInfo, dt: f32) {
        // Stop just short of the impact point
        let backoff = self.velocity.to_vec2() * dt * BACKOFF;
        self.set_center(info.point.x() - backoff.x, info.point.y() - backoff.y);

        // The struck body rewrites the velocity in place; the environment
        // borrow ends before any listener runs, so listeners may freely
        // mutate the body set through their own handles.
        let struck_block = environment
            .borrow_mut()
            .resolve_hit(info.collidable, info.point, &mut self.velocity);

        if let Some(block) = struck_block {
            log::debug!(
                "ball hit block {:?} at ({}, {})",
                block.id(),
                info.point.x(),
                info.point.y()
            );
            for listener in block.listener_handles() {
                listener.borrow_mut().hit_event(&block, self);
            }
        }
    }
}

impl Drawable for Ball {
    fn draw(&self, surface: &mut dyn DrawSurface) {
        surface.fill_circle(self.center, self.radius, self.color);
        surface.draw_circle(self.center, self.radius, Color::BLACK);
    }
}
