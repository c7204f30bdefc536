//! The player's paddle
//!
//! A keyboard-driven rectangle pinned to the bottom of the arena. Its top
//! surface is split into five equal zones that steer the ball: the further
//! from center the hit lands, the steeper the outgoing angle. One paddle is
//! owned per level and reconfigured in place between turns, so environment
//! references to it never go stale.

use std::fmt;
use std::rc::Rc;

use super::environment::CollidableId;
use super::geometry::{Point, Rect};
use super::velocity::Velocity;
use crate::GameConfig;
use crate::draw::{Color, DrawSurface, Drawable};
use crate::input::KeySource;

/// Number of steering zones across the paddle's top surface
const ZONES: u32 = 5;
/// Outgoing angle for the leftmost zone, degrees from vertical-up
const FIRST_ZONE_ANGLE: f32 = -60.0;
/// Angle step between adjacent zones, degrees
const ZONE_ANGLE_STEP: f32 = 30.0;

const FILL_COLOR: Color = Color::ORANGE;
const BORDER_COLOR: Color = Color::DARK_GRAY;

/// The player-controlled paddle
#[derive(Clone)]
pub struct Paddle {
    id: CollidableId,
    rect: Rect,
    /// Movement speed, pixels per second
    step: f32,
    keyboard: Rc<dyn KeySource>,
    /// Leftmost x the paddle may occupy
    min_x: f32,
    /// Rightmost x the paddle's right edge may reach
    max_x: f32,
}

impl Paddle {
    /// Create a paddle centered at the bottom of the arena
    pub fn new(
        id: CollidableId,
        keyboard: Rc<dyn KeySource>,
        step: f32,
        width: f32,
        config: &GameConfig,
    ) -> Self {
        let mut paddle = Self {
            id,
            rect: Rect::new(
                Point::new(0.0, config.paddle_y()),
                width,
                config.paddle_height,
            ),
            step,
            keyboard,
            min_x: config.margin,
            max_x: config.width - config.margin,
        };
        paddle.recenter();
        paddle
    }

    #[inline]
    pub fn id(&self) -> CollidableId {
        self.id
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Give the paddle a new speed and width and recenter it
    ///
    /// Reconfiguring the existing instance (rather than replacing it) keeps
    /// the id registered in the environment valid across turns.
    pub fn reconfigure(&mut self, step: f32, width: f32) {
        self.step = step;
        self.rect.set_width(width);
        self.recenter();
    }

    /// Snap back to the horizontal center of the arena
    pub fn recenter(&mut self) {
        let arena_center = (self.min_x + self.max_x) / 2.0;
        let mut upper_left = self.rect.upper_left();
        upper_left.set_x(arena_center - self.rect.width() / 2.0);
        self.rect.set_upper_left(upper_left);
    }

    /// Consume this frame's key state and move; left wins when both are held
    pub fn time_step(&mut self, dt: f32) {
        if self.keyboard.left_pressed() {
            self.move_left(dt);
        } else if self.keyboard.right_pressed() {
            self.move_right(dt);
        }
    }

    /// Move left, clamped to the arena margin
    pub fn move_left(&mut self, dt: f32) {
        let distance = self.step * dt;
        let mut upper_left = self.rect.upper_left();
        let x = (upper_left.x() - distance).max(self.min_x);
        upper_left.set_x(x);
        self.rect.set_upper_left(upper_left);
    }

    /// Move right, clamped to the arena margin
    pub fn move_right(&mut self, dt: f32) {
        let distance = self.step * dt;
        let mut upper_left = self.rect.upper_left();
        let x = (upper_left.x() + distance).min(self.max_x - self.rect.width());
        upper_left.set_x(x);
        self.rect.set_upper_left(upper_left);
    }

    /// Collision response: steer off the top surface, reflect off the rest
    ///
    /// A hit on the top edge - or on an upper corner while the ball moves
    /// downward - remaps the outgoing angle by zone at unchanged speed; the
    /// center zone means "straight bounce" and just reverses Y. Side hits,
    /// bottom hits and upper-corner hits while moving upward reflect X only.
    pub fn hit(&mut self, at: Point, velocity: &mut Velocity) {
        let x = at.x().round() as i32;
        let y = at.y().round() as i32;
        let left = self.rect.upper_left().x().round() as i32;
        let right = (self.rect.upper_left().x() + self.rect.width()).round() as i32;
        let top = self.rect.upper_left().y().round() as i32;
        let bottom = (self.rect.upper_left().y() + self.rect.height()).round() as i32;
        let upper_corner = self.rect.is_upper_corner(at);
        let going_up = velocity.dy() < 0.0;
        let going_down = velocity.dy() > 0.0;

        // Corner points also lie on the top edge, so the top-surface branch
        // must exclude them: a corner steers only while the ball descends.
        if (y == top && !upper_corner) || (upper_corner && going_down) {
            let angle = self.bounce_angle(at.x());
            if angle == 0.0 {
                velocity.reverse_y();
            } else {
                velocity.set_angle(angle);
            }
        } else if x == left || x == right || (upper_corner && going_up) || y == bottom {
            velocity.reverse_x();
        }
    }

    /// Outgoing angle (radians) for a hit at the given x, scanning the five
    /// zones left to right; first matching zone wins
    fn bounce_angle(&self, x: f32) -> f32 {
        let zone_width = self.rect.width() / ZONES as f32;
        let left = self.rect.upper_left().x();

        for zone in 1..ZONES {
            if x <= left + zone as f32 * zone_width {
                return (FIRST_ZONE_ANGLE + (zone - 1) as f32 * ZONE_ANGLE_STEP).to_radians();
            }
        }
        (FIRST_ZONE_ANGLE + (ZONES - 1) as f32 * ZONE_ANGLE_STEP).to_radians()
    }
}

impl Drawable for Paddle {
    fn draw(&self, surface: &mut dyn DrawSurface) {
        surface.fill_rect(&self.rect, FILL_COLOR);
        surface.draw_rect(&self.rect, BORDER_COLOR);
    }
}

impl fmt::Debug for Paddle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paddle")
            .field("id", &self.id)
            .field("rect", &self.rect)
            .field("step", &self.step)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::SharedInput;

    const TOLERANCE: f32 = 1e-3;

    fn paddle(width: f32) -> (Paddle, SharedInput) {
        let input = SharedInput::new();
        let paddle = Paddle::new(
            CollidableId::new(1),
            Rc::new(input.clone()),
            300.0,
            width,
            &GameConfig::default(),
        );
        (paddle, input)
    }

    #[test]
    fn spawns_centered() {
        let (paddle, _input) = paddle(100.0);
        assert_eq!(paddle.rect().upper_left(), Point::new(350.0, 575.0));
    }

    #[test]
    fn movement_follows_keys_and_left_wins() {
        let (mut paddle, input) = paddle(100.0);
        let x0 = paddle.rect().upper_left().x();

        input.set_right(true);
        paddle.time_step(0.1);
        assert_eq!(paddle.rect().upper_left().x(), x0 + 30.0);

        input.set_left(true); // both held: left takes precedence
        paddle.time_step(0.1);
        assert_eq!(paddle.rect().upper_left().x(), x0);
    }

    #[test]
    fn movement_clamps_to_margins() {
        let (mut paddle, input) = paddle(100.0);
        input.set_left(true);
        for _ in 0..100 {
            paddle.time_step(0.1);
        }
        assert_eq!(paddle.rect().upper_left().x(), 5.0);

        input.release_all();
        input.set_right(true);
        for _ in 0..100 {
            paddle.time_step(0.1);
        }
        assert_eq!(paddle.rect().upper_left().x(), 695.0);
    }

    #[test]
    fn reconfigure_resizes_and_recenters_in_place() {
        let (mut paddle, input) = paddle(100.0);
        input.set_left(true);
        paddle.time_step(1.0);

        paddle.reconfigure(200.0, 160.0);
        assert_eq!(paddle.step(), 200.0);
        assert_eq!(paddle.rect().width(), 160.0);
        assert_eq!(paddle.rect().upper_left(), Point::new(320.0, 575.0));
    }

    #[test]
    fn leftmost_zone_steers_hard_left() {
        let (mut paddle, _input) = paddle(100.0);
        let top_left = paddle.rect().upper_left();
        let mut v = Velocity::new(0.0, 80.0);

        paddle.hit(top_left, &mut v);
        // -60 degrees from vertical-up at unchanged speed
        let expected = Velocity::from_angle_and_speed((-60.0f32).to_radians(), 80.0);
        assert!((v.dx() - expected.dx()).abs() < TOLERANCE);
        assert!((v.dy() - expected.dy()).abs() < TOLERANCE);
        assert!((v.speed() - 80.0).abs() < TOLERANCE);
    }

    #[test]
    fn rightmost_zone_steers_hard_right() {
        let (mut paddle, _input) = paddle(100.0);
        let top_right = paddle.rect().upper_right();
        let mut v = Velocity::new(-10.0, 80.0);
        let speed = v.speed();

        paddle.hit(top_right, &mut v);
        let expected = Velocity::from_angle_and_speed(60.0f32.to_radians(), speed);
        assert!((v.dx() - expected.dx()).abs() < TOLERANCE);
        assert!((v.dy() - expected.dy()).abs() < TOLERANCE);
        assert!((v.speed() - speed).abs() < TOLERANCE);
    }

    #[test]
    fn center_zone_bounces_straight() {
        let (mut paddle, _input) = paddle(100.0);
        let top = paddle.rect().upper_left();
        let center = Point::new(top.x() + 50.0, top.y());
        let mut v = Velocity::new(12.0, 80.0);

        paddle.hit(center, &mut v);
        assert_eq!((v.dx(), v.dy()), (12.0, -80.0));
    }

    #[test]
    fn side_hits_reflect_x_only() {
        let (mut paddle, _input) = paddle(100.0);
        let left_side = Point::new(
            paddle.rect().upper_left().x(),
            paddle.rect().upper_left().y() + 10.0,
        );
        let mut v = Velocity::new(40.0, 20.0);

        paddle.hit(left_side, &mut v);
        assert_eq!((v.dx(), v.dy()), (-40.0, 20.0));
    }

    #[test]
    fn upper_corner_while_rising_reflects_x() {
        let (mut paddle, _input) = paddle(100.0);
        let corner = paddle.rect().upper_left();
        let mut v = Velocity::new(40.0, -20.0);

        paddle.hit(corner, &mut v);
        assert_eq!((v.dx(), v.dy()), (-40.0, -20.0));
    }

    #[test]
    fn zone_boundaries_scan_left_to_right() {
        let (paddle, _input) = paddle(100.0);
        let left = paddle.rect().upper_left().x();

        // Exact zone edges belong to the zone on their left
        assert_eq!(
            paddle.bounce_angle(left + 20.0),
            (-60.0f32).to_radians()
        );
        assert_eq!(paddle.bounce_angle(left + 40.0), (-30.0f32).to_radians());
        assert_eq!(paddle.bounce_angle(left + 60.0), 0.0);
        assert_eq!(paddle.bounce_angle(left + 80.0), 30.0f32.to_radians());
        assert_eq!(paddle.bounce_angle(left + 100.0), 60.0f32.to_radians());
    }
}
