//! Blocks and walls
//!
//! A block is a rectangle the ball bounces off. Destructible blocks count
//! down hit points and may swap their fill per remaining count; walls are
//! blocks whose hit points never decrease. The corner/side classification
//! here is the shared reflection rule for every plain rectangular body.

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use super::environment::CollidableId;
use super::geometry::{Point, Rect};
use super::listener::{HitListenerHandle, HitListeners};
use super::velocity::Velocity;
use crate::draw::{Color, DrawSurface, Drawable, Fill};

/// Remaining durability of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitPoints {
    /// Counts down by one per hit; the block is spent at zero
    Hits(u32),
    /// Never decreases; walls and armor blocks
    Unbreakable,
}

/// A rectangular body the ball collides with
#[derive(Debug, Clone)]
pub struct Block {
    id: CollidableId,
    rect: Rect,
    hit_points: HitPoints,
    default_fill: Option<Fill>,
    fills: BTreeMap<u32, Fill>,
    current_fill: Fill,
    stroke: Option<Color>,
    listeners: HitListeners,
}

impl Block {
    /// Create a block, validating that every reachable hit-point count has a
    /// fill (a per-count override or the default)
    pub fn new(
        id: CollidableId,
        rect: Rect,
        hit_points: HitPoints,
        default_fill: Option<Fill>,
        fills: BTreeMap<u32, Fill>,
        stroke: Option<Color>,
    ) -> Result<Self> {
        let current_fill = match hit_points {
            HitPoints::Hits(0) => bail!("block needs at least one hit point"),
            HitPoints::Hits(count) => {
                for remaining in 1..=count {
                    if default_fill.is_none() && !fills.contains_key(&remaining) {
                        bail!("block has no fill for {remaining} remaining hit point(s)");
                    }
                }
                fills
                    .get(&count)
                    .copied()
                    .or(default_fill)
                    .unwrap_or(Fill::solid(Color::BLACK))
            }
            HitPoints::Unbreakable => match default_fill {
                Some(fill) => fill,
                None => bail!("unbreakable block needs a default fill"),
            },
        };

        Ok(Self {
            id,
            rect,
            hit_points,
            default_fill,
            fills,
            current_fill,
            stroke,
            listeners: HitListeners::default(),
        })
    }

    /// A screen-border wall: an unbreakable black block
    pub fn wall(id: CollidableId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            hit_points: HitPoints::Unbreakable,
            default_fill: Some(Fill::solid(Color::BLACK)),
            fills: BTreeMap::new(),
            current_fill: Fill::solid(Color::BLACK),
            stroke: Some(Color::BLACK),
            listeners: HitListeners::default(),
        }
    }

    #[inline]
    pub fn id(&self) -> CollidableId {
        self.id
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    /// Remaining hit points, or `None` for unbreakable blocks
    pub fn hit_points(&self) -> Option<u32> {
        match self.hit_points {
            HitPoints::Hits(count) => Some(count),
            HitPoints::Unbreakable => None,
        }
    }

    pub fn current_fill(&self) -> Fill {
        self.current_fill
    }

    /// Register a hit listener
    pub fn add_hit_listener(&mut self, listener: HitListenerHandle) {
        self.listeners.add(listener);
    }

    /// Unregister a previously added listener (matched by handle identity)
    pub fn remove_hit_listener(&mut self, listener: &HitListenerHandle) {
        self.listeners.remove(listener);
    }

    /// Copy of the listener list, so callers can notify while the set mutates
    pub fn listener_handles(&self) -> Vec<HitListenerHandle> {
        self.listeners.handles()
    }

    /// Collision response: count the hit, refresh the fill, reflect
    pub fn hit(&mut self, at: Point, velocity: &mut Velocity) {
        if let HitPoints::Hits(count) = self.hit_points {
            if count > 0 {
                self.hit_points = HitPoints::Hits(count - 1);
            }
        }
        if let HitPoints::Hits(count) = self.hit_points {
            if count > 0 {
                self.current_fill = self
                    .fills
                    .get(&count)
                    .copied()
                    .or(self.default_fill)
                    .unwrap_or(self.current_fill);
            }
        }

        reflect_off(&self.rect, at, velocity);
    }
}

impl Drawable for Block {
    fn draw(&self, surface: &mut dyn DrawSurface) {
        if let Some(stroke) = self.stroke {
            surface.draw_rect(&self.rect, stroke);
        }
        surface.fill_rect(&self.rect, self.current_fill.color);
    }
}

/// Reflect a velocity off a rectangle struck at `at`
///
/// Corner hits (rounded match against one of the four corners) are
/// disambiguated by the incoming vertical motion; everything else is
/// classified against the four sides.
pub fn reflect_off(rect: &Rect, at: Point, velocity: &mut Velocity) {
    if rect.is_lower_corner(at) || rect.is_upper_corner(at) {
        reflect_at_corner(rect, at, velocity);
    } else {
        reflect_at_side(rect, at, velocity);
    }
}

fn reflect_at_corner(rect: &Rect, at: Point, velocity: &mut Velocity) {
    if rect.is_lower_corner(at) {
        if velocity.dy() < 0.0 {
            // moving up into the underside
            velocity.reverse_y();
        }
        // TODO: a ball moving down through a lower corner keeps its heading;
        // decide whether it should reflect X like a side hit instead.
    } else if velocity.dy() > 0.0 {
        // moving down onto the top
        velocity.reverse_y();
    } else {
        // moving up past an upper corner clips the side
        velocity.reverse_x();
    }
}

fn reflect_at_side(rect: &Rect, at: Point, velocity: &mut Velocity) {
    let left = rect.upper_left().x().round() as i32;
    let right = (rect.upper_left().x() + rect.width()).round() as i32;
    let top = rect.upper_left().y().round() as i32;
    let bottom = (rect.upper_left().y() + rect.height()).round() as i32;
    let x = at.x().round() as i32;
    let y = at.y().round() as i32;

    if x == left || x == right {
        velocity.reverse_x();
    } else if y == top || y == bottom {
        velocity.reverse_y();
    }
    // A point on neither boundary should not happen for a true intersection;
    // the velocity is left unchanged.
}
