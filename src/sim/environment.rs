//! The collision environment
//!
//! Owns every body a ball can strike, in insertion order. Membership is by
//! identity: the environment allocates an id per body, and removal targets
//! exactly the id that was added. Queries work on a snapshot of the set so a
//! hit listener may add or remove bodies while this frame's collision is
//! still being resolved.

use std::cell::RefCell;
use std::rc::Rc;

use super::block::Block;
use super::geometry::{Line, Point, Rect};
use super::paddle::Paddle;
use super::velocity::Velocity;
use crate::draw::{DrawSurface, Drawable};

/// Identity of a body registered in an environment
///
/// Allocated by [`Environment::allocate_id`]; there is deliberately no public
/// constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollidableId(u32);

impl CollidableId {
    pub(crate) fn new(raw: u32) -> Self {
        Self(raw)
    }
}

/// A registered rigid body
#[derive(Debug, Clone)]
pub enum Body {
    Block(Block),
    Paddle(Paddle),
}

impl Body {
    pub fn id(&self) -> CollidableId {
        match self {
            Body::Block(block) => block.id(),
            Body::Paddle(paddle) => paddle.id(),
        }
    }

    /// The rectangle collision queries run against
    pub fn collision_rect(&self) -> Rect {
        match self {
            Body::Block(block) => *block.rect(),
            Body::Paddle(paddle) => *paddle.rect(),
        }
    }

    /// Apply this body's hit response, mutating the velocity in place
    pub fn hit(&mut self, at: Point, velocity: &mut Velocity) {
        match self {
            Body::Block(block) => block.hit(at, velocity),
            Body::Paddle(paddle) => paddle.hit(at, velocity),
        }
    }
}

impl Drawable for Body {
    fn draw(&self, surface: &mut dyn DrawSurface) {
        match self {
            Body::Block(block) => block.draw(surface),
            Body::Paddle(paddle) => paddle.draw(surface),
        }
    }
}

/// The outcome of a closest-collision query: where, and against what
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    pub point: Point,
    pub collidable: CollidableId,
}

/// Shared handle onto one level's environment
///
/// Balls and listeners hold clones of this; the simulation is single-threaded
/// and interleaves borrows only at well-defined points, so a `RefCell` is all
/// the coordination required.
pub type SharedEnvironment = Rc<RefCell<Environment>>;

/// All collidable bodies of one level
#[derive(Debug, Default)]
pub struct Environment {
    collidables: Vec<Body>,
    next_id: u32,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a fresh environment into a shared handle
    pub fn new_shared() -> SharedEnvironment {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Allocate an identity for a body about to be constructed
    pub fn allocate_id(&mut self) -> CollidableId {
        self.next_id += 1;
        CollidableId::new(self.next_id)
    }

    /// Register a body; it keeps its position in insertion order
    pub fn add_collidable(&mut self, body: Body) {
        self.collidables.push(body);
    }

    /// Deregister by identity; removing a non-member is a no-op
    pub fn remove_collidable(&mut self, id: CollidableId) {
        self.collidables.retain(|body| body.id() != id);
    }

    pub fn contains(&self, id: CollidableId) -> bool {
        self.collidables.iter().any(|body| body.id() == id)
    }

    pub fn len(&self) -> usize {
        self.collidables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collidables.is_empty()
    }

    pub fn body(&self, id: CollidableId) -> Option<&Body> {
        self.collidables.iter().find(|body| body.id() == id)
    }

    pub fn body_mut(&mut self, id: CollidableId) -> Option<&mut Body> {
        self.collidables.iter_mut().find(|body| body.id() == id)
    }

    pub fn block(&self, id: CollidableId) -> Option<&Block> {
        match self.body(id) {
            Some(Body::Block(block)) => Some(block),
            _ => None,
        }
    }

    pub fn block_mut(&mut self, id: CollidableId) -> Option<&mut Block> {
        match self.body_mut(id) {
            Some(Body::Block(block)) => Some(block),
            _ => None,
        }
    }

    pub fn paddle_mut(&mut self, id: CollidableId) -> Option<&mut Paddle> {
        match self.body_mut(id) {
            Some(Body::Paddle(paddle)) => Some(paddle),
            _ => None,
        }
    }

    /// Nearest collision along a trajectory, or `None`
    ///
    /// Works on a snapshot of (id, rectangle) pairs so listener-driven
    /// add/remove during resolution cannot disturb an in-flight query.
    /// Tracks the minimum positive distance with a strictly-less-than
    /// comparison: among exact ties the body added first wins.
    pub fn closest_collision(&self, trajectory: &Line) -> Option<CollisionInfo> {
        let snapshot: Vec<(CollidableId, Rect)> = self
            .collidables
            .iter()
            .map(|body| (body.id(), body.collision_rect()))
            .collect();

        let mut min_distance = f32::INFINITY;
        let mut closest: Option<CollisionInfo> = None;

        for (id, rect) in snapshot {
            let Some(point) = trajectory.closest_intersection_to_start(&rect) else {
                continue;
            };
            let distance = trajectory.start().distance(point);
            if distance == 0.0 {
                // Already touching: not a collision this tick
                continue;
            }
            if distance < min_distance {
                min_distance = distance;
                closest = Some(CollisionInfo {
                    point,
                    collidable: id,
                });
            }
        }

        closest
    }

    /// Dispatch a resolved collision to the struck body
    ///
    /// Mutates the velocity per the body's hit response. Returns a detached
    /// copy of the struck block (post-hit state, listener handles included)
    /// when the body is one, so the caller can run notification without
    /// borrowing the environment.
    pub fn resolve_hit(
        &mut self,
        id: CollidableId,
        at: Point,
        velocity: &mut Velocity,
    ) -> Option<Block> {
        match self.body_mut(id) {
            Some(Body::Block(block)) => {
                block.hit(at, velocity);
                Some(block.clone())
            }
            Some(Body::Paddle(paddle)) => {
                paddle.hit(at, velocity);
                None
            }
            // The body vanished between query and response; nothing to do
            None => None,
        }
    }

    /// Draw every registered body
    pub fn draw_collidables(&self, surface: &mut dyn DrawSurface) {
        for body in &self.collidables {
            body.draw(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Point;

    fn wall(env: &mut Environment, x: f32, y: f32, w: f32, h: f32) -> CollidableId {
        let id = env.allocate_id();
        env.add_collidable(Body::Block(Block::wall(id, Rect::from_coords(x, y, w, h))));
        id
    }

    #[test]
    fn removal_is_by_identity_and_tolerates_non_members() {
        let mut env = Environment::new();
        let a = wall(&mut env, 0.0, 0.0, 10.0, 10.0);
        let b = wall(&mut env, 20.0, 0.0, 10.0, 10.0);
        assert_eq!(env.len(), 2);

        env.remove_collidable(a);
        assert!(!env.contains(a));
        assert!(env.contains(b));

        env.remove_collidable(a); // no-op
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn closest_collision_prefers_the_nearer_body() {
        let mut env = Environment::new();
        let far = wall(&mut env, 200.0, 90.0, 10.0, 40.0);
        let near = wall(&mut env, 120.0, 90.0, 10.0, 40.0);
        let _ = far;

        let trajectory = Line::new(Point::new(100.0, 100.0), Point::new(300.0, 100.0));
        let info = env.closest_collision(&trajectory).unwrap();
        assert_eq!(info.collidable, near);
        assert_eq!(info.point, Point::new(120.0, 100.0));
    }

    #[test]
    fn equidistant_bodies_resolve_to_the_first_added() {
        let mut env = Environment::new();
        // Two walls sharing the same left edge at x=120
        let first = wall(&mut env, 120.0, 50.0, 10.0, 60.0);
        let second = wall(&mut env, 120.0, 90.0, 10.0, 60.0);
        let _ = second;

        let trajectory = Line::new(Point::new(100.0, 100.0), Point::new(300.0, 100.0));
        let info = env.closest_collision(&trajectory).unwrap();
        assert_eq!(info.collidable, first);
    }

    #[test]
    fn touching_a_boundary_is_not_a_collision() {
        let mut env = Environment::new();
        wall(&mut env, 110.0, 90.0, 10.0, 40.0);

        // Start exactly on the wall's left edge, moving away from it
        let trajectory = Line::new(Point::new(110.0, 100.0), Point::new(90.0, 100.0));
        assert_eq!(env.closest_collision(&trajectory), None);
    }

    #[test]
    fn no_bodies_means_no_collision() {
        let env = Environment::new();
        let trajectory = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert_eq!(env.closest_collision(&trajectory), None);
    }
}
