//! Deterministic simulation module
//!
//! All gameplay physics lives here. This module must stay pure and
//! deterministic: fixed timestep only, stable insertion-order iteration, no
//! rendering or platform dependencies. Coordinates are quantized to whole
//! pixels throughout; see `geometry` for the rounding rules everything else
//! leans on.

pub mod ball;
pub mod block;
pub mod environment;
pub mod geometry;
pub mod listener;
pub mod paddle;
pub mod velocity;

pub use ball::Ball;
pub use block::{Block, HitPoints, reflect_off};
pub use environment::{Body, CollidableId, CollisionInfo, Environment, SharedEnvironment};
pub use geometry::{Line, Point, Rect};
pub use listener::{
    BallRemover, BlockRemover, HitListener, HitListenerHandle, ScoreTracker, listener_handle,
};
pub use paddle::Paddle;
pub use velocity::Velocity;
