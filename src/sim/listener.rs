//! Hit observers
//!
//! Every block carries an explicit list of listener handles. Notification is
//! synchronous and runs over a copy of the list, so a listener is free to
//! add or remove listeners - or whole bodies - while being notified. The
//! stock listeners cover the three gameplay jobs: retiring spent blocks,
//! retiring balls that reach the death region, and scoring.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::ball::Ball;
use super::block::Block;
use super::environment::SharedEnvironment;
use crate::counter::Counter;

/// Observer of block hits
///
/// `being_hit` is a detached copy of the struck block taken after its hit
/// response ran, so the hit points and fill are post-hit and the listener can
/// freely mutate the environment it holds a handle to.
pub trait HitListener {
    fn hit_event(&mut self, being_hit: &Block, hitter: &mut Ball);
}

/// A shared, identity-comparable listener handle
pub type HitListenerHandle = Rc<RefCell<dyn HitListener>>;

/// Wrap a listener into a handle
pub fn listener_handle<L: HitListener + 'static>(listener: L) -> HitListenerHandle {
    Rc::new(RefCell::new(listener))
}

/// The listener list a block carries
#[derive(Clone, Default)]
pub struct HitListeners {
    handles: Vec<HitListenerHandle>,
}

impl HitListeners {
    pub fn add(&mut self, listener: HitListenerHandle) {
        self.handles.push(listener);
    }

    /// Remove by handle identity; absent handles are a no-op
    pub fn remove(&mut self, listener: &HitListenerHandle) {
        self.handles.retain(|handle| !Rc::ptr_eq(handle, listener));
    }

    /// Copy of the list for tolerant iteration
    pub fn handles(&self) -> Vec<HitListenerHandle> {
        self.handles.clone()
    }
}

impl fmt::Debug for HitListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HitListeners")
            .field("count", &self.handles.len())
            .finish()
    }
}

/// Removes a block from the environment once its hit points are spent
pub struct BlockRemover {
    environment: SharedEnvironment,
    remaining_blocks: Counter,
}

impl BlockRemover {
    pub fn new(environment: SharedEnvironment, remaining_blocks: Counter) -> Self {
        Self {
            environment,
            remaining_blocks,
        }
    }
}

impl HitListener for BlockRemover {
    fn hit_event(&mut self, being_hit: &Block, _hitter: &mut Ball) {
        if being_hit.hit_points() == Some(0) {
            self.environment.borrow_mut().remove_collidable(being_hit.id());
            self.remaining_blocks.decrease(1);
            log::debug!("block {:?} destroyed", being_hit.id());
        }
    }
}

/// Retires any ball that strikes the body it is attached to
///
/// Wired to the death region below the arena. The reflection response has
/// already run by the time this fires, so the ball bounces once and is then
/// dropped from play at the end of its tick.
pub struct BallRemover {
    balls_left: Counter,
}

impl BallRemover {
    pub fn new(balls_left: Counter) -> Self {
        Self { balls_left }
    }
}

impl HitListener for BallRemover {
    fn hit_event(&mut self, _being_hit: &Block, hitter: &mut Ball) {
        hitter.retire();
        self.balls_left.decrease(1);
        log::debug!("ball lost, {} left", self.balls_left.value());
    }
}

/// Scores block hits: 5 per hit, 10 more when the block is destroyed
pub struct ScoreTracker {
    score: Counter,
}

impl ScoreTracker {
    pub fn new(score: Counter) -> Self {
        Self { score }
    }
}

impl HitListener for ScoreTracker {
    fn hit_event(&mut self, being_hit: &Block, _hitter: &mut Ball) {
        match being_hit.hit_points() {
            Some(0) => self.score.increase(10),
            Some(_) => self.score.increase(5),
            // Walls are worth nothing
            None => {}
        }
    }
}
