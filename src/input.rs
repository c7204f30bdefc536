//! Key-state seam for the paddle
//!
//! The paddle asks two boolean questions once per frame and owns no event
//! queue. Real keyboards live outside this crate; tests and the demo binary
//! use [`SharedInput`], a handle whose writer half is just another clone.

use std::cell::Cell;
use std::rc::Rc;

/// Per-frame boolean key queries consumed by the paddle
pub trait KeySource {
    fn left_pressed(&self) -> bool;
    fn right_pressed(&self) -> bool;
}

/// A clonable in-memory key state
///
/// One clone goes to the paddle, another stays with whoever decides what is
/// "pressed" this frame.
#[derive(Debug, Clone, Default)]
pub struct SharedInput {
    left: Rc<Cell<bool>>,
    right: Rc<Cell<bool>>,
}

impl SharedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_left(&self, pressed: bool) {
        self.left.set(pressed);
    }

    pub fn set_right(&self, pressed: bool) {
        self.right.set(pressed);
    }

    pub fn release_all(&self) {
        self.left.set(false);
        self.right.set(false);
    }
}

impl KeySource for SharedInput {
    fn left_pressed(&self) -> bool {
        self.left.get()
    }

    fn right_pressed(&self) -> bool {
        self.right.get()
    }
}
