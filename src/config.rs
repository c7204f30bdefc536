//! Game configuration
//!
//! One plain value carrying the arena dimensions and game rules, passed
//! explicitly to the components that need it. Defaults reproduce the classic
//! 800x600 arena.

use serde::{Deserialize, Serialize};

/// Arena dimensions, timing and rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Arena width in pixels
    pub width: f32,
    /// Arena height in pixels
    pub height: f32,
    /// Border wall thickness
    pub margin: f32,
    /// Target frame rate for the animation runner
    pub frames_per_sec: u32,
    /// Paddle height in pixels
    pub paddle_height: f32,
    /// Status bar height in pixels
    pub status_bar_height: f32,
    /// Lives at the start of a run
    pub lives: i32,
    /// Entries kept in the high-score table
    pub scores_to_keep: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            margin: 5.0,
            frames_per_sec: 60,
            paddle_height: 20.0,
            status_bar_height: 20.0,
            lives: 7,
            scores_to_keep: 5,
        }
    }
}

impl GameConfig {
    /// Y coordinate of the paddle's upper edge
    pub fn paddle_y(&self) -> f32 {
        self.height - self.paddle_height - self.margin
    }

    /// Where new balls are served from, just above the paddle
    pub fn ball_spawn_y(&self) -> f32 {
        self.paddle_y() - 10.0
    }
}
