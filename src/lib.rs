//! Brickbreak - a classic brick-breaking arcade engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, ball/paddle/block physics)
//! - `level`: Level descriptions and per-turn orchestration
//! - `game`: Level sequencing across a whole run
//! - `runner`: Fixed-rate frame pacing
//! - `draw` / `input`: Abstract seams for rendering and key state
//! - `highscores`: Leaderboard table with reader/writer persistence

pub mod config;
pub mod counter;
pub mod draw;
pub mod game;
pub mod highscores;
pub mod input;
pub mod level;
pub mod runner;
pub mod sim;
pub mod status;

pub use config::GameConfig;
pub use counter::Counter;
pub use highscores::{HighScoresTable, ScoreInfo};
pub use level::{Level, LevelSpec};
