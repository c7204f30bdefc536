//! High score leaderboard
//!
//! A capacity-bounded table sorted by score, highest first. Persistence is a
//! reader/writer seam: the table serializes itself as JSON to whatever the
//! caller hands it, and owns no file paths.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default number of entries kept
pub const DEFAULT_CAPACITY: usize = 5;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreInfo {
    /// Player's name
    pub name: String,
    /// Player's final score
    pub score: i32,
}

impl ScoreInfo {
    pub fn new(name: impl Into<String>, score: i32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// The leaderboard table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoresTable {
    capacity: usize,
    entries: Vec<ScoreInfo>,
}

impl Default for HighScoresTable {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl HighScoresTable {
    /// Create an empty table keeping at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn entries(&self) -> &[ScoreInfo] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a score would make it onto the table
    pub fn qualifies(&self, score: i32) -> bool {
        if self.entries.len() < self.capacity {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// The 1-indexed rank a score would achieve, or `None` if it would not
    /// make the table
    pub fn rank(&self, score: i32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let position = self.entries.iter().position(|e| score > e.score);
        Some(position.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert an entry at its rank, trimming the table to capacity
    ///
    /// Returns the rank achieved, or `None` if the score did not qualify.
    pub fn add(&mut self, entry: ScoreInfo) -> Option<usize> {
        let rank = self.rank(entry.score)?;
        self.entries.insert(rank - 1, entry);
        self.entries.truncate(self.capacity);
        Some(rank)
    }

    /// The best score on the table, if any
    pub fn top_score(&self) -> Option<i32> {
        self.entries.first().map(|e| e.score)
    }

    /// Serialize the table as JSON into a writer
    pub fn save(&self, writer: impl Write) -> Result<()> {
        serde_json::to_writer(writer, self).context("failed to write high scores")
    }

    /// Deserialize a table from JSON out of a reader
    pub fn load(reader: impl Read) -> Result<Self> {
        serde_json::from_reader(reader).context("failed to read high scores")
    }
}
