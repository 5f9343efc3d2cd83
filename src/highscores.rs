//! Best survival times
//!
//! Kept in memory for the lifetime of a `GameState`; nothing is written to disk.

use serde::{Deserialize, Serialize};

/// Maximum number of runs to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Seconds survived
    pub seconds: f32,
    /// Obstacles that made it past the player
    pub dodged: u32,
    /// 1-based run number within the session
    pub run: u32,
}

/// Survival-time leaderboard, best first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a time qualifies for the leaderboard
    pub fn qualifies(&self, seconds: f32) -> bool {
        if seconds <= 0.0 || !seconds.is_finite() {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| seconds > e.seconds).unwrap_or(true)
    }

    /// Rank a time would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, seconds: f32) -> Option<usize> {
        if !self.qualifies(seconds) {
            return None;
        }
        let rank = self.entries.iter().position(|e| seconds > e.seconds);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a run. Returns the rank achieved (1-indexed) or None.
    pub fn add_score(&mut self, seconds: f32, dodged: u32, run: u32) -> Option<usize> {
        let rank = self.potential_rank(seconds)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                seconds,
                dodged,
                run,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best time so far (if any)
    pub fn best(&self) -> Option<f32> {
        self.entries.first().map(|e| e.seconds)
    }
}
