//! Leaderboard
//!
//! Persisted to LocalStorage as a bare JSON array of
//! `{name, score, level, time}` records. Every finished run is appended; the
//! stored list is never trimmed, only the display is.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::platform::KeyValueStore;
use crate::platform::storage::{load_json, save_json};
use crate::sim::GameEvent;

/// Number of rows shown on the game-over screen
pub const DISPLAY_ROWS: usize = 10;
/// Longest name kept
pub const MAX_NAME_LEN: usize = 16;
/// Name used when the player leaves the field blank
pub const DEFAULT_NAME: &str = "Otter";

/// A single finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
    #[serde(default)]
    pub level: u32,
    /// Seconds survived
    #[serde(default)]
    pub time: u32,
}

impl LeaderboardEntry {
    /// Build the record for a finished run; `None` unless `event` is a game over
    pub fn from_event(name: &str, event: &GameEvent) -> Option<Self> {
        match *event {
            GameEvent::GameOver {
                score,
                level,
                time_secs,
            } => Some(Self {
                name: sanitize_name(name),
                score,
                level,
                time: time_secs,
            }),
            _ => None,
        }
    }
}

/// All recorded runs, in submission order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "otterRiverLeaderboard";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Load from the store; missing or corrupt data gives an empty board
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match load_json::<Leaderboard>(store, Self::STORAGE_KEY) {
            Some(board) => {
                log::info!("Loaded {} leaderboard entries", board.len());
                board
            }
            None => Self::new(),
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        save_json(store, Self::STORAGE_KEY, self)?;
        log::info!("Leaderboard saved ({} entries)", self.entries.len());
        Ok(())
    }

    /// Append a run and return its rank by score (1-indexed).
    ///
    /// Ties rank behind earlier runs with the same score.
    pub fn submit(&mut self, entry: LeaderboardEntry) -> usize {
        let rank = self.entries.iter().filter(|e| e.score >= entry.score).count() + 1;
        self.entries.push(entry);
        rank
    }

    /// Rank a score would get if submitted now (1-indexed)
    pub fn potential_rank(&self, score: u64) -> usize {
        self.entries.iter().filter(|e| e.score >= score).count() + 1
    }

    /// Best `n` runs, highest score first (stable for ties)
    pub fn top(&self, n: usize) -> Vec<&LeaderboardEntry> {
        let mut sorted: Vec<&LeaderboardEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted.truncate(n);
        sorted
    }

    /// Get the top score (if any)
    pub fn best_score(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.score).max()
    }

    /// Runs in submission order
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Clean up a typed name for display and storage
pub fn sanitize_name(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_NAME_LEN)
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}
