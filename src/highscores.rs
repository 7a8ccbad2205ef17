//! Local leaderboard
//!
//! Persisted as a JSON array in a [`KeyValueStore`], sorted by score then
//! recency, capped at 50 entries. Storage problems never reach the game:
//! unreadable or malformed data reads as an empty board, failed writes
//! are logged and dropped.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StorageError};

/// Maximum number of scores kept in storage
pub const MAX_STORED_SCORES: usize = 50;
/// Number of scores shown on the leaderboard panel
pub const DISPLAYED_SCORES: usize = 10;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
    /// When the round ended (ISO 8601 in storage)
    pub date: DateTime<Utc>,
}

/// Sorted, capped score list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<ScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stored list; any malformed document reads as empty
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<HighScores>(json) {
            Ok(mut scores) => {
                scores.normalize();
                scores
            }
            Err(e) => {
                log::warn!("Ignoring malformed leaderboard data: {}", e);
                Self::new()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Highest score first; among equal scores the most recent first
    fn normalize(&mut self) {
        self.entries
            .sort_by(|a, b| b.score.cmp(&a.score).then_with(|| b.date.cmp(&a.date)));
        self.entries.truncate(MAX_STORED_SCORES);
    }

    /// Add an entry, returning its 1-based rank if it survived the cap
    pub fn insert(&mut self, entry: ScoreEntry) -> Option<usize> {
        self.entries.push(entry.clone());
        self.normalize();
        self.entries.iter().position(|e| *e == entry).map(|i| i + 1)
    }

    /// Whether a new score, recorded now, would survive the cap.
    /// Ties rank above older entries, so matching the lowest score is enough.
    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < MAX_STORED_SCORES {
            return true;
        }
        self.entries.last().map(|e| score >= e.score).unwrap_or(true)
    }

    /// 1-based rank a new score recorded now would take, if it qualifies
    pub fn rank_of(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let pos = self.entries.iter().position(|e| score >= e.score);
        Some(pos.unwrap_or(self.entries.len()) + 1)
    }

    /// Up to `limit` best entries
    pub fn top(&self, limit: usize) -> &[ScoreEntry] {
        &self.entries[..limit.min(self.entries.len())]
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn best(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}

/// High score table bound to a storage backend
pub struct Leaderboard<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Leaderboard<S> {
    /// Storage key (kept stable across releases)
    pub const STORAGE_KEY: &'static str = "kitepilot_scores_v1";

    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stored list; malformed data reads as empty, a failed read is an error
    fn read(&self) -> Result<HighScores, StorageError> {
        Ok(match self.store.get(Self::STORAGE_KEY)? {
            Some(json) => HighScores::from_json(&json),
            None => HighScores::new(),
        })
    }

    /// Read the stored list; failures read as an empty board
    pub fn load(&self) -> HighScores {
        self.read().unwrap_or_else(|e| {
            log::warn!("Could not read leaderboard: {}", e);
            HighScores::new()
        })
    }

    /// Record a finished round. Returns the rank achieved if the score was
    /// stored; `None` if it missed the cut or storage failed.
    ///
    /// Nothing is written when the stored list cannot be read, so a
    /// transient read error never replaces the existing board.
    pub fn submit(&mut self, name: &str, score: u32, date: DateTime<Utc>) -> Option<usize> {
        let mut scores = match self.read() {
            Ok(scores) => scores,
            Err(e) => {
                log::warn!("Could not read leaderboard, score {} for {} not saved: {}", score, name, e);
                return None;
            }
        };
        let rank = scores.insert(ScoreEntry {
            name: name.to_string(),
            score,
            date,
        })?;

        let json = match scores.to_json() {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not encode leaderboard: {}", e);
                return None;
            }
        };
        match self.store.set(Self::STORAGE_KEY, &json) {
            Ok(()) => {
                log::info!(
                    "Saved score {} for {} ({} entries)",
                    score,
                    name,
                    scores.entries.len()
                );
                Some(rank)
            }
            Err(e) => {
                log::warn!("Could not save score: {}", e);
                None
            }
        }
    }

    /// Best `limit` entries, highest first
    pub fn top_scores(&self, limit: usize) -> Vec<ScoreEntry> {
        self.load().top(limit).to_vec()
    }

    /// Wipe every stored score
    pub fn clear(&mut self) {
        match self.store.remove(Self::STORAGE_KEY) {
            Ok(()) => log::info!("Leaderboard cleared"),
            Err(e) => log::warn!("Could not clear leaderboard: {}", e),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

/// Leaderboard line, e.g. `#1 — ace  42`
pub fn format_entry(rank: usize, entry: &ScoreEntry) -> String {
    format!("#{} — {}  {}", rank, entry.name, entry.score)
}

/// Local date/time the score was set, for the line under each entry
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
