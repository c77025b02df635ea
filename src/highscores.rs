//! High score leaderboard system
//!
//! Persisted through a key-value [`Storage`], keeps the best score per player
//! name, top 100 overall.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::consts::{LEADERBOARD_DISPLAY, MAX_HIGH_SCORES};
use crate::platform::storage::{self, Storage, StorageError};

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player name
    pub name: String,
    pub score: u64,
    /// ISO-8601 timestamp of the run
    pub date: String,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "flappy_fish_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a finished run. A name keeps only its best score.
    /// Returns the rank achieved (1-indexed) or None if it didn't make the board.
    pub fn submit(&mut self, name: &str, score: u64, timestamp: DateTime<Utc>) -> Option<usize> {
        if score == 0 {
            return None;
        }

        if let Some(i) = self.entries.iter().position(|e| e.name == name) {
            if self.entries[i].score >= score {
                return None;
            }
            self.entries.remove(i);
        }

        let entry = HighScoreEntry {
            name: name.to_string(),
            score,
            date: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        // Insertion point keeps earlier entries ahead on ties
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Re-establish the invariants on data read back from storage
    fn normalize(&mut self) {
        let mut merged: Vec<HighScoreEntry> = Vec::with_capacity(self.entries.len());
        for entry in self.entries.drain(..) {
            match merged.iter_mut().find(|e| e.name == entry.name) {
                Some(existing) if existing.score < entry.score => *existing = entry,
                Some(_) => {}
                None => merged.push(entry),
            }
        }
        merged.sort_by(|a, b| b.score.cmp(&a.score));
        merged.truncate(MAX_HIGH_SCORES);
        self.entries = merged;
    }

    /// Rows for the on-screen table
    pub fn top(&self, n: usize) -> &[HighScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// The standard "TOP PLAYERS" rows
    pub fn display_rows(&self) -> &[HighScoreEntry] {
        self.top(LEADERBOARD_DISPLAY)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores. Missing or unreadable data yields an empty board.
    pub fn load(storage: &dyn Storage) -> Self {
        match storage::load_json::<HighScores>(storage, Self::STORAGE_KEY) {
            Ok(Some(mut scores)) => {
                scores.normalize();
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Could not load high scores ({}), starting fresh", e);
                Self::new()
            }
        }
    }

    /// Save high scores
    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        storage::save_json(storage, Self::STORAGE_KEY, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_sorted_descending() {
        let mut board = HighScores::new();
        board.submit("ann", 10, at(0));
        board.submit("bob", 30, at(1));
        board.submit("cat", 20, at(2));
        let scores: Vec<u64> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![30, 20, 10]);
        assert_eq!(board.top_score(), Some(30));
    }

    #[test]
    fn test_merge_by_name_keeps_best() {
        let mut board = HighScores::new();
        assert_eq!(board.submit("ann", 10, at(0)), Some(1));
        assert_eq!(board.submit("ann", 4, at(1)), None);
        assert_eq!(board.entries.len(), 1);
        assert_eq!(board.entries[0].score, 10);

        assert_eq!(board.submit("ann", 14, at(2)), Some(1));
        assert_eq!(board.entries.len(), 1);
        assert_eq!(board.entries[0].score, 14);
        assert_eq!(board.entries[0].date, at(2).to_rfc3339_opts(SecondsFormat::Millis, true));
    }

    #[test]
    fn test_zero_scores_are_not_recorded() {
        let mut board = HighScores::new();
        assert_eq!(board.submit("ann", 0, at(0)), None);
        assert!(board.is_empty());
    }

    #[test]
    fn test_truncates_to_max() {
        let mut board = HighScores::new();
        for i in 0..(MAX_HIGH_SCORES as u64 + 20) {
            board.submit(&format!("p{}", i), i + 1, at(i as i64));
        }
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.top_score(), Some(MAX_HIGH_SCORES as u64 + 20));
        // Lowest survivors are the 21st best and up
        assert_eq!(board.entries.last().map(|e| e.score), Some(21));
        // Too low to make the board
        assert_eq!(board.submit("late", 1, at(999)), None);
    }

    #[test]
    fn test_ties_keep_earlier_entry_first() {
        let mut board = HighScores::new();
        board.submit("first", 8, at(0));
        assert_eq!(board.submit("second", 8, at(1)), Some(2));
        assert_eq!(board.entries[0].name, "first");
    }

    #[test]
    fn test_display_rows() {
        let mut board = HighScores::new();
        for i in 0..10u64 {
            board.submit(&format!("p{}", i), i + 1, at(0));
        }
        assert_eq!(board.display_rows().len(), LEADERBOARD_DISPLAY);
        assert_eq!(board.top(100).len(), 10);
    }

    #[test]
    fn test_entry_wire_format() {
        let mut board = HighScores::new();
        board.submit("ann", 12, at(0));
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"ann","score":12,"date":"2023-11-14T22:13:20.000Z"}]"#
        );
    }

    #[test]
    fn test_save_and_load() {
        let mut storage = MemoryStorage::new();
        let mut board = HighScores::new();
        board.submit("ann", 12, at(0));
        board.submit("bob", 6, at(1));
        board.save(&mut storage).unwrap();

        let loaded = HighScores::load(&storage);
        assert_eq!(loaded.entries, board.entries);
    }

    #[test]
    fn test_load_normalizes_stored_data() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                HighScores::STORAGE_KEY,
                r#"[{"name":"a","score":3,"date":"x"},{"name":"b","score":9,"date":"y"},{"name":"a","score":5,"date":"z"}]"#,
            )
            .unwrap();
        let loaded = HighScores::load(&storage);
        let rows: Vec<(&str, u64)> = loaded
            .entries
            .iter()
            .map(|e| (e.name.as_str(), e.score))
            .collect();
        assert_eq!(rows, vec![("b", 9), ("a", 5)]);
    }

    #[test]
    fn test_malformed_storage_starts_fresh() {
        let mut storage = MemoryStorage::new();
        storage.set_item(HighScores::STORAGE_KEY, "garbage").unwrap();
        assert!(HighScores::load(&storage).is_empty());
    }
}
