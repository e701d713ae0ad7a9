//! High score leaderboard system
//!
//! Persisted as JSON, tracks top 10 runs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Run score
    pub score: u64,
    /// Enemies destroyed
    pub kills: u32,
    /// How long the run lasted
    pub ticks_survived: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

impl HighScoreEntry {
    /// Ranks above `other`: higher score, then more kills. Full ties keep
    /// the older entry in front.
    fn outranks(&self, other: &HighScoreEntry) -> bool {
        (self.score, self.kills) > (other.score, other.kills)
    }
}

/// High score leaderboard, best run first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where `entry` would land (0-indexed), or None if it stays off the board
    fn slot(&self, entry: &HighScoreEntry) -> Option<usize> {
        if entry.score == 0 {
            return None;
        }
        let slot = self
            .entries
            .iter()
            .position(|e| entry.outranks(e))
            .unwrap_or(self.entries.len());
        (slot < MAX_HIGH_SCORES).then_some(slot)
    }

    /// Whether a run would make the board
    pub fn qualifies(&self, entry: &HighScoreEntry) -> bool {
        self.slot(entry).is_some()
    }

    /// 1-indexed rank a run would achieve
    pub fn potential_rank(&self, entry: &HighScoreEntry) -> Option<usize> {
        self.slot(entry).map(|i| i + 1)
    }

    /// Record a finished run. Returns its 1-indexed rank, or None if it
    /// didn't make the board.
    pub fn add_score(&mut self, entry: HighScoreEntry) -> Option<usize> {
        let slot = self.slot(&entry)?;
        self.entries.insert(slot, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(slot + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores, starting fresh if the file is missing or bad
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!("Loaded {} high scores", scores.entries.len());
                    scores
                }
                Err(e) => {
                    log::warn!("Ignoring bad high score file {}: {}", path.display(), e);
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u64) -> HighScoreEntry {
        run(score, (score / 100) as u32)
    }

    fn run(score: u64, kills: u32) -> HighScoreEntry {
        HighScoreEntry {
            score,
            kills,
            ticks_survived: 600,
            timestamp: 0.0,
        }
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert!(!scores.qualifies(&entry(0)));
        assert_eq!(scores.add_score(entry(0)), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_sorted_with_ranks() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(entry(300)), Some(1));
        assert_eq!(scores.add_score(entry(500)), Some(1));
        assert_eq!(scores.add_score(entry(100)), Some(3));
        assert_eq!(scores.add_score(entry(300)), Some(3));
        let order: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![500, 300, 300, 100]);
        assert_eq!(scores.top_score(), Some(500));
    }

    #[test]
    fn test_kills_break_score_ties() {
        let mut scores = HighScores::new();
        scores.add_score(run(300, 2));
        assert_eq!(scores.potential_rank(&run(300, 1)), Some(2));
        assert_eq!(scores.add_score(run(300, 3)), Some(1));
        let kills: Vec<u32> = scores.entries.iter().map(|e| e.kills).collect();
        assert_eq!(kills, vec![3, 2]);
    }

    #[test]
    fn test_full_board_trims() {
        let mut scores = HighScores::new();
        for i in 1..=MAX_HIGH_SCORES as u64 {
            scores.add_score(entry(i * 100));
        }
        assert!(!scores.qualifies(&entry(100)));
        assert_eq!(scores.potential_rank(&entry(250)), Some(9));
        assert_eq!(scores.add_score(entry(250)), Some(9));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(200));
    }

    #[test]
    fn test_bad_file_starts_fresh() {
        let path = std::env::temp_dir().join(format!("sky_raid_bad_scores_{}.json", std::process::id()));
        std::fs::write(&path, "not json").unwrap();
        assert!(HighScores::load(&path).is_empty());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("sky_raid_scores_{}.json", std::process::id()));
        let mut scores = HighScores::new();
        scores.add_score(entry(700));
        scores.save(&path).unwrap();
        let loaded = HighScores::load(&path);
        assert_eq!(loaded.entries, scores.entries);
        let _ = std::fs::remove_file(&path);
    }
}
