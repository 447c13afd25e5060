//! Best-score leaderboard, one entry per pilot, highest first.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use skyshield_core::state::GameSummaryView;

use crate::stats::PilotStats;

/// Entries returned by `top` when the caller has no preference.
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreboardError {
    #[error("pilot name must not be empty")]
    EmptyPilot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub pilot: String,
    pub score: u64,
    pub kills: u32,
    pub waves_survived: u32,
    pub survival_secs: f64,
}

impl LeaderboardEntry {
    fn from_summary(pilot: &str, summary: &GameSummaryView) -> Self {
        Self {
            pilot: pilot.to_string(),
            score: summary.score,
            kills: summary.kills,
            waves_survived: summary.waves_survived,
            survival_secs: summary.survival_secs,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Sorted by score, descending. Equal scores keep submission order.
    entries: Vec<LeaderboardEntry>,
    stats: BTreeMap<String, PilotStats>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished game and return the pilot's 1-based rank.
    ///
    /// Statistics always accumulate. The leaderboard entry is replaced only
    /// when the new score beats the pilot's best.
    pub fn submit(
        &mut self,
        pilot: &str,
        summary: &GameSummaryView,
    ) -> Result<usize, ScoreboardError> {
        let pilot = pilot.trim();
        if pilot.is_empty() {
            return Err(ScoreboardError::EmptyPilot);
        }

        self.stats
            .entry(pilot.to_string())
            .or_default()
            .record(summary);

        match self.entries.iter_mut().find(|e| e.pilot == pilot) {
            Some(entry) if summary.score > entry.score => {
                log::info!("{pilot} improved best score {} -> {}", entry.score, summary.score);
                *entry = LeaderboardEntry::from_summary(pilot, summary);
            }
            Some(_) => {}
            None => {
                log::info!("{pilot} entered the leaderboard with {}", summary.score);
                self.entries
                    .push(LeaderboardEntry::from_summary(pilot, summary));
            }
        }
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));

        // The pilot was inserted or already present above.
        Ok(self.rank_of(pilot).unwrap_or(self.entries.len()))
    }

    /// Best `n` entries, highest first.
    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// 1-based rank of the pilot's best score.
    pub fn rank_of(&self, pilot: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.pilot == pilot)
            .map(|i| i + 1)
    }

    pub fn stats(&self, pilot: &str) -> Option<&PilotStats> {
        self.stats.get(pilot)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
