//! Running statistics for one pilot across games.

use serde::{Deserialize, Serialize};

use skyshield_core::state::GameSummaryView;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PilotStats {
    pub shots_fired: u64,
    pub shots_hit: u64,
    pub games_played: u32,
    pub total_score: u64,
    pub total_kills: u64,
    pub best_score: u64,
}

impl PilotStats {
    /// Fold one finished game into the totals.
    pub fn record(&mut self, summary: &GameSummaryView) {
        self.shots_fired += u64::from(summary.shots_fired);
        self.shots_hit += u64::from(summary.shots_hit);
        self.games_played += 1;
        self.total_score += summary.score;
        self.total_kills += u64::from(summary.kills);
        self.best_score = self.best_score.max(summary.score);
    }

    /// Hits per shot in [0, 1]; zero before the first shot.
    pub fn accuracy(&self) -> f64 {
        if self.shots_fired == 0 {
            0.0
        } else {
            self.shots_hit as f64 / self.shots_fired as f64
        }
    }

    pub fn average_score(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.total_score as f64 / self.games_played as f64
        }
    }
}
