//! Running score and statistics tracked by the engine.

use skyshield_core::state::{GameSummaryView, ScoreView};

#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub score: u64,
    pub kills: u32,
    pub shots_fired: u32,
    /// Player missiles that hit an aircraft or intercepted a missile.
    pub shots_hit: u32,
    pub intercepts: u32,
    pub escapes: u32,
    pub cyber_attacks: u32,
}

impl ScoreState {
    pub fn view(&self) -> ScoreView {
        ScoreView {
            score: self.score,
            kills: self.kills,
            shots_fired: self.shots_fired,
            shots_hit: self.shots_hit,
            intercepts: self.intercepts,
            escapes: self.escapes,
        }
    }

    /// Summary for a game ending at `survival_secs` during `wave`.
    pub fn summary(&self, survival_secs: f64, wave: u32) -> GameSummaryView {
        GameSummaryView {
            score: self.score,
            kills: self.kills,
            survival_secs,
            waves_survived: wave.saturating_sub(1),
            shots_fired: self.shots_fired,
            shots_hit: self.shots_hit,
        }
    }
}
