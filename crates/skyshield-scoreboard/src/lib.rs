//! Leaderboard and per-pilot statistics for SKYSHIELD.
//!
//! Kept in memory by the host; nothing here touches the simulation.

pub mod leaderboard;
pub mod stats;

pub use leaderboard::{LeaderboardEntry, Scoreboard, ScoreboardError, DEFAULT_TOP_N};
pub use stats::PilotStats;
