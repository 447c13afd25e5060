//! Game state snapshot: the complete visible state handed to the host each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{Alert, GameEvent};
use crate::types::{Position, SimTime, Velocity};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub variant: Variant,
    pub turret: TurretView,
    pub aircraft: Vec<AircraftView>,
    pub player_missiles: Vec<MissileView>,
    pub enemy_missiles: Vec<MissileView>,
    pub explosions: Vec<ExplosionView>,
    pub wave: WaveView,
    pub score: ScoreView,
    pub cyber: CyberView,
    pub airspace: AirspaceView,
    pub environment: EnvironmentView,
    /// Current banner text, if one is showing.
    pub banner: Option<Alert>,
    /// Alerts raised this tick.
    pub alerts: Vec<Alert>,
    /// Events raised this tick.
    pub events: Vec<GameEvent>,
    /// Set once the game has ended.
    pub summary: Option<GameSummaryView>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurretView {
    pub position: Position,
    pub aim_angle: f64,
    pub health: f64,
    pub max_health: f64,
    /// 0-100.
    pub health_pct: f64,
    pub heat: f64,
    pub max_heat: f64,
    /// 0-100.
    pub heat_pct: f64,
    /// Heat indicator past the display threshold.
    pub overheated: bool,
    /// Health at or below the danger threshold.
    pub danger: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftView {
    pub id: u32,
    pub aircraft_type: AircraftType,
    pub position: Position,
    pub velocity: Velocity,
    pub health: f64,
    pub max_health: f64,
    pub mode: CombatMode,
    pub radius: f64,
    pub trail: Vec<Position>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissileView {
    pub id: u32,
    pub position: Position,
    pub velocity: Velocity,
    pub radius: f64,
    pub lifetime_secs: f64,
    pub trail: Vec<Position>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionView {
    pub kind: ExplosionKind,
    pub position: Position,
    pub size: f64,
    /// 1.0 when fresh, falls to 0.0.
    pub intensity: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub wave: u32,
    pub active: bool,
    pub total: u32,
    pub spawned: u32,
    /// Aircraft still to spawn in the active wave.
    pub remaining_to_spawn: u32,
    /// Whole seconds until the next wave (rounded up), 0 while a wave is active.
    pub countdown_secs: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u64,
    pub kills: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub intercepts: u32,
    pub escapes: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CyberView {
    pub ready: bool,
    pub cooldown_remaining_secs: f64,
    pub cooldown_total_secs: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AirspaceView {
    pub live_aircraft: u32,
    pub concurrency_limit: u32,
    /// 0-100, falls as the sky fills up.
    pub air_superiority: f64,
    pub radar_status: RadarStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentView {
    /// Day/night cycle position in [0, 1).
    pub day_cycle: f64,
    pub day_phase: DayPhase,
}

/// End-of-game summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSummaryView {
    pub score: u64,
    pub kills: u32,
    pub survival_secs: f64,
    pub waves_survived: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
}
