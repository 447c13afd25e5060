//! Events emitted by the simulation for UI and audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Discrete things that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    WaveStarted {
        wave: u32,
        total: u32,
    },
    WaveCleared {
        wave: u32,
    },
    AircraftSpawned {
        aircraft_id: u32,
        aircraft_type: AircraftType,
    },
    /// Turret fired a missile.
    ShotFired {
        missile_id: u32,
        angle: f64,
    },
    EnemyMissileLaunched {
        aircraft_id: u32,
        aircraft_type: AircraftType,
    },
    MissileIntercepted {
        position: Position,
    },
    AircraftHit {
        aircraft_id: u32,
        damage: f64,
        remaining_health: f64,
    },
    AircraftDestroyed {
        aircraft_id: u32,
        aircraft_type: AircraftType,
        score: u64,
    },
    AircraftEscaped {
        aircraft_id: u32,
    },
    AircraftModeChanged {
        aircraft_id: u32,
        mode: CombatMode,
    },
    TurretHit {
        damage: f64,
        remaining_health: f64,
    },
    CyberAttack {
        targets_hit: u32,
        destroyed: u32,
        total_damage: f64,
        score_bonus: u64,
    },
    GameOver {
        final_score: u64,
    },
}

/// Transient status text for the banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub tick: u64,
}
