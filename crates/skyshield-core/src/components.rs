//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{Countdown, Position};

/// The player's defense turret. Exactly one per game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turret {
    pub health: f64,
    pub max_health: f64,
    pub heat: f64,
    pub max_heat: f64,
    /// Barrel angle in radians, follows the last shot.
    pub aim_angle: f64,
    /// Damage a player missile deals on hit.
    pub damage_per_shot: f64,
    /// Time until the next shot may leave while the trigger is held.
    pub fire_cooldown_secs: f64,
    /// Whether a shot left the barrel this tick (suppresses cooling).
    pub fired_this_tick: bool,
}

/// An enemy aircraft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
    /// Serial id, assigned in spawn order.
    pub id: u32,
    pub aircraft_type: AircraftType,
    pub health: f64,
    pub max_health: f64,
    pub missiles_fired: u32,
    pub max_missiles: u32,
    /// Seconds since the last firing roll.
    pub fire_timer_secs: f64,
    pub mode: CombatMode,
    /// Phase offset for evasive jinking, fixed at spawn.
    pub jink_phase: f64,
}

/// A missile launched by the turret toward an aim point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerMissile {
    pub id: u32,
    pub lifetime: Countdown,
    /// Missiles launched this tick are not collision candidates until the next.
    pub armed: bool,
}

/// A missile launched by an aircraft toward the turret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyMissile {
    pub id: u32,
    pub source: AircraftType,
    pub damage: f64,
    pub lifetime: Countdown,
    pub armed: bool,
}

/// Collision circle radius.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f64,
}

/// Purely visual explosion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub kind: ExplosionKind,
    pub size: f64,
    pub remaining: Countdown,
    pub total_secs: f64,
}

/// History of positions for trail rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trail {
    /// Recent positions (newest first), up to TRAIL_LENGTH.
    pub positions: Vec<Position>,
}
