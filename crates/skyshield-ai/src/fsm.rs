//! Aircraft behavior finite state machine.
//!
//! `next_mode` is the pure transition function; `guidance` turns a mode into
//! a vertical target and a horizontal speed multiplier. No ECS dependency.

use skyshield_core::enums::CombatMode;

use crate::profiles::AircraftProfile;

/// Horizontal speed multipliers per mode. Negative reverses direction.
pub const APPROACH_SPEED_FACTOR: f64 = 1.0;
pub const ATTACK_SPEED_FACTOR: f64 = 0.55;
pub const EVADE_SPEED_FACTOR: f64 = 1.35;
pub const RETREAT_SPEED_FACTOR: f64 = -1.2;

/// Evasive jink: extra height above cruise, swing amplitude and rate.
pub const EVADE_EXTRA_HEIGHT: f64 = 60.0;
pub const EVADE_JINK_AMPLITUDE: f64 = 80.0;
pub const EVADE_JINK_RATE: f64 = 2.5;

/// Input to the transition function for one aircraft.
#[derive(Debug, Clone, Copy)]
pub struct BehaviorContext {
    pub mode: CombatMode,
    /// Straight-line distance to the turret.
    pub distance: f64,
    /// Current health over max health.
    pub health_fraction: f64,
    /// Live player missiles.
    pub missile_threats: u32,
}

/// Pick the next behavior mode.
///
/// Retreat is absorbing. Otherwise rules are checked in priority order:
/// low health, evasion, engagement range, approach.
pub fn next_mode(ctx: &BehaviorContext, profile: &AircraftProfile) -> CombatMode {
    if ctx.mode == CombatMode::Retreat || ctx.health_fraction <= profile.retreat_health_fraction {
        return CombatMode::Retreat;
    }
    if ctx.distance < profile.evasion_range && ctx.missile_threats >= profile.evasion_threat_count
    {
        return CombatMode::Evade;
    }
    if ctx.distance <= profile.engagement_range {
        return CombatMode::Attack;
    }
    CombatMode::Approach
}

/// Whether an aircraft in this mode may launch missiles.
pub fn can_fire(mode: CombatMode) -> bool {
    matches!(mode, CombatMode::Approach | CombatMode::Attack)
}

/// Where a mode wants the aircraft to be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guidance {
    /// Desired screen y.
    pub target_y: f64,
    /// Multiplier on cruise speed; negative flies away from the turret.
    pub speed_factor: f64,
}

/// Inputs for `guidance` besides the mode itself.
#[derive(Debug, Clone, Copy)]
pub struct GuidanceContext {
    pub turret_y: f64,
    /// Top of the altitude band (smallest screen y).
    pub altitude_min: f64,
    pub elapsed_secs: f64,
    pub jink_phase: f64,
}

pub fn guidance(mode: CombatMode, profile: &AircraftProfile, ctx: &GuidanceContext) -> Guidance {
    match mode {
        CombatMode::Approach => Guidance {
            target_y: ctx.turret_y - profile.cruise_height,
            speed_factor: APPROACH_SPEED_FACTOR,
        },
        CombatMode::Attack => Guidance {
            target_y: ctx.turret_y - profile.attack_height,
            speed_factor: ATTACK_SPEED_FACTOR,
        },
        CombatMode::Evade => {
            let swing = (ctx.elapsed_secs * EVADE_JINK_RATE + ctx.jink_phase).sin();
            Guidance {
                target_y: ctx.turret_y - profile.cruise_height - EVADE_EXTRA_HEIGHT
                    + EVADE_JINK_AMPLITUDE * swing,
                speed_factor: EVADE_SPEED_FACTOR,
            }
        }
        CombatMode::Retreat => Guidance {
            target_y: ctx.altitude_min,
            speed_factor: RETREAT_SPEED_FACTOR,
        },
    }
}
