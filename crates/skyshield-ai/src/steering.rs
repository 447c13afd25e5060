//! Steering controllers.
//!
//! Two flavors: the simple aim-point nudge used by the oldest flight model,
//! and the proportional altitude/speed controller the FSM guidance drives.

use serde::{Deserialize, Serialize};

use skyshield_core::constants::{STEERING_APPROACH_OFFSET, STEERING_DEADBAND, STEERING_GAIN};
use skyshield_core::types::{Position, Velocity};

/// Fraction of a velocity error closed per second by `nudge_toward`.
pub const NUDGE_RESPONSE: f64 = 4.0;

/// Commanded climb rate per pixel of altitude error (1/s).
pub const ALTITUDE_GAIN: f64 = 1.5;

/// Parameters for the aim-point nudge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteeringParams {
    /// Vertical acceleration per pixel of error (1/s²).
    pub gain: f64,
    /// No steering within this distance of the aim point.
    pub deadband: f64,
    /// Aim point height above the turret.
    pub approach_offset: f64,
}

impl Default for SteeringParams {
    fn default() -> Self {
        Self {
            gain: STEERING_GAIN,
            deadband: STEERING_DEADBAND,
            approach_offset: STEERING_APPROACH_OFFSET,
        }
    }
}

/// The point above the turret that steering aircraft head for.
pub fn approach_point(turret: &Position, params: &SteeringParams) -> Position {
    Position::new(turret.x, turret.y - params.approach_offset)
}

/// Nudge vertical velocity toward a point above the turret.
///
/// Horizontal speed is untouched. Inside the dead-band nothing changes.
pub fn steer_toward_turret(
    position: &Position,
    velocity: &Velocity,
    turret: &Position,
    params: &SteeringParams,
    dt: f64,
) -> Velocity {
    let aim = approach_point(turret, params);
    if position.distance_to(&aim) <= params.deadband {
        return *velocity;
    }
    let dy = aim.y - position.y;
    Velocity::new(velocity.x, velocity.y + dy * params.gain * dt)
}

/// Move `current` toward `desired`, closing NUDGE_RESPONSE of the gap per second.
pub fn nudge_toward(current: f64, desired: f64, dt: f64) -> f64 {
    current + (desired - current) * (NUDGE_RESPONSE * dt).min(1.0)
}

/// Climb rate that closes the gap to `target_y`, limited to `max_climb_rate`.
pub fn climb_command(y: f64, target_y: f64, max_climb_rate: f64) -> f64 {
    (ALTITUDE_GAIN * (target_y - y)).clamp(-max_climb_rate, max_climb_rate)
}

/// Proportional guidance step: steer vertical speed toward `target_y` and
/// horizontal speed toward `desired_vx`.
pub fn follow_guidance(
    position: &Position,
    velocity: &Velocity,
    target_y: f64,
    desired_vx: f64,
    max_climb_rate: f64,
    dt: f64,
) -> Velocity {
    let desired_vy = climb_command(position.y, target_y, max_climb_rate);
    Velocity::new(
        nudge_toward(velocity.x, desired_vx, dt),
        nudge_toward(velocity.y, desired_vy, dt),
    )
}

/// Keep an aircraft inside the altitude band [min_y, max_y].
/// Vertical velocity pushing out of the band is zeroed.
pub fn clamp_altitude(position: &mut Position, velocity: &mut Velocity, min_y: f64, max_y: f64) {
    if position.y < min_y {
        position.y = min_y;
        velocity.y = velocity.y.max(0.0);
    } else if position.y > max_y {
        position.y = max_y;
        velocity.y = velocity.y.min(0.0);
    }
}
