//! Defense system: turret firing, heat, and damage.
//!
//! Heat rises by a fixed amount per shot and decays on ticks without one.
//! A shot is refused while heat sits inside the overheat margin.

use hecs::World;

use skyshield_core::components::Turret;
use skyshield_core::events::GameEvent;
use skyshield_core::types::{Position, Velocity, COUNTDOWN_EPSILON};

use crate::feedback::Feedback;
use crate::ruleset::{ProjectileRules, TurretRules};
use crate::score::ScoreState;
use crate::world_setup;

/// Pointer and trigger state from player input.
#[derive(Debug, Clone, Default)]
pub struct TurretControls {
    pub aim: Position,
    pub trigger_held: bool,
    /// Set after the overheat alert so it is raised once per hold.
    pub overheat_reported: bool,
}

/// Why a shot was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireRejection {
    /// Heat is within the overheat margin of max.
    Overheated,
}

/// Whether the turret may fire right now. Does not touch state.
pub fn check_fire(turret: &Turret, rules: &TurretRules) -> Result<(), FireRejection> {
    if is_overheated(turret, rules) {
        return Err(FireRejection::Overheated);
    }
    Ok(())
}

pub fn is_overheated(turret: &Turret, rules: &TurretRules) -> bool {
    turret.heat > turret.max_heat - rules.overheat_margin
}

/// Book a shot: heat up (capped), swing the barrel, restart the cadence.
pub fn commit_shot(turret: &mut Turret, rules: &TurretRules, angle: f64) {
    turret.heat = (turret.heat + rules.heat_per_shot).min(turret.max_heat);
    turret.aim_angle = angle;
    turret.fire_cooldown_secs = rules.fire_interval_secs;
    turret.fired_this_tick = true;
}

/// Passive cooling, never below zero.
pub fn cool(turret: &mut Turret, rules: &TurretRules, dt: f64) {
    turret.heat = (turret.heat - rules.cooling_per_sec * dt).max(0.0);
}

/// Apply enemy damage; health never goes below zero.
pub fn apply_damage(turret: &mut Turret, damage: f64) {
    turret.health = (turret.health - damage).max(0.0);
}

pub fn is_destroyed(turret: &Turret) -> bool {
    turret.health <= 0.0
}

/// Fire if the trigger is held and the cadence allows, otherwise cool.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    turret_rules: &TurretRules,
    missile_rules: &ProjectileRules,
    controls: &mut TurretControls,
    next_id: &mut u32,
    score: &mut ScoreState,
    feedback: &mut Feedback,
    dt: f64,
) {
    let mut launch: Option<(Position, Velocity)> = None;

    for (_entity, (turret, pos)) in world.query_mut::<(&mut Turret, &Position)>() {
        turret.fired_this_tick = false;
        turret.fire_cooldown_secs = (turret.fire_cooldown_secs - dt).max(0.0);

        if controls.trigger_held && turret.fire_cooldown_secs < COUNTDOWN_EPSILON {
            match check_fire(turret, turret_rules) {
                Ok(()) => {
                    // Aiming at the turret itself gives no direction: skip silently.
                    if let Some(dir) = pos.direction_to(&controls.aim) {
                        commit_shot(turret, turret_rules, pos.angle_to(&controls.aim));
                        controls.overheat_reported = false;
                        launch = Some((*pos, Velocity::along(dir, missile_rules.speed)));
                    }
                }
                Err(FireRejection::Overheated) => {
                    if !controls.overheat_reported {
                        feedback.warning("SYSTEM OVERHEATING!");
                        controls.overheat_reported = true;
                    }
                }
            }
        }

        if !turret.fired_this_tick {
            cool(turret, turret_rules, dt);
        }
    }

    if let Some((origin, velocity)) = launch {
        let id = *next_id;
        *next_id += 1;
        world_setup::spawn_player_missile(world, id, origin, velocity, missile_rules, false);
        score.shots_fired += 1;
        feedback.event(GameEvent::ShotFired {
            missile_id: id,
            angle: velocity.y.atan2(velocity.x),
        });
    }
}
