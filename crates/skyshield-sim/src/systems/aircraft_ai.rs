//! Aircraft AI system: behavior modes, flight, and missile launches.
//!
//! Calls into skyshield-ai for the pure decisions, then writes the results
//! back to the ECS components.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use skyshield_ai::firing::{fire_roll, FireInput};
use skyshield_ai::flight;
use skyshield_ai::fsm::{self, BehaviorContext, GuidanceContext};
use skyshield_ai::steering;
use skyshield_core::components::{Aircraft, PlayerMissile, Trail, Turret};
use skyshield_core::constants::TRAIL_LENGTH;
use skyshield_core::enums::{AircraftType, CombatMode};
use skyshield_core::events::GameEvent;
use skyshield_core::types::{Position, Velocity};

use crate::feedback::Feedback;
use crate::ruleset::{FlightModel, Ruleset};
use crate::world_setup;

struct AircraftUpdate {
    entity: Entity,
    mode: CombatMode,
    position: Position,
    velocity: Velocity,
    fire_timer_secs: f64,
    launch: Option<Velocity>,
}

/// Distance used for the launch range check. Steering aircraft measure it to
/// their approach point, the others to the turret itself.
pub fn fire_distance(position: &Position, turret: &Position, ruleset: &Ruleset) -> f64 {
    match ruleset.flight {
        FlightModel::Steering => {
            position.distance_to(&steering::approach_point(turret, &ruleset.steering))
        }
        FlightModel::Tactical | FlightModel::Aerodynamic => position.distance_to(turret),
    }
}

/// Update every aircraft: pick a mode, fly, and maybe launch at the turret.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    ruleset: &Ruleset,
    next_id: &mut u32,
    feedback: &mut Feedback,
    elapsed_secs: f64,
    dt: f64,
) {
    let Some(turret_pos) = turret_position(world) else {
        return;
    };
    let missile_threats = world.query::<&PlayerMissile>().iter().count() as u32;
    let altitude_min = ruleset.playfield.altitude_min;
    let altitude_max = ruleset.altitude_max();

    // Snapshot aircraft in id order so RNG draws are stable.
    let mut aircraft: Vec<(Entity, Aircraft, Position, Velocity)> = world
        .query::<(&Aircraft, &Position, &Velocity)>()
        .iter()
        .map(|(entity, (a, pos, vel))| (entity, a.clone(), *pos, *vel))
        .collect();
    aircraft.sort_by_key(|(_, a, _, _)| a.id);

    let mut updates: Vec<AircraftUpdate> = Vec::with_capacity(aircraft.len());
    let mut launches: Vec<(AircraftType, f64, Position, Velocity, u32)> = Vec::new();

    for (entity, state, pos, vel) in aircraft {
        let Some(profile) = ruleset.aircraft.get(state.aircraft_type) else {
            log::warn!("No profile for {}, aircraft #{} idle", state.aircraft_type, state.id);
            continue;
        };
        let distance = pos.distance_to(&turret_pos);

        let (mode, mut velocity) = match ruleset.flight {
            FlightModel::Steering => (
                state.mode,
                steering::steer_toward_turret(&pos, &vel, &turret_pos, &ruleset.steering, dt),
            ),
            FlightModel::Tactical | FlightModel::Aerodynamic => {
                let mode = fsm::next_mode(
                    &BehaviorContext {
                        mode: state.mode,
                        distance,
                        health_fraction: state.health / state.max_health,
                        missile_threats,
                    },
                    profile,
                );
                let guidance = fsm::guidance(
                    mode,
                    profile,
                    &GuidanceContext {
                        turret_y: turret_pos.y,
                        altitude_min,
                        elapsed_secs,
                        jink_phase: state.jink_phase,
                    },
                );
                let base = if ruleset.flight == FlightModel::Aerodynamic {
                    flight::integrate(&profile.airframe, vel, guidance.speed_factor.abs(), dt)
                } else {
                    vel
                };
                let velocity = steering::follow_guidance(
                    &pos,
                    &base,
                    guidance.target_y,
                    -profile.cruise_speed * guidance.speed_factor,
                    profile.max_climb_rate,
                    dt,
                );
                (mode, velocity)
            }
        };

        let mut position = pos;
        position.advance(&velocity, dt);
        steering::clamp_altitude(&mut position, &mut velocity, altitude_min, altitude_max);

        let fire = fire_roll(
            &FireInput {
                timer_secs: state.fire_timer_secs,
                missiles_fired: state.missiles_fired,
                distance_to_turret: fire_distance(&pos, &turret_pos, ruleset),
                mode_allows: fsm::can_fire(mode),
            },
            profile,
            rng,
            dt,
        );
        let launch = if fire.launch {
            position
                .direction_to(&turret_pos)
                .map(|dir| Velocity::along(dir, ruleset.enemy_missile.speed))
        } else {
            None
        };
        if let Some(missile_vel) = launch {
            launches.push((
                state.aircraft_type,
                profile.missile_damage,
                position,
                missile_vel,
                state.id,
            ));
            feedback.warning(profile.launch_alert.clone());
        }

        if mode != state.mode {
            log::debug!("Aircraft #{} {:?} -> {:?}", state.id, state.mode, mode);
            feedback.event(GameEvent::AircraftModeChanged {
                aircraft_id: state.id,
                mode,
            });
        }

        updates.push(AircraftUpdate {
            entity,
            mode,
            position,
            velocity,
            fire_timer_secs: fire.timer_secs,
            launch,
        });
    }

    // Apply updates
    for update in updates {
        if let Ok((a, pos, vel, trail)) =
            world.query_one_mut::<(&mut Aircraft, &mut Position, &mut Velocity, &mut Trail)>(
                update.entity,
            )
        {
            trail.positions.insert(0, *pos);
            trail.positions.truncate(TRAIL_LENGTH);
            *pos = update.position;
            *vel = update.velocity;
            a.mode = update.mode;
            a.fire_timer_secs = update.fire_timer_secs;
            if update.launch.is_some() {
                a.missiles_fired += 1;
            }
        }
    }

    for (source, damage, origin, velocity, aircraft_id) in launches {
        let id = *next_id;
        *next_id += 1;
        world_setup::spawn_enemy_missile(
            world,
            id,
            source,
            damage,
            origin,
            velocity,
            &ruleset.enemy_missile,
            false,
        );
        log::debug!("{source} #{aircraft_id} launched missile #{id}");
        feedback.event(GameEvent::EnemyMissileLaunched {
            aircraft_id,
            aircraft_type: source,
        });
    }
}

fn turret_position(world: &World) -> Option<Position> {
    world
        .query::<(&Turret, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| *pos)
}
