//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the turret, aircraft, missiles and explosions with their
//! component bundles.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyshield_ai::profiles::AircraftProfile;
use skyshield_core::components::*;
use skyshield_core::constants::*;
use skyshield_core::enums::*;
use skyshield_core::types::{Countdown, Position, Velocity};

use crate::ruleset::{PlayfieldRules, ProjectileRules, TurretRules};

/// Spawn the defense turret at its fixed position with full health and no heat.
pub fn spawn_turret(world: &mut World, rules: &TurretRules) -> Entity {
    world.spawn((
        Turret {
            health: rules.max_health,
            max_health: rules.max_health,
            heat: 0.0,
            max_heat: rules.max_heat,
            aim_angle: 0.0,
            damage_per_shot: rules.damage_per_shot,
            fire_cooldown_secs: 0.0,
            fired_this_tick: false,
        },
        Position::new(rules.x, rules.y),
        Collider {
            radius: rules.radius,
        },
    ))
}

/// Spawn an aircraft just beyond the right edge at a random altitude,
/// flying left at cruise speed.
pub fn spawn_incoming_aircraft(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    id: u32,
    aircraft_type: AircraftType,
    profile: &AircraftProfile,
    playfield: &PlayfieldRules,
) -> Entity {
    let x = playfield.width + playfield.spawn_x_offset + rng.gen::<f64>() * playfield.spawn_x_spread;
    let y = playfield.spawn_y_min + rng.gen::<f64>() * playfield.spawn_y_spread;
    let jink_phase = rng.gen_range(0.0..std::f64::consts::TAU);
    spawn_aircraft(
        world,
        id,
        aircraft_type,
        profile,
        Position::new(x, y),
        Velocity::new(-profile.cruise_speed, 0.0),
        jink_phase,
    )
}

/// Spawn an aircraft with explicit kinematics.
pub fn spawn_aircraft(
    world: &mut World,
    id: u32,
    aircraft_type: AircraftType,
    profile: &AircraftProfile,
    position: Position,
    velocity: Velocity,
    jink_phase: f64,
) -> Entity {
    world.spawn((
        Aircraft {
            id,
            aircraft_type,
            health: profile.max_health,
            max_health: profile.max_health,
            missiles_fired: 0,
            max_missiles: profile.max_missiles,
            fire_timer_secs: 0.0,
            mode: CombatMode::Approach,
            jink_phase,
        },
        position,
        velocity,
        Collider {
            radius: profile.hit_radius,
        },
        Trail::default(),
    ))
}

/// Spawn a player missile. Unarmed missiles skip collision until the next tick.
pub fn spawn_player_missile(
    world: &mut World,
    id: u32,
    position: Position,
    velocity: Velocity,
    rules: &ProjectileRules,
    armed: bool,
) -> Entity {
    world.spawn((
        PlayerMissile {
            id,
            lifetime: Countdown::new(rules.lifetime_secs),
            armed,
        },
        position,
        velocity,
        Collider {
            radius: rules.radius,
        },
        Trail::default(),
    ))
}

/// Spawn an enemy missile carrying `damage` for the turret.
#[allow(clippy::too_many_arguments)]
pub fn spawn_enemy_missile(
    world: &mut World,
    id: u32,
    source: AircraftType,
    damage: f64,
    position: Position,
    velocity: Velocity,
    rules: &ProjectileRules,
    armed: bool,
) -> Entity {
    world.spawn((
        EnemyMissile {
            id,
            source,
            damage,
            lifetime: Countdown::new(rules.lifetime_secs),
            armed,
        },
        position,
        velocity,
        Collider {
            radius: rules.radius,
        },
        Trail::default(),
    ))
}

/// Spawn a visual explosion.
pub fn spawn_explosion(world: &mut World, kind: ExplosionKind, position: Position) -> Entity {
    let (size, lifetime) = match kind {
        ExplosionKind::Blast => (EXPLOSION_SIZE, EXPLOSION_LIFETIME_SECS),
        ExplosionKind::Cyber => (CYBER_EXPLOSION_SIZE, CYBER_EXPLOSION_LIFETIME_SECS),
    };
    world.spawn((
        Explosion {
            kind,
            size,
            remaining: Countdown::new(lifetime),
            total_secs: lifetime,
        },
        position,
    ))
}
