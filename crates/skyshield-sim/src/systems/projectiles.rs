//! Projectile system: missile kinematics, lifetimes, and bounds removal.

use hecs::{Entity, World};

use skyshield_core::components::{EnemyMissile, PlayerMissile, Trail};
use skyshield_core::constants::TRAIL_LENGTH;
use skyshield_core::types::{Countdown, Position, Velocity};

use crate::ruleset::{PlayfieldRules, ProjectileRules};

/// Apply gravity and damping to a missile velocity for one step.
pub fn ballistic_step(velocity: &mut Velocity, rules: &ProjectileRules, dt: f64) {
    velocity.y += rules.gravity * dt;
    if rules.damping_per_sec < 1.0 {
        let keep = rules.damping_per_sec.powf(dt);
        velocity.x *= keep;
        velocity.y *= keep;
    }
}

/// Inside the playfield rectangle, edges included.
pub fn in_bounds(position: &Position, playfield: &PlayfieldRules) -> bool {
    position.x >= 0.0
        && position.x <= playfield.width
        && position.y >= 0.0
        && position.y <= playfield.height
}

/// Move all missiles, count down their lifetimes, and remove the expired
/// or out-of-bounds ones before collision sees them.
pub fn run(
    world: &mut World,
    playfield: &PlayfieldRules,
    player_rules: &ProjectileRules,
    enemy_rules: &ProjectileRules,
    despawn_buffer: &mut Vec<Entity>,
    dt: f64,
) {
    despawn_buffer.clear();

    for (entity, (missile, pos, vel, trail)) in
        world.query_mut::<(&mut PlayerMissile, &mut Position, &mut Velocity, &mut Trail)>()
    {
        missile.lifetime.tick(dt);
        if advance(pos, vel, trail, player_rules, playfield, &missile.lifetime, dt) {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (missile, pos, vel, trail)) in
        world.query_mut::<(&mut EnemyMissile, &mut Position, &mut Velocity, &mut Trail)>()
    {
        missile.lifetime.tick(dt);
        if advance(pos, vel, trail, enemy_rules, playfield, &missile.lifetime, dt) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Step one missile. Returns true when it should be removed.
fn advance(
    pos: &mut Position,
    vel: &mut Velocity,
    trail: &mut Trail,
    rules: &ProjectileRules,
    playfield: &PlayfieldRules,
    lifetime: &Countdown,
    dt: f64,
) -> bool {
    if lifetime.is_elapsed() {
        return true;
    }
    trail.positions.insert(0, *pos);
    trail.positions.truncate(TRAIL_LENGTH);
    ballistic_step(vel, rules, dt);
    pos.advance(vel, dt);
    !in_bounds(pos, playfield)
}
