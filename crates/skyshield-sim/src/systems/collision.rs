//! Collision system: circle tests between missiles, aircraft, and the turret.
//!
//! Each player missile resolves at most one collision, aircraft first, then
//! enemy missiles. Unarmed missiles (launched this tick) are skipped.
//! Entities are visited in id order.

use hecs::{Entity, World};

use skyshield_core::components::{Aircraft, Collider, EnemyMissile, PlayerMissile, Turret};
use skyshield_core::events::GameEvent;
use skyshield_core::types::{circles_overlap, Position};

use crate::feedback::Feedback;
use crate::ruleset::ScoringRules;
use crate::score::ScoreState;
use crate::systems::defense;

struct Body {
    entity: Entity,
    id: u32,
    position: Position,
    radius: f64,
}

struct Target {
    body: Body,
    health: f64,
    hit: bool,
}

struct Threat {
    body: Body,
    damage: f64,
    alive: bool,
}

pub fn run(
    world: &mut World,
    scoring: &ScoringRules,
    score: &mut ScoreState,
    feedback: &mut Feedback,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let mut player_missiles: Vec<Body> = world
        .query::<(&PlayerMissile, &Position, &Collider)>()
        .iter()
        .filter(|(_, (m, _, _))| m.armed)
        .map(|(entity, (m, pos, c))| Body {
            entity,
            id: m.id,
            position: *pos,
            radius: c.radius,
        })
        .collect();
    player_missiles.sort_by_key(|b| b.id);

    let mut aircraft: Vec<Target> = world
        .query::<(&Aircraft, &Position, &Collider)>()
        .iter()
        .map(|(entity, (a, pos, c))| Target {
            body: Body {
                entity,
                id: a.id,
                position: *pos,
                radius: c.radius,
            },
            health: a.health,
            hit: false,
        })
        .collect();
    aircraft.sort_by_key(|t| t.body.id);

    let mut threats: Vec<Threat> = world
        .query::<(&EnemyMissile, &Position, &Collider)>()
        .iter()
        .filter(|(_, (m, _, _))| m.armed)
        .map(|(entity, (m, pos, c))| Threat {
            body: Body {
                entity,
                id: m.id,
                position: *pos,
                radius: c.radius,
            },
            damage: m.damage,
            alive: true,
        })
        .collect();
    threats.sort_by_key(|t| t.body.id);

    let damage = turret_damage(world);

    // Player missile x aircraft, then player missile x enemy missile.
    for missile in &player_missiles {
        if let Some(target) = aircraft
            .iter_mut()
            .find(|t| t.health > 0.0 && overlaps(&missile.position, missile.radius, &t.body))
        {
            target.health = (target.health - damage).max(0.0);
            target.hit = true;
            despawn_buffer.push(missile.entity);
            score.score += scoring.hit;
            score.shots_hit += 1;
            feedback.event(GameEvent::AircraftHit {
                aircraft_id: target.body.id,
                damage,
                remaining_health: target.health,
            });
            continue;
        }

        if let Some(threat) = threats
            .iter_mut()
            .find(|t| t.alive && overlaps(&missile.position, missile.radius, &t.body))
        {
            threat.alive = false;
            despawn_buffer.push(missile.entity);
            despawn_buffer.push(threat.body.entity);
            score.score += scoring.intercept;
            score.shots_hit += 1;
            score.intercepts += 1;
            feedback.warning("MISSILE INTERCEPTED!");
            feedback.event(GameEvent::MissileIntercepted {
                position: threat.body.position,
            });
        }
    }

    // Enemy missile x turret. Stops once the turret is destroyed.
    for (_entity, (turret, pos, collider)) in
        world.query_mut::<(&mut Turret, &Position, &Collider)>()
    {
        for threat in threats.iter_mut().filter(|t| t.alive) {
            if defense::is_destroyed(turret) {
                break;
            }
            if !overlaps(pos, collider.radius, &threat.body) {
                continue;
            }
            threat.alive = false;
            despawn_buffer.push(threat.body.entity);
            defense::apply_damage(turret, threat.damage);
            feedback.warning(format!("DIRECT HIT! -{}", threat.damage));
            feedback.event(GameEvent::TurretHit {
                damage: threat.damage,
                remaining_health: turret.health,
            });
        }
    }

    // Write back aircraft health.
    for target in aircraft.iter().filter(|t| t.hit) {
        if let Ok(mut a) = world.get::<&mut Aircraft>(target.body.entity) {
            a.health = target.health;
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

fn overlaps(position: &Position, radius: f64, body: &Body) -> bool {
    circles_overlap(position, radius, &body.position, body.radius)
}

fn turret_damage(world: &World) -> f64 {
    world
        .query::<&Turret>()
        .iter()
        .next()
        .map(|(_, t)| t.damage_per_shot)
        .unwrap_or_default()
}
