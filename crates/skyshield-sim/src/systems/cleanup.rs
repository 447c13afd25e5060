//! Cleanup system: resolves casualties and escapes, and arms missiles
//! launched this tick.

use hecs::{Entity, World};

use skyshield_core::components::{Aircraft, EnemyMissile, PlayerMissile};
use skyshield_core::enums::{CombatMode, ExplosionKind};
use skyshield_core::events::GameEvent;
use skyshield_core::types::Position;

use crate::feedback::Feedback;
use crate::ruleset::Ruleset;
use crate::score::ScoreState;
use crate::world_setup;

/// Whether an aircraft has left the playfield for good.
///
/// Inbound aircraft escape past the left edge margin; retreating aircraft
/// may also leave past the right margin.
pub fn has_escaped(position: &Position, mode: CombatMode, ruleset: &Ruleset) -> bool {
    let playfield = &ruleset.playfield;
    position.x < playfield.escape_min_x
        || (mode == CombatMode::Retreat
            && position.x > playfield.width + playfield.escape_margin_right)
}

pub fn run(
    world: &mut World,
    ruleset: &Ruleset,
    score: &mut ScoreState,
    feedback: &mut Feedback,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let mut casualties: Vec<(u32, Entity, Aircraft, Position)> = Vec::new();
    let mut escapes: Vec<(u32, Entity)> = Vec::new();
    for (entity, (aircraft, pos)) in world.query::<(&Aircraft, &Position)>().iter() {
        if aircraft.health <= 0.0 {
            casualties.push((aircraft.id, entity, aircraft.clone(), *pos));
        } else if has_escaped(pos, aircraft.mode, ruleset) {
            escapes.push((aircraft.id, entity));
        }
    }
    casualties.sort_by_key(|(id, ..)| *id);
    escapes.sort_by_key(|(id, _)| *id);

    for (id, entity, aircraft, pos) in casualties {
        let kill_score = ruleset
            .aircraft
            .get(aircraft.aircraft_type)
            .map(|p| p.kill_score)
            .unwrap_or_default();
        score.score += kill_score;
        score.kills += 1;
        despawn_buffer.push(entity);
        world_setup::spawn_explosion(world, ExplosionKind::Blast, pos);

        log::debug!("{} #{id} destroyed (+{kill_score})", aircraft.aircraft_type);
        feedback.info(format!(
            "{} DESTROYED! +{kill_score}",
            aircraft.aircraft_type
        ));
        feedback.event(GameEvent::AircraftDestroyed {
            aircraft_id: id,
            aircraft_type: aircraft.aircraft_type,
            score: kill_score,
        });
    }

    for (id, entity) in escapes {
        score.escapes += 1;
        despawn_buffer.push(entity);
        feedback.warning("TARGET ESCAPED");
        feedback.event(GameEvent::AircraftEscaped { aircraft_id: id });
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    // Missiles that survived their first tick become collision candidates.
    for (_entity, missile) in world.query_mut::<&mut PlayerMissile>() {
        missile.armed = true;
    }
    for (_entity, missile) in world.query_mut::<&mut EnemyMissile>() {
        missile.armed = true;
    }
}
