//! Cyber attack: cooldown-gated special weapon that damages aircraft
//! without using the projectile system.

use hecs::{Entity, World};

use skyshield_core::components::Aircraft;
use skyshield_core::enums::{AlertLevel, ExplosionKind};
use skyshield_core::events::GameEvent;
use skyshield_core::types::{Countdown, Position};

use crate::feedback::Feedback;
use crate::ruleset::{CyberMode, CyberRules};
use crate::score::ScoreState;
use crate::world_setup;

#[derive(Debug, Clone, Default)]
pub struct CyberState {
    pub cooldown: Countdown,
}

impl CyberState {
    pub fn is_ready(&self) -> bool {
        self.cooldown.is_elapsed()
    }
}

/// Why an activation was refused. Refusals change no state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyberRejection {
    /// Cooldown still running.
    Charging,
    /// Nothing to hit.
    NoTargets,
}

/// Outcome of an accepted activation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CyberReport {
    pub targets_hit: u32,
    pub destroyed: u32,
    pub total_damage: f64,
    pub score_bonus: u64,
}

pub fn recharge(cyber: &mut CyberState, dt: f64) {
    cyber.cooldown.tick(dt);
}

/// Fire the cyber weapon. Aircraft destroyed by it are removed immediately
/// and count as kills without the per-type kill bonus.
pub fn launch(
    world: &mut World,
    cyber: &mut CyberState,
    rules: &CyberRules,
    turret: &Position,
    score: &mut ScoreState,
    feedback: &mut Feedback,
) -> Result<CyberReport, CyberRejection> {
    if !cyber.is_ready() {
        return Err(CyberRejection::Charging);
    }

    let mut targets: Vec<(u32, Entity, Position, f64)> = world
        .query::<(&Aircraft, &Position)>()
        .iter()
        .map(|(entity, (a, pos))| (a.id, entity, *pos, a.health))
        .collect();
    if targets.is_empty() {
        return Err(CyberRejection::NoTargets);
    }
    targets.sort_by_key(|(id, ..)| *id);

    let mut report = CyberReport::default();
    let mut damaged: Vec<(Entity, Position, f64)> = Vec::new();

    match &rules.mode {
        CyberMode::AreaPulse {
            center_x,
            center_y,
            base_damage,
            falloff,
            min_factor,
            score_per_damage,
            score_per_kill,
        } => {
            let center = Position::new(*center_x, *center_y);
            for (_id, entity, pos, health) in &targets {
                let factor = (1.0 - pos.distance_to(&center) / falloff).max(*min_factor);
                let applied = (base_damage * factor).floor().min(*health);
                let remaining = health - applied;
                report.targets_hit += 1;
                report.total_damage += applied;
                if remaining <= 0.0 {
                    report.destroyed += 1;
                }
                damaged.push((*entity, *pos, remaining));
            }
            report.score_bonus = report.total_damage as u64 * score_per_damage
                + report.destroyed as u64 * score_per_kill;
        }
        CyberMode::ClosestTarget {
            damage,
            health_floor,
            score_per_damage,
        } => {
            // Ties go to the lowest id.
            let closest = targets.iter().min_by(|a, b| {
                a.2.distance_to(turret)
                    .total_cmp(&b.2.distance_to(turret))
            });
            if let Some((_id, entity, pos, health)) = closest {
                let applied = damage.min((health - health_floor).max(0.0));
                report.targets_hit = 1;
                report.total_damage = applied;
                report.score_bonus = applied as u64 * score_per_damage;
                damaged.push((*entity, *pos, health - applied));
            }
        }
    }

    for (entity, pos, remaining) in damaged {
        world_setup::spawn_explosion(world, ExplosionKind::Cyber, pos);
        if remaining <= 0.0 {
            let _ = world.despawn(entity);
        } else if let Ok(mut a) = world.get::<&mut Aircraft>(entity) {
            a.health = remaining;
        }
    }

    cyber.cooldown.reset(rules.cooldown_secs);
    score.score += report.score_bonus;
    score.kills += report.destroyed;
    score.cyber_attacks += 1;

    log::debug!(
        "Cyber attack: {} hit, {} destroyed, {} damage, +{}",
        report.targets_hit,
        report.destroyed,
        report.total_damage,
        report.score_bonus
    );
    feedback.alert(
        AlertLevel::Cyber,
        format!(
            "CYBER ATTACK! {} TARGETS HIT, {} DESTROYED +{}",
            report.targets_hit, report.destroyed, report.score_bonus
        ),
    );
    feedback.event(GameEvent::CyberAttack {
        targets_hit: report.targets_hit,
        destroyed: report.destroyed,
        total_damage: report.total_damage,
        score_bonus: report.score_bonus,
    });

    Ok(report)
}
