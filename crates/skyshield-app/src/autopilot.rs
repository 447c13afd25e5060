//! Autopilot gunners: stand-ins for the player in headless runs.
//!
//! A gunner reads each snapshot and answers with the commands to queue for
//! the next tick.

use skyshield_core::commands::PlayerCommand;
use skyshield_core::constants::PLAYER_MISSILE_SPEED;
use skyshield_core::enums::GamePhase;
use skyshield_core::state::GameStateSnapshot;
use skyshield_core::types::{Position, Velocity};

pub trait Gunner {
    fn id(&self) -> &'static str;
    fn reset(&mut self);
    fn next_commands(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand>;
}

/// Enemy missiles closer than this to the turret take priority over aircraft.
pub const THREAT_RADIUS: f64 = 250.0;
/// Minimum live aircraft before the sentry spends the cyber attack.
pub const CYBER_MIN_TARGETS: usize = 3;

/// Shoots the most urgent thing in the sky.
///
/// Incoming missiles near the turret first (closest wins), otherwise the
/// nearest aircraft. Leads the target by its flight time. Lets go of the
/// trigger while the overheat indicator is lit.
#[derive(Debug, Default)]
pub struct SentryGunner {
    trigger_held: bool,
}

impl SentryGunner {
    pub fn new() -> Self {
        Self::default()
    }

    fn pick_target(snapshot: &GameStateSnapshot) -> Option<(Position, Velocity)> {
        let turret = snapshot.turret.position;

        let missile = snapshot
            .enemy_missiles
            .iter()
            .map(|m| (m.position.distance_to(&turret), m.position, m.velocity))
            .filter(|(d, ..)| *d < THREAT_RADIUS)
            .min_by(|a, b| a.0.total_cmp(&b.0));
        if let Some((_, pos, vel)) = missile {
            return Some((pos, vel));
        }

        snapshot
            .aircraft
            .iter()
            .map(|a| (a.position.distance_to(&turret), a.position, a.velocity))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, pos, vel)| (pos, vel))
    }
}

/// Where to aim so a missile fired from `origin` meets the target,
/// assuming it keeps its velocity for the flight time to its current spot.
pub fn lead_point(origin: &Position, target: &Position, velocity: &Velocity) -> Position {
    let flight_secs = origin.distance_to(target) / PLAYER_MISSILE_SPEED;
    Position::new(
        target.x + velocity.x * flight_secs,
        target.y + velocity.y * flight_secs,
    )
}

impl Gunner for SentryGunner {
    fn id(&self) -> &'static str {
        "sentry"
    }

    fn reset(&mut self) {
        self.trigger_held = false;
    }

    fn next_commands(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        match snapshot.phase {
            GamePhase::Splash => {
                self.reset();
                return vec![PlayerCommand::StartGame];
            }
            GamePhase::Active => {}
            GamePhase::Paused | GamePhase::GameOver => return Vec::new(),
        }

        let mut commands = Vec::new();
        let target = Self::pick_target(snapshot);

        if let Some((pos, vel)) = &target {
            let aim = lead_point(&snapshot.turret.position, pos, vel);
            commands.push(PlayerCommand::Aim { x: aim.x, y: aim.y });
        }

        let want_trigger = target.is_some() && !snapshot.turret.overheated;
        if want_trigger != self.trigger_held {
            self.trigger_held = want_trigger;
            commands.push(PlayerCommand::SetTrigger { held: want_trigger });
        }

        if snapshot.cyber.ready && snapshot.aircraft.len() >= CYBER_MIN_TARGETS {
            commands.push(PlayerCommand::CyberAttack);
        }

        commands
    }
}

/// Create a gunner by id.
pub fn create_gunner(id: &str) -> Option<Box<dyn Gunner>> {
    match id {
        "sentry" => Some(Box::new(SentryGunner::new())),
        _ => None,
    }
}
