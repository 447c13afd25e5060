//! Effects: explosion decay, the status banner, and the day/night cycle.
//! None of this feeds back into gameplay.

use hecs::{Entity, World};

use skyshield_core::components::Explosion;
use skyshield_core::constants::{BANNER_DURATION_SECS, DAY_CYCLE_START};
use skyshield_core::events::Alert;
use skyshield_core::types::Countdown;

/// Cosmetic state owned by the engine.
#[derive(Debug, Clone)]
pub struct Atmosphere {
    /// Day/night position in [0, 1).
    pub day_cycle: f64,
    pub banner: Option<Alert>,
    pub banner_timer: Countdown,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            day_cycle: DAY_CYCLE_START,
            banner: None,
            banner_timer: Countdown::elapsed(),
        }
    }
}

impl Atmosphere {
    /// Show the most recent alert, if any were raised.
    pub fn post(&mut self, alerts: &[Alert]) {
        if let Some(latest) = alerts.last() {
            self.banner = Some(latest.clone());
            self.banner_timer.reset(BANNER_DURATION_SECS);
        }
    }
}

/// Advance the day/night cycle once per tick, wrapping at 1.
pub fn advance_day_cycle(atmosphere: &mut Atmosphere, rate_per_sec: f64, dt: f64) {
    atmosphere.day_cycle = (atmosphere.day_cycle + rate_per_sec * dt).rem_euclid(1.0);
}

/// Decay explosions and expire the banner.
pub fn run(
    world: &mut World,
    atmosphere: &mut Atmosphere,
    despawn_buffer: &mut Vec<Entity>,
    dt: f64,
) {
    despawn_buffer.clear();

    for (entity, explosion) in world.query_mut::<&mut Explosion>() {
        explosion.remaining.tick(dt);
        if explosion.remaining.is_elapsed() {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    atmosphere.banner_timer.tick(dt);
    if atmosphere.banner_timer.is_elapsed() {
        atmosphere.banner = None;
    }
}
