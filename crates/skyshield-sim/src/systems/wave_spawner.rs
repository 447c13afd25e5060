//! Wave spawning system: intermission countdown, wave start, per-aircraft
//! spawn cadence, and wave completion.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyshield_core::components::Aircraft;
use skyshield_core::events::GameEvent;
use skyshield_core::types::Countdown;

use crate::feedback::Feedback;
use crate::ruleset::Ruleset;
use crate::world_setup;

/// Wave progression state.
#[derive(Debug, Clone, Default)]
pub struct WaveState {
    /// Current (or next, during intermission) wave number, starting at 1.
    pub wave: u32,
    /// Quota for the current wave.
    pub total: u32,
    pub spawned: u32,
    pub active: bool,
    /// Countdown to the next wave while inactive.
    pub intermission: Countdown,
    /// Per-aircraft spawn sub-timer while active.
    pub spawn_timer: Countdown,
}

impl WaveState {
    /// Fresh state for a new game: wave 1 pending after the first delay.
    pub fn new(ruleset: &Ruleset) -> Self {
        Self {
            wave: 1,
            total: 0,
            spawned: 0,
            active: false,
            intermission: Countdown::new(ruleset.waves.first_wave_delay_secs),
            spawn_timer: Countdown::elapsed(),
        }
    }

    pub fn remaining_to_spawn(&self) -> u32 {
        if self.active {
            self.total.saturating_sub(self.spawned)
        } else {
            0
        }
    }
}

/// Count live aircraft.
pub fn live_aircraft(world: &World) -> u32 {
    world.query::<&Aircraft>().iter().count() as u32
}

/// Advance the intermission, start waves, and spawn at most one aircraft.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    waves: &mut WaveState,
    ruleset: &Ruleset,
    next_id: &mut u32,
    feedback: &mut Feedback,
    dt: f64,
) {
    if !waves.active {
        waves.intermission.tick(dt);
        if !waves.intermission.is_elapsed() {
            return;
        }
        start_wave(waves, ruleset, feedback);
    }

    waves.spawn_timer.tick(dt);
    if !waves.spawn_timer.is_elapsed()
        || waves.spawned >= waves.total
        || live_aircraft(world) >= ruleset.waves.concurrency_limit
    {
        return;
    }

    let aircraft_type = ruleset.selection.choose(waves.wave, rng);
    let Some(profile) = ruleset.aircraft.get(aircraft_type) else {
        log::warn!("No profile for {aircraft_type}, skipping spawn");
        waves.spawn_timer.reset(ruleset.waves.spawn_interval(waves.wave));
        return;
    };

    let id = *next_id;
    *next_id += 1;
    world_setup::spawn_incoming_aircraft(
        world,
        rng,
        id,
        aircraft_type,
        profile,
        &ruleset.playfield,
    );
    waves.spawned += 1;
    waves.spawn_timer.reset(ruleset.waves.spawn_interval(waves.wave));

    log::debug!(
        "Spawned {aircraft_type} #{id} ({}/{} of wave {})",
        waves.spawned,
        waves.total,
        waves.wave
    );
    feedback.event(GameEvent::AircraftSpawned {
        aircraft_id: id,
        aircraft_type,
    });
    if let Some(spawn_alert) = &profile.spawn_alert {
        if rng.gen::<f64>() < spawn_alert.chance {
            feedback.warning(spawn_alert.message.clone());
        }
    }
}

fn start_wave(waves: &mut WaveState, ruleset: &Ruleset, feedback: &mut Feedback) {
    waves.active = true;
    waves.total = ruleset.waves.quota(waves.wave);
    waves.spawned = 0;
    waves.spawn_timer = Countdown::elapsed();

    log::info!("Wave {} started: {} aircraft", waves.wave, waves.total);
    feedback.event(GameEvent::WaveStarted {
        wave: waves.wave,
        total: waves.total,
    });
    if ruleset.waves.announce {
        feedback.warning(format!(
            "WAVE {} - {} TARGETS INBOUND",
            waves.wave, waves.total
        ));
    }
}

/// End the active wave once its quota is spawned and the sky is clear.
pub fn check_wave_cleared(
    world: &World,
    waves: &mut WaveState,
    ruleset: &Ruleset,
    feedback: &mut Feedback,
) {
    if !waves.active || waves.spawned < waves.total || live_aircraft(world) > 0 {
        return;
    }

    let cleared = waves.wave;
    waves.active = false;
    waves
        .intermission
        .reset(ruleset.waves.intermission_after(cleared));
    waves.wave += 1;

    log::info!(
        "Wave {cleared} cleared, next in {:.1}s",
        waves.intermission.remaining_secs
    );
    feedback.event(GameEvent::WaveCleared { wave: cleared });
    if ruleset.waves.announce {
        feedback.info("WAVE CLEARED - PREPARE FOR NEXT ASSAULT");
    }
}
