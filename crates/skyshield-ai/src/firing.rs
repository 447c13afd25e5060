//! Aircraft firing decision.

use rand::Rng;

use crate::profiles::AircraftProfile;

/// Firing state of one aircraft for this tick.
#[derive(Debug, Clone, Copy)]
pub struct FireInput {
    /// Seconds since the last roll, before this tick.
    pub timer_secs: f64,
    pub missiles_fired: u32,
    pub distance_to_turret: f64,
    /// Whether the current behavior mode permits firing.
    pub mode_allows: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireOutcome {
    pub timer_secs: f64,
    pub launch: bool,
}

/// Advance the firing timer by `dt` and roll once it passes the interval.
///
/// The roll happens only while under the missile cap; the timer resets after
/// every roll whether or not a missile leaves. A launch also needs the mode
/// to allow it and the turret to be within fire range.
pub fn fire_roll<R: Rng>(
    input: &FireInput,
    profile: &AircraftProfile,
    rng: &mut R,
    dt: f64,
) -> FireOutcome {
    let timer_secs = input.timer_secs + dt;
    if timer_secs <= profile.fire_interval_secs || input.missiles_fired >= profile.max_missiles {
        return FireOutcome {
            timer_secs,
            launch: false,
        };
    }

    let roll: f64 = rng.gen();
    let launch = roll < profile.fire_chance
        && input.mode_allows
        && input.distance_to_turret < profile.fire_range;

    FireOutcome {
        timer_secs: 0.0,
        launch,
    }
}
