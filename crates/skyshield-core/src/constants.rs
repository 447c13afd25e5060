//! Simulation constants and tuning parameters.
//!
//! These are the defaults the `classic` ruleset is built from. Speeds are in
//! pixels per second and durations in seconds of simulated time; the frame
//! counts they derive from assume the nominal 60 Hz tick.

/// Nominal simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the nominal rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Playfield ---

pub const PLAYFIELD_WIDTH: f64 = 1000.0;
pub const PLAYFIELD_HEIGHT: f64 = 600.0;

/// Aircraft leaving past this x (moving left) have escaped.
pub const ESCAPE_MIN_X: f64 = -200.0;

/// Retreating aircraft leaving past `width + ESCAPE_MARGIN_RIGHT` have escaped.
pub const ESCAPE_MARGIN_RIGHT: f64 = 400.0;

/// Aircraft altitude band: [ALTITUDE_MIN, height - ALTITUDE_FLOOR_MARGIN].
pub const ALTITUDE_MIN: f64 = 40.0;
pub const ALTITUDE_FLOOR_MARGIN: f64 = 160.0;

/// Horizontal spawn offset beyond the right edge: width + base + rand * spread.
pub const SPAWN_X_OFFSET: f64 = 100.0;
pub const SPAWN_X_SPREAD: f64 = 200.0;

/// Vertical spawn band: base + rand * spread.
pub const SPAWN_Y_MIN: f64 = 50.0;
pub const SPAWN_Y_SPREAD: f64 = 300.0;

/// Maximum trail points kept per aircraft or missile.
pub const TRAIL_LENGTH: usize = 10;

// --- Turret ---

pub const TURRET_X: f64 = 150.0;
pub const TURRET_Y: f64 = 480.0;
pub const TURRET_RADIUS: f64 = 35.0;
pub const TURRET_MAX_HEALTH: f64 = 10_000.0;
pub const TURRET_MAX_HEAT: f64 = 100.0;

/// Heat added per shot.
pub const HEAT_PER_SHOT: f64 = 6.0;

/// Heat removed per second on ticks without a shot (2 per frame).
pub const HEAT_COOLING_PER_SEC: f64 = 120.0;

/// Firing is rejected while heat > max - margin.
pub const OVERHEAT_MARGIN: f64 = 15.0;

/// Heat above this lights the overheat indicator (display only).
pub const OVERHEAT_DISPLAY_THRESHOLD: f64 = 80.0;

/// Damage a player missile deals to an aircraft.
pub const TURRET_DAMAGE_PER_SHOT: f64 = 35.0;

/// Minimum time between shots while the trigger is held (every 2nd frame).
pub const FIRE_INTERVAL_SECS: f64 = 2.0 / 60.0;

/// Health at or below this flags the danger indicator.
pub const HEALTH_DANGER_THRESHOLD: f64 = 2000.0;

// --- Missiles ---

/// Player missile speed (9 px/frame).
pub const PLAYER_MISSILE_SPEED: f64 = 540.0;
pub const PLAYER_MISSILE_LIFETIME_SECS: f64 = 200.0 / 60.0;
pub const PLAYER_MISSILE_RADIUS: f64 = 5.0;

/// Enemy missile speed (3.5 px/frame).
pub const ENEMY_MISSILE_SPEED: f64 = 210.0;
pub const ENEMY_MISSILE_LIFETIME_SECS: f64 = 400.0 / 60.0;
pub const ENEMY_MISSILE_RADIUS: f64 = 8.0;

// --- Scoring ---

pub const SCORE_PER_HIT: u64 = 10;
pub const SCORE_PER_INTERCEPT: u64 = 50;

// --- Aircraft firing ---

/// Probability that a due firing roll launches a missile (rand > 0.7).
pub const AIRCRAFT_FIRE_CHANCE: f64 = 0.3;

/// Aircraft only fire within this distance of the turret.
pub const AIRCRAFT_FIRE_RANGE: f64 = 400.0;

// --- Steering (simplest flight model) ---

/// Vertical nudge gain: 0.006 px/frame² per px of error, expressed per second².
pub const STEERING_GAIN: f64 = 21.6;

/// No steering while closer than this to the aim point.
pub const STEERING_DEADBAND: f64 = 200.0;

/// Aircraft aim this far above the turret.
pub const STEERING_APPROACH_OFFSET: f64 = 100.0;

// --- Effects ---

pub const EXPLOSION_LIFETIME_SECS: f64 = 0.5;
pub const EXPLOSION_SIZE: f64 = 30.0;
pub const CYBER_EXPLOSION_LIFETIME_SECS: f64 = 40.0 / 60.0;
pub const CYBER_EXPLOSION_SIZE: f64 = 60.0;

/// How long an alert stays on the status banner.
pub const BANNER_DURATION_SECS: f64 = 2.0;

// --- Day/night ---

/// Cycle advance per second (0.00003 per frame, advanced once).
pub const DAY_CYCLE_PER_SEC: f64 = 0.0018;
pub const DAY_CYCLE_START: f64 = 0.5;

// --- Cyber attack ---

pub const CYBER_COOLDOWN_SECS: f64 = 3.0;
pub const CYBER_PULSE_CENTER_X: f64 = 500.0;
pub const CYBER_PULSE_CENTER_Y: f64 = 200.0;
pub const CYBER_PULSE_BASE_DAMAGE: f64 = 180.0;
pub const CYBER_PULSE_FALLOFF: f64 = 500.0;
pub const CYBER_PULSE_MIN_FACTOR: f64 = 0.3;
pub const CYBER_SCORE_PER_DAMAGE: u64 = 3;
pub const CYBER_SCORE_PER_KILL: u64 = 100;

/// Closest-target strike damage and surviving health floor.
pub const CYBER_STRIKE_DAMAGE: f64 = 250.0;
pub const CYBER_STRIKE_HEALTH_FLOOR: f64 = 50.0;

// --- Waves ---

/// Intermission before wave 1 (1200 frames).
pub const WAVE_INTERMISSION_SECS: f64 = 20.0;
pub const WAVE_INTERMISSION_MIN_SECS: f64 = 10.0;
pub const WAVE_INTERMISSION_REDUCTION_SECS: f64 = 0.5;

pub const WAVE_QUOTA_BASE: f64 = 6.0;
pub const WAVE_QUOTA_PER_WAVE: f64 = 1.5;
pub const WAVE_QUOTA_MAX: u32 = 12;
pub const WAVE_CONCURRENCY_LIMIT: u32 = 6;

/// Spawn sub-timer: max(min, base / min(wave * divisor, cap)).
pub const SPAWN_INTERVAL_SECS: f64 = 0.75;
pub const SPAWN_INTERVAL_MIN_SECS: f64 = 20.0 / 60.0;
pub const SPAWN_INTERVAL_DIVISOR_PER_WAVE: f64 = 0.1;
pub const SPAWN_INTERVAL_DIVISOR_CAP: f64 = 2.0;

pub const BOMBER_CHANCE_BASE: f64 = 0.4;
pub const BOMBER_CHANCE_PER_WAVE: f64 = 0.05;
pub const BOMBER_CHANCE_MAX: f64 = 0.7;

/// Elite variant respawn delay after the elite leaves or dies.
pub const ELITE_RESPAWN_SECS: f64 = 5.0;
