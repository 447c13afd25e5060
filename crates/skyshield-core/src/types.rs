//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position on the playfield (pixels, screen-space).
/// x grows to the right, y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity (pixels per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

/// A duration-based timer measured in simulated seconds.
///
/// Counts down toward zero; never goes negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    pub remaining_secs: f64,
}

/// Remaining time below this counts as elapsed (absorbs float drift from summing dt).
pub const COUNTDOWN_EPSILON: f64 = 1e-9;

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Unit vector pointing at `other`, or `None` when the two points coincide.
    pub fn direction_to(&self, other: &Position) -> Option<DVec2> {
        DVec2::new(other.x - self.x, other.y - self.y).try_normalize()
    }

    /// Angle toward `other` in radians (atan2 convention, screen-space).
    pub fn angle_to(&self, other: &Position) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Advance by `velocity` over `dt` seconds.
    pub fn advance(&mut self, velocity: &Velocity, dt: f64) {
        self.x += velocity.x * dt;
        self.y += velocity.y * dt;
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Velocity of magnitude `speed` along `direction` (expected unit length).
    pub fn along(direction: DVec2, speed: f64) -> Self {
        Self::from(direction * speed)
    }

    /// Speed magnitude.
    pub fn speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<DVec2> for Velocity {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

impl Countdown {
    pub fn new(secs: f64) -> Self {
        Self {
            remaining_secs: secs.max(0.0),
        }
    }

    /// A countdown that has already elapsed.
    pub fn elapsed() -> Self {
        Self::default()
    }

    /// Subtract `dt` seconds, clamping at zero.
    pub fn tick(&mut self, dt: f64) {
        self.remaining_secs = (self.remaining_secs - dt).max(0.0);
        if self.remaining_secs < COUNTDOWN_EPSILON {
            self.remaining_secs = 0.0;
        }
    }

    pub fn is_elapsed(&self) -> bool {
        self.remaining_secs <= 0.0
    }

    pub fn reset(&mut self, secs: f64) {
        self.remaining_secs = secs.max(0.0);
    }
}

/// Circle-circle overlap test: `distance(a, b) < ra + rb`.
pub fn circles_overlap(a: &Position, ra: f64, b: &Position, rb: f64) -> bool {
    a.distance_to(b) < ra + rb
}
