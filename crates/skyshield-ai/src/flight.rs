//! Aerodynamic flight model.
//!
//! Closed-form per-tick force calculation: lift, drag and thrust from
//! airspeed, wing area and engine power, plus gravity. Units are playfield
//! pixels and seconds; the constants below scale real-world values onto
//! the playfield.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use skyshield_core::types::Velocity;

/// Air density (kg/m³ at sea level, applied per playfield pixel).
pub const AIR_DENSITY: f64 = 1.225;

/// Gravity in px/s² (9.81 m/s² at 4 px per meter). Screen y grows downward.
pub const GRAVITY: f64 = 9.81 * 4.0;

/// Thrust is computed as power / speed; below this speed it is capped.
pub const MIN_THRUST_SPEED: f64 = 20.0;

/// Upper bound on throttle (afterburner).
pub const MAX_THROTTLE: f64 = 1.5;

/// Airframe parameters for the aerodynamic model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Airframe {
    pub mass: f64,
    pub wing_area: f64,
    pub lift_coefficient: f64,
    pub drag_coefficient: f64,
    /// Engine power (thrust x speed).
    pub engine_power: f64,
}

impl Airframe {
    /// An airframe trimmed for level flight at `cruise_speed` on full
    /// throttle: lift equals weight and thrust equals drag at that speed.
    pub fn trimmed(mass: f64, wing_area: f64, drag_coefficient: f64, cruise_speed: f64) -> Self {
        let q = dynamic_pressure(cruise_speed);
        let lift_coefficient = mass * GRAVITY / (q * wing_area);
        let drag = q * wing_area * drag_coefficient;
        Self {
            mass,
            wing_area,
            lift_coefficient,
            drag_coefficient,
            engine_power: drag * cruise_speed,
        }
    }
}

/// q = ½ρv².
pub fn dynamic_pressure(speed: f64) -> f64 {
    0.5 * AIR_DENSITY * speed * speed
}

/// Per-force breakdown, mostly useful for tests and debugging.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AeroForces {
    pub lift: DVec2,
    pub drag: DVec2,
    pub thrust: DVec2,
}

impl AeroForces {
    pub fn total(&self) -> DVec2 {
        self.lift + self.drag + self.thrust
    }
}

/// Compute the aerodynamic forces on an airframe moving at `velocity`.
///
/// Lift acts perpendicular to the flight path, toward the top of the screen.
/// Drag opposes motion. Thrust acts along the flight path.
pub fn aero_forces(airframe: &Airframe, velocity: DVec2, throttle: f64) -> AeroForces {
    let Some(heading) = velocity.try_normalize() else {
        return AeroForces::default();
    };
    let speed = velocity.length();
    let q = dynamic_pressure(speed);

    let perp = heading.perp();
    let lift_dir = if perp.y > 0.0 { -perp } else { perp };

    let thrust_mag =
        throttle.clamp(0.0, MAX_THROTTLE) * airframe.engine_power / speed.max(MIN_THRUST_SPEED);

    AeroForces {
        lift: lift_dir * q * airframe.wing_area * airframe.lift_coefficient,
        drag: -heading * q * airframe.wing_area * airframe.drag_coefficient,
        thrust: heading * thrust_mag,
    }
}

/// Net acceleration including gravity.
pub fn acceleration(airframe: &Airframe, velocity: DVec2, throttle: f64) -> DVec2 {
    let forces = aero_forces(airframe, velocity, throttle);
    forces.total() / airframe.mass + DVec2::new(0.0, GRAVITY)
}

/// Integrate one step (explicit Euler on velocity).
pub fn integrate(airframe: &Airframe, velocity: Velocity, throttle: f64, dt: f64) -> Velocity {
    let v = velocity.as_dvec2();
    Velocity::from(v + acceleration(airframe, v, throttle) * dt)
}
