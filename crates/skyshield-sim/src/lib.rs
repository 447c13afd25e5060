//! Simulation engine for SKYSHIELD.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the host.

pub mod engine;
pub mod feedback;
pub mod ruleset;
pub mod score;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use ruleset::Ruleset;
pub use skyshield_core as core;

#[cfg(test)]
mod tests;
