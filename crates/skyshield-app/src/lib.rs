//! SKYSHIELD headless host.
//!
//! Wires the simulation engine to a driver: either a tight headless loop or
//! a fixed-rate game-loop thread, with an autopilot standing in for the
//! player.

pub mod autopilot;
pub mod game_loop;
pub mod runner;
pub mod state;

pub use skyshield_core as core;
