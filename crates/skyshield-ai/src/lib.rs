//! Aircraft AI for SKYSHIELD.
//!
//! The aircraft type registry, the behavior state machine, steering
//! controllers, and the aerodynamic flight model. Everything here is a pure
//! function over plain data; the simulation crate owns the entities.

pub mod firing;
pub mod flight;
pub mod fsm;
pub mod profiles;
pub mod steering;

pub use skyshield_core as core;
