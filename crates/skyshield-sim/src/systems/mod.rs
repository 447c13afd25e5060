//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only)
//! plus the engine-owned state they need. Entities are visited in id order.

pub mod aircraft_ai;
pub mod cleanup;
pub mod collision;
pub mod cyber_attack;
pub mod defense;
pub mod effects;
pub mod projectiles;
pub mod snapshot;
pub mod wave_spawner;
