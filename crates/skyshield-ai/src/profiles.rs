//! Aircraft type registry.
//!
//! One stat bundle per aircraft type, shared by the spawner, the AI and the
//! collision/scoring systems. Rulesets carry their own registry so variants
//! can retune types without code changes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use skyshield_core::constants::*;
use skyshield_core::enums::AircraftType;

use crate::flight::Airframe;

/// Everything that differs between aircraft types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftProfile {
    pub max_health: f64,
    /// Horizontal cruise speed (px/s).
    pub cruise_speed: f64,
    /// Collision radius (px).
    pub hit_radius: f64,

    // --- Weapons ---
    /// Seconds between firing rolls.
    pub fire_interval_secs: f64,
    pub max_missiles: u32,
    pub missile_damage: f64,
    /// Probability that a firing roll launches.
    pub fire_chance: f64,
    /// Only fire within this distance of the turret.
    pub fire_range: f64,

    // --- Behavior ---
    /// Health fraction at or below which the aircraft retreats.
    pub retreat_health_fraction: f64,
    /// Distance to the turret at which Attack begins.
    pub engagement_range: f64,
    /// Distance to the turret inside which evasion is considered.
    pub evasion_range: f64,
    /// Live player missiles needed to trigger evasion.
    pub evasion_threat_count: u32,
    /// Cruise altitude, as height above the turret (px).
    pub cruise_height: f64,
    /// Attack-run altitude, as height above the turret (px).
    pub attack_height: f64,
    /// Maximum vertical speed the controller will command (px/s).
    pub max_climb_rate: f64,

    pub airframe: Airframe,

    // --- Scoring / messages ---
    /// Score for a kill by turret fire.
    pub kill_score: u64,
    /// Alert raised when this type launches a missile.
    pub launch_alert: String,
    /// Alert raised on spawn, with the chance it is raised.
    #[serde(default)]
    pub spawn_alert: Option<SpawnAlert>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnAlert {
    pub message: String,
    pub chance: f64,
}

impl AircraftProfile {
    pub fn fighter() -> Self {
        Self {
            max_health: 350.0,
            cruise_speed: 180.0,
            hit_radius: 25.0,
            fire_interval_secs: 2.0,
            max_missiles: 2,
            missile_damage: 30.0,
            fire_chance: AIRCRAFT_FIRE_CHANCE,
            fire_range: AIRCRAFT_FIRE_RANGE,
            retreat_health_fraction: 0.25,
            engagement_range: 450.0,
            evasion_range: 300.0,
            evasion_threat_count: 3,
            cruise_height: 250.0,
            attack_height: 130.0,
            max_climb_rate: 120.0,
            airframe: Airframe::trimmed(12_000.0, 30.0, 0.03, 180.0),
            kill_score: 200,
            launch_alert: "MISSILE INBOUND!".into(),
            spawn_alert: None,
        }
    }

    pub fn bomber() -> Self {
        Self {
            max_health: 500.0,
            cruise_speed: 108.0,
            hit_radius: 35.0,
            fire_interval_secs: 160.0 / 60.0,
            max_missiles: 2,
            missile_damage: 40.0,
            fire_chance: AIRCRAFT_FIRE_CHANCE,
            fire_range: AIRCRAFT_FIRE_RANGE,
            retreat_health_fraction: 0.2,
            engagement_range: 450.0,
            evasion_range: 250.0,
            evasion_threat_count: 4,
            cruise_height: 280.0,
            attack_height: 200.0,
            max_climb_rate: 60.0,
            airframe: Airframe::trimmed(40_000.0, 90.0, 0.04, 108.0),
            kill_score: 400,
            launch_alert: "BOMB RELEASED!".into(),
            spawn_alert: Some(SpawnAlert {
                message: "HEAVY BOMBER DETECTED".into(),
                chance: 0.5,
            }),
        }
    }

    pub fn attack() -> Self {
        Self {
            max_health: 420.0,
            cruise_speed: 150.0,
            hit_radius: 28.0,
            fire_interval_secs: 1.6,
            max_missiles: 3,
            missile_damage: 35.0,
            fire_chance: 0.4,
            fire_range: AIRCRAFT_FIRE_RANGE,
            retreat_health_fraction: 0.25,
            engagement_range: 450.0,
            evasion_range: 300.0,
            evasion_threat_count: 3,
            cruise_height: 220.0,
            attack_height: 110.0,
            max_climb_rate: 100.0,
            airframe: Airframe::trimmed(18_000.0, 40.0, 0.035, 150.0),
            kill_score: 300,
            launch_alert: "MISSILE INBOUND!".into(),
            spawn_alert: None,
        }
    }

    pub fn elite() -> Self {
        Self {
            max_health: 1500.0,
            cruise_speed: 200.0,
            hit_radius: 30.0,
            fire_interval_secs: 1.0,
            max_missiles: 6,
            missile_damage: 45.0,
            fire_chance: 0.5,
            fire_range: 500.0,
            retreat_health_fraction: 0.2,
            engagement_range: 500.0,
            evasion_range: 350.0,
            evasion_threat_count: 2,
            cruise_height: 260.0,
            attack_height: 150.0,
            max_climb_rate: 160.0,
            airframe: Airframe::trimmed(15_000.0, 35.0, 0.025, 200.0),
            kill_score: 1000,
            launch_alert: "ELITE MISSILE INBOUND!".into(),
            spawn_alert: Some(SpawnAlert {
                message: "ELITE FIGHTER INBOUND".into(),
                chance: 1.0,
            }),
        }
    }
}

/// Registry mapping aircraft type to profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AircraftRegistry {
    profiles: BTreeMap<AircraftType, AircraftProfile>,
}

impl Default for AircraftRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl AircraftRegistry {
    pub fn empty() -> Self {
        Self {
            profiles: BTreeMap::new(),
        }
    }

    /// All four aircraft types with their stock profiles.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.insert(AircraftType::Fighter, AircraftProfile::fighter());
        registry.insert(AircraftType::Bomber, AircraftProfile::bomber());
        registry.insert(AircraftType::Attack, AircraftProfile::attack());
        registry.insert(AircraftType::Elite, AircraftProfile::elite());
        registry
    }

    pub fn insert(&mut self, aircraft_type: AircraftType, profile: AircraftProfile) {
        self.profiles.insert(aircraft_type, profile);
    }

    pub fn get(&self, aircraft_type: AircraftType) -> Option<&AircraftProfile> {
        self.profiles.get(&aircraft_type)
    }

    pub fn get_mut(&mut self, aircraft_type: AircraftType) -> Option<&mut AircraftProfile> {
        self.profiles.get_mut(&aircraft_type)
    }

    pub fn contains(&self, aircraft_type: AircraftType) -> bool {
        self.profiles.contains_key(&aircraft_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AircraftType, &AircraftProfile)> {
        self.profiles.iter().map(|(t, p)| (*t, p))
    }
}
