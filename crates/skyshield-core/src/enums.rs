//! Enumeration types used throughout the simulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RulesetError;

/// Aircraft type tag. Keys the aircraft type registry.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AircraftType {
    #[default]
    Fighter,
    Bomber,
    Attack,
    Elite,
}

impl AircraftType {
    pub const ALL: [AircraftType; 4] = [
        AircraftType::Fighter,
        AircraftType::Bomber,
        AircraftType::Attack,
        AircraftType::Elite,
    ];

    /// Display name used in alert text.
    pub fn label(self) -> &'static str {
        match self {
            AircraftType::Fighter => "FIGHTER",
            AircraftType::Bomber => "BOMBER",
            AircraftType::Attack => "ATTACK",
            AircraftType::Elite => "ELITE",
        }
    }
}

impl fmt::Display for AircraftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Aircraft behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatMode {
    /// Closing on the defense at cruise altitude.
    #[default]
    Approach,
    /// Inside engagement range, slowed down and dropping to attack altitude.
    Attack,
    /// Jinking away from incoming fire.
    Evade,
    /// Damaged and leaving the fight. Never exits this state.
    Retreat,
}

/// Overall game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first StartGame.
    #[default]
    Splash,
    Active,
    Paused,
    /// Terminal. Only Restart leaves this phase.
    GameOver,
}

/// Alert severity for the status banner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertLevel {
    #[default]
    Info,
    /// Cyber weapon messages.
    Cyber,
    Warning,
}

/// Quarter of the day/night cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayPhase {
    Dawn,
    #[default]
    Day,
    Dusk,
    Night,
}

impl DayPhase {
    /// Phase for a cycle position in [0, 1).
    pub fn from_cycle(cycle: f64) -> Self {
        if cycle < 0.25 {
            DayPhase::Dawn
        } else if cycle < 0.5 {
            DayPhase::Day
        } else if cycle < 0.75 {
            DayPhase::Dusk
        } else {
            DayPhase::Night
        }
    }
}

/// Radar status derived from air superiority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RadarStatus {
    #[default]
    Nominal,
    Stressed,
    Overwhelmed,
}

impl RadarStatus {
    pub fn from_air_superiority(percent: f64) -> Self {
        if percent < 30.0 {
            RadarStatus::Overwhelmed
        } else if percent < 60.0 {
            RadarStatus::Stressed
        } else {
            RadarStatus::Nominal
        }
    }
}

/// Visual explosion flavor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionKind {
    #[default]
    Blast,
    Cyber,
}

/// Named ruleset presets, one per historical variant of the game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Waves of fighters and bombers, simple steering, area cyber pulse.
    #[default]
    Classic,
    /// Four aircraft types with the behavior FSM and targeted cyber strike.
    Tactical,
    /// Tactical plus lift/drag/thrust flight model and missile ballistics.
    Aerodynamic,
    /// A single elite fighter respawning on a timer.
    Elite,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Classic,
        Variant::Tactical,
        Variant::Aerodynamic,
        Variant::Elite,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Tactical => "tactical",
            Variant::Aerodynamic => "aerodynamic",
            Variant::Elite => "elite",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = RulesetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| RulesetError::UnknownVariant(s.to_string()))
    }
}
