//! Rulesets: the complete tuning bundle for one game variant.
//!
//! The four historical variants differ only in data, so the engine is written
//! once and driven by a `Ruleset`. Presets are built from the constants in
//! `skyshield_core::constants`; custom rulesets load from JSON.

use std::path::Path;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

use skyshield_ai::profiles::AircraftRegistry;
use skyshield_ai::steering::SteeringParams;
use skyshield_core::constants::*;
use skyshield_core::enums::{AircraftType, Variant};
use skyshield_core::error::RulesetError;
use skyshield_core::types::Position;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ruleset {
    pub name: String,
    pub variant: Variant,
    pub playfield: PlayfieldRules,
    pub turret: TurretRules,
    pub player_missile: ProjectileRules,
    pub enemy_missile: ProjectileRules,
    pub waves: WaveRules,
    pub selection: TypeSelection,
    pub flight: FlightModel,
    #[serde(default)]
    pub steering: SteeringParams,
    pub cyber: CyberRules,
    pub scoring: ScoringRules,
    #[serde(default)]
    pub aircraft: AircraftRegistry,
    /// Day/night cycle advance per second.
    pub day_cycle_per_sec: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayfieldRules {
    pub width: f64,
    pub height: f64,
    pub escape_min_x: f64,
    pub escape_margin_right: f64,
    pub altitude_min: f64,
    pub altitude_floor_margin: f64,
    pub spawn_x_offset: f64,
    pub spawn_x_spread: f64,
    pub spawn_y_min: f64,
    pub spawn_y_spread: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurretRules {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub max_health: f64,
    pub max_heat: f64,
    pub heat_per_shot: f64,
    pub cooling_per_sec: f64,
    pub overheat_margin: f64,
    pub damage_per_shot: f64,
    pub fire_interval_secs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileRules {
    pub speed: f64,
    pub lifetime_secs: f64,
    pub radius: f64,
    /// Constant downward acceleration (px/s²).
    #[serde(default)]
    pub gravity: f64,
    /// Fraction of velocity kept after one second; 1.0 disables damping.
    #[serde(default = "no_damping")]
    pub damping_per_sec: f64,
}

fn no_damping() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveRules {
    /// Quota = min(ceil(base + wave * per_wave), max).
    pub quota_base: f64,
    pub quota_per_wave: f64,
    pub quota_max: u32,
    /// Maximum aircraft alive at once.
    pub concurrency_limit: u32,
    /// Countdown before wave 1.
    pub first_wave_delay_secs: f64,
    /// Intermission after clearing wave n: max(min, base - n * reduction).
    pub intermission_base_secs: f64,
    pub intermission_min_secs: f64,
    pub intermission_reduction_per_wave: f64,
    /// Spawn sub-timer: max(min, base / min(wave * divisor, cap)).
    pub spawn_interval_secs: f64,
    pub spawn_interval_min_secs: f64,
    pub spawn_divisor_per_wave: f64,
    pub spawn_divisor_cap: f64,
    /// Raise wave start/clear alerts.
    #[serde(default = "announce_by_default")]
    pub announce: bool,
}

fn announce_by_default() -> bool {
    true
}

impl WaveRules {
    pub fn quota(&self, wave: u32) -> u32 {
        let raw = (self.quota_base + wave as f64 * self.quota_per_wave).ceil();
        (raw.max(0.0) as u32).min(self.quota_max)
    }

    pub fn intermission_after(&self, wave: u32) -> f64 {
        (self.intermission_base_secs - wave as f64 * self.intermission_reduction_per_wave)
            .max(self.intermission_min_secs)
    }

    pub fn spawn_interval(&self, wave: u32) -> f64 {
        let divisor = (wave as f64 * self.spawn_divisor_per_wave).min(self.spawn_divisor_cap);
        (self.spawn_interval_secs / divisor).max(self.spawn_interval_min_secs)
    }
}

/// How the spawner picks an aircraft type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TypeSelection {
    /// Bomber with probability min(base + wave * per_wave, max), fighter otherwise.
    BomberChance { base: f64, per_wave: f64, max: f64 },
    /// Weighted random choice over a type table.
    Weighted { table: Vec<WeightedType> },
    /// Always the same type.
    Fixed { aircraft_type: AircraftType },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedType {
    pub aircraft_type: AircraftType,
    pub weight: u32,
}

impl TypeSelection {
    pub fn choose<R: Rng>(&self, wave: u32, rng: &mut R) -> AircraftType {
        match self {
            TypeSelection::BomberChance {
                base,
                per_wave,
                max,
            } => {
                let chance = (base + wave as f64 * per_wave).min(*max);
                if rng.gen::<f64>() < chance {
                    AircraftType::Bomber
                } else {
                    AircraftType::Fighter
                }
            }
            TypeSelection::Weighted { table } => {
                match WeightedIndex::new(table.iter().map(|entry| entry.weight)) {
                    Ok(dist) => table[dist.sample(rng)].aircraft_type,
                    // validate() rejects all-zero tables.
                    Err(_) => AircraftType::Fighter,
                }
            }
            TypeSelection::Fixed { aircraft_type } => *aircraft_type,
        }
    }

    /// Every type this selection can produce.
    pub fn selectable(&self) -> Vec<AircraftType> {
        match self {
            TypeSelection::BomberChance { .. } => vec![AircraftType::Fighter, AircraftType::Bomber],
            TypeSelection::Weighted { table } => table
                .iter()
                .filter(|entry| entry.weight > 0)
                .map(|entry| entry.aircraft_type)
                .collect(),
            TypeSelection::Fixed { aircraft_type } => vec![*aircraft_type],
        }
    }
}

/// How aircraft move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightModel {
    /// Constant horizontal speed, vertical nudges toward the turret. No behavior states.
    #[default]
    Steering,
    /// Behavior FSM driving a proportional controller.
    Tactical,
    /// Lift/drag/thrust integration followed by the FSM nudges.
    Aerodynamic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CyberRules {
    pub cooldown_secs: f64,
    pub mode: CyberMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum CyberMode {
    /// Damage every aircraft, falling off with distance from a fixed point.
    AreaPulse {
        center_x: f64,
        center_y: f64,
        base_damage: f64,
        falloff: f64,
        min_factor: f64,
        score_per_damage: u64,
        score_per_kill: u64,
    },
    /// Heavy damage to the aircraft closest to the turret; it always survives.
    ClosestTarget {
        damage: f64,
        health_floor: f64,
        score_per_damage: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub hit: u64,
    pub intercept: u64,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::classic()
    }
}

impl Ruleset {
    pub fn preset(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self::classic(),
            Variant::Tactical => Self::tactical(),
            Variant::Aerodynamic => Self::aerodynamic(),
            Variant::Elite => Self::elite(),
        }
    }

    /// Fighters and bombers in waves, simple steering, area cyber pulse.
    pub fn classic() -> Self {
        Self {
            name: "Classic".into(),
            variant: Variant::Classic,
            playfield: PlayfieldRules {
                width: PLAYFIELD_WIDTH,
                height: PLAYFIELD_HEIGHT,
                escape_min_x: ESCAPE_MIN_X,
                escape_margin_right: ESCAPE_MARGIN_RIGHT,
                altitude_min: ALTITUDE_MIN,
                altitude_floor_margin: ALTITUDE_FLOOR_MARGIN,
                spawn_x_offset: SPAWN_X_OFFSET,
                spawn_x_spread: SPAWN_X_SPREAD,
                spawn_y_min: SPAWN_Y_MIN,
                spawn_y_spread: SPAWN_Y_SPREAD,
            },
            turret: TurretRules {
                x: TURRET_X,
                y: TURRET_Y,
                radius: TURRET_RADIUS,
                max_health: TURRET_MAX_HEALTH,
                max_heat: TURRET_MAX_HEAT,
                heat_per_shot: HEAT_PER_SHOT,
                cooling_per_sec: HEAT_COOLING_PER_SEC,
                overheat_margin: OVERHEAT_MARGIN,
                damage_per_shot: TURRET_DAMAGE_PER_SHOT,
                fire_interval_secs: FIRE_INTERVAL_SECS,
            },
            player_missile: ProjectileRules {
                speed: PLAYER_MISSILE_SPEED,
                lifetime_secs: PLAYER_MISSILE_LIFETIME_SECS,
                radius: PLAYER_MISSILE_RADIUS,
                gravity: 0.0,
                damping_per_sec: 1.0,
            },
            enemy_missile: ProjectileRules {
                speed: ENEMY_MISSILE_SPEED,
                lifetime_secs: ENEMY_MISSILE_LIFETIME_SECS,
                radius: ENEMY_MISSILE_RADIUS,
                gravity: 0.0,
                damping_per_sec: 1.0,
            },
            waves: WaveRules {
                quota_base: WAVE_QUOTA_BASE,
                quota_per_wave: WAVE_QUOTA_PER_WAVE,
                quota_max: WAVE_QUOTA_MAX,
                concurrency_limit: WAVE_CONCURRENCY_LIMIT,
                first_wave_delay_secs: WAVE_INTERMISSION_SECS,
                intermission_base_secs: WAVE_INTERMISSION_SECS,
                intermission_min_secs: WAVE_INTERMISSION_MIN_SECS,
                intermission_reduction_per_wave: WAVE_INTERMISSION_REDUCTION_SECS,
                spawn_interval_secs: SPAWN_INTERVAL_SECS,
                spawn_interval_min_secs: SPAWN_INTERVAL_MIN_SECS,
                spawn_divisor_per_wave: SPAWN_INTERVAL_DIVISOR_PER_WAVE,
                spawn_divisor_cap: SPAWN_INTERVAL_DIVISOR_CAP,
                announce: true,
            },
            selection: TypeSelection::BomberChance {
                base: BOMBER_CHANCE_BASE,
                per_wave: BOMBER_CHANCE_PER_WAVE,
                max: BOMBER_CHANCE_MAX,
            },
            flight: FlightModel::Steering,
            steering: SteeringParams::default(),
            cyber: CyberRules {
                cooldown_secs: CYBER_COOLDOWN_SECS,
                mode: CyberMode::AreaPulse {
                    center_x: CYBER_PULSE_CENTER_X,
                    center_y: CYBER_PULSE_CENTER_Y,
                    base_damage: CYBER_PULSE_BASE_DAMAGE,
                    falloff: CYBER_PULSE_FALLOFF,
                    min_factor: CYBER_PULSE_MIN_FACTOR,
                    score_per_damage: CYBER_SCORE_PER_DAMAGE,
                    score_per_kill: CYBER_SCORE_PER_KILL,
                },
            },
            scoring: ScoringRules {
                hit: SCORE_PER_HIT,
                intercept: SCORE_PER_INTERCEPT,
            },
            aircraft: AircraftRegistry::standard(),
            day_cycle_per_sec: DAY_CYCLE_PER_SEC,
        }
    }

    /// Four aircraft types under the behavior FSM, targeted cyber strike.
    pub fn tactical() -> Self {
        Self {
            name: "Tactical".into(),
            variant: Variant::Tactical,
            selection: TypeSelection::Weighted {
                table: vec![
                    WeightedType {
                        aircraft_type: AircraftType::Fighter,
                        weight: 45,
                    },
                    WeightedType {
                        aircraft_type: AircraftType::Bomber,
                        weight: 30,
                    },
                    WeightedType {
                        aircraft_type: AircraftType::Attack,
                        weight: 25,
                    },
                ],
            },
            flight: FlightModel::Tactical,
            cyber: CyberRules {
                cooldown_secs: CYBER_COOLDOWN_SECS,
                mode: CyberMode::ClosestTarget {
                    damage: CYBER_STRIKE_DAMAGE,
                    health_floor: CYBER_STRIKE_HEALTH_FLOOR,
                    score_per_damage: CYBER_SCORE_PER_DAMAGE,
                },
            },
            ..Self::classic()
        }
    }

    /// Tactical with the aerodynamic flight model and ballistic player missiles.
    pub fn aerodynamic() -> Self {
        let tactical = Self::tactical();
        Self {
            name: "Aerodynamic".into(),
            variant: Variant::Aerodynamic,
            flight: FlightModel::Aerodynamic,
            player_missile: ProjectileRules {
                // 0.02 px/frame² and 0.998 per frame.
                gravity: 72.0,
                damping_per_sec: 0.998_f64.powi(60),
                ..tactical.player_missile.clone()
            },
            ..tactical
        }
    }

    /// A single elite fighter on a respawn timer; no wave quota to speak of.
    pub fn elite() -> Self {
        let tactical = Self::tactical();
        Self {
            name: "Elite".into(),
            variant: Variant::Elite,
            waves: WaveRules {
                quota_base: 1.0,
                quota_per_wave: 0.0,
                quota_max: 1,
                concurrency_limit: 1,
                first_wave_delay_secs: ELITE_RESPAWN_SECS,
                intermission_base_secs: ELITE_RESPAWN_SECS,
                intermission_min_secs: ELITE_RESPAWN_SECS,
                intermission_reduction_per_wave: 0.0,
                spawn_interval_secs: 0.0,
                spawn_interval_min_secs: 0.0,
                spawn_divisor_per_wave: 1.0,
                spawn_divisor_cap: 1.0,
                announce: false,
            },
            selection: TypeSelection::Fixed {
                aircraft_type: AircraftType::Elite,
            },
            ..tactical
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, RulesetError> {
        let ruleset: Ruleset = serde_json::from_str(json)?;
        ruleset.validate()?;
        Ok(ruleset)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RulesetError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, RulesetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn turret_position(&self) -> Position {
        Position::new(self.turret.x, self.turret.y)
    }

    /// Lowest screen y an aircraft may take (largest value).
    pub fn altitude_max(&self) -> f64 {
        self.playfield.height - self.playfield.altitude_floor_margin
    }

    /// Reject rulesets the engine cannot run sensibly.
    pub fn validate(&self) -> Result<(), RulesetError> {
        positive("playfield.width", self.playfield.width)?;
        positive("playfield.height", self.playfield.height)?;
        if self.playfield.altitude_min >= self.altitude_max() {
            return Err(RulesetError::invalid(
                "playfield.altitude_min",
                "altitude band is empty",
            ));
        }

        let t = &self.turret;
        positive("turret.radius", t.radius)?;
        positive("turret.max_health", t.max_health)?;
        positive("turret.max_heat", t.max_heat)?;
        non_negative("turret.heat_per_shot", t.heat_per_shot)?;
        non_negative("turret.cooling_per_sec", t.cooling_per_sec)?;
        non_negative("turret.damage_per_shot", t.damage_per_shot)?;
        non_negative("turret.fire_interval_secs", t.fire_interval_secs)?;
        if !(0.0..=t.max_heat).contains(&t.overheat_margin) {
            return Err(RulesetError::invalid(
                "turret.overheat_margin",
                format!("must be within [0, {}]", t.max_heat),
            ));
        }

        validate_projectile("player_missile", &self.player_missile)?;
        validate_projectile("enemy_missile", &self.enemy_missile)?;

        let w = &self.waves;
        if w.quota_max == 0 {
            return Err(RulesetError::invalid("waves.quota_max", "must be at least 1"));
        }
        if w.concurrency_limit == 0 {
            return Err(RulesetError::invalid(
                "waves.concurrency_limit",
                "must be at least 1",
            ));
        }
        non_negative("waves.first_wave_delay_secs", w.first_wave_delay_secs)?;
        non_negative("waves.intermission_min_secs", w.intermission_min_secs)?;
        non_negative("waves.spawn_interval_secs", w.spawn_interval_secs)?;
        non_negative("waves.spawn_interval_min_secs", w.spawn_interval_min_secs)?;
        positive("waves.spawn_divisor_per_wave", w.spawn_divisor_per_wave)?;
        positive("waves.spawn_divisor_cap", w.spawn_divisor_cap)?;

        if let TypeSelection::Weighted { table } = &self.selection {
            if table.iter().all(|entry| entry.weight == 0) {
                return Err(RulesetError::EmptyTypeTable);
            }
        }
        for aircraft_type in self.selection.selectable() {
            let Some(profile) = self.aircraft.get(aircraft_type) else {
                return Err(RulesetError::MissingProfile(aircraft_type));
            };
            positive("aircraft.max_health", profile.max_health)?;
            positive("aircraft.hit_radius", profile.hit_radius)?;
            positive("aircraft.cruise_speed", profile.cruise_speed)?;
            positive("aircraft.fire_interval_secs", profile.fire_interval_secs)?;
            positive("aircraft.airframe.mass", profile.airframe.mass)?;
        }

        non_negative("cyber.cooldown_secs", self.cyber.cooldown_secs)?;
        match &self.cyber.mode {
            CyberMode::AreaPulse {
                falloff,
                min_factor,
                base_damage,
                ..
            } => {
                positive("cyber.mode.falloff", *falloff)?;
                non_negative("cyber.mode.base_damage", *base_damage)?;
                if !(0.0..=1.0).contains(min_factor) {
                    return Err(RulesetError::invalid(
                        "cyber.mode.min_factor",
                        "must be within [0, 1]",
                    ));
                }
            }
            CyberMode::ClosestTarget {
                damage,
                health_floor,
                ..
            } => {
                non_negative("cyber.mode.damage", *damage)?;
                non_negative("cyber.mode.health_floor", *health_floor)?;
            }
        }

        non_negative("day_cycle_per_sec", self.day_cycle_per_sec)?;
        Ok(())
    }
}

fn validate_projectile(prefix: &str, rules: &ProjectileRules) -> Result<(), RulesetError> {
    positive(&format!("{prefix}.speed"), rules.speed)?;
    positive(&format!("{prefix}.lifetime_secs"), rules.lifetime_secs)?;
    positive(&format!("{prefix}.radius"), rules.radius)?;
    if !rules.gravity.is_finite() {
        return Err(RulesetError::invalid(
            format!("{prefix}.gravity"),
            "must be finite",
        ));
    }
    if !(rules.damping_per_sec > 0.0 && rules.damping_per_sec <= 1.0) {
        return Err(RulesetError::invalid(
            format!("{prefix}.damping_per_sec"),
            "must be within (0, 1]",
        ));
    }
    Ok(())
}

fn positive(field: &str, value: f64) -> Result<(), RulesetError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RulesetError::invalid(field, format!("must be > 0, got {value}")))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), RulesetError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RulesetError::invalid(field, format!("must be >= 0, got {value}")))
    }
}
