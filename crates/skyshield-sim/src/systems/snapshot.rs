//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use skyshield_core::components::*;
use skyshield_core::constants::{HEALTH_DANGER_THRESHOLD, OVERHEAT_DISPLAY_THRESHOLD};
use skyshield_core::enums::*;
use skyshield_core::events::{Alert, GameEvent};
use skyshield_core::state::*;
use skyshield_core::types::{Position, SimTime, Velocity};

use crate::ruleset::Ruleset;
use crate::score::ScoreState;
use crate::systems::cyber_attack::CyberState;
use crate::systems::effects::Atmosphere;
use crate::systems::wave_spawner::WaveState;

/// Everything the snapshot reads besides the world.
pub struct SnapshotInput<'a> {
    pub time: &'a SimTime,
    pub phase: GamePhase,
    pub ruleset: &'a Ruleset,
    pub waves: &'a WaveState,
    pub score: &'a ScoreState,
    pub cyber: &'a CyberState,
    pub atmosphere: &'a Atmosphere,
    pub summary: Option<GameSummaryView>,
    pub events: Vec<GameEvent>,
    pub alerts: Vec<Alert>,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(world: &World, input: SnapshotInput<'_>) -> GameStateSnapshot {
    let aircraft = build_aircraft(world);
    let live = aircraft.len() as u32;
    let limit = input.ruleset.waves.concurrency_limit;

    GameStateSnapshot {
        time: *input.time,
        phase: input.phase,
        variant: input.ruleset.variant,
        turret: build_turret(world),
        aircraft,
        player_missiles: build_missiles::<PlayerMissile>(world, |m| (m.id, m.lifetime.remaining_secs)),
        enemy_missiles: build_missiles::<EnemyMissile>(world, |m| (m.id, m.lifetime.remaining_secs)),
        explosions: build_explosions(world),
        wave: build_wave(input.waves),
        score: input.score.view(),
        cyber: CyberView {
            ready: input.cyber.is_ready(),
            cooldown_remaining_secs: input.cyber.cooldown.remaining_secs,
            cooldown_total_secs: input.ruleset.cyber.cooldown_secs,
        },
        airspace: build_airspace(live, limit),
        environment: EnvironmentView {
            day_cycle: input.atmosphere.day_cycle,
            day_phase: DayPhase::from_cycle(input.atmosphere.day_cycle),
        },
        banner: input.atmosphere.banner.clone(),
        alerts: input.alerts,
        events: input.events,
        summary: input.summary,
    }
}

/// Air superiority: 100 with an empty sky, 0 at the concurrency limit.
pub fn air_superiority(live: u32, limit: u32) -> f64 {
    if limit == 0 {
        return 100.0;
    }
    (100.0 - live as f64 / limit as f64 * 100.0).max(0.0)
}

fn build_airspace(live: u32, limit: u32) -> AirspaceView {
    let superiority = air_superiority(live, limit);
    AirspaceView {
        live_aircraft: live,
        concurrency_limit: limit,
        air_superiority: superiority,
        radar_status: RadarStatus::from_air_superiority(superiority),
    }
}

fn build_turret(world: &World) -> TurretView {
    world
        .query::<(&Turret, &Position)>()
        .iter()
        .next()
        .map(|(_, (t, pos))| TurretView {
            position: *pos,
            aim_angle: t.aim_angle,
            health: t.health,
            max_health: t.max_health,
            health_pct: pct(t.health, t.max_health),
            heat: t.heat,
            max_heat: t.max_heat,
            heat_pct: pct(t.heat, t.max_heat),
            overheated: t.heat > OVERHEAT_DISPLAY_THRESHOLD,
            danger: t.health <= HEALTH_DANGER_THRESHOLD,
        })
        .unwrap_or_default()
}

fn pct(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        value / max * 100.0
    } else {
        0.0
    }
}

fn build_aircraft(world: &World) -> Vec<AircraftView> {
    let mut views: Vec<AircraftView> = world
        .query::<(&Aircraft, &Position, &Velocity, &Collider, &Trail)>()
        .iter()
        .map(|(_, (a, pos, vel, collider, trail))| AircraftView {
            id: a.id,
            aircraft_type: a.aircraft_type,
            position: *pos,
            velocity: *vel,
            health: a.health,
            max_health: a.max_health,
            mode: a.mode,
            radius: collider.radius,
            trail: trail.positions.clone(),
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_missiles<M: hecs::Component>(
    world: &World,
    fields: impl Fn(&M) -> (u32, f64),
) -> Vec<MissileView> {
    let mut views: Vec<MissileView> = world
        .query::<(&M, &Position, &Velocity, &Collider, &Trail)>()
        .iter()
        .map(|(_, (m, pos, vel, collider, trail))| {
            let (id, lifetime_secs) = fields(m);
            MissileView {
                id,
                position: *pos,
                velocity: *vel,
                radius: collider.radius,
                lifetime_secs,
                trail: trail.positions.clone(),
            }
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_explosions(world: &World) -> Vec<ExplosionView> {
    world
        .query::<(&Explosion, &Position)>()
        .iter()
        .map(|(_, (e, pos))| ExplosionView {
            kind: e.kind,
            position: *pos,
            size: e.size,
            intensity: if e.total_secs > 0.0 {
                (e.remaining.remaining_secs / e.total_secs).clamp(0.0, 1.0)
            } else {
                0.0
            },
        })
        .collect()
}

fn build_wave(waves: &WaveState) -> WaveView {
    WaveView {
        wave: waves.wave,
        active: waves.active,
        total: waves.total,
        spawned: waves.spawned,
        remaining_to_spawn: waves.remaining_to_spawn(),
        countdown_secs: if waves.active {
            0
        } else {
            waves.intermission.remaining_secs.ceil() as u32
        },
    }
}
