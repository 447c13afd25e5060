//! Tests for the simulation engine, rulesets, and the per-tick systems.

use std::collections::HashMap;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skyshield_ai::profiles::{AircraftProfile, AircraftRegistry};
use skyshield_core::commands::PlayerCommand;
use skyshield_core::components::Aircraft;
use skyshield_core::enums::*;
use skyshield_core::error::RulesetError;
use skyshield_core::events::GameEvent;
use skyshield_core::state::{GameStateSnapshot, MissileView};
use skyshield_core::types::{Position, Velocity};

use crate::engine::{SimConfig, SimulationEngine};
use crate::feedback::Feedback;
use crate::ruleset::{CyberMode, CyberRules, Ruleset, TypeSelection, WeightedType};
use crate::score::ScoreState;
use crate::systems::aircraft_ai;
use crate::systems::cyber_attack::{self, CyberRejection, CyberState};
use crate::systems::defense::{self, FireRejection};
use crate::world_setup;

fn started(config: SimConfig) -> SimulationEngine {
    let mut engine = SimulationEngine::new(config);
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick();
    engine
}

fn has_alert(snap: &GameStateSnapshot, message: &str) -> bool {
    snap.alerts.iter().any(|a| a.message == message)
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    let commands = [
        PlayerCommand::StartGame,
        PlayerCommand::Aim { x: 800.0, y: 150.0 },
        PlayerCommand::SetTrigger { held: true },
    ];
    engine_a.queue_commands(commands.clone());
    engine_b.queue_commands(commands);

    for _ in 0..1500 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::StartGame);
    engine_b.queue_command(PlayerCommand::StartGame);

    // Nothing random happens until the first wave spawns at 20 s.
    let mut diverged = false;
    for _ in 0..1600 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();
        let json_a = serde_json::to_string(&snap_a.aircraft).unwrap();
        let json_b = serde_json::to_string(&snap_b.aircraft).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Game phases ----

#[test]
fn test_splash_until_start() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Splash);
    assert_eq!(snap.time.tick, 0);

    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert_eq!(snap.time.tick, 1);
    assert!(has_alert(&snap, "DEFENSE SYSTEMS ONLINE - CYBER ATTACK READY"));
    assert_eq!(snap.turret.health, 10_000.0);
    assert_eq!(snap.turret.heat, 0.0);
    assert_eq!(snap.wave.wave, 1);
    assert!(!snap.wave.active);
    assert_eq!(snap.wave.countdown_secs, 20);
}

#[test]
fn test_start_game_ignored_while_active() {
    let mut engine = started(SimConfig::default());
    for _ in 0..10 {
        engine.tick();
    }
    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick();
    assert_eq!(snap.time.tick, 12);
}

#[test]
fn test_pause_freezes_simulation() {
    let mut engine = started(SimConfig::default());
    for _ in 0..10 {
        engine.tick();
    }
    let before = engine.time();

    engine.queue_command(PlayerCommand::Pause);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Paused);
    assert!(has_alert(&snap, "MISSION PAUSED"));
    for _ in 0..50 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, before.tick);

    engine.queue_command(PlayerCommand::TogglePause);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert!(has_alert(&snap, "MISSION RESUMED"));
    assert_eq!(snap.time.tick, before.tick + 1);
}

#[test]
fn test_restart_resets_game() {
    let mut engine = started(SimConfig::default());
    engine.spawn_test_aircraft(
        AircraftType::Bomber,
        Position::new(600.0, 200.0),
        Velocity::new(-108.0, 0.0),
    );
    engine.spawn_test_player_missile(Position::new(600.0, 200.0), Velocity::default());
    engine.tick();
    assert!(engine.score().score > 0);

    engine.queue_command(PlayerCommand::Restart);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert_eq!(snap.time.tick, 1);
    assert_eq!(snap.score.score, 0);
    assert!(snap.aircraft.is_empty());
    assert!(snap.player_missiles.is_empty());
    assert_eq!(snap.turret.health, snap.turret.max_health);
}

// ---- Defense state ----

#[test]
fn test_turret_hit_keeps_game_running() {
    let mut engine = started(SimConfig::default());
    engine.spawn_test_enemy_missile(40.0, Position::new(150.0, 480.0), Velocity::default());

    let snap = engine.tick();
    assert_eq!(snap.turret.health, 9960.0);
    assert_eq!(snap.phase, GamePhase::Active);
    assert!(snap.enemy_missiles.is_empty());
    assert!(has_alert(&snap, "DIRECT HIT! -40"));
    assert!(snap.events.contains(&GameEvent::TurretHit {
        damage: 40.0,
        remaining_health: 9960.0,
    }));
}

#[test]
fn test_lethal_hit_ends_game() {
    let mut engine = started(SimConfig::default());
    engine.set_turret_health(40.0);
    engine.spawn_test_enemy_missile(40.0, Position::new(150.0, 480.0), Velocity::default());

    let snap = engine.tick();
    assert_eq!(snap.turret.health, 0.0);
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::GameOver { .. })));
    let summary = snap.summary.expect("summary on game over");
    assert_eq!(summary.waves_survived, 0);
    assert_eq!(summary.kills, 0);

    // Nothing moves after game over.
    let frozen = engine.time();
    engine.spawn_test_enemy_missile(40.0, Position::new(150.0, 480.0), Velocity::default());
    for _ in 0..30 {
        let snap = engine.tick();
        assert_eq!(snap.turret.health, 0.0);
        assert_eq!(snap.phase, GamePhase::GameOver);
    }
    assert_eq!(engine.time().tick, frozen.tick);
}

#[test]
fn test_two_hits_stop_at_destruction() {
    let mut engine = started(SimConfig::default());
    engine.set_turret_health(30.0);
    engine.spawn_test_enemy_missile(40.0, Position::new(150.0, 480.0), Velocity::default());
    engine.spawn_test_enemy_missile(40.0, Position::new(150.0, 480.0), Velocity::default());

    let snap = engine.tick();
    assert_eq!(snap.turret.health, 0.0);
    let hits = snap
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::TurretHit { .. }))
        .count();
    assert_eq!(hits, 1);
}

#[test]
fn test_fire_rejected_near_max_heat() {
    let mut engine = started(SimConfig::default());
    engine.set_turret_heat(90.0);

    let turret = engine.turret();
    assert_eq!(
        defense::check_fire(&turret, &engine.ruleset().turret),
        Err(FireRejection::Overheated)
    );
    assert_eq!(turret.heat, 90.0);

    engine.queue_commands([
        PlayerCommand::Aim { x: 800.0, y: 100.0 },
        PlayerCommand::SetTrigger { held: true },
    ]);
    let snap = engine.tick();
    assert!(snap.player_missiles.is_empty());
    assert_eq!(snap.score.shots_fired, 0);
    assert!(has_alert(&snap, "SYSTEM OVERHEATING!"));
    // Only passive cooling: 90 - 120 * (1/60).
    assert!((snap.turret.heat - 88.0).abs() < 1e-9);
    assert!(snap.turret.overheated);
}

#[test]
fn test_fire_cadence_and_heat() {
    let mut engine = started(SimConfig::default());
    engine.queue_commands([
        PlayerCommand::Aim { x: 800.0, y: 100.0 },
        PlayerCommand::SetTrigger { held: true },
    ]);

    let mut snap = engine.tick();
    assert_eq!(snap.score.shots_fired, 1);
    assert_eq!(snap.player_missiles.len(), 1);
    assert_eq!(snap.turret.heat, 6.0);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::ShotFired { .. })));

    for _ in 0..5 {
        snap = engine.tick();
    }
    // Fires every other tick; heat +6 per shot, -2 on the ticks between.
    assert_eq!(snap.score.shots_fired, 3);
    assert!((snap.turret.heat - 12.0).abs() < 1e-9);

    engine.queue_command(PlayerCommand::SetTrigger { held: false });
    let snap = engine.tick();
    assert_eq!(snap.score.shots_fired, 3);
    assert!((snap.turret.heat - 10.0).abs() < 1e-9);
}

#[test]
fn test_heat_stays_in_range_while_holding_trigger() {
    let mut engine = started(SimConfig::default());
    engine.queue_commands([
        PlayerCommand::Aim { x: 900.0, y: 100.0 },
        PlayerCommand::SetTrigger { held: true },
    ]);

    let mut overheat_alerts = 0;
    for _ in 0..600 {
        let snap = engine.tick();
        assert!(snap.turret.heat >= 0.0 && snap.turret.heat <= snap.turret.max_heat);
        if has_alert(&snap, "SYSTEM OVERHEATING!") {
            overheat_alerts += 1;
        }
    }
    assert!(overheat_alerts >= 1, "Holding the trigger should overheat");
}

#[test]
fn test_aim_at_turret_skips_shot() {
    let mut engine = started(SimConfig::default());
    engine.queue_commands([
        PlayerCommand::Aim { x: 150.0, y: 480.0 },
        PlayerCommand::SetTrigger { held: true },
    ]);
    let snap = engine.tick();
    assert_eq!(snap.score.shots_fired, 0);
    assert_eq!(snap.turret.heat, 0.0);
}

// ---- Collision ----

#[test]
fn test_player_missile_hits_bomber() {
    let mut engine = started(SimConfig::default());
    let id = engine.spawn_test_aircraft(
        AircraftType::Bomber,
        Position::new(600.0, 200.0),
        Velocity::new(-108.0, 0.0),
    );
    engine.spawn_test_player_missile(Position::new(600.0, 200.0), Velocity::default());

    let snap = engine.tick();
    let bomber = snap.aircraft.iter().find(|a| a.id == id).unwrap();
    assert_eq!(bomber.health, 465.0);
    assert!(snap.player_missiles.is_empty());
    assert_eq!(snap.score.score, 10);
    assert_eq!(snap.score.shots_hit, 1);
}

#[test]
fn test_fresh_missile_not_a_collision_candidate() {
    let mut engine = started(SimConfig::default());
    let id = engine.spawn_test_aircraft(
        AircraftType::Bomber,
        Position::new(170.0, 440.0),
        Velocity::default(),
    );
    engine.queue_commands([
        PlayerCommand::Aim { x: 170.0, y: 440.0 },
        PlayerCommand::SetTrigger { held: true },
    ]);

    // Overlapping on the launch tick, but not armed yet.
    let snap = engine.tick();
    assert_eq!(snap.player_missiles.len(), 1);
    assert_eq!(snap.aircraft.iter().find(|a| a.id == id).unwrap().health, 500.0);

    let snap = engine.tick();
    assert_eq!(snap.aircraft.iter().find(|a| a.id == id).unwrap().health, 465.0);
}

#[test]
fn test_intercept_removes_exactly_one_pair() {
    let mut engine = started(SimConfig::default());
    engine.spawn_test_enemy_missile(30.0, Position::new(500.0, 100.0), Velocity::default());
    engine.spawn_test_enemy_missile(30.0, Position::new(502.0, 100.0), Velocity::default());
    engine.spawn_test_player_missile(Position::new(501.0, 100.0), Velocity::default());

    let snap = engine.tick();
    assert!(snap.player_missiles.is_empty());
    assert_eq!(snap.enemy_missiles.len(), 1);
    assert_eq!(snap.score.intercepts, 1);
    assert_eq!(snap.score.score, 50);
    assert!(has_alert(&snap, "MISSILE INTERCEPTED!"));
}

#[test]
fn test_kill_awards_type_score() {
    let mut ruleset = Ruleset::classic();
    ruleset.turret.damage_per_shot = 1000.0;
    let mut engine = started(SimConfig {
        ruleset,
        ..Default::default()
    });
    let id = engine.spawn_test_aircraft(
        AircraftType::Fighter,
        Position::new(600.0, 200.0),
        Velocity::new(-180.0, 0.0),
    );
    engine.spawn_test_player_missile(Position::new(600.0, 200.0), Velocity::default());

    let snap = engine.tick();
    assert!(snap.aircraft.is_empty());
    assert_eq!(snap.score.kills, 1);
    assert_eq!(snap.score.score, 210);
    assert_eq!(snap.explosions.len(), 1);
    assert_eq!(snap.explosions[0].kind, ExplosionKind::Blast);
    assert!(has_alert(&snap, "FIGHTER DESTROYED! +200"));
    assert!(snap.events.contains(&GameEvent::AircraftDestroyed {
        aircraft_id: id,
        aircraft_type: AircraftType::Fighter,
        score: 200,
    }));
}

// ---- Projectiles ----

/// Tick until the missile with `id` drops out of the snapshot, checking its
/// lifetime on the way down. Returns the tick it was removed on.
fn ticks_until_removed(
    engine: &mut SimulationEngine,
    id: u32,
    missiles: fn(&GameStateSnapshot) -> &[MissileView],
    max_ticks: u64,
) -> u64 {
    let mut last = f64::INFINITY;
    for tick in 1..=max_ticks {
        let snap = engine.tick();
        match missiles(&snap).iter().find(|m| m.id == id) {
            Some(m) => {
                assert!(m.lifetime_secs > 0.0, "tick {tick}: processed at zero lifetime");
                assert!(m.lifetime_secs < last);
                last = m.lifetime_secs;
            }
            None => return tick,
        }
    }
    panic!("missile {id} still alive after {max_ticks} ticks");
}

#[test]
fn test_missile_lifetime_strictly_decreases() {
    let mut engine = started(SimConfig::default());
    let id = engine.spawn_test_player_missile(Position::new(500.0, 300.0), Velocity::default());
    let removed_at = ticks_until_removed(&mut engine, id, |s| s.player_missiles.as_slice(), 210);
    assert_eq!(removed_at, 200);
}

#[test]
fn test_missile_lifetime_is_rate_independent() {
    for (rate, player_ticks, enemy_ticks) in [(60, 200, 400), (120, 400, 800), (144, 480, 960)] {
        let config = SimConfig {
            tick_rate: rate,
            ..Default::default()
        };

        let mut engine = started(config.clone());
        let id = engine.spawn_test_player_missile(Position::new(500.0, 300.0), Velocity::default());
        let removed_at = ticks_until_removed(&mut engine, id, |s| s.player_missiles.as_slice(), 1000);
        assert_eq!(removed_at, player_ticks, "player missile at {rate} Hz");

        let mut engine = started(config);
        let id = engine.spawn_test_enemy_missile(
            40.0,
            Position::new(500.0, 300.0),
            Velocity::default(),
        );
        let removed_at = ticks_until_removed(&mut engine, id, |s| s.enemy_missiles.as_slice(), 1000);
        assert_eq!(removed_at, enemy_ticks, "enemy missile at {rate} Hz");
    }
}

#[test]
fn test_explosion_expires_on_time() {
    let mut engine = started(SimConfig::default());
    let id = engine.spawn_test_aircraft(
        AircraftType::Bomber,
        Position::new(500.0, 300.0),
        Velocity::default(),
    );
    engine.set_aircraft_health(id, 0.0);
    let snap = engine.tick();
    assert_eq!(snap.explosions.len(), 1);
    // 0.5 s at 60 Hz, and the tick it appeared on already counts.
    for _ in 0..28 {
        assert_eq!(engine.tick().explosions.len(), 1);
    }
    assert!(engine.tick().explosions.is_empty());
}

#[test]
fn test_missile_leaving_playfield_is_removed() {
    let mut engine = started(SimConfig::default());
    engine.spawn_test_player_missile(Position::new(995.0, 300.0), Velocity::new(600.0, 0.0));
    let snap = engine.tick();
    assert!(snap.player_missiles.is_empty());
}

// ---- Aircraft ----

#[test]
fn test_aircraft_escape() {
    let mut engine = started(SimConfig::default());
    let id = engine.spawn_test_aircraft(
        AircraftType::Fighter,
        Position::new(-199.0, 300.0),
        Velocity::new(-180.0, 0.0),
    );
    let snap = engine.tick();
    assert!(snap.aircraft.is_empty());
    assert_eq!(snap.score.escapes, 1);
    assert!(has_alert(&snap, "TARGET ESCAPED"));
    assert!(snap
        .events
        .contains(&GameEvent::AircraftEscaped { aircraft_id: id }));
}

#[test]
fn test_altitude_band_clamp() {
    let mut engine = started(SimConfig::default());
    let high = engine.spawn_test_aircraft(
        AircraftType::Fighter,
        Position::new(700.0, 10.0),
        Velocity::new(-180.0, 0.0),
    );
    let low = engine.spawn_test_aircraft(
        AircraftType::Fighter,
        Position::new(700.0, 590.0),
        Velocity::new(-180.0, 0.0),
    );
    let snap = engine.tick();
    let y = |id: u32| snap.aircraft.iter().find(|a| a.id == id).unwrap().position.y;
    assert_eq!(y(high), 40.0);
    assert_eq!(y(low), 440.0);
}

#[test]
fn test_air_superiority() {
    let mut engine = started(SimConfig::default());
    for i in 0..3 {
        engine.spawn_test_aircraft(
            AircraftType::Fighter,
            Position::new(700.0, 100.0 + i as f64 * 50.0),
            Velocity::new(-180.0, 0.0),
        );
    }
    let snap = engine.tick();
    assert_eq!(snap.airspace.live_aircraft, 3);
    assert!((snap.airspace.air_superiority - 50.0).abs() < 1e-9);
    assert_eq!(snap.airspace.radar_status, RadarStatus::Stressed);
}

#[test]
fn test_flight_models_stay_in_band() {
    for variant in [Variant::Tactical, Variant::Aerodynamic] {
        let mut engine = started(SimConfig::for_variant(variant));
        for _ in 0..3000 {
            let snap = engine.tick();
            for a in &snap.aircraft {
                assert!(a.position.x.is_finite() && a.position.y.is_finite());
                assert!(
                    (40.0..=440.0).contains(&a.position.y),
                    "{variant} aircraft left the altitude band: {}",
                    a.position.y
                );
            }
        }
    }
}

#[test]
fn test_launch_range_measured_per_flight_model() {
    let classic = Ruleset::classic();
    let turret = classic.turret_position();
    // Straight above: 450 px from the turret, 350 px from the approach point.
    let pos = Position::new(turret.x, turret.y - 450.0);
    assert!((aircraft_ai::fire_distance(&pos, &turret, &classic) - 350.0).abs() < 1e-9);

    let tactical = Ruleset::preset(Variant::Tactical);
    assert!((aircraft_ai::fire_distance(&pos, &turret, &tactical) - 450.0).abs() < 1e-9);
}

#[test]
fn test_aircraft_health_never_increases() {
    for variant in [Variant::Classic, Variant::Tactical] {
        let mut engine = started(SimConfig {
            seed: 7,
            ..SimConfig::for_variant(variant)
        });
        engine.queue_command(PlayerCommand::SetTrigger { held: true });

        let mut health: HashMap<u32, f64> = HashMap::new();
        let mut seen_damage = false;
        for tick in 0..90 * 60 {
            let snap = engine.tick();
            if snap.phase == GamePhase::GameOver {
                break;
            }
            for a in &snap.aircraft {
                assert!(a.health >= 0.0, "{variant} #{} health {}", a.id, a.health);
                if let Some(&previous) = health.get(&a.id) {
                    assert!(
                        a.health <= previous,
                        "{variant} #{} healed from {previous} to {}",
                        a.id,
                        a.health
                    );
                    seen_damage |= a.health < previous;
                }
                health.insert(a.id, a.health);
            }

            if let Some(target) = snap.aircraft.first() {
                engine.queue_command(PlayerCommand::Aim {
                    x: target.position.x,
                    y: target.position.y,
                });
            }
            if tick % 600 == 0 {
                engine.queue_command(PlayerCommand::CyberAttack);
            }
        }
        assert!(health.len() >= 3, "{variant} spawned too few aircraft");
        assert!(seen_damage, "{variant} never damaged an aircraft");
    }
}

// ---- Waves ----

#[test]
fn test_wave_math() {
    let waves = Ruleset::classic().waves;
    assert_eq!(waves.quota(1), 8);
    assert_eq!(waves.quota(2), 9);
    assert_eq!(waves.quota(4), 12);
    assert_eq!(waves.quota(10), 12);

    assert!((waves.intermission_after(1) - 19.5).abs() < 1e-9);
    assert!((waves.intermission_after(30) - 10.0).abs() < 1e-9);

    assert!((waves.spawn_interval(1) - 7.5).abs() < 1e-9);
    assert!((waves.spawn_interval(30) - 0.375).abs() < 1e-9);
}

#[test]
fn test_spawned_never_exceeds_quota() {
    let mut engine = started(SimConfig {
        seed: 7,
        ..Default::default()
    });
    let limit = engine.ruleset().waves.concurrency_limit;
    let mut saw_wave = false;
    for _ in 0..60 * 180 {
        let snap = engine.tick();
        assert!(snap.wave.spawned <= snap.wave.total);
        assert!(snap.airspace.live_aircraft <= limit);
        saw_wave |= snap.wave.active;
    }
    assert!(saw_wave);
}

#[test]
fn test_first_wave_timing_independent_of_tick_rate() {
    for tick_rate in [30, 60, 120] {
        let mut engine = started(SimConfig {
            tick_rate,
            ..Default::default()
        });
        let dt = engine.dt();
        let started_at = (0..10_000)
            .map(|_| engine.tick())
            .find(|snap| {
                snap.events
                    .iter()
                    .any(|e| matches!(e, GameEvent::WaveStarted { wave: 1, .. }))
            })
            .map(|snap| snap.time.elapsed_secs)
            .expect("wave 1 should start");
        assert!(
            (started_at - 20.0).abs() <= dt + 1e-6,
            "{tick_rate} Hz: wave 1 at {started_at}"
        );
    }
}

#[test]
fn test_wave_start_announcement() {
    let mut engine = started(SimConfig::default());
    let snap = (0..2000)
        .map(|_| engine.tick())
        .find(|snap| snap.wave.active)
        .expect("wave 1 should start");
    assert!(has_alert(&snap, "WAVE 1 - 8 TARGETS INBOUND"));
    assert_eq!(snap.wave.total, 8);
    // The first aircraft spawns on the tick the wave starts.
    assert_eq!(snap.wave.spawned, 1);
    assert_eq!(snap.wave.remaining_to_spawn, 7);
}

#[test]
fn test_wave_cleared_starts_intermission() {
    let mut ruleset = Ruleset::classic();
    ruleset.waves.first_wave_delay_secs = 0.5;
    ruleset.waves.quota_base = 1.0;
    ruleset.waves.quota_per_wave = 0.0;
    ruleset.waves.quota_max = 1;
    if let CyberMode::AreaPulse { base_damage, .. } = &mut ruleset.cyber.mode {
        *base_damage = 10_000.0;
    }
    let mut engine = started(SimConfig {
        ruleset,
        ..Default::default()
    });

    (0..120)
        .map(|_| engine.tick())
        .find(|snap| snap.aircraft.len() == 1)
        .expect("one aircraft should spawn");

    engine.queue_command(PlayerCommand::CyberAttack);
    let snap = engine.tick();
    assert!(snap.aircraft.is_empty());
    assert_eq!(snap.score.kills, 1);
    assert!(snap.events.contains(&GameEvent::WaveCleared { wave: 1 }));
    assert!(has_alert(&snap, "WAVE CLEARED - PREPARE FOR NEXT ASSAULT"));
    assert_eq!(snap.wave.wave, 2);
    assert!(!snap.wave.active);
    assert_eq!(snap.wave.countdown_secs, 20);
}

#[test]
fn test_elite_variant_single_aircraft() {
    let mut engine = started(SimConfig::for_variant(Variant::Elite));
    let mut seen_elite = false;
    for _ in 0..1200 {
        let snap = engine.tick();
        assert!(snap.aircraft.len() <= 1);
        assert!(snap.wave.total <= 1);
        assert!(!snap.alerts.iter().any(|a| a.message.starts_with("WAVE")));
        if let Some(a) = snap.aircraft.first() {
            assert_eq!(a.aircraft_type, AircraftType::Elite);
            seen_elite = true;
        }
    }
    assert!(seen_elite);
}

#[test]
fn test_bomber_chance_selection() {
    let selection = Ruleset::classic().selection;
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let bombers = (0..2000)
        .filter(|_| selection.choose(10, &mut rng) == AircraftType::Bomber)
        .count();
    // min(0.4 + 10 * 0.05, 0.7) = 0.7
    let fraction = bombers as f64 / 2000.0;
    assert!((0.65..0.75).contains(&fraction), "bomber fraction {fraction}");
}

#[test]
fn test_weighted_selection_only_picks_table_types() {
    let selection = TypeSelection::Weighted {
        table: vec![
            WeightedType {
                aircraft_type: AircraftType::Attack,
                weight: 1,
            },
            WeightedType {
                aircraft_type: AircraftType::Elite,
                weight: 0,
            },
        ],
    };
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    for wave in 1..50 {
        assert_eq!(selection.choose(wave, &mut rng), AircraftType::Attack);
    }
    assert_eq!(selection.selectable(), vec![AircraftType::Attack]);
}

// ---- Cyber attack ----

#[test]
fn test_cyber_with_no_aircraft_is_rejected() {
    let mut engine = started(SimConfig::default());
    engine.queue_command(PlayerCommand::CyberAttack);
    let snap = engine.tick();
    assert!(snap.cyber.ready);
    assert!(engine.cyber().is_ready());
    assert_eq!(snap.score.score, 0);
    assert!(snap.alerts.is_empty());
}

#[test]
fn test_cyber_charging_alert() {
    let mut engine = started(SimConfig::default());
    engine.spawn_test_aircraft(
        AircraftType::Bomber,
        Position::new(700.0, 200.0),
        Velocity::new(-108.0, 0.0),
    );
    engine.queue_command(PlayerCommand::CyberAttack);
    let snap = engine.tick();
    assert!(!snap.cyber.ready);
    assert_eq!(engine.score().cyber_attacks, 1);

    engine.queue_command(PlayerCommand::CyberAttack);
    let snap = engine.tick();
    assert!(has_alert(&snap, "CYBER SYSTEMS CHARGING..."));
    assert_eq!(engine.score().cyber_attacks, 1);
}

#[test]
fn test_cyber_ignored_outside_active_play() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::CyberAttack);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Splash);
    assert!(snap.alerts.is_empty());
}

fn cyber_world(profiles: &[(AircraftProfile, Position)]) -> World {
    let mut world = World::new();
    for (id, (profile, pos)) in profiles.iter().enumerate() {
        world_setup::spawn_aircraft(
            &mut world,
            id as u32,
            AircraftType::Fighter,
            profile,
            *pos,
            Velocity::default(),
            0.0,
        );
    }
    world
}

fn healths(world: &World) -> Vec<f64> {
    let mut out: Vec<(u32, f64)> = world
        .query::<&Aircraft>()
        .iter()
        .map(|(_, a)| (a.id, a.health))
        .collect();
    out.sort_by_key(|(id, _)| *id);
    out.into_iter().map(|(_, h)| h).collect()
}

#[test]
fn test_area_pulse_damage_and_score() {
    let rules = Ruleset::classic().cyber;
    let mut world = cyber_world(&[
        (AircraftProfile::fighter(), Position::new(500.0, 200.0)),
        (AircraftProfile::fighter(), Position::new(950.0, 440.0)),
    ]);
    let mut cyber = CyberState::default();
    let mut score = ScoreState::default();
    let mut feedback = Feedback::default();
    let turret = Position::new(150.0, 480.0);

    let report = cyber_attack::launch(
        &mut world,
        &mut cyber,
        &rules,
        &turret,
        &mut score,
        &mut feedback,
    )
    .unwrap();

    // Full damage at the pulse center, floor factor 0.3 far away.
    assert_eq!(report.targets_hit, 2);
    assert_eq!(report.destroyed, 0);
    assert_eq!(report.total_damage, 180.0 + 54.0);
    assert_eq!(report.score_bonus, 234 * 3);
    assert_eq!(healths(&world), vec![170.0, 296.0]);
    assert_eq!(score.score, 702);
    assert!(!cyber.is_ready());
    assert_eq!(
        feedback.alerts.last().map(|a| a.level),
        Some(AlertLevel::Cyber)
    );

    let again = cyber_attack::launch(
        &mut world,
        &mut cyber,
        &rules,
        &turret,
        &mut score,
        &mut feedback,
    );
    assert_eq!(again, Err(CyberRejection::Charging));
    assert_eq!(score.score, 702);
}

#[test]
fn test_area_pulse_kill_counts() {
    let rules = Ruleset::classic().cyber;
    let fragile = AircraftProfile {
        max_health: 100.0,
        ..AircraftProfile::fighter()
    };
    let mut world = cyber_world(&[(fragile, Position::new(500.0, 200.0))]);
    let mut cyber = CyberState::default();
    let mut score = ScoreState::default();
    let mut feedback = Feedback::default();

    let report = cyber_attack::launch(
        &mut world,
        &mut cyber,
        &rules,
        &Position::new(150.0, 480.0),
        &mut score,
        &mut feedback,
    )
    .unwrap();

    // Damage is clamped to remaining health.
    assert_eq!(report.total_damage, 100.0);
    assert_eq!(report.destroyed, 1);
    assert_eq!(report.score_bonus, 100 * 3 + 100);
    assert_eq!(score.kills, 1);
    assert!(healths(&world).is_empty());
}

#[test]
fn test_closest_target_respects_health_floor() {
    let rules = Ruleset::tactical().cyber;
    let mut world = cyber_world(&[
        (AircraftProfile::fighter(), Position::new(800.0, 100.0)),
        (AircraftProfile::bomber(), Position::new(250.0, 400.0)),
    ]);
    let turret = Position::new(150.0, 480.0);
    let mut score = ScoreState::default();
    let mut feedback = Feedback::default();

    let mut strike = |world: &mut World, score: &mut ScoreState| {
        cyber_attack::launch(
            world,
            &mut CyberState::default(),
            &rules,
            &turret,
            score,
            &mut feedback,
        )
        .unwrap()
    };

    let first = strike(&mut world, &mut score);
    assert_eq!(first.targets_hit, 1);
    assert_eq!(first.total_damage, 250.0);
    assert_eq!(first.score_bonus, 750);
    assert_eq!(healths(&world), vec![350.0, 250.0]);

    let second = strike(&mut world, &mut score);
    assert_eq!(second.total_damage, 200.0);
    assert_eq!(healths(&world), vec![350.0, 50.0]);

    let third = strike(&mut world, &mut score);
    assert_eq!(third.total_damage, 0.0);
    assert_eq!(third.destroyed, 0);
    assert_eq!(healths(&world), vec![350.0, 50.0]);
    assert_eq!(score.score, 750 + 600);
}

#[test]
fn test_cyber_rules_round_trip() {
    let rules = CyberRules {
        cooldown_secs: 3.0,
        mode: CyberMode::ClosestTarget {
            damage: 250.0,
            health_floor: 50.0,
            score_per_damage: 3,
        },
    };
    let json = serde_json::to_string(&rules).unwrap();
    assert!(json.contains("\"kind\":\"ClosestTarget\""));
    let back: CyberRules = serde_json::from_str(&json).unwrap();
    assert_eq!(back, rules);
}

// ---- Rulesets ----

#[test]
fn test_presets_validate() {
    for variant in Variant::ALL {
        let ruleset = Ruleset::preset(variant);
        assert_eq!(ruleset.variant, variant);
        ruleset.validate().unwrap();
    }
}

#[test]
fn test_ruleset_json_round_trip() {
    let original = Ruleset::tactical();
    let json = original.to_json_pretty().unwrap();
    let loaded = Ruleset::from_json_str(&json).unwrap();
    assert_eq!(loaded.name, original.name);
    assert_eq!(loaded.variant, original.variant);
    assert_eq!(loaded.selection, original.selection);
    assert_eq!(loaded.flight, original.flight);
    assert_eq!(loaded.cyber.mode, original.cyber.mode);
    assert_eq!(loaded.waves.quota_max, original.waves.quota_max);
    for aircraft_type in AircraftType::ALL {
        assert!(loaded.aircraft.contains(aircraft_type));
    }
}

#[test]
fn test_ruleset_validation_errors() {
    let mut ruleset = Ruleset::classic();
    ruleset.waves.concurrency_limit = 0;
    assert!(matches!(
        ruleset.validate(),
        Err(RulesetError::InvalidValue { ref field, .. }) if field == "waves.concurrency_limit"
    ));

    let mut ruleset = Ruleset::classic();
    ruleset.player_missile.speed = -1.0;
    assert!(matches!(
        ruleset.validate(),
        Err(RulesetError::InvalidValue { ref field, .. }) if field == "player_missile.speed"
    ));

    let mut ruleset = Ruleset::tactical();
    ruleset.selection = TypeSelection::Weighted {
        table: vec![WeightedType {
            aircraft_type: AircraftType::Fighter,
            weight: 0,
        }],
    };
    assert!(matches!(ruleset.validate(), Err(RulesetError::EmptyTypeTable)));

    let mut ruleset = Ruleset::elite();
    ruleset.aircraft = AircraftRegistry::empty();
    assert!(matches!(
        ruleset.validate(),
        Err(RulesetError::MissingProfile(AircraftType::Elite))
    ));

    assert!(matches!(
        Ruleset::from_json_str("{ not json"),
        Err(RulesetError::Parse(_))
    ));
}

#[test]
fn test_sim_config_rejects_zero_tick_rate() {
    let config = SimConfig {
        tick_rate: 0,
        ..Default::default()
    };
    assert!(config.validate().is_err());
    assert!(SimConfig::default().validate().is_ok());
}

// ---- Snapshot ----

#[test]
fn test_snapshot_indicators() {
    let mut engine = started(SimConfig::default());
    engine.set_turret_health(1500.0);
    engine.set_turret_heat(85.0);
    let snap = engine.tick();
    assert!(snap.turret.danger);
    assert!(snap.turret.overheated);
    assert!((snap.turret.health_pct - 15.0).abs() < 1e-9);
    assert_eq!(snap.environment.day_phase, DayPhase::Dusk);
}

#[test]
fn test_banner_expires() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick();
    assert_eq!(
        snap.banner.as_ref().map(|b| b.message.as_str()),
        Some("DEFENSE SYSTEMS ONLINE - CYBER ATTACK READY")
    );
    let mut last = snap;
    for _ in 0..130 {
        last = engine.tick();
    }
    assert!(last.banner.is_none());
}

#[test]
fn test_snapshot_serializes() {
    let mut engine = started(SimConfig::default());
    engine.spawn_test_aircraft(
        AircraftType::Fighter,
        Position::new(700.0, 200.0),
        Velocity::new(-180.0, 0.0),
    );
    let snap = engine.tick();
    let json = serde_json::to_string(&snap).unwrap();
    let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.aircraft.len(), 1);
    assert_eq!(back.phase, GamePhase::Active);
}
