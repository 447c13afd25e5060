//! Drivers that play one game with a gunner and report how it went.

use std::sync::Arc;
use std::thread;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use skyshield_core::enums::GamePhase;
use skyshield_core::state::{GameStateSnapshot, GameSummaryView};
use skyshield_sim::engine::{SimConfig, SimulationEngine};

use crate::autopilot::Gunner;
use crate::game_loop::{self, tick_duration};
use crate::state::{AppState, GameLoopCommand};

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub gunner: String,
    pub seed: u64,
    pub ruleset: String,
    pub ticks: u64,
    /// False when the tick limit ran out before the turret fell.
    pub game_over: bool,
    pub summary: GameSummaryView,
}

/// Summary of a game still in progress, from its latest snapshot.
pub fn summary_from_snapshot(snapshot: &GameStateSnapshot) -> GameSummaryView {
    snapshot.summary.clone().unwrap_or_else(|| GameSummaryView {
        score: snapshot.score.score,
        kills: snapshot.score.kills,
        survival_secs: snapshot.time.elapsed_secs,
        waves_survived: snapshot.wave.wave.saturating_sub(1),
        shots_fired: snapshot.score.shots_fired,
        shots_hit: snapshot.score.shots_hit,
    })
}

/// Play as fast as possible on the calling thread.
pub fn run_headless(config: SimConfig, gunner: &mut dyn Gunner, max_ticks: u64) -> Result<RunReport> {
    if max_ticks == 0 {
        return Err(anyhow!("max_ticks must be > 0"));
    }
    let seed = config.seed;
    let ruleset = config.ruleset.name.clone();
    let mut engine = SimulationEngine::new(config);
    gunner.reset();

    let mut snapshot = engine.tick();
    let mut ticks = 1;
    while ticks < max_ticks && snapshot.phase != GamePhase::GameOver {
        engine.queue_commands(gunner.next_commands(&snapshot));
        snapshot = engine.tick();
        ticks += 1;
    }

    Ok(RunReport {
        gunner: gunner.id().to_string(),
        seed,
        ruleset,
        ticks,
        game_over: snapshot.phase == GamePhase::GameOver,
        summary: summary_from_snapshot(&snapshot),
    })
}

/// Play in real time against the game loop thread, polling its snapshots
/// once per tick.
pub fn run_realtime(config: SimConfig, gunner: &mut dyn Gunner, max_ticks: u64) -> Result<RunReport> {
    if max_ticks == 0 {
        return Err(anyhow!("max_ticks must be > 0"));
    }
    let seed = config.seed;
    let ruleset = config.ruleset.name.clone();
    let period = tick_duration(config.tick_rate);
    gunner.reset();

    let app = AppState::new();
    let (tx, handle) = game_loop::spawn_game_loop(config, Arc::clone(&app.latest_snapshot))
        .context("failed to spawn game loop thread")?;
    if let Ok(mut slot) = app.command_tx.lock() {
        *slot = Some(tx);
    }

    let mut last_tick = None;
    let mut latest = None;
    loop {
        thread::sleep(period);
        if handle.is_finished() {
            break;
        }
        let Some(snapshot) = app.snapshot() else {
            continue;
        };
        if last_tick == Some(snapshot.time.tick) && snapshot.phase == GamePhase::Active {
            continue;
        }
        last_tick = Some(snapshot.time.tick);

        let done = snapshot.phase == GamePhase::GameOver || snapshot.time.tick >= max_ticks;
        if !done {
            for command in gunner.next_commands(&snapshot) {
                app.send(GameLoopCommand::PlayerCommand(command));
            }
        }
        latest = Some(snapshot);
        if done {
            break;
        }
    }

    app.send(GameLoopCommand::Shutdown);
    handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;

    let snapshot = latest.ok_or_else(|| anyhow!("game loop produced no snapshot"))?;
    Ok(RunReport {
        gunner: gunner.id().to_string(),
        seed,
        ruleset,
        ticks: snapshot.time.tick,
        game_over: snapshot.phase == GamePhase::GameOver,
        summary: summary_from_snapshot(&snapshot),
    })
}
