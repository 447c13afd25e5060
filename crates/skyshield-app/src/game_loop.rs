//! Game loop thread: runs the simulation engine at a fixed rate and stores
//! the latest snapshot.
//!
//! The engine is created inside this thread so it never needs to be shared.
//! Commands arrive via `mpsc` channel.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use skyshield_core::state::{GameStateSnapshot, GameSummaryView};
use skyshield_sim::engine::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Wall-clock duration of one tick at `tick_rate` Hz.
pub fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1)))
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle that yields the final summary,
/// if the game ended before the loop shut down.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> io::Result<(
    mpsc::Sender<GameLoopCommand>,
    JoinHandle<Option<GameSummaryView>>,
)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let period = tick_duration(config.tick_rate);

    let handle = std::thread::Builder::new()
        .name("skyshield-game-loop".into())
        .spawn(move || run_game_loop(config, period, cmd_rx, &latest_snapshot))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    period: Duration,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> Option<GameSummaryView> {
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();
    log::debug!("Game loop running at {:?} per tick", period);

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    log::debug!("Game loop stopping at tick {}", engine.time().tick);
                    return engine.summary().cloned();
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += period;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > period * 2 {
            // Too far behind: reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyshield_core::commands::PlayerCommand;
    use skyshield_core::enums::GamePhase;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartGame))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::StartGame)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::Pause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_tick_duration() {
        assert_eq!(tick_duration(60).as_nanos(), 1_000_000_000u128 / 60);
        assert_eq!(tick_duration(30).as_nanos(), 1_000_000_000u128 / 30);
        assert_eq!(tick_duration(0), Duration::from_secs(1));
    }

    #[test]
    fn test_loop_ticks_and_shuts_down() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(SimConfig::default(), Arc::clone(&latest)).unwrap();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartGame))
            .unwrap();
        std::thread::sleep(Duration::from_millis(200));

        let snap = latest.lock().unwrap().clone().expect("loop should have ticked");
        assert_eq!(snap.phase, GamePhase::Active);
        assert!(snap.time.tick > 0);

        tx.send(GameLoopCommand::Shutdown).unwrap();
        let summary = handle.join().unwrap();
        assert!(summary.is_none(), "no game over in 200ms");
    }

    #[test]
    fn test_loop_stops_when_sender_dropped() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(SimConfig::default(), latest).unwrap();
        drop(tx);
        assert!(handle.join().unwrap().is_none());
    }
}
