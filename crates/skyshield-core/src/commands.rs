//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Game control ---
    /// Leave the splash screen and start the first game.
    StartGame,
    /// Tear down the current game and start a fresh one.
    Restart,
    Pause,
    Resume,
    /// Pause if active, resume if paused.
    TogglePause,

    // --- Turret ---
    /// Move the aim point (pointer position on the playfield).
    Aim { x: f64, y: f64 },
    /// Press or release the fire button.
    SetTrigger { held: bool },
    /// Launch the cyber attack.
    CyberAttack,
}
