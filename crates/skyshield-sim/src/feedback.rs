//! Per-tick event and alert collection.

use skyshield_core::enums::AlertLevel;
use skyshield_core::events::{Alert, GameEvent};

/// Events and alerts raised during one tick, drained into the snapshot.
#[derive(Debug, Default)]
pub struct Feedback {
    pub tick: u64,
    pub events: Vec<GameEvent>,
    pub alerts: Vec<Alert>,
}

impl Feedback {
    pub fn event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn alert(&mut self, level: AlertLevel, message: impl Into<String>) {
        self.alerts.push(Alert {
            level,
            message: message.into(),
            tick: self.tick,
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.alert(AlertLevel::Info, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.alert(AlertLevel::Warning, message);
    }

    /// Take everything collected so far, leaving the buffers empty.
    pub fn drain(&mut self) -> (Vec<GameEvent>, Vec<Alert>) {
        (
            std::mem::take(&mut self.events),
            std::mem::take(&mut self.alerts),
        )
    }
}
