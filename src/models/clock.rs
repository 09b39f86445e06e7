//! The shared match clock.

use serde::{Deserialize, Serialize};

/// Integer-second match clock. Only advances while running.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchClock {
    pub elapsed_seconds: u32,
    pub running: bool,
}

impl MatchClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock. No-op if already running.
    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Advance one second. Returns false (and does nothing) while paused.
    pub fn advance(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed_seconds += 1;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Format seconds as `MM:SS` (minutes may run past 59).
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
