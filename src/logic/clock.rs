//! Clock ticks: the only place playing time accrues.

use crate::models::MatchSession;
use std::time::{Duration, Instant};

/// Apply one elapsed second: the match clock and every on-field player advance together.
/// Does nothing while the clock is paused.
pub fn tick(session: &mut MatchSession) {
    if !session.clock.advance() {
        return;
    }
    for p in session.players.iter_mut().filter(|p| p.is_on_field()) {
        p.elapsed_seconds += 1;
    }
}

/// Wall-clock anchor of a running match clock.
///
/// Seconds are counted from the moment the clock was started or resumed, never from a shared
/// server schedule, so a run shorter than one second credits nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickSchedule {
    anchor: Option<Instant>,
}

impl TickSchedule {
    /// Anchor at `now`. Keeps the existing anchor if already started.
    pub fn start(&mut self, now: Instant) {
        if self.anchor.is_none() {
            self.anchor = Some(now);
        }
    }

    /// Drop the anchor; the part-second since the last tick is discarded.
    pub fn stop(&mut self) {
        self.anchor = None;
    }

    pub fn is_started(&self) -> bool {
        self.anchor.is_some()
    }

    /// Whole seconds due at `now`, moving the anchor forward by that many.
    ///
    /// A clock that is no longer running (paused, reset or reconfigured) clears the anchor and
    /// owes nothing. A running clock without an anchor is anchored at `now`.
    pub fn ticks_due(&mut self, running: bool, now: Instant) -> u32 {
        if !running {
            self.stop();
            return 0;
        }
        let anchor = match self.anchor {
            Some(anchor) => anchor,
            None => {
                self.anchor = Some(now);
                return 0;
            }
        };
        let whole = now.saturating_duration_since(anchor).as_secs();
        if whole == 0 {
            return 0;
        }
        self.anchor = Some(anchor + Duration::from_secs(whole));
        u32::try_from(whole).unwrap_or(u32::MAX)
    }
}
