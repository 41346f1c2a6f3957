//! Tick-counted timers.
//!
//! A timer is just a remaining duration decremented once per tick. Holding
//! it in an `Option` gives one instance per kind: starting a new one
//! overwrites (cancels) the old, and `None` means idle.

/// Remaining duration of a running timer (seconds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    remaining: f64,
}

impl Countdown {
    pub fn new(secs: f64) -> Self {
        Self {
            remaining: secs.max(0.0),
        }
    }

    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    /// Add time to a running timer.
    pub fn extend(&mut self, secs: f64) {
        self.remaining += secs.max(0.0);
    }

    /// Advance by `dt`. Returns `true` once the timer has run out.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.remaining = (self.remaining - dt).max(0.0);
        self.remaining <= 0.0
    }
}

/// Advance an optional timer, clearing it when it expires.
/// Returns `true` on the tick the timer expired.
pub fn advance_slot(slot: &mut Option<Countdown>, dt: f64) -> bool {
    let expired = slot.as_mut().is_some_and(|timer| timer.advance(dt));
    if expired {
        *slot = None;
    }
    expired
}
