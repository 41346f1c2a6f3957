//! Fundamental simulation types and interpolation helpers.

use serde::{Deserialize, Serialize};

/// Opaque identity of a physics body, as understood by the physics collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u64);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Move `current` toward `target` by at most `max_delta`, never overshooting.
///
/// `speed' = speed + clamp(target - speed, -max_delta, max_delta)`.
/// A non-positive `max_delta` leaves `current` unchanged.
pub fn move_towards(current: f64, target: f64, max_delta: f64) -> f64 {
    if max_delta <= 0.0 {
        return current;
    }
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + max_delta.copysign(delta)
    }
}

/// Exponential smoothing step: close the gap to `target` by a fraction `rate * dt`
/// of it, clamped so a long frame lands on the target instead of overshooting.
pub fn smooth_towards(current: f64, target: f64, rate: f64, dt: f64) -> f64 {
    let t = (rate * dt).clamp(0.0, 1.0);
    current + (target - current) * t
}
