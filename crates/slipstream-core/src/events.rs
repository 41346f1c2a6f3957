//! Events emitted by the simulation for the presentation layer.

use serde::{Deserialize, Serialize};

/// Notifications for camera, HUD and audio. Drained into each tick's snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Shake the camera (crash or nitro smash).
    CameraShake { intensity: f64 },
    /// Lane change while slipstreaming paid out boost time.
    NearMiss { bonus_secs: f64, combo: u32 },
    /// Nitro availability flipped.
    NitroAvailable { available: bool },
    /// Nitro fired.
    NitroActivated,
    /// A fuel pickup was collected.
    FuelPickedUp { amount: f64 },
    /// Tank ran dry; the run is over.
    GameOver { distance: f64 },
}
