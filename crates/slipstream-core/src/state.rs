//! Game state snapshot: the complete visible state handed to the
//! presentation layer after each tick. Read-only; pull model.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::{TrafficTemplate, VehicleState};
use crate::events::GameEvent;
use crate::physics::Impulse;
use crate::types::{BodyId, SimTime};

/// Complete game state after one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub time: SimTime,
    pub player: PlayerView,
    pub traffic: Vec<TrafficView>,
    pub pickups: Vec<PickupView>,
    /// Impulses issued this tick for the physics collaborator to resolve.
    pub impulses: Vec<Impulse>,
    pub events: Vec<GameEvent>,
}

/// HUD/camera view of the player vehicle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub state: VehicleState,
    pub lane: usize,
    pub position: DVec3,
    /// Roll about the forward axis (degrees).
    pub roll_deg: f64,
    pub speed: f64,
    pub fuel: f64,
    pub max_fuel: f64,
    /// `fuel / max_fuel`, for gauges.
    pub fuel_fraction: f64,
    pub slipstreaming: bool,
    pub boosting: bool,
    pub boost_remaining_secs: f64,
    pub combo: u32,
    pub nitro_available: bool,
    /// Distance driven this run (meters).
    pub distance: f64,
}

/// An active traffic car.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficView {
    pub body: BodyId,
    pub template: TrafficTemplate,
    pub position: DVec3,
    pub speed: f64,
}

/// A fuel pickup on the road.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub body: BodyId,
    pub position: DVec3,
    /// Spin about the vertical axis (degrees, wrapped to [0, 360)).
    pub spin_deg: f64,
}
