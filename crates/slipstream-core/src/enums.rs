//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Player vehicle state. Initial state is `Accelerating`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleState {
    /// Driving toward max speed (plus boost surplus while boosting).
    #[default]
    Accelerating,
    /// Bleeding speed after a crash until impact recovery elapses.
    Decelerating,
    /// Tank empty. Terminal for the run.
    OutOfFuel,
    /// Combo-unlocked nitro: top speed, collisions knock bodies away.
    NitroBoosting,
}

impl VehicleState {
    /// Whether the run has ended.
    pub fn is_terminal(self) -> bool {
        self == VehicleState::OutOfFuel
    }
}

/// Collision category used to filter physics queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionCategory {
    /// Traffic cars. The slipstream probe looks for these.
    OtherVehicle,
    /// Anything that causes a crash on contact.
    Obstacle,
    /// Trigger volumes such as fuel pickups.
    Pickup,
}

/// Lateral lane-change direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneDirection {
    Left,
    Right,
}

impl LaneDirection {
    /// Signed lane index step.
    pub fn step(self) -> isize {
        match self {
            LaneDirection::Left => -1,
            LaneDirection::Right => 1,
        }
    }
}

/// Traffic car template (the prefab a pooled instance was built from).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrafficTemplate {
    Sedan,
    Hatchback,
    Van,
    Truck,
}

impl TrafficTemplate {
    /// Every template, in declaration order.
    pub const ALL: [TrafficTemplate; 4] = [
        TrafficTemplate::Sedan,
        TrafficTemplate::Hatchback,
        TrafficTemplate::Van,
        TrafficTemplate::Truck,
    ];

    /// Body length along z (meters). Used by the probe to measure gaps to the rear bumper.
    pub fn length(self) -> f64 {
        match self {
            TrafficTemplate::Sedan => 4.5,
            TrafficTemplate::Hatchback => 4.0,
            TrafficTemplate::Van => 5.2,
            TrafficTemplate::Truck => 8.0,
        }
    }
}

/// What a spawner branch produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnKind {
    Obstacle,
    Fuel,
}
