//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::{CollisionCategory, TrafficTemplate};
use crate::types::BodyId;

/// World-space position (meters). The player sits at z = 0; the road scrolls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec3);

/// Identity and category of a body as seen by the physics collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub category: CollisionCategory,
}

/// A traffic car.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Traffic {
    pub template: TrafficTemplate,
    /// Speed rolled at spawn (m/s).
    pub base_speed: f64,
    /// Ramped speed actually travelled this tick (m/s).
    pub current_speed: f64,
}

/// A fuel pickup trigger volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelPickup {
    /// Fuel restored on pickup.
    pub amount: f64,
    /// Cosmetic spin about the vertical axis (degrees).
    pub spin_deg: f64,
}

/// Marker: this body has already been reported as touching the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Struck;
