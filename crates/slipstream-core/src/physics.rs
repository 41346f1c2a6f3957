//! Contract with the external physics collaborator.
//!
//! The core never detects collisions or integrates impulses itself. It asks
//! the collaborator for forward probes, receives contact reports, and issues
//! impulses for the collaborator's solver to resolve.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::CollisionCategory;
use crate::types::BodyId;

/// World forward axis (+z). Traffic approaches from +z and retires behind −z.
pub const FORWARD: DVec3 = DVec3::Z;

/// Queries and commands the simulation issues to the physics collaborator.
pub trait PhysicsBridge {
    /// Cast a ray from `origin` along `direction` for up to `max_distance`,
    /// against bodies in `filter`. Returns the distance to the nearest hit.
    fn probe_forward(
        &self,
        origin: DVec3,
        direction: DVec3,
        max_distance: f64,
        filter: CollisionCategory,
    ) -> Option<f64>;

    /// Apply `impulse` to `body` at world-space `point`.
    fn apply_impulse(&mut self, body: BodyId, impulse: DVec3, point: DVec3);
}

/// An impulse issued to the physics collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Impulse {
    pub body: BodyId,
    pub impulse: DVec3,
    pub point: DVec3,
}

/// A contact reported by the physics collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Contact {
    /// The player hit an obstacle-tagged body.
    Obstacle { body: BodyId, point: DVec3 },
    /// The player entered a trigger volume.
    Trigger { body: BodyId },
}
