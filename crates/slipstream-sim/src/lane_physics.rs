//! Built-in physics adapter over the ECS world.
//!
//! Good enough for a headless run: the forward probe measures the gap to the
//! nearest active body's rear bumper within the player's lane, and impulses
//! are buffered for an external solver. Overlap detection turns touching
//! bodies into [`Contact`]s for the engine's contact queue.

use glam::DVec3;
use hecs::World;

use slipstream_core::components::{Body, FuelPickup, Position, Struck, Traffic};
use slipstream_core::constants::{PICKUP_TRIGGER_RADIUS, PLAYER_HALF_LENGTH};
use slipstream_core::enums::CollisionCategory;
use slipstream_core::physics::{Contact, Impulse, PhysicsBridge};
use slipstream_core::types::BodyId;

use crate::pool::Active;

/// Physics bridge backed by the lane layout and the world's traffic.
pub struct LanePhysics<'a> {
    world: &'a World,
    half_width: f64,
    impulses: &'a mut Vec<Impulse>,
}

impl<'a> LanePhysics<'a> {
    pub fn new(world: &'a World, half_width: f64, impulses: &'a mut Vec<Impulse>) -> Self {
        Self {
            world,
            half_width,
            impulses,
        }
    }
}

impl PhysicsBridge for LanePhysics<'_> {
    fn probe_forward(
        &self,
        origin: DVec3,
        direction: DVec3,
        max_distance: f64,
        filter: CollisionCategory,
    ) -> Option<f64> {
        let direction = direction.try_normalize()?;
        self.world
            .query::<(&Body, &Position, &Traffic, &Active)>()
            .iter()
            .filter(|(_, (body, _, _, _))| body.category == filter)
            .filter_map(|(_, (_, pos, traffic, _))| {
                let offset = pos.0 - origin;
                let along = offset.dot(direction);
                let lateral = (offset - direction * along).length();
                let gap = along - traffic.template.length() / 2.0;
                (along > 0.0 && lateral <= self.half_width && gap <= max_distance)
                    .then_some(gap.max(0.0))
            })
            .min_by(f64::total_cmp)
    }

    fn apply_impulse(&mut self, body: BodyId, impulse: DVec3, point: DVec3) {
        self.impulses.push(Impulse {
            body,
            impulse,
            point,
        });
    }
}

/// Find bodies touching the player.
///
/// Traffic is reported once per spawn as an obstacle contact at the midpoint
/// between the two cars; the body is then marked [`Struck`]. Pickups are
/// reported as triggers every time they overlap.
pub fn detect_overlaps(world: &mut World, player: DVec3, half_width: f64) -> Vec<Contact> {
    let mut contacts = Vec::new();
    let mut struck = Vec::new();

    for (entity, (body, pos, traffic, _, already)) in world
        .query::<(&Body, &Position, &Traffic, &Active, Option<&Struck>)>()
        .iter()
    {
        if already.is_some() {
            continue;
        }
        let reach = traffic.template.length() / 2.0 + PLAYER_HALF_LENGTH;
        if (pos.0.x - player.x).abs() <= half_width && (pos.0.z - player.z).abs() <= reach {
            contacts.push(Contact::Obstacle {
                body: body.id,
                point: (pos.0 + player) / 2.0,
            });
            struck.push(entity);
        }
    }

    for (_, (body, pos, _)) in world.query::<(&Body, &Position, &FuelPickup)>().iter() {
        if (pos.0.x - player.x).abs() <= half_width
            && (pos.0.z - player.z).abs() <= PICKUP_TRIGGER_RADIUS
        {
            contacts.push(Contact::Trigger { body: body.id });
        }
    }

    for entity in struck {
        let _ = world.insert_one(entity, Struck);
    }
    contacts
}
