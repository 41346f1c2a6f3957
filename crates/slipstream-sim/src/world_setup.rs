//! Entity spawn factories.
//!
//! Traffic is built through the pool with [`TrafficFactory`]; fuel pickups
//! are one-shot entities spawned and despawned directly.

use glam::DVec3;
use hecs::{Entity, World};

use slipstream_core::components::{Body, FuelPickup, Position, Struck, Traffic};
use slipstream_core::enums::{CollisionCategory, TrafficTemplate};
use slipstream_core::types::BodyId;

use crate::pool::{EntityPool, PoolHooks};

/// The traffic pool as the engine uses it.
pub type TrafficPool = EntityPool<TrafficTemplate, TrafficFactory>;

/// Body identity of an entity. Stable across pool reuse.
pub fn body_id(entity: Entity) -> BodyId {
    BodyId(entity.to_bits().get())
}

/// Entity behind a body identity, if the bits are a valid handle.
pub fn entity_of(body: BodyId) -> Option<Entity> {
    Entity::from_bits(body.0)
}

/// Builds and resets pooled traffic cars.
#[derive(Debug, Default)]
pub struct TrafficFactory;

impl PoolHooks<TrafficTemplate> for TrafficFactory {
    fn create(&mut self, world: &mut World, template: TrafficTemplate) -> Entity {
        let entity = world.spawn((Position::default(), fresh_traffic(template)));
        let _ = world.insert_one(
            entity,
            Body {
                id: body_id(entity),
                category: CollisionCategory::OtherVehicle,
            },
        );
        entity
    }

    fn activate(&mut self, world: &mut World, entity: Entity, template: TrafficTemplate) {
        if let Ok(mut traffic) = world.get::<&mut Traffic>(entity) {
            *traffic = fresh_traffic(template);
        }
        if let Ok(mut pos) = world.get::<&mut Position>(entity) {
            *pos = Position::default();
        }
        let _ = world.remove_one::<Struck>(entity);
    }
}

fn fresh_traffic(template: TrafficTemplate) -> Traffic {
    Traffic {
        template,
        base_speed: 0.0,
        current_speed: 0.0,
    }
}

/// Acquire a traffic car from the pool and place it on the road.
pub fn spawn_traffic(
    world: &mut World,
    pool: &mut TrafficPool,
    template: TrafficTemplate,
    position: DVec3,
    speed: f64,
) -> Entity {
    let entity = pool.acquire(world, template);
    if let Ok(mut pos) = world.get::<&mut Position>(entity) {
        pos.0 = position;
    }
    if let Ok(mut traffic) = world.get::<&mut Traffic>(entity) {
        traffic.base_speed = speed;
        traffic.current_speed = speed;
    }
    entity
}

/// Spawn a traffic car that is not pool-managed. It is despawned outright on retirement.
pub fn spawn_loose_traffic(
    world: &mut World,
    template: TrafficTemplate,
    position: DVec3,
    speed: f64,
) -> Entity {
    let entity = world.spawn((
        Position(position),
        Traffic {
            template,
            base_speed: speed,
            current_speed: speed,
        },
        crate::pool::Active,
    ));
    let _ = world.insert_one(
        entity,
        Body {
            id: body_id(entity),
            category: CollisionCategory::OtherVehicle,
        },
    );
    entity
}

/// Spawn a fuel pickup trigger volume.
pub fn spawn_fuel_pickup(world: &mut World, position: DVec3, amount: f64) -> Entity {
    let entity = world.spawn((
        Position(position),
        FuelPickup {
            amount,
            spin_deg: 0.0,
        },
    ));
    let _ = world.insert_one(
        entity,
        Body {
            id: body_id(entity),
            category: CollisionCategory::Pickup,
        },
    );
    entity
}
