//! Traffic behaviour: relative-speed motion and retirement.
//!
//! While the player runs above max speed (near-miss boost or nitro), each car
//! ramps toward `base + surplus` at the player's acceleration. Otherwise a
//! car runs at its base speed outright.
//! Cars move backward by their speed every tick and are retired once they
//! fall `DESPAWN_MARGIN` behind the player.

use hecs::{Entity, World};

use slipstream_core::components::{Position, Traffic};
use slipstream_core::constants::DESPAWN_MARGIN;
use slipstream_core::enums::TrafficTemplate;
use slipstream_core::types::move_towards;
use slipstream_vehicle::PlayerVehicle;

use crate::pool::{Active, PoolMember};
use crate::world_setup::TrafficPool;

/// Move traffic and retire cars left behind. Skipped once the player is out of fuel.
pub fn run(
    world: &mut World,
    pool: &mut TrafficPool,
    player: &PlayerVehicle,
    dt: f64,
    despawn_buffer: &mut Vec<Entity>,
) {
    if player.state().is_terminal() {
        return;
    }

    let surplus = player.boost_surplus();
    let max_delta = player.profile().acceleration * dt;
    let retire_z = player.position().z - DESPAWN_MARGIN;

    despawn_buffer.clear();
    for (entity, (traffic, pos, _)) in world.query_mut::<(&mut Traffic, &mut Position, &Active)>() {
        traffic.current_speed = match surplus {
            Some(surplus) => {
                move_towards(traffic.current_speed, traffic.base_speed + surplus, max_delta)
            }
            None => traffic.base_speed,
        };
        pos.0.z -= traffic.current_speed * dt;
        if pos.0.z < retire_z {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        if world.get::<&PoolMember<TrafficTemplate>>(entity).is_ok() {
            let _ = pool.release(world, entity);
        } else {
            let _ = world.despawn(entity);
        }
    }
}
