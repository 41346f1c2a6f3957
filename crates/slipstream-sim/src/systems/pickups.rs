//! Fuel pickups: scrolling, spin, collection and retirement.

use hecs::{Entity, World};
use tracing::debug;

use slipstream_core::components::{FuelPickup, Position};
use slipstream_core::constants::DESPAWN_MARGIN;
use slipstream_core::events::GameEvent;
use slipstream_vehicle::PlayerVehicle;

/// Scroll pickups toward the player at the player's speed, spin them, and
/// despawn the ones left behind.
pub fn run(
    world: &mut World,
    player: &PlayerVehicle,
    spin_deg_per_sec: f64,
    dt: f64,
    despawn_buffer: &mut Vec<Entity>,
) {
    let scroll = player.current_speed() * dt;
    let retire_z = player.position().z - DESPAWN_MARGIN;

    despawn_buffer.clear();
    for (entity, (pickup, pos)) in world.query_mut::<(&mut FuelPickup, &mut Position)>() {
        pos.0.z -= scroll;
        pickup.spin_deg = (pickup.spin_deg + spin_deg_per_sec * dt).rem_euclid(360.0);
        if pos.0.z < retire_z {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// The player entered `entity`'s trigger volume: refuel and remove the pickup.
///
/// Returns `false` if `entity` is not a pickup. Once the player is out of fuel
/// the pickup is still removed but restores nothing.
pub fn collect(
    world: &mut World,
    entity: Entity,
    player: &mut PlayerVehicle,
    events: &mut Vec<GameEvent>,
) -> bool {
    let amount = match world.get::<&FuelPickup>(entity) {
        Ok(pickup) => pickup.amount,
        Err(_) => return false,
    };

    if !player.state().is_terminal() {
        player.add_fuel(amount);
        events.push(GameEvent::FuelPickedUp { amount });
        debug!(amount, fuel = player.current_fuel(), "fuel picked up");
    }
    let _ = world.despawn(entity);
    true
}
