//! Snapshot system: reads the world and the vehicle into a `GameSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use slipstream_core::components::{Body, FuelPickup, Position, Traffic};
use slipstream_core::events::GameEvent;
use slipstream_core::physics::Impulse;
use slipstream_core::state::{GameSnapshot, PickupView, TrafficView};
use slipstream_core::types::SimTime;
use slipstream_vehicle::PlayerVehicle;

use crate::pool::Active;

/// Build a complete snapshot. `impulses` and `events` are this tick's, already drained.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    player: &PlayerVehicle,
    impulses: Vec<Impulse>,
    events: Vec<GameEvent>,
) -> GameSnapshot {
    GameSnapshot {
        time: *time,
        player: player.view(),
        traffic: build_traffic(world),
        pickups: build_pickups(world),
        impulses,
        events,
    }
}

/// Active traffic, ordered by body id.
fn build_traffic(world: &World) -> Vec<TrafficView> {
    let mut traffic: Vec<TrafficView> = world
        .query::<(&Body, &Position, &Traffic, &Active)>()
        .iter()
        .map(|(_, (body, pos, traffic, _))| TrafficView {
            body: body.id,
            template: traffic.template,
            position: pos.0,
            speed: traffic.current_speed,
        })
        .collect();
    traffic.sort_by_key(|t| t.body);
    traffic
}

fn build_pickups(world: &World) -> Vec<PickupView> {
    let mut pickups: Vec<PickupView> = world
        .query::<(&Body, &Position, &FuelPickup)>()
        .iter()
        .map(|(_, (body, pos, pickup))| PickupView {
            body: body.id,
            position: pos.0,
            spin_deg: pickup.spin_deg,
        })
        .collect();
    pickups.sort_by_key(|p| p.body);
    pickups
}
