//! Tests for the simulation engine, entity pool, spawner and traffic systems.

use glam::DVec3;
use hecs::World;

use slipstream_core::commands::PlayerCommand;
use slipstream_core::components::{Position, Struck, Traffic};
use slipstream_core::config::{GameConfig, ObstaclePattern, PatternStep, PoolConfig};
use slipstream_core::constants::DT;
use slipstream_core::enums::{CollisionCategory, TrafficTemplate, VehicleState};
use slipstream_core::error::ConfigError;
use slipstream_core::events::GameEvent;
use slipstream_core::physics::{Contact, PhysicsBridge, FORWARD};

use crate::engine::SimulationEngine;
use crate::lane_physics::LanePhysics;
use crate::pool::{Active, PoolError};
use crate::world_setup::{self, body_id, TrafficFactory, TrafficPool};

/// Config whose spawner never fires within a test's horizon.
fn quiet_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.spawner.min_interval = 1000.0;
    config.spawner.max_interval = 1000.0;
    config
}

/// Config whose tank empties after one second at fuel rate 1.
fn short_tank(mut config: GameConfig) -> GameConfig {
    config.profile.max_fuel = 1.0;
    config.profile.fuel_consumption_rate = 1.0;
    config
}

fn new_engine(config: GameConfig) -> SimulationEngine {
    match SimulationEngine::new(config) {
        Ok(engine) => engine,
        Err(err) => panic!("config rejected: {err}"),
    }
}

fn traffic_z(engine: &SimulationEngine, entity: hecs::Entity) -> f64 {
    engine.world().get::<&Position>(entity).unwrap().0.z
}

fn run_until_out_of_fuel(engine: &mut SimulationEngine, dt: f64) {
    for _ in 0..1000 {
        engine.tick(dt);
        if engine.vehicle().state() == VehicleState::OutOfFuel {
            return;
        }
    }
    panic!("vehicle never ran out of fuel");
}

// ---- Determinism ----

fn scripted_run(seed: u64, ticks: usize) -> Vec<String> {
    let mut engine = new_engine(GameConfig {
        seed,
        ..Default::default()
    });
    let mut snapshots = Vec::with_capacity(ticks);
    for i in 0..ticks {
        if i % 45 == 0 {
            engine.queue_command(if (i / 45) % 2 == 0 {
                PlayerCommand::MoveLeft
            } else {
                PlayerCommand::MoveRight
            });
        }
        engine.detect_overlaps();
        let snap = engine.tick(DT);
        snapshots.push(serde_json::to_string(&snap).unwrap());
    }
    snapshots
}

#[test]
fn test_determinism_same_seed() {
    let a = scripted_run(12345, 900);
    let b = scripted_run(12345, 900);
    for (i, (json_a, json_b)) in a.iter().zip(&b).enumerate() {
        assert_eq!(json_a, json_b, "snapshots diverged at tick {i}");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let a = scripted_run(111, 900);
    let b = scripted_run(222, 900);
    assert!(
        a.iter().zip(&b).any(|(x, y)| x != y),
        "different seeds should produce divergent output"
    );
}

// ---- Configuration ----

#[test]
fn test_engine_rejects_empty_lane_table() {
    let mut config = GameConfig::default();
    config.lanes.offsets.clear();
    assert!(matches!(
        SimulationEngine::new(config),
        Err(ConfigError::EmptyLaneTable)
    ));
}

#[test]
fn test_engine_rejects_pattern_lane_outside_table() {
    let mut config = GameConfig::default();
    config.spawner.patterns = vec![ObstaclePattern {
        name: "off-road".into(),
        steps: vec![PatternStep {
            lane: 7,
            delay: 0.0,
            template: None,
        }],
    }];
    assert!(matches!(
        SimulationEngine::new(config),
        Err(ConfigError::PatternLaneOutOfRange { lane: 7, count: 3, .. })
    ));
}

#[test]
fn test_engine_rejects_oversized_pool() {
    let mut config = GameConfig::default();
    config.pool.default_capacity = usize::MAX;
    assert!(matches!(
        SimulationEngine::new(config),
        Err(ConfigError::PoolSize { .. })
    ));
}

#[test]
fn test_engine_rejects_invalid_profile() {
    let mut config = GameConfig::default();
    config.profile.max_fuel = 0.0;
    assert!(matches!(
        SimulationEngine::new(config),
        Err(ConfigError::InvalidField { .. })
    ));
}

// ---- Entity pool ----

#[test]
fn test_pool_round_trip_reuses_instance_with_fresh_state() {
    let mut world = World::new();
    let mut pool = TrafficPool::new(PoolConfig::default(), TrafficFactory);

    let first = pool.acquire(&mut world, TrafficTemplate::Sedan);
    {
        let mut traffic = world.get::<&mut Traffic>(first).unwrap();
        traffic.base_speed = 17.0;
        traffic.current_speed = 55.0;
    }
    world.get::<&mut Position>(first).unwrap().0 = DVec3::new(2.5, 1.0, -30.0);
    world.insert_one(first, Struck).unwrap();

    pool.release(&mut world, first).unwrap();
    assert!(world.get::<&Active>(first).is_err(), "parked instances are inactive");
    assert_eq!(pool.parked_count(TrafficTemplate::Sedan), 1);

    let second = pool.acquire(&mut world, TrafficTemplate::Sedan);
    assert_eq!(first, second);
    assert_eq!(pool.created_count(), 1);
    assert_eq!(pool.parked_count(TrafficTemplate::Sedan), 0);

    let traffic = *world.get::<&Traffic>(second).unwrap();
    assert_eq!(traffic.base_speed, 0.0);
    assert_eq!(traffic.current_speed, 0.0);
    assert_eq!(world.get::<&Position>(second).unwrap().0, DVec3::ZERO);
    assert!(world.get::<&Struck>(second).is_err());
    assert!(world.get::<&Active>(second).is_ok());
}

#[test]
fn test_pool_keys_by_template() {
    let mut world = World::new();
    let mut pool = TrafficPool::new(PoolConfig::default(), TrafficFactory);

    let sedan = pool.acquire(&mut world, TrafficTemplate::Sedan);
    pool.release(&mut world, sedan).unwrap();
    let truck = pool.acquire(&mut world, TrafficTemplate::Truck);

    assert_ne!(sedan, truck);
    assert_eq!(
        world.get::<&Traffic>(truck).unwrap().template,
        TrafficTemplate::Truck
    );
    assert_eq!(pool.parked_count(TrafficTemplate::Sedan), 1);
}

#[test]
fn test_pool_rejects_double_release() {
    let mut world = World::new();
    let mut pool = TrafficPool::new(PoolConfig::default(), TrafficFactory);

    let entity = pool.acquire(&mut world, TrafficTemplate::Van);
    pool.release(&mut world, entity).unwrap();
    assert_eq!(
        pool.release(&mut world, entity),
        Err(PoolError::AlreadyReleased(entity))
    );
    assert_eq!(pool.parked_count(TrafficTemplate::Van), 1, "free list untouched");

    let again = pool.acquire(&mut world, TrafficTemplate::Van);
    let other = pool.acquire(&mut world, TrafficTemplate::Van);
    assert_eq!(again, entity);
    assert_ne!(other, entity, "one instance is never handed out twice");
}

#[test]
fn test_pool_rejects_foreign_and_unpooled_entities() {
    let mut world = World::new();
    let mut pool_a = TrafficPool::new(PoolConfig::default(), TrafficFactory);
    let mut pool_b = TrafficPool::new(PoolConfig::default(), TrafficFactory);

    let entity = pool_a.acquire(&mut world, TrafficTemplate::Sedan);
    assert!(matches!(
        pool_b.release(&mut world, entity),
        Err(PoolError::ForeignPool { .. })
    ));
    assert!(pool_a.is_outstanding(entity), "owner keeps the instance");

    let loose = world_setup::spawn_loose_traffic(
        &mut world,
        TrafficTemplate::Sedan,
        DVec3::ZERO,
        10.0,
    );
    assert_eq!(
        pool_a.release(&mut world, loose),
        Err(PoolError::NotPooled(loose))
    );

    world.despawn(entity).unwrap();
    assert_eq!(
        pool_a.release(&mut world, entity),
        Err(PoolError::Despawned(entity))
    );
    assert_eq!(pool_a.outstanding_count(), 0);
}

#[test]
fn test_pool_destroys_beyond_max_size() {
    let mut world = World::new();
    let config = PoolConfig {
        default_capacity: 1,
        max_size: 2,
    };
    let mut pool = TrafficPool::new(config, TrafficFactory);

    let entities: Vec<_> = (0..3)
        .map(|_| pool.acquire(&mut world, TrafficTemplate::Hatchback))
        .collect();
    for &entity in &entities {
        pool.release(&mut world, entity).unwrap();
    }

    assert_eq!(pool.parked_count(TrafficTemplate::Hatchback), 2);
    assert!(!world.contains(entities[2]), "excess instance destroyed");
    assert_eq!(pool.outstanding_count(), 0);
}

#[test]
fn test_pool_skips_instances_despawned_while_parked() {
    let mut world = World::new();
    let mut pool = TrafficPool::new(PoolConfig::default(), TrafficFactory);

    let entity = pool.acquire(&mut world, TrafficTemplate::Sedan);
    pool.release(&mut world, entity).unwrap();
    world.despawn(entity).unwrap();

    let fresh = pool.acquire(&mut world, TrafficTemplate::Sedan);
    assert_ne!(fresh, entity);
    assert!(world.contains(fresh));
    assert_eq!(pool.created_count(), 2);
}

// ---- Lane physics ----

#[test]
fn test_probe_measures_gap_to_rear_bumper_in_lane() {
    let mut world = World::new();
    let mut pool = TrafficPool::new(PoolConfig::default(), TrafficFactory);
    let mut impulses = Vec::new();

    let mut place = |world: &mut World, template, x, z| {
        world_setup::spawn_traffic(world, &mut pool, template, DVec3::new(x, 0.0, z), 12.0)
    };
    // Sedan length 4.5: rear bumper at 10 - 2.25.
    place(&mut world, TrafficTemplate::Sedan, 0.0, 10.0);
    place(&mut world, TrafficTemplate::Sedan, 0.0, 14.0);
    // Other lane, behind, and parked cars are ignored.
    place(&mut world, TrafficTemplate::Truck, 2.5, 4.0);
    place(&mut world, TrafficTemplate::Van, 0.0, -6.0);
    let parked = place(&mut world, TrafficTemplate::Van, 0.0, 5.0);
    pool.release(&mut world, parked).unwrap();

    let physics = LanePhysics::new(&world, 1.0, &mut impulses);
    let hit = physics.probe_forward(DVec3::ZERO, FORWARD, 15.0, CollisionCategory::OtherVehicle);
    assert_eq!(hit, Some(7.75));

    assert_eq!(
        physics.probe_forward(DVec3::ZERO, FORWARD, 5.0, CollisionCategory::OtherVehicle),
        None,
        "beyond max distance"
    );
    assert_eq!(
        physics.probe_forward(DVec3::ZERO, FORWARD, 15.0, CollisionCategory::Pickup),
        None,
        "category filter"
    );
}

#[test]
fn test_detect_overlaps_reports_traffic_once() {
    let mut engine = new_engine(quiet_config());
    let car = engine.spawn_test_traffic(1, 3.0, TrafficTemplate::Sedan, 12.0);
    engine.spawn_test_traffic(0, 3.0, TrafficTemplate::Sedan, 12.0);

    assert_eq!(engine.detect_overlaps(), 1);
    assert_eq!(engine.detect_overlaps(), 0, "struck cars are not reported again");

    let snap = engine.tick(0.0);
    assert_eq!(engine.vehicle().state(), VehicleState::Decelerating);
    assert_eq!(snap.impulses.len(), 1);
    assert_eq!(snap.impulses[0].body, body_id(car));
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::CameraShake { .. })));
}

// ---- Traffic behaviour ----

#[test]
fn test_traffic_moves_back_at_base_speed() {
    let mut engine = new_engine(quiet_config());
    let car = engine.spawn_test_traffic(0, 50.0, TrafficTemplate::Sedan, 12.0);

    let snap = engine.tick(0.5);
    assert!((traffic_z(&engine, car) - 44.0).abs() < 1e-9);
    assert_eq!(snap.traffic.len(), 1);
    assert_eq!(snap.traffic[0].speed, 12.0);
}

#[test]
fn test_traffic_ramps_with_player_boost_surplus() {
    let mut engine = new_engine(quiet_config());
    // Rear bumper 3 m ahead of the player.
    let car = engine.spawn_test_traffic(1, 5.25, TrafficTemplate::Sedan, 12.0);

    engine.tick(0.1);
    assert!(engine.vehicle().is_slipstreaming());

    engine.queue_command(PlayerCommand::MoveLeft);
    let snap = engine.tick(0.1);
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::NearMiss { combo: 1, bonus_secs } if (bonus_secs - 1.4).abs() < 1e-9
    )));
    assert!(engine.vehicle().is_boosting());

    // acceleration 15 * 0.1 toward 12 + 30
    let speed = engine.world().get::<&Traffic>(car).unwrap().current_speed;
    assert!((speed - 13.5).abs() < 1e-9);
}

#[test]
fn test_traffic_ramps_toward_nitro_speed_after_boost_ends() {
    let mut config = quiet_config();
    config.profile.nitro_combo_requirement = 1;
    config.profile.boost_base_duration = 0.15;
    config.profile.boost_bonus_duration = 0.0;
    config.profile.boost_max_speed = 30.0;
    config.profile.nitro_boost_speed = 40.0;
    config.profile.nitro_boost_duration = 10.0;
    config.profile.acceleration = 15.0;
    let mut engine = new_engine(config);
    engine.spawn_test_traffic(1, 5.25, TrafficTemplate::Sedan, 12.0);
    let far = engine.spawn_test_traffic(2, 1000.0, TrafficTemplate::Sedan, 12.0);

    engine.tick(0.1);
    engine.queue_command(PlayerCommand::MoveLeft);
    engine.tick(0.1);
    assert!(engine.vehicle().is_boosting());
    assert!(engine.vehicle().nitro_available());
    let speed = engine.world().get::<&Traffic>(far).unwrap().current_speed;
    assert!((speed - 13.5).abs() < 1e-9);

    // The boost runs out in the same tick nitro starts; a long tick lets
    // the car reach its ramp target.
    engine.queue_command(PlayerCommand::ActivateNitro);
    engine.tick(5.0);
    assert_eq!(engine.vehicle().state(), VehicleState::NitroBoosting);
    assert!(!engine.vehicle().is_boosting());
    let speed = engine.world().get::<&Traffic>(far).unwrap().current_speed;
    assert!((speed - 52.0).abs() < 1e-9, "base 12 + nitro 40, got {speed}");
}

#[test]
fn test_traffic_retired_to_pool_behind_player() {
    let mut engine = new_engine(quiet_config());
    let car = engine.spawn_test_traffic(2, -19.5, TrafficTemplate::Sedan, 10.0);

    let snap = engine.tick(0.1);
    assert!(snap.traffic.is_empty());
    assert!(engine.world().contains(car), "pooled cars are parked, not destroyed");
    assert!(!engine.pool().is_outstanding(car));
    assert_eq!(engine.pool().parked_count(TrafficTemplate::Sedan), 1);
}

#[test]
fn test_unpooled_traffic_destroyed_behind_player() {
    let mut engine = new_engine(quiet_config());
    let car = engine.spawn_loose_traffic(0, -19.5, 10.0);

    engine.tick(0.1);
    assert!(!engine.world().contains(car));
}

#[test]
fn test_traffic_frozen_once_out_of_fuel() {
    let mut engine = new_engine(short_tank(quiet_config()));
    run_until_out_of_fuel(&mut engine, 0.5);

    let car = engine.spawn_test_traffic(0, 50.0, TrafficTemplate::Sedan, 12.0);
    engine.tick(0.5);
    assert_eq!(traffic_z(&engine, car), 50.0);
}

// ---- Spawner ----

#[test]
fn test_spawner_alternates_fuel_on_interval() {
    let mut config = GameConfig::default();
    config.spawner.min_interval = 1.0;
    config.spawner.max_interval = 1.0;
    config.spawner.fuel_interval = 2.0;
    config.spawner.pattern_chance = 0.0;
    let mut engine = new_engine(config);

    let mut snap = engine.tick(0.25);
    for _ in 0..3 {
        snap = engine.tick(0.25);
    }
    assert_eq!(snap.traffic.len(), 1);
    assert!(snap.pickups.is_empty());
    // Spawned at z = 100, then moved back for the rest of the tick.
    assert!(snap.traffic[0].position.z < 100.0 && snap.traffic[0].position.z > 95.0);

    for _ in 0..4 {
        snap = engine.tick(0.25);
    }
    assert_eq!(snap.traffic.len(), 1);
    assert_eq!(snap.pickups.len(), 1);
    assert_eq!(engine.spawner().fuel_elapsed(), 0.0);
}

#[test]
fn test_spawner_plays_pattern_steps_in_order() {
    let mut config = GameConfig::default();
    config.spawner.min_interval = 1.0;
    config.spawner.max_interval = 1.0;
    config.spawner.pattern_chance = 1.0;
    config.spawner.patterns = vec![ObstaclePattern {
        name: "test".into(),
        steps: vec![
            PatternStep {
                lane: 0,
                delay: 0.0,
                template: Some(TrafficTemplate::Truck),
            },
            PatternStep {
                lane: 2,
                delay: 0.5,
                template: None,
            },
        ],
    }];
    let mut engine = new_engine(config);

    for _ in 0..4 {
        engine.tick(0.25);
    }
    assert_eq!(engine.spawner().active_pattern(), Some("test"));
    let snap = engine.tick(0.25);
    assert_eq!(snap.traffic.len(), 1);
    assert_eq!(snap.traffic[0].template, TrafficTemplate::Truck);
    assert_eq!(snap.traffic[0].position.x, -2.5);

    let snap = engine.tick(0.25);
    assert_eq!(snap.traffic.len(), 2);
    assert!(snap.traffic.iter().any(|t| t.position.x == 2.5));
    assert_eq!(engine.spawner().active_pattern(), None);
}

#[test]
fn test_spawner_halts_when_out_of_fuel_until_restart() {
    let mut config = short_tank(GameConfig::default());
    config.spawner.min_interval = 0.25;
    config.spawner.max_interval = 0.25;
    config.spawner.pattern_chance = 0.0;
    config.spawner.templates = vec![TrafficTemplate::Sedan];
    let mut engine = new_engine(config);

    run_until_out_of_fuel(&mut engine, 0.25);
    assert!(engine.spawner().is_halted());
    let spawned = engine.tick(0.25).traffic.len();
    assert_eq!(spawned, 3);

    for _ in 0..40 {
        let snap = engine.tick(0.25);
        assert_eq!(snap.traffic.len(), spawned);
    }
    assert!(engine.spawner().is_halted());

    engine.queue_command(PlayerCommand::Restart);
    let snap = engine.tick(0.25);
    assert!(!engine.spawner().is_halted());
    assert_eq!(snap.traffic.len(), 1);
    assert_eq!(engine.pool().created_count(), 3, "restart reuses parked cars");
}

// ---- Fuel pickups ----

#[test]
fn test_fuel_pickup_refuels_and_disappears() {
    let mut engine = new_engine(quiet_config());
    for _ in 0..20 {
        engine.tick(1.0);
    }
    assert_eq!(engine.vehicle().current_fuel(), 80.0);

    let pickup = engine.spawn_test_pickup(1, 40.0);
    engine.report_contact(Contact::Trigger {
        body: body_id(pickup),
    });
    let snap = engine.tick(0.0);

    assert_eq!(engine.vehicle().current_fuel(), 90.0);
    assert!(snap.events.contains(&GameEvent::FuelPickedUp { amount: 10.0 }));
    assert!(!engine.world().contains(pickup));
    assert!(snap.pickups.is_empty());
}

#[test]
fn test_pickup_overlap_becomes_trigger() {
    let mut engine = new_engine(quiet_config());
    engine.spawn_test_pickup(1, 1.0);
    engine.spawn_test_pickup(0, 1.0);

    assert_eq!(engine.detect_overlaps(), 1);
    let snap = engine.tick(0.0);
    assert_eq!(snap.pickups.len(), 1);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::FuelPickedUp { .. })));
}

#[test]
fn test_pickups_scroll_spin_and_retire() {
    let mut engine = new_engine(quiet_config());
    let pickup = engine.spawn_test_pickup(0, 50.0);

    // 10 ticks at acceleration 15: speed 1.5, 3.0, ... 15.0
    let mut snap = engine.tick(0.1);
    for _ in 0..9 {
        snap = engine.tick(0.1);
    }
    let view = &snap.pickups[0];
    assert!((view.spin_deg - 50.0).abs() < 1e-9);
    assert!((view.position.z - (50.0 - 8.25)).abs() < 1e-9);

    for _ in 0..200 {
        engine.tick(0.1);
    }
    assert!(!engine.world().contains(pickup));
}

#[test]
fn test_trigger_for_unknown_body_is_ignored() {
    let mut engine = new_engine(quiet_config());
    let car = engine.spawn_test_traffic(0, 30.0, TrafficTemplate::Sedan, 12.0);
    engine.report_contact(Contact::Trigger { body: body_id(car) });
    let snap = engine.tick(0.0);

    assert!(engine.world().contains(car));
    assert!(snap.events.is_empty());
}

// ---- Commands and run lifecycle ----

#[test]
fn test_commands_ignored_after_out_of_fuel() {
    let mut engine = new_engine(short_tank(quiet_config()));
    run_until_out_of_fuel(&mut engine, 0.5);

    let lane = engine.vehicle().lane_index();
    engine.queue_commands([PlayerCommand::MoveLeft, PlayerCommand::ActivateNitro]);
    let snap = engine.tick(0.5);
    assert_eq!(snap.player.lane, lane);
    assert_eq!(snap.player.state, VehicleState::OutOfFuel);
}

#[test]
fn test_game_over_event_reported_once() {
    let mut engine = new_engine(short_tank(quiet_config()));
    let mut game_overs = 0;
    for _ in 0..10 {
        let snap = engine.tick(0.5);
        game_overs += snap
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
    }
    assert_eq!(game_overs, 1);
}

#[test]
fn test_restart_resets_run_and_clears_road() {
    let mut engine = new_engine(short_tank(quiet_config()));
    let pooled = engine.spawn_test_traffic(0, 60.0, TrafficTemplate::Van, 12.0);
    let loose = engine.spawn_loose_traffic(1, 70.0, 12.0);
    let pickup = engine.spawn_test_pickup(2, 80.0);
    engine.queue_command(PlayerCommand::MoveRight);
    run_until_out_of_fuel(&mut engine, 0.5);

    engine.queue_command(PlayerCommand::Restart);
    let snap = engine.tick(0.0);

    assert_eq!(snap.player.state, VehicleState::Accelerating);
    assert_eq!(snap.player.fuel, 1.0);
    assert_eq!(snap.player.lane, 1);
    assert_eq!(snap.player.speed, 0.0);
    assert_eq!(snap.player.distance, 0.0);
    assert!(snap.traffic.is_empty());
    assert!(snap.pickups.is_empty());
    assert_eq!(snap.time.tick, 1);

    assert!(engine.world().contains(pooled));
    assert_eq!(engine.pool().parked_count(TrafficTemplate::Van), 1);
    assert!(!engine.world().contains(loose));
    assert!(!engine.world().contains(pickup));
}

#[test]
fn test_invalid_dt_does_not_advance() {
    let mut engine = new_engine(quiet_config());
    engine.tick(0.1);
    let before = engine.time();
    let snap = engine.tick(f64::NAN);
    assert_eq!(snap.time, before);
    engine.tick(-1.0);
    assert_eq!(engine.time(), before);
}

#[test]
fn test_snapshot_reports_player_view() {
    let mut engine = new_engine(quiet_config());
    let snap = engine.tick(1.0);
    assert_eq!(snap.time.tick, 1);
    assert_eq!(snap.player.speed, 15.0);
    assert_eq!(snap.player.fuel, 99.0);
    assert!((snap.player.distance - 15.0).abs() < 1e-9);

    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("\"player\""));
}

#[test]
fn test_nitro_collision_reported_as_impulse() {
    let mut config = quiet_config();
    config.profile.nitro_combo_requirement = 1;
    let mut engine = new_engine(config);
    engine.spawn_test_traffic(1, 5.25, TrafficTemplate::Sedan, 12.0);

    engine.tick(0.1);
    engine.queue_command(PlayerCommand::MoveLeft);
    let snap = engine.tick(0.1);
    assert!(snap.player.nitro_available);

    engine.queue_command(PlayerCommand::ActivateNitro);
    let snap = engine.tick(0.1);
    assert_eq!(snap.player.state, VehicleState::NitroBoosting);
    assert!(snap.events.contains(&GameEvent::NitroActivated));

    let victim = engine.spawn_test_traffic(0, 1.0, TrafficTemplate::Truck, 12.0);
    assert_eq!(engine.detect_overlaps(), 1);
    let snap = engine.tick(0.1);
    assert_eq!(snap.player.state, VehicleState::NitroBoosting);
    assert_eq!(snap.impulses.len(), 1);
    assert_eq!(snap.impulses[0].body, body_id(victim));
    assert!(
        (snap.impulses[0].impulse.length() - engine.config().profile.nitro_collision_force).abs()
            < 1e-9
    );
}
