//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the player vehicle, the
//! traffic pool and the spawner. It processes queued commands and contacts at
//! the tick boundary, runs all systems, and produces `GameSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use slipstream_core::commands::PlayerCommand;
use slipstream_core::components::{FuelPickup, Struck, Traffic};
use slipstream_core::config::GameConfig;
use slipstream_core::error::ConfigError;
use slipstream_core::events::GameEvent;
use slipstream_core::physics::{Contact, Impulse};
use slipstream_core::state::GameSnapshot;
use slipstream_core::types::{BodyId, SimTime};
use slipstream_vehicle::PlayerVehicle;

use crate::lane_physics::{self, LanePhysics};
use crate::pool::Active;
use crate::systems;
use crate::systems::spawner::{SpawnContext, TrafficSpawner};
use crate::world_setup::{self, TrafficFactory, TrafficPool};

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    config: GameConfig,
    vehicle: PlayerVehicle,
    pool: TrafficPool,
    spawner: TrafficSpawner,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    contact_queue: VecDeque<Contact>,
    despawn_buffer: Vec<Entity>,
    impulses: Vec<Impulse>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Validate `config` and build the engine for a fresh run.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let vehicle = PlayerVehicle::new(
            Arc::new(config.profile.clone()),
            config.lanes.clone(),
            config.handling.clone(),
        )?;

        info!(
            seed = config.seed,
            lanes = config.lanes.count(),
            "simulation ready"
        );
        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            vehicle,
            pool: TrafficPool::new(config.pool, TrafficFactory),
            spawner: TrafficSpawner::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            contact_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            impulses: Vec::new(),
            events: Vec::new(),
            config,
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Report a contact from the physics collaborator. Processed at the next
    /// tick boundary, after queued commands.
    pub fn report_contact(&mut self, contact: Contact) {
        self.contact_queue.push_back(contact);
    }

    /// Queue contacts for every body currently touching the player, as found
    /// by the built-in lane physics. Returns the number queued.
    pub fn detect_overlaps(&mut self) -> usize {
        let contacts = lane_physics::detect_overlaps(
            &mut self.world,
            self.vehicle.position(),
            self.config.lanes.half_width,
        );
        let count = contacts.len();
        self.contact_queue.extend(contacts);
        count
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    pub fn tick(&mut self, dt: f64) -> GameSnapshot {
        if dt.is_finite() && dt >= 0.0 {
            self.process_commands();
            self.process_contacts();
            self.run_systems(dt);
            self.time.advance(dt);
        } else {
            warn!(dt, "ignoring tick with invalid delta time");
        }

        let impulses = std::mem::take(&mut self.impulses);
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, &self.vehicle, impulses, events)
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only access to the player vehicle.
    pub fn vehicle(&self) -> &PlayerVehicle {
        &self.vehicle
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn pool(&self) -> &TrafficPool {
        &self.pool
    }

    pub fn spawner(&self) -> &TrafficSpawner {
        &self.spawner
    }

    /// Place a pooled traffic car directly (for tests).
    #[cfg(test)]
    pub fn spawn_test_traffic(
        &mut self,
        lane: usize,
        z: f64,
        template: slipstream_core::enums::TrafficTemplate,
        speed: f64,
    ) -> Entity {
        let x = self.config.lanes.offsets[lane];
        world_setup::spawn_traffic(
            &mut self.world,
            &mut self.pool,
            template,
            glam::DVec3::new(x, 0.0, z),
            speed,
        )
    }

    /// Place a traffic car that bypasses the pool (for tests).
    #[cfg(test)]
    pub fn spawn_loose_traffic(&mut self, lane: usize, z: f64, speed: f64) -> Entity {
        let x = self.config.lanes.offsets[lane];
        world_setup::spawn_loose_traffic(
            &mut self.world,
            slipstream_core::enums::TrafficTemplate::Sedan,
            glam::DVec3::new(x, 0.0, z),
            speed,
        )
    }

    /// Place a fuel pickup directly (for tests).
    #[cfg(test)]
    pub fn spawn_test_pickup(&mut self, lane: usize, z: f64) -> Entity {
        let x = self.config.lanes.offsets[lane];
        world_setup::spawn_fuel_pickup(
            &mut self.world,
            glam::DVec3::new(x, 0.0, z),
            self.config.spawner.fuel_amount,
        )
    }

    /// Mutable access to the world and pool together (for tests).
    #[cfg(test)]
    pub fn world_and_pool_mut(&mut self) -> (&mut World, &mut TrafficPool) {
        (&mut self.world, &mut self.pool)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        if command != PlayerCommand::Restart && self.vehicle.state().is_terminal() {
            warn!(?command, "run is over, command ignored");
            return;
        }
        match command {
            PlayerCommand::MoveLeft => {
                if !self.vehicle.move_left(&mut self.events) {
                    debug!("already in the leftmost lane");
                }
            }
            PlayerCommand::MoveRight => {
                if !self.vehicle.move_right(&mut self.events) {
                    debug!("already in the rightmost lane");
                }
            }
            PlayerCommand::ActivateNitro => {
                self.vehicle.activate_nitro(&mut self.events);
            }
            PlayerCommand::Restart => self.restart(),
        }
    }

    /// Process all queued contacts.
    fn process_contacts(&mut self) {
        let half_width = self.config.lanes.half_width;
        while let Some(contact) = self.contact_queue.pop_front() {
            match contact {
                Contact::Obstacle { body, point } => {
                    if let Some(entity) = self.live_entity(body) {
                        let _ = self.world.insert_one(entity, Struck);
                    }
                    let mut physics = LanePhysics::new(&self.world, half_width, &mut self.impulses);
                    self.vehicle
                        .on_collision(body, point, &mut physics, &mut self.events);
                }
                Contact::Trigger { body } => {
                    let collected = self.live_entity(body).is_some_and(|entity| {
                        systems::pickups::collect(
                            &mut self.world,
                            entity,
                            &mut self.vehicle,
                            &mut self.events,
                        )
                    });
                    if !collected {
                        debug!(body = body.0, "trigger contact with a non-pickup body ignored");
                    }
                }
            }
        }
    }

    fn live_entity(&self, body: BodyId) -> Option<Entity> {
        world_setup::entity_of(body).filter(|&entity| self.world.contains(entity))
    }

    /// Reset the run: fresh vehicle, empty road, spawner cleared.
    fn restart(&mut self) {
        let released = self.pool.release_all(&mut self.world);

        self.despawn_buffer.clear();
        self.despawn_buffer.extend(
            self.world
                .query::<&FuelPickup>()
                .iter()
                .map(|(entity, _)| entity),
        );
        // Pooled cars are parked by now; anything still active was never pooled.
        self.despawn_buffer.extend(
            self.world
                .query::<(&Traffic, &Active)>()
                .iter()
                .map(|(entity, _)| entity),
        );
        for entity in self.despawn_buffer.drain(..) {
            let _ = self.world.despawn(entity);
        }

        self.spawner.reset();
        self.vehicle.reset();
        self.contact_queue.clear();
        self.impulses.clear();
        self.time = SimTime::default();
        info!(released, "run restarted");
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Player vehicle (fuel, probe, timers, speed, position)
        {
            let physics = LanePhysics::new(
                &self.world,
                self.config.lanes.half_width,
                &mut self.impulses,
            );
            self.vehicle.tick(dt, &physics, &mut self.events);
        }
        // 2. Spawner
        let mut ctx = SpawnContext {
            world: &mut self.world,
            pool: &mut self.pool,
            rng: &mut self.rng,
            config: &self.config.spawner,
            lanes: &self.config.lanes,
        };
        systems::spawner::run(&mut self.spawner, &mut ctx, self.vehicle.state(), dt);
        // 3. Traffic motion and retirement
        systems::traffic::run(
            &mut self.world,
            &mut self.pool,
            &self.vehicle,
            dt,
            &mut self.despawn_buffer,
        );
        // 4. Pickup scroll, spin and retirement
        systems::pickups::run(
            &mut self.world,
            &self.vehicle,
            self.config.spawner.pickup_spin_deg_per_sec,
            dt,
            &mut self.despawn_buffer,
        );
    }
}
