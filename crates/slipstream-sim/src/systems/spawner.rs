//! Traffic spawner: random-interval obstacle and fuel spawns, with optional
//! pattern playback.
//!
//! The wait between spawns is a tick-counted [`Countdown`]. When it runs out
//! the waited interval is added to the fuel accumulator; once that reaches
//! the fuel interval the spawn becomes a pickup and the accumulator resets.
//! Either kind may expand into a pattern whose steps play out in order, each
//! after its own delay. The main wait is suspended while a pattern plays.
//!
//! Spawning halts for good once the player runs out of fuel; only a restart
//! (`reset`) starts it again.

use glam::DVec3;
use hecs::World;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use slipstream_core::config::{LaneLayout, PatternStep, SpawnerConfig};
use slipstream_core::enums::{SpawnKind, TrafficTemplate, VehicleState};
use slipstream_vehicle::countdown::{advance_slot, Countdown};

use crate::world_setup::{self, TrafficPool};

/// A pattern being played out.
#[derive(Debug, Clone)]
struct Playback {
    name: String,
    kind: SpawnKind,
    steps: Vec<PatternStep>,
    next: usize,
    wait: Countdown,
}

/// Spawner scheduling state.
#[derive(Debug, Clone, Default)]
pub struct TrafficSpawner {
    wait: Option<Countdown>,
    /// Length of the wait currently running (seconds).
    interval: f64,
    /// Interval time accumulated since the last fuel spawn (seconds).
    fuel_elapsed: f64,
    playback: Option<Playback>,
    halted: bool,
}

impl TrafficSpawner {
    /// Forget all scheduling state, including a halt.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Name of the pattern being played, if any.
    pub fn active_pattern(&self) -> Option<&str> {
        self.playback.as_ref().map(|p| p.name.as_str())
    }

    pub fn fuel_elapsed(&self) -> f64 {
        self.fuel_elapsed
    }
}

/// Everything a spawn needs besides the spawner's own state.
pub struct SpawnContext<'a> {
    pub world: &'a mut World,
    pub pool: &'a mut TrafficPool,
    pub rng: &'a mut ChaCha8Rng,
    pub config: &'a SpawnerConfig,
    pub lanes: &'a LaneLayout,
}

/// Advance the spawner by `dt`.
pub fn run(spawner: &mut TrafficSpawner, ctx: &mut SpawnContext, player: VehicleState, dt: f64) {
    if spawner.halted {
        return;
    }
    if player.is_terminal() {
        spawner.halted = true;
        spawner.wait = None;
        spawner.playback = None;
        info!("player out of fuel, spawner halted");
        return;
    }

    if spawner.playback.is_some() {
        advance_playback(spawner, ctx, dt);
        return;
    }

    if spawner.wait.is_none() {
        start_wait(spawner, ctx);
    }
    if !advance_slot(&mut spawner.wait, dt) {
        return;
    }

    spawner.fuel_elapsed += spawner.interval;
    let kind = if spawner.fuel_elapsed >= ctx.config.fuel_interval {
        spawner.fuel_elapsed = 0.0;
        SpawnKind::Fuel
    } else {
        SpawnKind::Obstacle
    };

    let pattern = if ctx.config.patterns.is_empty() {
        None
    } else if ctx.rng.gen_bool(ctx.config.pattern_chance) {
        ctx.config.patterns.choose(&mut *ctx.rng)
    } else {
        None
    };

    match pattern {
        Some(pattern) if !pattern.steps.is_empty() => {
            debug!(pattern = %pattern.name, ?kind, "pattern started");
            spawner.playback = Some(Playback {
                name: pattern.name.clone(),
                kind,
                steps: pattern.steps.clone(),
                next: 0,
                wait: Countdown::new(pattern.steps[0].delay),
            });
            advance_playback(spawner, ctx, 0.0);
        }
        _ => {
            let lane = ctx.rng.gen_range(0..ctx.lanes.count());
            spawn(ctx, kind, lane, None);
            start_wait(spawner, ctx);
        }
    }
}

fn start_wait(spawner: &mut TrafficSpawner, ctx: &mut SpawnContext) {
    let interval = ctx
        .rng
        .gen_range(ctx.config.min_interval..=ctx.config.max_interval);
    spawner.interval = interval;
    spawner.wait = Some(Countdown::new(interval));
}

/// Play pattern steps whose delay has elapsed. Zero-delay steps spawn in the same tick.
fn advance_playback(spawner: &mut TrafficSpawner, ctx: &mut SpawnContext, dt: f64) {
    let mut dt = dt;
    while let Some(playback) = spawner.playback.as_mut() {
        if !playback.wait.advance(dt) {
            return;
        }
        dt = 0.0;

        let step = &playback.steps[playback.next];
        spawn(ctx, playback.kind, step.lane, step.template);
        playback.next += 1;

        match playback.steps.get(playback.next) {
            Some(next) => playback.wait = Countdown::new(next.delay),
            None => {
                debug!(pattern = %playback.name, "pattern finished");
                spawner.playback = None;
                start_wait(spawner, ctx);
            }
        }
    }
}

fn spawn(ctx: &mut SpawnContext, kind: SpawnKind, lane: usize, template: Option<TrafficTemplate>) {
    let Some(x) = ctx.lanes.offset(lane) else {
        warn!(lane, lanes = ctx.lanes.count(), "spawn lane out of range, skipped");
        return;
    };
    let position = DVec3::new(x, 0.0, ctx.config.spawn_z);

    match kind {
        SpawnKind::Obstacle => {
            let template = match template {
                Some(template) => template,
                None => match ctx.config.templates.choose(&mut *ctx.rng) {
                    Some(template) => *template,
                    None => return,
                },
            };
            let speed = ctx
                .rng
                .gen_range(ctx.config.min_traffic_speed..=ctx.config.max_traffic_speed);
            let entity = world_setup::spawn_traffic(ctx.world, ctx.pool, template, position, speed);
            debug!(?entity, ?template, lane, speed, "traffic spawned");
        }
        SpawnKind::Fuel => {
            let entity = world_setup::spawn_fuel_pickup(ctx.world, position, ctx.config.fuel_amount);
            debug!(?entity, lane, "fuel pickup spawned");
        }
    }
}
