//! Game loop thread: runs the simulation engine at 60Hz and publishes snapshots.
//!
//! Commands arrive via `mpsc` channel. Snapshots are stored in shared state
//! for polling. When an autopilot is attached it reads each snapshot and
//! queues its decision for the next tick.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::info;

use slipstream_core::constants::{DT, TICK_RATE};
use slipstream_core::events::GameEvent;
use slipstream_core::state::GameSnapshot;
use slipstream_sim::SimulationEngine;

use crate::autopilot::Autopilot;
use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the control layer and the thread handle.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    latest_snapshot: Arc<Mutex<Option<GameSnapshot>>>,
    autopilot: Option<Autopilot>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("slipstream-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, cmd_rx, &latest_snapshot, autopilot);
        })?;

    Ok((cmd_tx, handle))
}

/// Advance one fixed tick: detect overlaps, tick the engine, then let the
/// autopilot queue its reaction to the result.
pub fn step(engine: &mut SimulationEngine, autopilot: Option<&mut Autopilot>) -> GameSnapshot {
    engine.detect_overlaps();
    let snapshot = engine.tick(DT);
    if let Some(command) = autopilot.and_then(|pilot| pilot.decide(&snapshot)) {
        engine.queue_command(command);
    }
    snapshot
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameSnapshot>>,
    mut autopilot: Option<Autopilot>,
) {
    let mut next_tick_time = Instant::now();
    info!(autopilot = autopilot.is_some(), "game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => {
                    info!("game loop shutting down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick
        let snapshot = step(&mut engine, autopilot.as_mut());
        for event in &snapshot.events {
            if let GameEvent::GameOver { distance } = event {
                info!(distance, tick = snapshot.time.tick, "game over");
            }
        }

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}
