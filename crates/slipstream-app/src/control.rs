//! Control surface: start, drive, poll and stop the game loop.
//!
//! These functions bridge a front end (the headless runner in `main`, or any
//! embedding host) to the game loop thread via channels.

use anyhow::{anyhow, bail, Context};
use tracing::info;

use slipstream_core::commands::PlayerCommand;
use slipstream_core::config::GameConfig;
use slipstream_core::state::GameSnapshot;
use slipstream_sim::SimulationEngine;

use crate::autopilot::Autopilot;
use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

const POISONED: &str = "app state lock poisoned";

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_simulation(state: &AppState, config: GameConfig, autopilot: bool) -> anyhow::Result<()> {
    let mut running = state.running.lock().map_err(|_| anyhow!(POISONED))?;

    if *running {
        bail!("simulation already running");
    }

    let engine = SimulationEngine::new(config).context("invalid game configuration")?;
    let pilot = autopilot.then(|| Autopilot::new(engine.config().lanes.clone()));
    let (cmd_tx, handle) =
        game_loop::spawn_game_loop(engine, state.latest_snapshot.clone(), pilot)
            .context("failed to spawn game loop thread")?;

    *state.command_tx.lock().map_err(|_| anyhow!(POISONED))? = Some(cmd_tx);
    *state.loop_handle.lock().map_err(|_| anyhow!(POISONED))? = Some(handle);
    *running = true;

    info!(autopilot, "simulation started");
    Ok(())
}

/// Send a player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> anyhow::Result<()> {
    let tx_lock = state.command_tx.lock().map_err(|_| anyhow!(POISONED))?;

    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::PlayerCommand(command))
            .map_err(|e| anyhow!("failed to send command: {e}")),
        None => bail!("simulation not started"),
    }
}

/// Get the latest snapshot (for polling / initial state).
pub fn get_snapshot(state: &AppState) -> anyhow::Result<Option<GameSnapshot>> {
    let lock = state.latest_snapshot.lock().map_err(|_| anyhow!(POISONED))?;
    Ok(lock.clone())
}

/// Stop the simulation and wait for the game loop thread to exit.
pub fn stop_simulation(state: &AppState) -> anyhow::Result<()> {
    let mut running = state.running.lock().map_err(|_| anyhow!(POISONED))?;
    if !*running {
        bail!("simulation not started");
    }

    if let Some(tx) = state.command_tx.lock().map_err(|_| anyhow!(POISONED))?.take() {
        // The loop may already be gone; joining below settles it either way.
        let _ = tx.send(GameLoopCommand::Shutdown);
    }
    if let Some(handle) = state.loop_handle.lock().map_err(|_| anyhow!(POISONED))?.take() {
        handle
            .join()
            .map_err(|_| anyhow!("game loop thread panicked"))?;
    }
    *running = false;

    info!("simulation stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::{Duration, Instant};

    fn wait_for_snapshot(state: &AppState) -> GameSnapshot {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            if let Some(snapshot) = get_snapshot(state).unwrap() {
                return snapshot;
            }
            assert!(Instant::now() < deadline, "no snapshot published");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_start_poll_stop() {
        let state = AppState::new();
        start_simulation(&state, GameConfig::default(), false).unwrap();
        assert!(*state.running.lock().unwrap());

        let snapshot = wait_for_snapshot(&state);
        assert_eq!(snapshot.player.lane, 1);

        send_command(&state, PlayerCommand::MoveLeft).unwrap();
        stop_simulation(&state).unwrap();
        assert!(!*state.running.lock().unwrap());
        assert!(state.command_tx.lock().unwrap().is_none());
    }

    #[test]
    fn test_double_start_rejected() {
        let state = AppState::new();
        start_simulation(&state, GameConfig::default(), true).unwrap();
        assert!(start_simulation(&state, GameConfig::default(), true).is_err());
        stop_simulation(&state).unwrap();
    }

    #[test]
    fn test_invalid_config_rejected() {
        let state = AppState::new();
        let mut config = GameConfig::default();
        config.lanes.offsets.clear();
        assert!(start_simulation(&state, config, false).is_err());
        assert!(!*state.running.lock().unwrap());
    }

    #[test]
    fn test_commands_need_a_running_loop() {
        let state = AppState::new();
        assert!(send_command(&state, PlayerCommand::MoveRight).is_err());
        assert!(stop_simulation(&state).is_err());
        assert!(get_snapshot(&state).unwrap().is_none());
    }
}
