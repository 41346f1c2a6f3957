//! Headless runner: drives one autopiloted run and logs its progress.
//!
//! Usage: `slipstream-app [config.json]`. Log level via `RUST_LOG`.

use std::time::Duration;

use anyhow::Context;
use tracing::info;

use slipstream_app::control;
use slipstream_app::state::AppState;
use slipstream_core::config::GameConfig;

const POLL_INTERVAL: Duration = Duration::from_millis(500);

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(&path)
            .with_context(|| format!("failed to load config from {path}"))?,
        None => GameConfig::default(),
    };

    let state = AppState::new();
    control::start_simulation(&state, config, true)?;

    let result = loop {
        std::thread::sleep(POLL_INTERVAL);
        let Some(snapshot) = control::get_snapshot(&state)? else {
            continue;
        };
        let player = &snapshot.player;
        info!(
            t = %format!("{:.1}", snapshot.time.elapsed_secs),
            state = ?player.state,
            lane = player.lane,
            speed = %format!("{:.1}", player.speed),
            fuel = %format!("{:.1}", player.fuel),
            combo = player.combo,
            traffic = snapshot.traffic.len(),
            "status"
        );
        if player.state.is_terminal() && player.speed == 0.0 {
            break snapshot;
        }
    };

    control::stop_simulation(&state)?;
    info!(
        distance = %format!("{:.0}", result.player.distance),
        secs = %format!("{:.1}", result.time.elapsed_secs),
        "run finished"
    );
    Ok(())
}
