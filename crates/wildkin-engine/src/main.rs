//! Headless engine binary for the Wildkin creature simulation.
//!
//! Loads configuration, restores the last snapshot (or generates a fresh
//! world from the seed), replays the time the engine was offline, and then
//! runs the simulation in real time until Ctrl-C.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from the path given as the first argument, or
//!    `wildkin-config.yaml`
//! 3. Restore the snapshot, falling back to a fresh world
//! 4. Replay the offline gap through the adaptive stepper
//! 5. Run the real-time loop
//! 6. Write a final snapshot and log the result

mod error;
mod runner;

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wildkin_core::{SimulationConfig, advance, load_or_regenerate};

use crate::error::EngineError;

/// Config file read when no path is given on the command line.
const DEFAULT_CONFIG_PATH: &str = "wildkin-config.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("wildkin-engine starting");
    run().await?;
    Ok(())
}

async fn run() -> Result<(), EngineError> {
    // 2. Load configuration.
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = load_config(&config_path)?;
    info!(
        seed = config.world.seed,
        creature_count = config.world.creature_count,
        tick_interval_ms = config.engine.tick_interval_ms,
        snapshot_path = %config.engine.snapshot_path.display(),
        "configuration loaded"
    );

    // 3. Restore or regenerate.
    let loaded = load_or_regenerate(&config, &config.engine.snapshot_path)?;
    let mut state = loaded.state;

    // 4. Offline catch-up.
    if let Some(saved_at) = loaded.saved_at {
        let offline = Utc::now()
            .signed_duration_since(saved_at)
            .to_std()
            .unwrap_or_default();
        let report = advance(&mut state, offline.as_secs_f64())?;
        info!(
            offline_seconds = offline.as_secs_f64(),
            simulated = report.simulated,
            skipped = report.skipped,
            steps = report.steps,
            "offline time replayed"
        );
    }

    // 5. Real-time loop until Ctrl-C.
    let engine = config.engine.clone();
    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Ctrl-C handler unavailable, running until the time limit");
            std::future::pending::<()>().await;
        }
    };
    let result = runner::run(&mut state, &engine, shutdown).await?;

    // 6. Log results.
    info!(
        end_reason = ?result.end_reason,
        alive = state.creatures.iter().filter(|c| c.alive).count(),
        total_ticks = state.clock.tick(),
        "wildkin-engine shutdown complete"
    );
    Ok(())
}

/// Load the simulation configuration from `path`, or defaults if the file
/// does not exist.
fn load_config(path: &Path) -> Result<SimulationConfig, EngineError> {
    if path.exists() {
        Ok(SimulationConfig::from_file(path)?)
    } else {
        info!(path = %path.display(), "config file not found, using defaults");
        Ok(SimulationConfig::default())
    }
}
