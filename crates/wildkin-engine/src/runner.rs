//! Real-time loop with autosave and clean shutdown.
//!
//! [`run`] drives the simulation from a `tokio` interval. Each wake-up
//! measures the real time since the previous one and hands it to the
//! adaptive stepper, so a late wake-up (the host was suspended, the process
//! was stopped) is replayed in bounded sub-steps instead of being lost.
//!
//! The loop ends when the shutdown future resolves, when the configured
//! real-time limit is reached, or when every creature has died. A final
//! snapshot is written in every case.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};
use wildkin_core::config::EngineConfig;
use wildkin_core::{SimulationState, TickError, advance, try_save};

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The shutdown signal fired.
    Shutdown,
    /// `max_real_time_seconds` elapsed.
    TimeLimit,
    /// No creature is alive.
    Extinction,
}

/// Outcome of [`run`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// Why the loop stopped.
    pub end_reason: EndReason,
    /// Wake-ups handled.
    pub wakeups: u64,
    /// Snapshots written, including the final one.
    pub saves: u64,
}

/// Run the loop until `shutdown` resolves or another end condition is met.
///
/// # Errors
///
/// Returns [`TickError`] if a tick fails. The final snapshot is still
/// attempted before returning.
pub async fn run(
    state: &mut SimulationState,
    config: &EngineConfig,
    shutdown: impl Future<Output = ()>,
) -> Result<RunResult, TickError> {
    let period = Duration::from_millis(config.tick_interval_ms.max(1));
    let autosave = (config.autosave_interval_seconds > 0)
        .then(|| Duration::from_secs(config.autosave_interval_seconds));
    let limit = (config.max_real_time_seconds > 0)
        .then(|| Duration::from_secs(config.max_real_time_seconds));

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let started = Instant::now();
    let mut last_wake = started;
    let mut last_save = started;
    let mut result = RunResult {
        end_reason: EndReason::Shutdown,
        wakeups: 0,
        saves: 0,
    };

    info!(
        tick_interval_ms = config.tick_interval_ms,
        autosave_interval_seconds = config.autosave_interval_seconds,
        max_real_time_seconds = config.max_real_time_seconds,
        "simulation loop starting"
    );

    tokio::pin!(shutdown);
    // The first interval tick completes immediately; skip it so the first
    // step covers a real interval.
    interval.tick().await;

    let outcome = loop {
        tokio::select! {
            () = &mut shutdown => {
                info!("shutdown requested");
                break Ok(EndReason::Shutdown);
            }
            now = interval.tick() => {
                let elapsed = now.saturating_duration_since(last_wake);
                last_wake = now;
                let report = match advance(state, elapsed.as_secs_f64()) {
                    Ok(report) => report,
                    Err(err) => break Err(err),
                };
                result.wakeups = result.wakeups.saturating_add(1);
                if !report.events.is_empty() {
                    debug!(tick = state.clock.tick(), events = report.events.len(), "tick events");
                }

                if state.creatures.iter().all(|c| !c.alive) {
                    info!(tick = state.clock.tick(), "every creature has died");
                    break Ok(EndReason::Extinction);
                }
                if limit.is_some_and(|limit| now.saturating_duration_since(started) >= limit) {
                    info!(max_seconds = config.max_real_time_seconds, "real-time limit reached");
                    break Ok(EndReason::TimeLimit);
                }
                if autosave.is_some_and(|every| now.saturating_duration_since(last_save) >= every) {
                    last_save = now;
                    if try_save(state, &config.snapshot_path) {
                        result.saves = result.saves.saturating_add(1);
                    }
                }
            }
        }
    };

    if try_save(state, &config.snapshot_path) {
        result.saves = result.saves.saturating_add(1);
    }
    result.end_reason = outcome?;
    info!(
        reason = ?result.end_reason,
        wakeups = result.wakeups,
        saves = result.saves,
        tick = state.clock.tick(),
        time = state.clock.elapsed(),
        "simulation loop ended"
    );
    Ok(result)
}
