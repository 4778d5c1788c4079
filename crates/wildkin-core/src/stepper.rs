//! Adaptive stepper: replays elapsed time as a sequence of bounded ticks.
//!
//! A large gap (the host was suspended, or the engine was offline between
//! runs) is never applied as one huge step. The backlog is walked down in
//! sub-steps whose size shrinks as the backlog does: coarse steps for a large
//! backlog, medium steps for a moderate one, and real-time steps near the
//! present. Only the final sub-step of a burst returns events; earlier ones
//! still feed the activity log.

use tracing::info;
use wildkin_types::SimEvent;

use crate::config::StepperConfig;
use crate::tick::{SimulationState, TickError};

/// Backlog below which nothing is stepped.
const MIN_BACKLOG: f64 = 1e-6;

/// Outcome of one [`advance`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatchUpReport {
    /// Ticks run.
    pub steps: u64,
    /// Simulated seconds actually replayed.
    pub simulated: f64,
    /// Seconds dropped because the gap exceeded the catch-up cap.
    pub skipped: f64,
    /// Events from the final sub-step only.
    pub events: Vec<SimEvent>,
}

/// Sub-step size for a backlog of `backlog` seconds.
pub fn step_size(backlog: f64, config: &StepperConfig) -> f32 {
    if backlog > config.coarse_backlog {
        config.coarse_step
    } else if backlog > config.medium_backlog {
        config.medium_step
    } else {
        config.real_time_step
    }
}

/// Replay `elapsed` seconds of simulated time, capped at
/// `max_catch_up_seconds`.
///
/// # Errors
///
/// Returns [`TickError`] if a sub-step fails (for example a misconfigured
/// zero step size). Sub-steps already run are kept.
pub fn advance(state: &mut SimulationState, elapsed: f64) -> Result<CatchUpReport, TickError> {
    let config = state.config.stepper.clone();
    let wanted = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
    let target = wanted.min(config.max_catch_up_seconds.max(0.0));
    let mut report = CatchUpReport {
        skipped: wanted - target,
        ..CatchUpReport::default()
    };

    let mut remaining = target;
    while remaining > MIN_BACKLOG {
        let step = step_size(remaining, &config).min(remaining as f32);
        let last = remaining - f64::from(step) <= MIN_BACKLOG;
        let summary = state.run_tick(step, last)?;
        remaining -= f64::from(step);
        report.steps = report.steps.saturating_add(1);
        report.simulated += f64::from(step);
        if last {
            report.events = summary.events;
        }
    }

    if report.steps > 1 {
        info!(
            steps = report.steps,
            simulated = report.simulated,
            skipped = report.skipped,
            "catch-up burst complete"
        );
    }
    Ok(report)
}
