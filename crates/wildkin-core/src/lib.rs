//! World clock, tick cycle, catch-up stepper, and persistence for the
//! Wildkin simulation.
//!
//! This crate owns the simulation arena ([`SimulationState`]) and the loop
//! that drives it: regrowth, per-creature updates in index order, and
//! dropped-item lifecycles, replayed in adaptive sub-steps after a gap.
//!
//! # Modules
//!
//! - [`clock`] -- Tick counter and simulated seconds.
//! - [`config`] -- Configuration loading from `wildkin-config.yaml` into
//!   strongly-typed structs.
//! - [`log`] -- Rolling 50-entry activity log rendered from events.
//! - [`snapshot`] -- Save/load contract with regenerate-on-failure.
//! - [`stepper`] -- Adaptive sub-stepping and event suppression.
//! - [`tick`] -- [`SimulationState`] and the per-tick phases.

pub mod clock;
pub mod config;
pub mod log;
pub mod snapshot;
pub mod stepper;
pub mod tick;

pub use clock::{ClockError, WorldClock};
pub use config::{ConfigError, SimulationConfig};
pub use log::ActivityLog;
pub use snapshot::{Loaded, Snapshot, SnapshotError, load_or_regenerate, try_save};
pub use stepper::{CatchUpReport, advance};
pub use tick::{SimulationState, TickError, TickSummary};
