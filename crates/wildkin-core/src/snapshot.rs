//! Persistence snapshot: the save/load contract for a running simulation.
//!
//! A snapshot carries the durable state only: every creature record, the
//! world clock, the claim state of every world object (aligned 1:1 with the
//! world-object list generated from the seed), and the species memory.
//! Volatile runtime fields are not written and are reset on load.
//!
//! Writes are best-effort ([`try_save`] logs and returns `false`). Reads
//! never fail the caller: a missing, unreadable, malformed, or inconsistent
//! snapshot falls back to a fresh world generated from the seed.

use std::path::Path;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use wildkin_agents::{Creature, SpeciesMemory};
use wildkin_world::{ResourceState, create_starting_world};

use crate::clock::WorldClock;
use crate::config::SimulationConfig;
use crate::tick::{SimulationState, TickError};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors that can occur while saving or restoring a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Reading or writing the snapshot file failed.
    #[error("snapshot I/O failed: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The snapshot is not valid JSON for this format.
    #[error("snapshot JSON is malformed: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The snapshot was written by an incompatible version.
    #[error("unsupported snapshot version {found} (expected {SNAPSHOT_VERSION})")]
    Version {
        /// The version found in the file.
        found: u32,
    },

    /// The snapshot does not line up with the world generated from the seed,
    /// or its creature records are out of order.
    #[error("snapshot is inconsistent: {reason}")]
    Inconsistent {
        /// What did not line up.
        reason: String,
        /// Creature records thrown away with the snapshot.
        discarded: usize,
    },

    /// Regenerating the base world failed.
    #[error("world generation failed: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: wildkin_world::WorldError,
    },
}

/// The durable state of a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Format version.
    pub version: u32,
    /// Wall-clock time of the save, for offline catch-up.
    pub saved_at: DateTime<Utc>,
    /// Simulated seconds at the time of the save.
    pub world_time: f64,
    /// Seed the world-object list was generated from.
    pub seed: u64,
    /// Every creature record, in arena order.
    pub creatures: Vec<Creature>,
    /// Claim state of every world object, aligned with the generated list.
    pub resources: Vec<ResourceState>,
    /// Cross-creature death statistics.
    pub species_memory: SpeciesMemory,
}

impl Snapshot {
    /// Capture the durable state of `state` at `saved_at`.
    pub fn capture(state: &SimulationState, saved_at: DateTime<Utc>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at,
            world_time: state.clock.elapsed(),
            seed: state.config.world.seed,
            creatures: state.creatures.clone(),
            resources: state.world.resource_states(),
            species_memory: state.species_memory.clone(),
        }
    }

    /// Write the snapshot as JSON. The file is written next to `path` and
    /// renamed into place, so a crash mid-write leaves the old save intact.
    pub fn save_to_path(&self, path: &Path) -> Result<(), SnapshotError> {
        let json = serde_json::to_vec_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Read a snapshot from `path`.
    pub fn load_from_path(path: &Path) -> Result<Self, SnapshotError> {
        let bytes = std::fs::read(path)?;
        let snapshot: Self = serde_json::from_slice(&bytes)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version {
                found: snapshot.version,
            });
        }
        Ok(snapshot)
    }

    /// Rebuild a simulation from this snapshot.
    ///
    /// The static world-object list is regenerated from the snapshot's seed
    /// and the saved claim state is laid over it.
    pub fn restore(self, mut config: SimulationConfig) -> Result<SimulationState, SnapshotError> {
        if let Some((index, creature)) = self
            .creatures
            .iter()
            .enumerate()
            .find(|(i, c)| c.id.index() != *i)
        {
            return Err(SnapshotError::Inconsistent {
                reason: format!("creature {} stored at position {index}", creature.id),
                discarded: self.creatures.len(),
            });
        }
        config.world.seed = self.seed;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut world = create_starting_world(&config.world.layout(), &mut rng)?;
        if let Err(err) = world.restore_resource_states(&self.resources) {
            return Err(SnapshotError::Inconsistent {
                reason: err.to_string(),
                discarded: self.creatures.len(),
            });
        }
        Ok(SimulationState::from_parts(
            config,
            world,
            self.creatures,
            self.species_memory,
            WorldClock::resumed(self.world_time),
        ))
    }
}

/// Save `state` to `path`, logging instead of failing.
pub fn try_save(state: &SimulationState, path: &Path) -> bool {
    match Snapshot::capture(state, Utc::now()).save_to_path(path) {
        Ok(()) => {
            debug!(path = %path.display(), time = state.clock.elapsed(), "snapshot saved");
            true
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "snapshot save skipped");
            false
        }
    }
}

/// Result of [`load_or_regenerate`].
pub struct Loaded {
    /// The simulation, restored or fresh.
    pub state: SimulationState,
    /// When the restored snapshot was saved. `None` for a fresh world.
    pub saved_at: Option<DateTime<Utc>>,
}

/// Restore the snapshot at `path`, or generate a fresh world from the seed
/// if there is none or it cannot be used.
///
/// # Errors
///
/// Returns [`TickError::World`] only if the fresh world itself cannot be
/// generated from `config`.
pub fn load_or_regenerate(config: &SimulationConfig, path: &Path) -> Result<Loaded, TickError> {
    let restored = Snapshot::load_from_path(path).and_then(|snapshot| {
        let saved_at = snapshot.saved_at;
        snapshot.restore(config.clone()).map(|state| (state, saved_at))
    });
    match restored {
        Ok((state, saved_at)) => {
            info!(
                path = %path.display(),
                creatures = state.creatures.len(),
                time = state.clock.elapsed(),
                "snapshot restored"
            );
            Ok(Loaded {
                state,
                saved_at: Some(saved_at),
            })
        }
        Err(SnapshotError::Io { source }) if source.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no snapshot found, generating a fresh world");
            fresh(config)
        }
        Err(SnapshotError::Inconsistent { reason, discarded }) => {
            warn!(
                path = %path.display(),
                reason = %reason,
                discarded,
                "snapshot does not match the seeded world, discarding its creatures and regenerating"
            );
            fresh(config)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "snapshot unusable, regenerating");
            fresh(config)
        }
    }
}

fn fresh(config: &SimulationConfig) -> Result<Loaded, TickError> {
    Ok(Loaded {
        state: SimulationState::new(config.clone())?,
        saved_at: None,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("wildkin-{name}-{}.json", std::process::id()))
    }

    fn small_config() -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.world.creature_count = 3;
        config
    }

    #[test]
    fn missing_file_regenerates() {
        let path = temp_path("missing");
        let loaded = load_or_regenerate(&small_config(), &path).unwrap();
        assert!(loaded.saved_at.is_none());
        assert_eq!(loaded.state.creatures.len(), 3);
    }

    #[test]
    fn malformed_file_regenerates() {
        let path = temp_path("malformed");
        std::fs::write(&path, b"{ not json").unwrap();
        let loaded = load_or_regenerate(&small_config(), &path).unwrap();
        assert!(loaded.saved_at.is_none());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn resource_length_mismatch_regenerates() {
        let path = temp_path("mismatch");
        let state = SimulationState::new(small_config()).unwrap();
        let mut snapshot = Snapshot::capture(&state, Utc::now());
        snapshot.resources.pop();
        snapshot.save_to_path(&path).unwrap();
        let loaded = load_or_regenerate(&small_config(), &path).unwrap();
        assert!(loaded.saved_at.is_none());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn resource_mismatch_counts_discarded_creatures() {
        let state = SimulationState::new(small_config()).unwrap();
        let mut snapshot = Snapshot::capture(&state, Utc::now());
        snapshot.resources.pop();
        assert!(matches!(
            snapshot.restore(small_config()),
            Err(SnapshotError::Inconsistent { discarded: 3, .. })
        ));
    }

    #[test]
    fn out_of_order_creatures_are_rejected() {
        let state = SimulationState::new(small_config()).unwrap();
        let mut snapshot = Snapshot::capture(&state, Utc::now());
        snapshot.creatures.swap(0, 1);
        assert!(matches!(
            snapshot.restore(small_config()),
            Err(SnapshotError::Inconsistent { discarded: 3, .. })
        ));
    }

    #[test]
    fn wrong_version_is_rejected() {
        let path = temp_path("version");
        let state = SimulationState::new(small_config()).unwrap();
        let mut snapshot = Snapshot::capture(&state, Utc::now());
        snapshot.version = 99;
        snapshot.save_to_path(&path).unwrap();
        assert!(matches!(
            Snapshot::load_from_path(&path),
            Err(SnapshotError::Version { found: 99 })
        ));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn save_then_load_restores_clock_and_creatures() {
        let path = temp_path("roundtrip");
        let mut state = SimulationState::new(small_config()).unwrap();
        for _ in 0..30 {
            state.run_tick(0.1, true).unwrap();
        }
        assert!(try_save(&state, &path));
        let loaded = load_or_regenerate(&small_config(), &path).unwrap();
        assert!(loaded.saved_at.is_some());
        assert!((loaded.state.clock.elapsed() - state.clock.elapsed()).abs() < 1e-9);
        assert_eq!(loaded.state.creatures.len(), state.creatures.len());
        assert_eq!(loaded.state.creatures[0].name, state.creatures[0].name);
        std::fs::remove_file(&path).unwrap();
    }
}
