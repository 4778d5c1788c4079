//! Configuration loading and typed config structures for the Wildkin
//! simulation.
//!
//! The configuration is a single YAML document (by default
//! `wildkin-config.yaml` next to the engine binary). Every section and every
//! field has a default, so an empty file is a valid configuration and a file
//! only needs to name the values it overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use wildkin_agents::CreatureConfig;
use wildkin_world::WorldLayout;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Seed, population, and world layout.
    #[serde(default)]
    pub world: WorldConfig,

    /// Adaptive sub-step sizes for catch-up.
    #[serde(default)]
    pub stepper: StepperConfig,

    /// Real-time loop and autosave settings for the engine binary.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Every per-creature tunable.
    #[serde(default)]
    pub creatures: CreatureConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// Seed, population, and layout of the starting world.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Creatures spawned into a fresh world.
    #[serde(default = "default_creature_count")]
    pub creature_count: u32,

    /// Half the side length of the square world.
    #[serde(default = "default_half_extent")]
    pub half_extent: f32,

    /// Number of trees.
    #[serde(default = "default_tree_count")]
    pub tree_count: u32,

    /// Number of rocks.
    #[serde(default = "default_rock_count")]
    pub rock_count: u32,

    /// Number of herb bushes.
    #[serde(default = "default_bush_count")]
    pub bush_count: u32,

    /// Number of berry bushes.
    #[serde(default = "default_berry_bush_count")]
    pub berry_bush_count: u32,

    /// Number of ponds.
    #[serde(default = "default_pond_count")]
    pub pond_count: u32,
}

impl WorldConfig {
    /// The generator parameters for this configuration.
    pub const fn layout(&self) -> WorldLayout {
        WorldLayout {
            half_extent: self.half_extent,
            tree_count: self.tree_count,
            rock_count: self.rock_count,
            bush_count: self.bush_count,
            berry_bush_count: self.berry_bush_count,
            pond_count: self.pond_count,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            creature_count: default_creature_count(),
            half_extent: default_half_extent(),
            tree_count: default_tree_count(),
            rock_count: default_rock_count(),
            bush_count: default_bush_count(),
            berry_bush_count: default_berry_bush_count(),
            pond_count: default_pond_count(),
        }
    }
}

const fn default_seed() -> u64 {
    42
}
const fn default_creature_count() -> u32 {
    12
}
const fn default_half_extent() -> f32 {
    60.0
}
const fn default_tree_count() -> u32 {
    18
}
const fn default_rock_count() -> u32 {
    12
}
const fn default_bush_count() -> u32 {
    10
}
const fn default_berry_bush_count() -> u32 {
    8
}
const fn default_pond_count() -> u32 {
    2
}

/// Sub-step sizes for replaying elapsed time.
///
/// The step is chosen from the remaining backlog: `coarse_step` above
/// `coarse_backlog` seconds, `medium_step` above `medium_backlog`, and
/// `real_time_step` otherwise.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StepperConfig {
    /// Longest stretch of elapsed time that is ever replayed.
    #[serde(default = "default_max_catch_up_seconds")]
    pub max_catch_up_seconds: f64,

    /// Step used near real time.
    #[serde(default = "default_real_time_step")]
    pub real_time_step: f32,

    /// Step used for a moderate backlog.
    #[serde(default = "default_medium_step")]
    pub medium_step: f32,

    /// Backlog (seconds) above which `medium_step` is used.
    #[serde(default = "default_medium_backlog")]
    pub medium_backlog: f64,

    /// Step used for a large backlog.
    #[serde(default = "default_coarse_step")]
    pub coarse_step: f32,

    /// Backlog (seconds) above which `coarse_step` is used.
    #[serde(default = "default_coarse_backlog")]
    pub coarse_backlog: f64,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            max_catch_up_seconds: default_max_catch_up_seconds(),
            real_time_step: default_real_time_step(),
            medium_step: default_medium_step(),
            medium_backlog: default_medium_backlog(),
            coarse_step: default_coarse_step(),
            coarse_backlog: default_coarse_backlog(),
        }
    }
}

const fn default_max_catch_up_seconds() -> f64 {
    3600.0
}
const fn default_real_time_step() -> f32 {
    0.1
}
const fn default_medium_step() -> f32 {
    0.25
}
const fn default_medium_backlog() -> f64 {
    5.0
}
const fn default_coarse_step() -> f32 {
    1.0
}
const fn default_coarse_backlog() -> f64 {
    60.0
}

/// Engine loop settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Real-time milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Seconds between autosaves. Zero disables autosave.
    #[serde(default = "default_autosave_interval_seconds")]
    pub autosave_interval_seconds: u64,

    /// Where the snapshot is read from and written to.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,

    /// Stop after this many real seconds. Zero runs until Ctrl-C.
    #[serde(default)]
    pub max_real_time_seconds: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            autosave_interval_seconds: default_autosave_interval_seconds(),
            snapshot_path: default_snapshot_path(),
            max_real_time_seconds: 0,
        }
    }
}

const fn default_tick_interval_ms() -> u64 {
    100
}
const fn default_autosave_interval_seconds() -> u64 {
    30
}
fn default_snapshot_path() -> PathBuf {
    PathBuf::from("wildkin-save.json")
}
