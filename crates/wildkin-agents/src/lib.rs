//! Creature agents for the Wildkin simulation.
//!
//! Everything a creature is and does lives here: stats and vitals, the
//! inventory with its smart-pickup policy, crafting and equipment wear, the
//! goal planner, gathering, eating and sleeping, pairwise turn-based combat
//! with flee and chase, leveling, and the personal village.
//!
//! Creatures are stored by the simulation in a single `Vec` and updated in
//! index order with [`update_creature`]. Every cross-creature reference is a
//! [`wildkin_types::CreatureId`] resolved against that arena.
//!
//! # Modules
//!
//! - [`behavior`] -- Per-creature update and activity arbitration.
//! - [`combat`] -- Engagement, hit exchange, flee, fear, chase, kills, XP.
//! - [`config`] -- [`CreatureConfig`], every behavioral tunable.
//! - [`context`] -- [`SimContext`], the borrowed state passed to systems.
//! - [`crafting`] -- Recipe table and recipe choice.
//! - [`creature`] -- [`Creature`] and its [`Activity`] state machine.
//! - [`decision`] -- The rule-table goal planner.
//! - [`equipment`] -- Weapon and armor slots with durability wear.
//! - [`error`] -- [`AgentError`].
//! - [`gathering`] -- Seeking, claiming, and harvesting world objects.
//! - [`inventory`] -- Capacity-bounded item list.
//! - [`memory`] -- Strategy memory and shared species memory.
//! - [`movement`] -- Stepping, stuck detection, wander targets.
//! - [`personality`] -- Personality-driven thresholds and value biases.
//! - [`scoring`] -- Item valuation and the smart-pickup policy.
//! - [`species`] -- Per-species base stats.
//! - [`village`] -- Home, buildings, and storage deposits.
//! - [`vitals`] -- Hunger, energy, starvation.

pub mod behavior;
pub mod combat;
pub mod config;
pub mod context;
pub mod crafting;
pub mod creature;
pub mod decision;
pub mod equipment;
pub mod error;
pub mod gathering;
pub mod inventory;
pub mod memory;
pub mod movement;
pub mod personality;
pub mod scoring;
pub mod species;
pub mod village;
pub mod vitals;

// Re-export primary types at crate root.
pub use behavior::update_creature;
pub use config::CreatureConfig;
pub use context::SimContext;
pub use creature::{Activity, Creature, NAME_POOL};
pub use decision::{Goal, GoalAction};
pub use error::AgentError;
pub use inventory::{Inventory, Item};
pub use memory::{SpeciesMemory, SpeciesRecord, StrategyMemory};
pub use village::Village;
