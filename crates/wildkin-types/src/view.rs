//! Read-only creature snapshots handed to the renderer each frame.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ItemKind, Personality, Species, StateLabel};
use crate::geometry::Vec2;
use crate::ids::CreatureId;

/// Everything the renderer needs to draw and label a live creature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CreatureView {
    /// Arena identifier.
    pub id: CreatureId,
    /// Display name.
    pub name: String,
    /// Species.
    pub species: Species,
    /// Personality.
    pub personality: Personality,
    /// Ground-plane position.
    pub position: Vec2,
    /// Terrain height at the position.
    pub height: f32,
    /// Facing (radians, 0 = +z).
    pub heading: f32,
    /// Derived behavior label.
    pub state: StateLabel,
    /// Current health.
    pub hp: u32,
    /// Maximum health.
    pub max_hp: u32,
    /// Hunger (0 = starving, 100 = full).
    pub hunger: f32,
    /// Energy (0 = exhausted, 100 = rested).
    pub energy: f32,
    /// Current level.
    pub level: u32,
    /// Equipped weapon, if any.
    pub weapon: Option<ItemKind>,
    /// Equipped armor, if any.
    pub armor: Option<ItemKind>,
    /// Number of items carried.
    pub inventory_len: u32,
}
