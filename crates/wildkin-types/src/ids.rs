//! Type-safe identifier wrappers around arena indices.
//!
//! Every entity in the simulation lives in an arena owned by the simulation
//! context and is addressed by a stable integer index. Wrapping the index in
//! a newtype prevents accidentally using a resource id to look up a creature.
//! Creatures are never removed from their arena (dead creatures stay with
//! `alive = false`), so an id stays valid for the lifetime of a world.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around a `u32` arena index with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident, $prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub u32);

        impl $name {
            /// Build an identifier from an arena position.
            ///
            /// Positions beyond `u32::MAX` saturate; arenas never grow that large.
            pub fn from_index(index: usize) -> Self {
                Self(u32::try_from(index).unwrap_or(u32::MAX))
            }

            /// Return the arena position this identifier refers to.
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}#{}", $prefix, self.0)
            }
        }
    };
}

define_id! {
    /// Identifier of a creature in the simulation's creature arena.
    CreatureId, "creature"
}

define_id! {
    /// Identifier of a harvestable world object (tree, rock, bush).
    ///
    /// Aligned 1:1 with the static world-object list.
    ResourceId, "resource"
}

define_id! {
    /// Identifier of a berry bush food source.
    FoodSourceId, "food"
}

define_id! {
    /// Identifier of an item lying on the ground awaiting pickup or despawn.
    DropId, "drop"
}
