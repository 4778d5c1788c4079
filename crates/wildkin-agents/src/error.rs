//! Error types for the `wildkin-agents` crate.
//!
//! Every capacity check happens before mutation: an operation that returns
//! an error leaves the creature untouched. Callers inside the per-creature
//! update log these and drop the creature back to idle; none of them is
//! fatal.

use wildkin_types::ItemKind;

/// Errors that can occur during creature state operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AgentError {
    /// Adding items would exceed inventory capacity.
    #[error("inventory full: adding {attempted} item(s) to {current}/{capacity}")]
    InventoryFull {
        /// Number of items the caller tried to add.
        attempted: usize,
        /// Items currently held.
        current: usize,
        /// Capacity at the time of the call.
        capacity: usize,
    },

    /// The creature does not hold enough of an item.
    #[error("missing item: wanted {requested} {kind} but only have {available}")]
    MissingItem {
        /// The item kind.
        kind: ItemKind,
        /// Quantity requested.
        requested: u32,
        /// Quantity held.
        available: u32,
    },

    /// The item has no crafting recipe.
    #[error("no recipe produces {0}")]
    UnknownRecipe(ItemKind),
}
