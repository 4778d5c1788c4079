//! Error types for the `wildkin-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`]. Inside the
//! tick these are logged and turned into a re-plan, never propagated.

use wildkin_types::{CreatureId, FoodSourceId, ResourceId};

/// Errors that can occur during world-state operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WorldError {
    /// No world object exists at this index.
    #[error("resource not found: {0}")]
    ResourceNotFound(ResourceId),

    /// No berry bush exists at this index.
    #[error("food source not found: {0}")]
    FoodSourceNotFound(FoodSourceId),

    /// The world object is depleted and regrowing.
    #[error("resource {0} is depleted")]
    ResourceDepleted(ResourceId),

    /// Another creature already holds the claim on this world object.
    #[error("resource {resource} is already claimed by {holder}")]
    ResourceClaimed {
        /// The contested resource.
        resource: ResourceId,
        /// The creature holding the claim.
        holder: CreatureId,
    },

    /// The berry bush has been eaten and is respawning.
    #[error("food source {0} is not active")]
    FoodSourceInactive(FoodSourceId),

    /// Another creature is already eating at this bush.
    #[error("food source {source_id} is occupied by {holder}")]
    FoodSourceOccupied {
        /// The contested bush.
        source_id: FoodSourceId,
        /// The creature eating there.
        holder: CreatureId,
    },

    /// Persisted resource state does not line up with the world-object list.
    #[error("resource state length mismatch: expected {expected}, found {found}")]
    ResourceStateMismatch {
        /// Number of world objects.
        expected: usize,
        /// Number of persisted entries.
        found: usize,
    },

    /// A world layout parameter is unusable (e.g. a non-positive extent).
    #[error("invalid world layout: {reason}")]
    InvalidLayout {
        /// What is wrong with the layout.
        reason: String,
    },
}
