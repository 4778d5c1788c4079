//! World query surface and shared world objects for the Wildkin simulation.
//!
//! This crate models everything creatures contend over: harvestable world
//! objects with an exclusive-claim protocol, berry bushes, items lying on the
//! ground, and the static terrain and obstacle geometry used for movement and
//! building placement.
//!
//! # Modules
//!
//! - [`drops`] -- Timed ground items with unclaimed, scan-based pickup.
//! - [`error`] -- Error types for world-state operations.
//! - [`food`] -- Berry bushes with first-claimant-wins occupancy and respawn.
//! - [`placement`] -- Building sites at compass points, random open positions.
//! - [`resource`] -- Trees, rocks, and bushes: claim, deplete, regrow.
//! - [`starting_world`] -- Seeded default layout generation.
//! - [`terrain`] -- [`TerrainQuery`] height function and obstacle circles.
//! - [`world`] -- [`WorldState`], the arena owning all of the above.

pub mod drops;
pub mod error;
pub mod food;
pub mod placement;
pub mod resource;
pub mod starting_world;
pub mod terrain;
pub mod world;

// Re-export primary types at crate root.
pub use drops::{DROP_LIFETIME, DropField, DroppedItem};
pub use error::WorldError;
pub use food::FoodSource;
pub use placement::{building_site, random_open_position, roll_between};
pub use resource::{RegrowOutcome, ResourceState, WorldResource, regrow_range};
pub use starting_world::{WorldLayout, create_starting_world};
pub use terrain::{FlatTerrain, Obstacle, RollingTerrain, TerrainQuery};
pub use world::{SearchMode, WorldState};
