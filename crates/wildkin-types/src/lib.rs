//! Shared type definitions for the Wildkin creature simulation.
//!
//! This crate is the single source of truth for the identifiers, enums, and
//! renderer-facing payloads used across the workspace. Types flow downstream
//! to `TypeScript` via `ts-rs` for the external renderer and UI panels.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe arena index wrappers for creatures, resources, food, drops
//! - [`enums`] -- Items, world objects, elements, species, personalities, buildings
//! - [`geometry`] -- Ground-plane [`Vec2`]
//! - [`events`] -- One-shot [`SimEvent`]s and activity-log [`LogEntry`]s
//! - [`view`] -- Read-only [`CreatureView`] snapshots for the renderer

pub mod enums;
pub mod events;
pub mod geometry;
pub mod ids;
pub mod view;

// Re-export all public types at crate root for convenience.
pub use enums::{
    BuildingKind, DeathCause, Element, EquipSlot, ItemCategory, ItemKind, Personality,
    ResourceKind, Species, StateLabel,
};
pub use events::{LogEntry, SimEvent};
pub use geometry::Vec2;
pub use ids::{CreatureId, DropId, FoodSourceId, ResourceId};
pub use view::CreatureView;

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for renderer-facing types.

    #[test]
    fn export_bindings() {
        // ts-rs writes the files to the `bindings/` directory relative to
        // the crate root.
        use ts_rs::TS;

        let _ = crate::ids::CreatureId::export_all();
        let _ = crate::ids::ResourceId::export_all();
        let _ = crate::ids::FoodSourceId::export_all();
        let _ = crate::ids::DropId::export_all();

        let _ = crate::enums::ItemKind::export_all();
        let _ = crate::enums::ItemCategory::export_all();
        let _ = crate::enums::EquipSlot::export_all();
        let _ = crate::enums::ResourceKind::export_all();
        let _ = crate::enums::Element::export_all();
        let _ = crate::enums::Species::export_all();
        let _ = crate::enums::Personality::export_all();
        let _ = crate::enums::BuildingKind::export_all();
        let _ = crate::enums::StateLabel::export_all();
        let _ = crate::enums::DeathCause::export_all();

        let _ = crate::geometry::Vec2::export_all();
        let _ = crate::events::SimEvent::export_all();
        let _ = crate::events::LogEntry::export_all();
        let _ = crate::view::CreatureView::export_all();
    }
}
