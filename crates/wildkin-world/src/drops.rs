//! Items lying on the ground.
//!
//! Dropped items are never claimed: any creature scanning nearby may pick
//! one up, and each despawns when its countdown expires.

use serde::{Deserialize, Serialize};
use wildkin_types::{DropId, ItemKind, Vec2};

/// Seconds a dropped item stays on the ground.
pub const DROP_LIFETIME: f32 = 60.0;

/// A single item on the ground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedItem {
    /// Unique id within the field.
    pub id: DropId,
    /// The item.
    pub kind: ItemKind,
    /// Where it lies.
    pub position: Vec2,
    /// Seconds until it despawns.
    pub timer: f32,
    /// Durability carried over from a worn weapon or armor.
    pub durability: Option<u32>,
}

/// All items on the ground, with a monotonically increasing id counter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropField {
    items: Vec<DroppedItem>,
    next_id: u32,
}

impl DropField {
    /// An empty field.
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 0,
        }
    }

    /// Place an item on the ground for [`DROP_LIFETIME`] seconds.
    pub fn spawn(&mut self, kind: ItemKind, position: Vec2, durability: Option<u32>) -> DropId {
        let id = DropId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.items.push(DroppedItem {
            id,
            kind,
            position,
            timer: DROP_LIFETIME,
            durability,
        });
        id
    }

    /// Count down every item and remove the expired ones.
    /// Returns how many despawned.
    pub fn tick(&mut self, dt: f32) -> usize {
        let before = self.items.len();
        for item in &mut self.items {
            item.timer -= dt;
        }
        self.items.retain(|item| item.timer > 0.0);
        before.saturating_sub(self.items.len())
    }

    /// Items within `radius` of `position`, nearest first.
    pub fn nearby(&self, position: Vec2, radius: f32) -> Vec<&DroppedItem> {
        let mut found: Vec<&DroppedItem> = self
            .items
            .iter()
            .filter(|item| item.position.distance(position) <= radius)
            .collect();
        found.sort_by(|a, b| {
            a.position
                .distance(position)
                .total_cmp(&b.position.distance(position))
        });
        found
    }

    /// Remove and return an item.
    pub fn take(&mut self, id: DropId) -> Option<DroppedItem> {
        let idx = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.swap_remove(idx))
    }

    /// Every item on the ground.
    pub fn items(&self) -> &[DroppedItem] {
        &self.items
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
