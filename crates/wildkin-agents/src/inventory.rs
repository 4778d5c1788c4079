//! Bounded, ordered inventory.
//!
//! Items are stored oldest first. Capacity is not stored on the inventory:
//! it depends on whether the owner has built a storage building, so every
//! insertion takes the current capacity and is rejected before mutation if
//! it would overflow.

use serde::{Deserialize, Serialize};
use wildkin_types::ItemKind;

use crate::error::AgentError;

/// One inventory slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// What it is.
    pub kind: ItemKind,
    /// Remaining durability for weapons and armor that have been worn.
    /// `None` means factory-fresh.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durability: Option<u32>,
}

impl Item {
    /// A fresh item.
    pub const fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            durability: None,
        }
    }
}

/// Ordered list of held items, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    /// An empty inventory.
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// No items held.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items, oldest first.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// How many of `kind` are held.
    pub fn count(&self, kind: ItemKind) -> u32 {
        let n = self.items.iter().filter(|i| i.kind == kind).count();
        u32::try_from(n).unwrap_or(u32::MAX)
    }

    /// Whether at least `amount` of `kind` are held.
    pub fn has(&self, kind: ItemKind, amount: u32) -> bool {
        self.count(kind) >= amount
    }

    /// Free slots under `capacity`.
    pub fn free_slots(&self, capacity: usize) -> usize {
        capacity.saturating_sub(self.items.len())
    }

    /// Add one item. Fails without mutating if the inventory is full.
    pub fn add(&mut self, item: Item, capacity: usize) -> Result<(), AgentError> {
        if self.items.len() >= capacity {
            return Err(AgentError::InventoryFull {
                attempted: 1,
                current: self.items.len(),
                capacity,
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Put back an item whose slot was freed in the same operation
    /// (equipment swap). Skips the capacity check.
    pub(crate) fn restore(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Remove `amount` of `kind`, oldest first. Fails without mutating if
    /// not enough are held.
    pub fn remove(&mut self, kind: ItemKind, amount: u32) -> Result<Vec<Item>, AgentError> {
        let available = self.count(kind);
        if available < amount {
            return Err(AgentError::MissingItem {
                kind,
                requested: amount,
                available,
            });
        }
        let mut removed = Vec::new();
        let mut left = amount;
        self.items.retain(|item| {
            if left > 0 && item.kind == kind {
                left = left.saturating_sub(1);
                removed.push(*item);
                false
            } else {
                true
            }
        });
        Ok(removed)
    }

    /// Remove the item at `index`.
    pub fn take_at(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Index of the oldest item of `kind`.
    pub fn position(&self, kind: ItemKind) -> Option<usize> {
        self.items.iter().position(|i| i.kind == kind)
    }
}
