//! Weapon and armor slots, wear, and upgrade-only auto-equip.

use serde::{Deserialize, Serialize};
use wildkin_types::{EquipSlot, ItemKind};

use crate::crafting::recipe_for;
use crate::inventory::{Inventory, Item};

/// An item in an equipment slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedItem {
    /// What it is.
    pub kind: ItemKind,
    /// Attack or armor bonus.
    pub bonus: u32,
    /// Hits left before it breaks.
    pub durability: u32,
    /// Durability when new.
    pub max_durability: u32,
    /// The low-durability warning has fired.
    #[serde(default)]
    pub warned: bool,
}

impl EquippedItem {
    /// Equip an inventory item. `None` if it is not equippable.
    pub fn from_item(item: Item) -> Option<Self> {
        let recipe = recipe_for(item.kind)?;
        recipe.slot()?;
        let max_durability = recipe.durability()?;
        Some(Self {
            kind: item.kind,
            bonus: recipe.bonus(),
            durability: item.durability.unwrap_or(max_durability).min(max_durability),
            max_durability,
            warned: false,
        })
    }

    /// Back to an inventory item, keeping its wear.
    pub const fn into_item(self) -> Item {
        Item {
            kind: self.kind,
            durability: Some(self.durability),
        }
    }

    /// Remaining durability as a fraction of max.
    pub fn durability_fraction(&self) -> f32 {
        if self.max_durability == 0 {
            return 0.0;
        }
        self.durability as f32 / self.max_durability as f32
    }
}

/// Result of one point of wear on a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wear {
    /// Slot empty or nothing notable.
    Fine,
    /// Durability crossed the warning fraction for the first time.
    Warning(ItemKind),
    /// The item broke and the slot is now empty.
    Broke(ItemKind),
}

/// The two equipment slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    /// Weapon slot.
    pub weapon: Option<EquippedItem>,
    /// Armor slot.
    pub armor: Option<EquippedItem>,
}

impl Equipment {
    /// The item in `slot`.
    pub const fn get(&self, slot: EquipSlot) -> Option<&EquippedItem> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_ref(),
            EquipSlot::Armor => self.armor.as_ref(),
        }
    }

    const fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<EquippedItem> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
        }
    }

    /// Nothing in `slot`.
    pub const fn is_empty(&self, slot: EquipSlot) -> bool {
        self.get(slot).is_none()
    }

    /// Bonus of the item in `slot`, zero if empty.
    pub fn bonus(&self, slot: EquipSlot) -> u32 {
        self.get(slot).map_or(0, |e| e.bonus)
    }

    /// Apply one point of wear to `slot`.
    pub fn wear(&mut self, slot: EquipSlot, warning_fraction: f32) -> Wear {
        let entry = self.slot_mut(slot);
        let Some(item) = entry.as_mut() else {
            return Wear::Fine;
        };
        item.durability = item.durability.saturating_sub(1);
        if item.durability == 0 {
            let kind = item.kind;
            *entry = None;
            return Wear::Broke(kind);
        }
        if !item.warned && item.durability_fraction() <= warning_fraction {
            item.warned = true;
            return Wear::Warning(item.kind);
        }
        Wear::Fine
    }

    /// Upgrade-only auto-equip.
    ///
    /// For each slot, the best unequipped item is equipped if the slot is
    /// empty or the item's bonus is strictly greater. A replaced item goes
    /// back into the inventory in the freed slot, so the item count never
    /// changes. Returns the kinds that were equipped.
    pub fn auto_equip(&mut self, inventory: &mut Inventory) -> Vec<ItemKind> {
        let mut equipped = Vec::new();
        for slot in [EquipSlot::Weapon, EquipSlot::Armor] {
            let best = inventory
                .items()
                .iter()
                .enumerate()
                .filter_map(|(idx, item)| {
                    let candidate = EquippedItem::from_item(*item)?;
                    (item.kind.slot() == Some(slot)).then_some((idx, candidate))
                })
                .max_by_key(|(_, c)| (c.bonus, c.durability));
            let Some((idx, candidate)) = best else {
                continue;
            };
            if candidate.bonus <= self.bonus(slot) && !self.is_empty(slot) {
                continue;
            }
            if inventory.take_at(idx).is_none() {
                continue;
            }
            if let Some(old) = self.slot_mut(slot).replace(candidate) {
                // The freed slot guarantees room.
                inventory.restore(old.into_item());
            }
            equipped.push(candidate.kind);
        }
        equipped
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn inv(kinds: &[ItemKind]) -> Inventory {
        let mut inv = Inventory::new();
        for kind in kinds {
            inv.add(Item::new(*kind), 20).unwrap();
        }
        inv
    }

    #[test]
    fn empty_slot_always_filled() {
        let mut eq = Equipment::default();
        let mut inventory = inv(&[ItemKind::WoodenClub]);
        assert_eq!(eq.auto_equip(&mut inventory), vec![ItemKind::WoodenClub]);
        assert_eq!(eq.bonus(EquipSlot::Weapon), 4);
        assert!(inventory.is_empty());
    }

    #[test]
    fn upgrade_only_and_old_item_returned() {
        let mut eq = Equipment::default();
        let mut inventory = inv(&[ItemKind::StoneBlade]);
        eq.auto_equip(&mut inventory);

        inventory.add(Item::new(ItemKind::WoodenClub), 20).unwrap();
        assert!(eq.auto_equip(&mut inventory).is_empty());
        assert_eq!(inventory.count(ItemKind::WoodenClub), 1);

        inventory.add(Item::new(ItemKind::CrystalSpear), 20).unwrap();
        assert_eq!(eq.auto_equip(&mut inventory), vec![ItemKind::CrystalSpear]);
        assert_eq!(inventory.count(ItemKind::StoneBlade), 1);
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn equal_bonus_is_not_swapped() {
        let mut eq = Equipment::default();
        let mut inventory = inv(&[ItemKind::BarkArmor]);
        eq.auto_equip(&mut inventory);
        inventory.add(Item::new(ItemKind::BarkArmor), 20).unwrap();
        assert!(eq.auto_equip(&mut inventory).is_empty());
        assert_eq!(inventory.count(ItemKind::BarkArmor), 1);
    }

    #[test]
    fn wear_warns_once_then_breaks() {
        let mut eq = Equipment::default();
        let mut inventory = inv(&[ItemKind::WoodenClub]);
        eq.auto_equip(&mut inventory);
        let mut warnings = 0;
        let mut broke = false;
        for _ in 0..20 {
            match eq.wear(EquipSlot::Weapon, 0.2) {
                Wear::Warning(_) => warnings += 1,
                Wear::Broke(kind) => {
                    assert_eq!(kind, ItemKind::WoodenClub);
                    broke = true;
                }
                Wear::Fine => {}
            }
        }
        assert_eq!(warnings, 1);
        assert!(broke);
        assert!(eq.is_empty(EquipSlot::Weapon));
    }

    #[test]
    fn worn_item_keeps_durability_in_inventory() {
        let mut eq = Equipment::default();
        let mut inventory = inv(&[ItemKind::WoodenClub]);
        eq.auto_equip(&mut inventory);
        eq.wear(EquipSlot::Weapon, 0.2);
        inventory.add(Item::new(ItemKind::StoneBlade), 20).unwrap();
        eq.auto_equip(&mut inventory);
        assert_eq!(inventory.items()[0].durability, Some(19));
    }
}
