//! Contextual item valuation and the smart-drop pickup policy.
//!
//! An item's value starts from a fixed base and is then shaped by the
//! creature's situation:
//!
//! - urgency (hurt creatures prize herbs and potions, hungry ones berries)
//! - recipe proximity (partial credit toward the closest recipe using it)
//! - redundancy (materials for a slot that already holds working gear are
//!   worth less, unless that gear is nearly broken; spare gear that is no
//!   better than what is worn is worth little)
//! - experience (veterans prize weapons, old creatures armor and potions)
//! - personality multipliers
//! - species memory (past deaths of the species)
//! - strategy memory (past keep/drop decisions that paid off)
//!
//! When the inventory is full a new item replaces the lowest-valued slot
//! only if it beats it by more than the drop margin.

use wildkin_types::{EquipSlot, ItemCategory, ItemKind};

use crate::config::CreatureConfig;
use crate::crafting::{RECIPES, recipe_for};
use crate::creature::Creature;
use crate::inventory::Item;
use crate::memory::SpeciesMemory;

/// Creature age (seconds) after which armor and potions gain value.
pub const ELDER_AGE: f32 = 600.0;

/// Kills after which weapons gain value.
pub const VETERAN_KILLS: u32 = 3;

/// Fixed starting value of each item kind.
pub const fn base_value(kind: ItemKind) -> f32 {
    match kind {
        ItemKind::Wood | ItemKind::Stone => 10.0,
        ItemKind::Herb => 8.0,
        ItemKind::Berry => 9.0,
        ItemKind::Crystal => 25.0,
        ItemKind::WoodenClub | ItemKind::BarkArmor => 20.0,
        ItemKind::StoneBlade | ItemKind::StoneShield => 30.0,
        ItemKind::CrystalSpear => 45.0,
        ItemKind::HealingPotion => 35.0,
    }
}

/// What happened when an item was offered to a creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupOutcome {
    /// There was room; the item was added.
    Added,
    /// The inventory was full; `dropped` was evicted to make room.
    Swapped {
        /// The evicted item, to be placed in the world.
        dropped: Item,
    },
    /// Not worth a slot.
    Rejected,
}

/// Value of `kind` to `creature` right now.
pub fn item_value(creature: &Creature, kind: ItemKind, memory: &SpeciesMemory, config: &CreatureConfig) -> f32 {
    let category = kind.category();
    let mut value = base_value(kind);

    if creature.hp_fraction() < config.crafting.potion_threshold
        && matches!(kind, ItemKind::Herb | ItemKind::HealingPotion)
    {
        value *= 2.0;
    }
    if kind.is_food() && creature.hunger < creature.traits().hunger_threshold {
        value *= 2.0;
    }

    value += 10.0 * recipe_proximity(creature, kind);
    value *= redundancy(creature, kind, config.combat.durability_warning);

    if creature.kills >= VETERAN_KILLS && category == ItemCategory::Weapon {
        value *= 1.2;
    }
    if creature.age > ELDER_AGE && matches!(category, ItemCategory::Armor | ItemCategory::Consumable) {
        value *= 1.1;
    }

    value *= creature.traits().value.for_category(category);

    let record = memory.record(creature.species);
    match category {
        ItemCategory::Food => value *= 1.0 + 0.5 * record.starvation_share(),
        ItemCategory::Armor | ItemCategory::Consumable => value *= 1.0 + 0.5 * record.combat_share(),
        ItemCategory::Material | ItemCategory::Weapon => {}
    }

    value += 5.0 * creature.strategy.reinforcement(kind);
    value.max(0.0)
}

/// Best completion fraction, with one more `kind` in hand, over the recipes
/// that consume `kind`.
fn recipe_proximity(creature: &Creature, kind: ItemKind) -> f32 {
    let mut with_item = creature.inventory.clone();
    with_item.restore(Item::new(kind));
    RECIPES
        .iter()
        .filter(|r| r.uses(kind))
        .map(|r| r.completion(&with_item))
        .fold(0.0, f32::max)
}

/// Multiplier for materials feeding occupied slots and for spare gear.
fn redundancy(creature: &Creature, kind: ItemKind, warning: f32) -> f32 {
    if let Some(slot) = kind.slot() {
        let spare_bonus = recipe_for(kind).map_or(0, |r| r.bonus());
        let worn = creature.equipment.get(slot);
        return match worn {
            Some(w) if spare_bonus <= w.bonus && w.durability_fraction() > warning => 0.3,
            _ => 1.0,
        };
    }
    let mut slots = RECIPES
        .iter()
        .filter(|r| r.uses(kind))
        .filter_map(|r| r.slot())
        .peekable();
    if slots.peek().is_none() {
        return 1.0;
    }
    let fed: Vec<EquipSlot> = slots.collect();
    let worn: Vec<_> = fed.iter().filter_map(|s| creature.equipment.get(*s)).collect();
    if worn.len() < fed.len() {
        return 1.0;
    }
    if worn.iter().any(|w| w.durability_fraction() <= warning) {
        1.5
    } else {
        0.5
    }
}

/// Index and value of the lowest-valued held item.
pub fn lowest_slot(creature: &Creature, memory: &SpeciesMemory, config: &CreatureConfig) -> Option<(usize, f32)> {
    creature
        .inventory
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| (i, item_value(creature, item.kind, memory, config)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Whether taking one more `kind` would be accepted under the drop policy.
pub fn would_accept(creature: &Creature, kind: ItemKind, memory: &SpeciesMemory, config: &CreatureConfig) -> bool {
    if creature.inventory.len() < creature.capacity(config) {
        return true;
    }
    let value = item_value(creature, kind, memory, config);
    lowest_slot(creature, memory, config)
        .is_some_and(|(_, lowest)| value > lowest + config.inventory.drop_margin)
}

/// Offer `item` to the creature: add it if there is room, otherwise evict
/// the lowest-valued slot if the new item beats it by the drop margin.
///
/// A swap is recorded in the creature's strategy memory.
pub fn offer_item(creature: &mut Creature, item: Item, memory: &SpeciesMemory, config: &CreatureConfig) -> PickupOutcome {
    let capacity = creature.capacity(config);
    if creature.inventory.add(item, capacity).is_ok() {
        return PickupOutcome::Added;
    }
    let value = item_value(creature, item.kind, memory, config);
    let Some((index, lowest)) = lowest_slot(creature, memory, config) else {
        return PickupOutcome::Rejected;
    };
    if value <= lowest + config.inventory.drop_margin {
        return PickupOutcome::Rejected;
    }
    let Some(dropped) = creature.inventory.take_at(index) else {
        return PickupOutcome::Rejected;
    };
    creature.inventory.restore(item);
    creature
        .strategy
        .record(item.kind, dropped.kind, config.inventory.strategy_memory);
    PickupOutcome::Swapped { dropped }
}
