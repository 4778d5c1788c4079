//! Recipes, recipe selection, and craft bookkeeping.
//!
//! A recipe maps a material multiset to an equippable item (flat stat bonus
//! plus durability) or a consumable (heal amount). Materials are consumed
//! when a craft starts and refunded if the craft is interrupted; the output
//! is added when it finishes. Every recipe consumes at least two items, so
//! a started craft always has room for its output.

use wildkin_types::{EquipSlot, ItemKind};

use crate::equipment::Equipment;
use crate::error::AgentError;
use crate::inventory::{Inventory, Item};
use crate::personality::CraftBias;

/// What a crafted item does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeEffect {
    /// Weapon: attack bonus and durability.
    Weapon {
        /// Flat attack bonus.
        attack: u32,
        /// Hits before it breaks.
        durability: u32,
    },
    /// Armor: damage mitigation and durability.
    Armor {
        /// Flat damage reduction per hit taken.
        armor: u32,
        /// Hits before it breaks.
        durability: u32,
    },
    /// Consumable heal.
    Heal(u32),
}

/// A crafting recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    /// The crafted item.
    pub output: ItemKind,
    /// Materials consumed.
    pub inputs: &'static [(ItemKind, u32)],
    /// What the output does.
    pub effect: RecipeEffect,
}

impl Recipe {
    /// Equipment slot of the output, if it is equippable.
    pub const fn slot(&self) -> Option<EquipSlot> {
        match self.effect {
            RecipeEffect::Weapon { .. } => Some(EquipSlot::Weapon),
            RecipeEffect::Armor { .. } => Some(EquipSlot::Armor),
            RecipeEffect::Heal(_) => None,
        }
    }

    /// Stat bonus of an equippable output; zero for consumables.
    pub const fn bonus(&self) -> u32 {
        match self.effect {
            RecipeEffect::Weapon { attack, .. } => attack,
            RecipeEffect::Armor { armor, .. } => armor,
            RecipeEffect::Heal(_) => 0,
        }
    }

    /// Maximum durability of an equippable output.
    pub const fn durability(&self) -> Option<u32> {
        match self.effect {
            RecipeEffect::Weapon { durability, .. } | RecipeEffect::Armor { durability, .. } => {
                Some(durability)
            }
            RecipeEffect::Heal(_) => None,
        }
    }

    /// Total number of items consumed.
    pub fn input_count(&self) -> u32 {
        self.inputs.iter().map(|(_, n)| *n).sum()
    }

    /// Whether `inventory` holds every input.
    pub fn is_craftable(&self, inventory: &Inventory) -> bool {
        self.inputs.iter().all(|(kind, n)| inventory.has(*kind, *n))
    }

    /// Inputs still missing, with the shortfall for each.
    pub fn missing(&self, inventory: &Inventory) -> Vec<(ItemKind, u32)> {
        self.inputs
            .iter()
            .filter_map(|(kind, n)| {
                let short = n.saturating_sub(inventory.count(*kind));
                (short > 0).then_some((*kind, short))
            })
            .collect()
    }

    /// Fraction of inputs already held, in `[0, 1]`.
    pub fn completion(&self, inventory: &Inventory) -> f32 {
        let total = self.input_count();
        if total == 0 {
            return 1.0;
        }
        let held: u32 = self
            .inputs
            .iter()
            .map(|(kind, n)| inventory.count(*kind).min(*n))
            .sum();
        held as f32 / total as f32
    }

    /// Whether `kind` is one of this recipe's inputs.
    pub fn uses(&self, kind: ItemKind) -> bool {
        self.inputs.iter().any(|(k, _)| *k == kind)
    }
}

/// Every recipe, weapons first.
pub const RECIPES: [Recipe; 6] = [
    Recipe {
        output: ItemKind::WoodenClub,
        inputs: &[(ItemKind::Wood, 2)],
        effect: RecipeEffect::Weapon {
            attack: 4,
            durability: 20,
        },
    },
    Recipe {
        output: ItemKind::StoneBlade,
        inputs: &[(ItemKind::Wood, 1), (ItemKind::Stone, 2)],
        effect: RecipeEffect::Weapon {
            attack: 8,
            durability: 30,
        },
    },
    Recipe {
        output: ItemKind::CrystalSpear,
        inputs: &[(ItemKind::Wood, 1), (ItemKind::Stone, 1), (ItemKind::Crystal, 1)],
        effect: RecipeEffect::Weapon {
            attack: 14,
            durability: 40,
        },
    },
    Recipe {
        output: ItemKind::BarkArmor,
        inputs: &[(ItemKind::Wood, 3)],
        effect: RecipeEffect::Armor {
            armor: 3,
            durability: 25,
        },
    },
    Recipe {
        output: ItemKind::StoneShield,
        inputs: &[(ItemKind::Wood, 1), (ItemKind::Stone, 3)],
        effect: RecipeEffect::Armor {
            armor: 6,
            durability: 35,
        },
    },
    Recipe {
        output: ItemKind::HealingPotion,
        inputs: &[(ItemKind::Herb, 2)],
        effect: RecipeEffect::Heal(30),
    },
];

/// The recipe that produces `kind`.
pub fn recipe_for(kind: ItemKind) -> Option<&'static Recipe> {
    RECIPES.iter().find(|r| r.output == kind)
}

/// Like [`recipe_for`] but as a typed error.
pub fn require_recipe(kind: ItemKind) -> Result<&'static Recipe, AgentError> {
    recipe_for(kind).ok_or(AgentError::UnknownRecipe(kind))
}

/// Whether `recipe` fills an empty slot or beats what is already owned,
/// counting both the equipped item and spares in the inventory.
pub fn fills_gap(recipe: &Recipe, equipment: &Equipment, inventory: &Inventory) -> bool {
    let Some(slot) = recipe.slot() else {
        return false;
    };
    let best_owned = equipment
        .bonus(slot)
        .max(best_spare_bonus(inventory, slot));
    recipe.bonus() > best_owned
}

/// Highest bonus among unequipped items for `slot`.
pub fn best_spare_bonus(inventory: &Inventory, slot: EquipSlot) -> u32 {
    inventory
        .items()
        .iter()
        .filter(|i| i.kind.slot() == Some(slot))
        .filter_map(|i| recipe_for(i.kind).map(Recipe::bonus))
        .max()
        .unwrap_or(0)
}

/// Inputs the creature needs for the recipe selection, used by [`choose_recipe`].
#[derive(Debug, Clone, Copy)]
pub struct CraftChoice<'a> {
    /// Current inventory.
    pub inventory: &'a Inventory,
    /// Current equipment.
    pub equipment: &'a Equipment,
    /// HP as a fraction of max.
    pub hp_fraction: f32,
    /// HP fraction below which a potion takes priority.
    pub hurt_threshold: f32,
    /// Personality craft preference.
    pub bias: CraftBias,
}

/// Pick the recipe to craft right now, if any.
///
/// Order: a healing potion if hurt; then the best craftable equipment gap,
/// preferring the personality's favored slot; then a spare potion if none
/// is carried. Recipes that would only duplicate owned gear are skipped.
pub fn choose_recipe(choice: &CraftChoice<'_>) -> Option<&'static Recipe> {
    let potion = recipe_for(ItemKind::HealingPotion)?;
    let craftable_potion = potion.is_craftable(choice.inventory);
    if choice.hp_fraction < choice.hurt_threshold && craftable_potion {
        return Some(potion);
    }

    let mut gaps: Vec<&'static Recipe> = RECIPES
        .iter()
        .filter(|r| r.slot().is_some())
        .filter(|r| r.is_craftable(choice.inventory))
        .filter(|r| fills_gap(r, choice.equipment, choice.inventory))
        .collect();
    gaps.sort_by_key(|r| {
        let favored = match (choice.bias, r.slot()) {
            (CraftBias::Weapon, Some(EquipSlot::Weapon)) | (CraftBias::Armor, Some(EquipSlot::Armor)) => 0,
            (CraftBias::Balanced, Some(slot)) if choice.equipment.is_empty(slot) => 0,
            _ => 1,
        };
        (favored, core::cmp::Reverse(r.bonus()))
    });
    if let Some(best) = gaps.first() {
        return Some(*best);
    }

    (craftable_potion && !choice.inventory.has(ItemKind::HealingPotion, 1)).then_some(potion)
}

/// Consume a recipe's inputs. Returns the consumed items for a refund.
/// Fails without mutating if any input is missing.
pub fn consume_inputs(inventory: &mut Inventory, recipe: &Recipe) -> Result<Vec<Item>, AgentError> {
    if let Some((kind, short)) = recipe.missing(inventory).first() {
        return Err(AgentError::MissingItem {
            kind: *kind,
            requested: short.saturating_add(inventory.count(*kind)),
            available: inventory.count(*kind),
        });
    }
    let mut consumed = Vec::new();
    for (kind, n) in recipe.inputs {
        consumed.extend(inventory.remove(*kind, *n)?);
    }
    Ok(consumed)
}
