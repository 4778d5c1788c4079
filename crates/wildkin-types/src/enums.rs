//! Enumeration types for the Wildkin simulation.
//!
//! Items, world objects, elements, species, personalities, buildings, and
//! the derived state label shown by the renderer.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Every item a creature can carry, equip, drop, or deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ItemKind {
    // --- Materials ---
    /// Lumber chopped from trees.
    Wood,
    /// Stone mined from rocks.
    Stone,
    /// Medicinal leaves picked from bushes. Brewed into potions.
    Herb,
    /// Rare mineral occasionally found while mining.
    Crystal,

    // --- Food ---
    /// A handful of berries. Edible from the inventory.
    Berry,

    // --- Weapons ---
    /// A crude two-wood club.
    WoodenClub,
    /// A sharpened stone on a wooden haft.
    StoneBlade,
    /// A crystal-tipped spear.
    CrystalSpear,

    // --- Armor ---
    /// Layered bark plates.
    BarkArmor,
    /// A heavy stone-faced shield.
    StoneShield,

    // --- Consumables ---
    /// Restores health when drunk.
    HealingPotion,
}

/// Coarse grouping of [`ItemKind`] used by scoring and deposit policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ItemCategory {
    /// Raw crafting material.
    Material,
    /// Edible item.
    Food,
    /// Equippable in the weapon slot.
    Weapon,
    /// Equippable in the armor slot.
    Armor,
    /// Single-use item with an immediate effect.
    Consumable,
}

impl ItemKind {
    /// All item kinds, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Wood,
        Self::Stone,
        Self::Herb,
        Self::Crystal,
        Self::Berry,
        Self::WoodenClub,
        Self::StoneBlade,
        Self::CrystalSpear,
        Self::BarkArmor,
        Self::StoneShield,
        Self::HealingPotion,
    ];

    /// The category this item belongs to.
    pub const fn category(self) -> ItemCategory {
        match self {
            Self::Wood | Self::Stone | Self::Herb | Self::Crystal => ItemCategory::Material,
            Self::Berry => ItemCategory::Food,
            Self::WoodenClub | Self::StoneBlade | Self::CrystalSpear => ItemCategory::Weapon,
            Self::BarkArmor | Self::StoneShield => ItemCategory::Armor,
            Self::HealingPotion => ItemCategory::Consumable,
        }
    }

    /// Whether the item can be eaten.
    pub const fn is_food(self) -> bool {
        matches!(self.category(), ItemCategory::Food)
    }

    /// The equipment slot this item occupies, if any.
    pub const fn slot(self) -> Option<EquipSlot> {
        match self.category() {
            ItemCategory::Weapon => Some(EquipSlot::Weapon),
            ItemCategory::Armor => Some(EquipSlot::Armor),
            _ => None,
        }
    }

    /// Human-readable name for logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Stone => "stone",
            Self::Herb => "herb",
            Self::Crystal => "crystal",
            Self::Berry => "berry",
            Self::WoodenClub => "wooden club",
            Self::StoneBlade => "stone blade",
            Self::CrystalSpear => "crystal spear",
            Self::BarkArmor => "bark armor",
            Self::StoneShield => "stone shield",
            Self::HealingPotion => "healing potion",
        }
    }
}

impl core::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// An equipment slot on a creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum EquipSlot {
    /// Adds to attack.
    Weapon,
    /// Mitigates incoming damage.
    Armor,
}

// ---------------------------------------------------------------------------
// World objects
// ---------------------------------------------------------------------------

/// A harvestable world object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ResourceKind {
    /// Chopped for wood.
    Tree,
    /// Mined for stone (and the occasional crystal).
    Rock,
    /// Picked for herbs (and sometimes berries).
    Bush,
}

impl ResourceKind {
    /// All resource kinds.
    pub const ALL: [Self; 3] = [Self::Tree, Self::Rock, Self::Bush];

    /// The item a successful harvest primarily yields.
    pub const fn primary_item(self) -> ItemKind {
        match self {
            Self::Tree => ItemKind::Wood,
            Self::Rock => ItemKind::Stone,
            Self::Bush => ItemKind::Herb,
        }
    }

    /// The resource kind that yields the given material, if any.
    pub const fn yielding(item: ItemKind) -> Option<Self> {
        match item {
            ItemKind::Wood => Some(Self::Tree),
            ItemKind::Stone | ItemKind::Crystal => Some(Self::Rock),
            ItemKind::Herb | ItemKind::Berry => Some(Self::Bush),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Elements
// ---------------------------------------------------------------------------

/// Elemental type of a species, used for combat advantage.
///
/// The advantage graph is a three-cycle (Fire beats Grass beats Water beats
/// Fire) plus two cross bonuses (Electric beats Water, Earth beats Electric).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Element {
    /// Beats Grass.
    Fire,
    /// Beats Fire.
    Water,
    /// Beats Water.
    Grass,
    /// Beats Water.
    Electric,
    /// Beats Electric.
    Earth,
}

impl Element {
    /// Whether an attack of this element is super-effective against `other`.
    pub const fn beats(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Fire, Self::Grass)
                | (Self::Grass, Self::Water)
                | (Self::Water, Self::Fire)
                | (Self::Electric, Self::Water)
                | (Self::Earth, Self::Electric)
        )
    }
}

// ---------------------------------------------------------------------------
// Species & personality
// ---------------------------------------------------------------------------

/// Species identifier. Profiles (stats, drains, element) are looked up from
/// the static species table in `wildkin-agents`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Species {
    /// Quick, fiery scavenger.
    Emberfox,
    /// Armored shoreline forager.
    Tidecrab,
    /// Small, placid grass creature.
    Mossling,
    /// Jittery electric flier.
    Sparkwing,
    /// Heavy earth-element brawler.
    Stonebeak,
    /// Spiny grass-element territorial grazer.
    Thornback,
}

impl Species {
    /// All species, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Emberfox,
        Self::Tidecrab,
        Self::Mossling,
        Self::Sparkwing,
        Self::Stonebeak,
        Self::Thornback,
    ];

    /// Lowercase display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Emberfox => "emberfox",
            Self::Tidecrab => "tidecrab",
            Self::Mossling => "mossling",
            Self::Sparkwing => "sparkwing",
            Self::Stonebeak => "stonebeak",
            Self::Thornback => "thornback",
        }
    }
}

/// Behavioral disposition assigned at creature creation. Never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Personality {
    /// Picks fights, prefers weapons, chases often.
    Aggressive,
    /// Avoids fights, prefers armor.
    Defensive,
    /// Fights readily, rarely gives up a chase.
    Brave,
    /// Eats and sleeps early, flees pursuit.
    Timid,
    /// Values rare items.
    Curious,
    /// Sleeps long, values everything a little less.
    Lazy,
    /// Hoards materials and crystals.
    Greedy,
    /// Balanced; values food more.
    Social,
}

impl Personality {
    /// All personalities, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Aggressive,
        Self::Defensive,
        Self::Brave,
        Self::Timid,
        Self::Curious,
        Self::Lazy,
        Self::Greedy,
        Self::Social,
    ];
}

// ---------------------------------------------------------------------------
// Settlements
// ---------------------------------------------------------------------------

/// A village building type. Built in prerequisite order
/// shelter, campfire, storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum BuildingKind {
    /// Doubles sleep regeneration nearby.
    Shelter,
    /// Second tier; unlocks storage.
    Campfire,
    /// Raises inventory capacity and accepts deposits.
    Storage,
}

impl BuildingKind {
    /// Build order, first to last.
    pub const TIERS: [Self; 3] = [Self::Shelter, Self::Campfire, Self::Storage];

    /// The building that must exist before this one can be started.
    pub const fn prerequisite(self) -> Option<Self> {
        match self {
            Self::Shelter => None,
            Self::Campfire => Some(Self::Shelter),
            Self::Storage => Some(Self::Campfire),
        }
    }

    /// Human-readable name for logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Shelter => "shelter",
            Self::Campfire => "campfire",
            Self::Storage => "storage",
        }
    }
}

// ---------------------------------------------------------------------------
// Renderer-facing state label
// ---------------------------------------------------------------------------

/// Derived label for a creature's current behavior.
///
/// Recomputed every tick from the creature's activity for external
/// consumption only; never read back by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum StateLabel {
    /// Standing around.
    Idle,
    /// Ambling toward a random point.
    Wandering,
    /// Asleep.
    Sleeping,
    /// Walking to a berry bush.
    SeekingFood,
    /// Eating.
    Eating,
    /// Walking to a tree, rock, or bush.
    SeekingResource,
    /// Harvesting a world object.
    Gathering,
    /// Crafting an item.
    Crafting,
    /// Drinking a potion.
    DrinkingPotion,
    /// Walking home to sleep or build.
    ReturningHome,
    /// Constructing a village building.
    Building,
    /// Exchanging blows.
    Fighting,
    /// Running from a threat.
    Fleeing,
    /// Pursuing a fleeing opponent.
    Chasing,
    /// Dead.
    Dead,
}

/// Why a creature died. Feeds the shared species memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum DeathCause {
    /// Hunger reached zero and health drained away.
    Starvation,
    /// Killed in a fight.
    Combat,
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Starvation => write!(f, "starvation"),
            Self::Combat => write!(f, "combat"),
        }
    }
}
