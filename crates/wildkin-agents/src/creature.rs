//! The creature record and its activity state machine.
//!
//! A creature's primary activity is a single [`Activity`] value, so two
//! activities can never be active at once. The renderer-facing
//! [`StateLabel`] is derived from it on demand and is never a source of
//! truth.
//!
//! Fields are split into durable state (identity, stats, vitals, inventory,
//! equipment, memory, village), which is persisted, and volatile runtime
//! state (activity, cooldowns, fear, current goal), which is skipped by
//! serde and comes back as safe defaults on load.

use rand::Rng;
use serde::{Deserialize, Serialize};
use wildkin_types::{
    BuildingKind, CreatureId, CreatureView, DeathCause, Element, EquipSlot, FoodSourceId,
    ItemKind, Personality, ResourceId, Species, StateLabel, Vec2,
};

use crate::combat::{Engagement, Pursuit};
use crate::config::{CreatureConfig, VitalsConfig};
use crate::decision::Goal;
use crate::equipment::Equipment;
use crate::inventory::{Inventory, Item};
use crate::memory::StrategyMemory;
use crate::movement::StuckTracker;
use crate::personality::{PersonalityTraits, traits};
use crate::species::{SpeciesProfile, profile};
use crate::village::Village;

/// Pool of names handed out to new creatures.
pub const NAME_POOL: [&str; 24] = [
    "Ash", "Bramble", "Cinder", "Dew", "Ember", "Fern", "Gale", "Hazel", "Iris", "Juniper",
    "Kestrel", "Lichen", "Moss", "Nettle", "Onyx", "Pebble", "Quill", "Rook", "Sorrel", "Thistle",
    "Umber", "Vale", "Willow", "Yarrow",
];

/// Why a creature is walking home.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeErrand {
    /// Sleep near the shelter.
    Sleep,
    /// Construct the given tier.
    Build(BuildingKind),
}

/// The single primary activity of a creature.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Activity {
    /// Waiting for the planner.
    #[default]
    Idle,
    /// Strolling toward a random point.
    Wandering {
        /// Destination.
        target: Vec2,
    },
    /// Walking to a berry bush.
    SeekingFood {
        /// The bush.
        source: FoodSourceId,
        /// Progress watchdog.
        stuck: StuckTracker,
    },
    /// Eating from a bush or a carried berry.
    Eating {
        /// The occupied bush; `None` for a carried berry.
        source: Option<FoodSourceId>,
        /// Seconds left.
        remaining: f32,
        /// Hunger restored on completion.
        restore: f32,
    },
    /// Walking to a world object.
    SeekingResource {
        /// The target.
        resource: ResourceId,
        /// Progress watchdog.
        stuck: StuckTracker,
    },
    /// Harvesting a claimed world object.
    Gathering {
        /// The claimed object.
        resource: ResourceId,
        /// Seconds left.
        remaining: f32,
    },
    /// Crafting; inputs already consumed.
    Crafting {
        /// The item being made.
        output: ItemKind,
        /// Seconds left.
        remaining: f32,
        /// Inputs to refund if interrupted.
        consumed: Vec<Item>,
    },
    /// Drinking a potion; the potion is already consumed.
    DrinkingPotion {
        /// Seconds left.
        remaining: f32,
        /// HP restored on completion.
        heal: f32,
    },
    /// Asleep.
    Sleeping {
        /// Seconds left.
        remaining: f32,
    },
    /// Walking home.
    ReturningHome {
        /// What happens on arrival.
        errand: HomeErrand,
        /// Progress watchdog.
        stuck: StuckTracker,
    },
    /// Constructing a building at home.
    Building {
        /// The tier being built.
        kind: BuildingKind,
        /// Seconds left.
        remaining: f32,
    },
    /// In a hit exchange.
    Fighting(Engagement),
    /// Sprinting away from a threat.
    Fleeing {
        /// Who it is running from.
        threat: CreatureId,
        /// Seconds of sprint left.
        remaining: f32,
        /// Unit direction of travel.
        direction: Vec2,
    },
    /// Pursuing a fleeing opponent.
    Chasing(Pursuit),
    /// Dead; terminal.
    Dead,
}

impl Activity {
    /// The derived renderer label.
    pub const fn label(&self) -> StateLabel {
        match self {
            Self::Idle => StateLabel::Idle,
            Self::Wandering { .. } => StateLabel::Wandering,
            Self::SeekingFood { .. } => StateLabel::SeekingFood,
            Self::Eating { .. } => StateLabel::Eating,
            Self::SeekingResource { .. } => StateLabel::SeekingResource,
            Self::Gathering { .. } => StateLabel::Gathering,
            Self::Crafting { .. } => StateLabel::Crafting,
            Self::DrinkingPotion { .. } => StateLabel::DrinkingPotion,
            Self::Sleeping { .. } => StateLabel::Sleeping,
            Self::ReturningHome { .. } => StateLabel::ReturningHome,
            Self::Building { .. } => StateLabel::Building,
            Self::Fighting(_) => StateLabel::Fighting,
            Self::Fleeing { .. } => StateLabel::Fleeing,
            Self::Chasing(_) => StateLabel::Chasing,
            Self::Dead => StateLabel::Dead,
        }
    }

    /// Free for the arbitration rules to replace.
    pub const fn is_free(&self) -> bool {
        matches!(self, Self::Idle | Self::Wandering { .. })
    }

    /// Part of the combat state machine.
    pub const fn is_combat(&self) -> bool {
        matches!(self, Self::Fighting(_) | Self::Fleeing { .. } | Self::Chasing(_))
    }

    /// Walking somewhere (drains energy faster).
    pub const fn is_moving(&self) -> bool {
        matches!(
            self,
            Self::Wandering { .. }
                | Self::SeekingFood { .. }
                | Self::SeekingResource { .. }
                | Self::ReturningHome { .. }
                | Self::Fleeing { .. }
                | Self::Chasing(_)
        )
    }
}

/// Fear left over after fleeing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fear {
    /// The creature that caused it.
    pub threat: CreatureId,
    /// Seconds until calm.
    pub remaining: f32,
}

/// Volatile countdowns.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cooldowns {
    /// Seconds before this creature may fight again.
    pub combat: f32,
    /// Seconds before this creature may craft again.
    pub craft: f32,
    /// Seconds until the planner runs again.
    pub plan: f32,
}

/// An autonomous creature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    /// Arena index.
    pub id: CreatureId,
    /// Display name.
    pub name: String,
    /// Species.
    pub species: Species,
    /// Personality.
    pub personality: Personality,
    /// Current level, starting at 1.
    pub level: u32,
    /// XP toward the next level.
    pub xp: u32,
    /// Current HP, `0 <= hp <= max_hp`.
    pub hp: f32,
    /// Max HP.
    pub max_hp: f32,
    /// Attack before weapon bonus.
    pub base_atk: f32,
    /// Top speed before energy scaling.
    pub spd: f32,
    /// Fullness in `[0, 100]`; starvation at zero.
    pub hunger: f32,
    /// Energy in `[0, 100]`.
    pub energy: f32,
    /// Ground position.
    pub position: Vec2,
    /// Facing, radians.
    pub heading: f32,
    /// Alive flag; dead creatures stay in the arena.
    pub alive: bool,
    /// How it died.
    #[serde(default)]
    pub death_cause: Option<DeathCause>,
    /// Seconds lived.
    #[serde(default)]
    pub age: f32,
    /// Creatures killed.
    #[serde(default)]
    pub kills: u32,
    /// Lifetime successful gathers.
    #[serde(default)]
    pub gather_count: u32,
    /// Carried items.
    #[serde(default)]
    pub inventory: Inventory,
    /// Worn items.
    #[serde(default)]
    pub equipment: Equipment,
    /// Recent keep/drop decisions.
    #[serde(default)]
    pub strategy: StrategyMemory,
    /// Home and buildings.
    #[serde(default)]
    pub village: Option<Village>,

    /// Current activity.
    #[serde(skip)]
    pub activity: Activity,
    /// Countdowns.
    #[serde(skip)]
    pub cooldowns: Cooldowns,
    /// Leftover fear.
    #[serde(skip)]
    pub fear: Option<Fear>,
    /// The planner's current goal.
    #[serde(skip)]
    pub goal: Option<Goal>,
}

impl Creature {
    /// A fresh level-1 creature with full vitals.
    pub fn new(id: CreatureId, name: impl Into<String>, species: Species, personality: Personality, position: Vec2) -> Self {
        let p = profile(species);
        Self {
            id,
            name: name.into(),
            species,
            personality,
            level: 1,
            xp: 0,
            hp: p.base_hp,
            max_hp: p.base_hp,
            base_atk: p.base_atk,
            spd: p.base_spd,
            hunger: 100.0,
            energy: 100.0,
            position,
            heading: 0.0,
            alive: true,
            death_cause: None,
            age: 0.0,
            kills: 0,
            gather_count: 0,
            inventory: Inventory::new(),
            equipment: Equipment::default(),
            strategy: StrategyMemory::default(),
            village: None,
            activity: Activity::Idle,
            cooldowns: Cooldowns::default(),
            fear: None,
            goal: None,
        }
    }

    /// A creature with random species, personality, name, and slightly
    /// varied starting vitals.
    pub fn random(id: CreatureId, position: Vec2, rng: &mut impl Rng) -> Self {
        let species = Species::ALL
            .get(rng.random_range(0..Species::ALL.len()))
            .copied()
            .unwrap_or(Species::Mossling);
        let personality = Personality::ALL
            .get(rng.random_range(0..Personality::ALL.len()))
            .copied()
            .unwrap_or(Personality::Curious);
        let name = NAME_POOL
            .get(rng.random_range(0..NAME_POOL.len()))
            .copied()
            .unwrap_or("Wildkin");
        let mut creature = Self::new(id, name, species, personality, position);
        creature.hunger = rng.random_range(60.0..=100.0);
        creature.energy = rng.random_range(60.0..=100.0);
        creature.heading = rng.random_range(0.0..core::f32::consts::TAU);
        creature
    }

    /// Static species profile.
    pub const fn profile(&self) -> SpeciesProfile {
        profile(self.species)
    }

    /// Personality traits.
    pub const fn traits(&self) -> PersonalityTraits {
        traits(self.personality)
    }

    /// Elemental type.
    pub const fn element(&self) -> Element {
        self.profile().element
    }

    /// HP as a fraction of max.
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp <= 0.0 {
            0.0
        } else {
            (self.hp / self.max_hp).clamp(0.0, 1.0)
        }
    }

    /// Effective attack including weapon bonus.
    pub fn attack(&self) -> f32 {
        self.base_atk + self.equipment.bonus(EquipSlot::Weapon) as f32
    }

    /// Flat damage reduction from armor.
    pub fn armor(&self) -> f32 {
        self.equipment.bonus(EquipSlot::Armor) as f32
    }

    /// Current top speed, scaled down when tired.
    pub fn speed(&self, vitals: &VitalsConfig) -> f32 {
        self.spd * crate::vitals::speed_factor(self.energy, vitals)
    }

    /// Inventory slots available.
    pub fn capacity(&self, config: &CreatureConfig) -> usize {
        if self.has_building(BuildingKind::Storage) {
            config.inventory.storage_capacity
        } else {
            config.inventory.base_capacity
        }
    }

    /// Whether the creature owns a building of `kind`.
    pub fn has_building(&self, kind: BuildingKind) -> bool {
        self.village.as_ref().is_some_and(|v| v.has(kind))
    }

    /// Home coordinates, if claimed.
    pub fn home(&self) -> Option<Vec2> {
        self.village.as_ref().map(|v| v.home)
    }

    /// Within `radius` of home.
    pub fn is_home(&self, radius: f32) -> bool {
        self.home().is_some_and(|h| h.distance(self.position) <= radius)
    }

    /// Renderer label.
    pub const fn state_label(&self) -> StateLabel {
        if self.alive {
            self.activity.label()
        } else {
            StateLabel::Dead
        }
    }

    /// Reset volatile state to safe defaults (after load or a failed update).
    pub fn reset_volatile(&mut self) {
        self.activity = if self.alive { Activity::Idle } else { Activity::Dead };
        self.cooldowns = Cooldowns::default();
        self.fear = None;
        self.goal = None;
    }

    /// Read-only snapshot for the renderer.
    #[allow(clippy::cast_sign_loss)]
    pub fn view(&self, height: f32) -> CreatureView {
        CreatureView {
            id: self.id,
            name: self.name.clone(),
            species: self.species,
            personality: self.personality,
            position: self.position,
            height,
            heading: self.heading,
            state: self.state_label(),
            hp: self.hp.max(0.0).round() as u32,
            max_hp: self.max_hp.max(0.0).round() as u32,
            hunger: self.hunger,
            energy: self.energy,
            level: self.level,
            weapon: self.equipment.weapon.map(|e| e.kind),
            armor: self.equipment.armor.map(|e| e.kind),
            inventory_len: u32::try_from(self.inventory.len()).unwrap_or(u32::MAX),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn test_creature() -> Creature {
        Creature::new(CreatureId(0), "Moss", Species::Mossling, Personality::Curious, Vec2::ZERO)
    }

    #[test]
    fn new_creature_is_idle_and_full() {
        let c = test_creature();
        assert_eq!(c.state_label(), StateLabel::Idle);
        assert!((c.hp - c.max_hp).abs() < f32::EPSILON);
        assert_eq!(c.level, 1);
    }

    #[test]
    fn capacity_grows_with_storage() {
        let cfg = CreatureConfig::default();
        let mut c = test_creature();
        assert_eq!(c.capacity(&cfg), 12);
        let mut village = Village::new(Vec2::ZERO);
        village.add_building(BuildingKind::Storage, Vec2::ZERO);
        c.village = Some(village);
        assert_eq!(c.capacity(&cfg), 20);
    }

    #[test]
    fn volatile_fields_are_not_persisted() {
        let mut c = test_creature();
        c.activity = Activity::Sleeping { remaining: 5.0 };
        c.cooldowns.combat = 3.0;
        let json = serde_json::to_string(&c).unwrap();
        let back: Creature = serde_json::from_str(&json).unwrap();
        assert_eq!(back.activity, Activity::Idle);
        assert!(back.cooldowns.combat.abs() < f32::EPSILON);
        assert_eq!(back.inventory, c.inventory);
        assert_eq!(back.name, c.name);
    }

    #[test]
    fn dead_creature_labels_dead() {
        let mut c = test_creature();
        c.alive = false;
        c.reset_volatile();
        assert_eq!(c.activity, Activity::Dead);
        assert_eq!(c.state_label(), StateLabel::Dead);
    }

    #[test]
    fn random_creature_has_valid_vitals() {
        let mut rng = StdRng::seed_from_u64(9);
        for i in 0..20 {
            let c = Creature::random(CreatureId(i), Vec2::ZERO, &mut rng);
            assert!((60.0..=100.0).contains(&c.hunger));
            assert!((60.0..=100.0).contains(&c.energy));
        }
    }

    #[test]
    fn view_reflects_equipment() {
        let mut c = test_creature();
        c.inventory.add(Item::new(ItemKind::StoneBlade), 12).unwrap();
        c.equipment.auto_equip(&mut c.inventory);
        let view = c.view(0.0);
        assert_eq!(view.weapon, Some(ItemKind::StoneBlade));
        assert!((c.attack() - (c.base_atk + 8.0)).abs() < f32::EPSILON);
    }
}
