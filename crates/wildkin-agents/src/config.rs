//! Tunable constants for every per-creature system.
//!
//! [`CreatureConfig`] bundles one section per system. Every section derives
//! `Deserialize` with struct-level defaults, so a YAML file only needs to
//! name the values it overrides. The balance constants (flee table, chase
//! thresholds, engagement rates) are kept exactly as tuned rather than
//! re-derived.

use serde::{Deserialize, Serialize};

/// All creature tunables, grouped by system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureConfig {
    /// Hunger, energy, sleep, starvation.
    pub vitals: VitalsConfig,
    /// Berry bushes and eating.
    pub food: FoodConfig,
    /// Resource harvesting and navigation.
    pub gathering: GatheringConfig,
    /// Capacity, smart drop, ground pickup.
    pub inventory: InventoryConfig,
    /// Craft timing and potion use.
    pub crafting: CraftingConfig,
    /// Planner cadence.
    pub decision: DecisionConfig,
    /// Engagement, hit exchange, flee, chase, progression.
    pub combat: CombatConfig,
    /// Home claiming, building, deposits.
    pub village: VillageConfig,
}

/// Hunger and energy mechanics. Rates are per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsConfig {
    /// Upper bound for hunger and energy.
    pub max_vital: f32,
    /// Energy drain multiplier while moving.
    pub moving_energy_factor: f32,
    /// HP lost per second at zero hunger.
    pub starvation_damage: f32,
    /// Energy below which speed scales down.
    pub slow_energy: f32,
    /// Speed multiplier at zero energy.
    pub min_speed_factor: f32,
    /// Energy regained per second while sleeping in the open.
    pub sleep_regen: f32,
    /// Energy regained per second while sleeping near an owned shelter.
    pub shelter_sleep_regen: f32,
    /// Distance from a shelter that counts as sheltered.
    pub shelter_radius: f32,
    /// HP regained per second while sleeping.
    pub sleep_hp_regen: f32,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            max_vital: 100.0,
            moving_energy_factor: 2.0,
            starvation_damage: 1.0,
            slow_energy: 25.0,
            min_speed_factor: 0.5,
            sleep_regen: 4.0,
            shelter_sleep_regen: 8.0,
            shelter_radius: 4.0,
            sleep_hp_regen: 0.5,
        }
    }
}

/// Eating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodConfig {
    /// Distance at which a creature can eat from a bush.
    pub eat_radius: f32,
    /// Seconds a meal takes.
    pub eat_duration: f32,
    /// Hunger restored by a berry bush.
    pub bush_restore: f32,
    /// Hunger restored by a carried berry.
    pub berry_restore: f32,
    /// Bush respawn window in seconds.
    pub respawn: (f32, f32),
    /// How far a hungry creature looks for a bush.
    pub search_radius: f32,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            eat_radius: 1.6,
            eat_duration: 3.0,
            bush_restore: 60.0,
            berry_restore: 25.0,
            respawn: (30.0, 60.0),
            search_radius: 50.0,
        }
    }
}

/// Harvesting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatheringConfig {
    /// Distance at which a creature can start harvesting.
    pub arrival_radius: f32,
    /// Seconds a harvest takes.
    pub harvest_duration: f32,
    /// Energy spent per attempt, successful or not.
    pub energy_cost: f32,
    /// Failure chance for trees.
    pub tree_failure: f64,
    /// Failure chance for bushes.
    pub bush_failure: f64,
    /// Failure chance for rocks.
    pub rock_failure: f64,
    /// Minimum primary items per success.
    pub min_yield: u32,
    /// Maximum primary items per success.
    pub max_yield: u32,
    /// Chance a bush also yields a berry.
    pub berry_chance: f64,
    /// Chance a rock also yields a crystal.
    pub crystal_chance: f64,
    /// Seconds without progress before re-planning, as a random window.
    pub stuck_limit: (f32, f32),
    /// Minimum distance gain that counts as progress.
    pub progress_epsilon: f32,
}

impl Default for GatheringConfig {
    fn default() -> Self {
        Self {
            arrival_radius: 1.6,
            harvest_duration: 4.0,
            energy_cost: 3.0,
            tree_failure: 0.10,
            bush_failure: 0.15,
            rock_failure: 0.20,
            min_yield: 1,
            max_yield: 2,
            berry_chance: 0.30,
            crystal_chance: 0.06,
            stuck_limit: (2.5, 4.0),
            progress_epsilon: 0.1,
        }
    }
}

/// Inventory policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Slots without a storage building.
    pub base_capacity: usize,
    /// Slots once a storage building exists.
    pub storage_capacity: usize,
    /// Score a new item must beat the lowest slot by to be kept.
    pub drop_margin: f32,
    /// Radius scanned for ground items while idle.
    pub pickup_radius: f32,
    /// Per-second chance to pick up a duplicate food item.
    pub duplicate_food_rate: f64,
    /// Entries kept in strategy memory.
    pub strategy_memory: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            base_capacity: 12,
            storage_capacity: 20,
            drop_margin: 5.0,
            pickup_radius: 3.0,
            duplicate_food_rate: 0.05,
            strategy_memory: 6,
        }
    }
}

/// Crafting and consumables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraftingConfig {
    /// Seconds a craft takes.
    pub craft_duration: f32,
    /// Seconds between crafts.
    pub cooldown: f32,
    /// HP fraction below which a potion is drunk.
    pub potion_threshold: f32,
    /// HP fraction below which crafting a potion takes priority.
    pub hurt_threshold: f32,
    /// Seconds it takes to drink a potion.
    pub drink_duration: f32,
}

impl Default for CraftingConfig {
    fn default() -> Self {
        Self {
            craft_duration: 3.0,
            cooldown: 8.0,
            potion_threshold: 0.5,
            hurt_threshold: 0.7,
            drink_duration: 1.5,
        }
    }
}

/// Planner cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Re-plan interval while idle.
    pub fast_replan: f32,
    /// Re-plan interval once a plan is committed.
    pub slow_replan: f32,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            fast_replan: 1.0,
            slow_replan: 6.0,
        }
    }
}

/// Chance to flee after taking a hit, by remaining HP fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleeTable {
    /// HP above 60%.
    pub above_60: f64,
    /// HP above 40%.
    pub above_40: f64,
    /// HP above 20%.
    pub above_20: f64,
    /// Anything lower.
    pub critical: f64,
}

impl Default for FleeTable {
    fn default() -> Self {
        Self {
            above_60: 0.0,
            above_40: 0.2,
            above_20: 0.5,
            critical: 0.75,
        }
    }
}

impl FleeTable {
    /// Flee chance for an HP fraction in `[0, 1]`.
    pub fn chance(&self, hp_fraction: f32) -> f64 {
        if hp_fraction > 0.6 {
            self.above_60
        } else if hp_fraction > 0.4 {
            self.above_40
        } else if hp_fraction > 0.2 {
            self.above_20
        } else {
            self.critical
        }
    }
}

/// Combat, flee, chase, and progression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Distance within which two creatures may engage.
    pub engagement_radius: f32,
    /// Base engagement chance per second before aggression scaling.
    pub engagement_rate: f64,
    /// Chance a same-species pair skips the engagement roll.
    pub same_species_skip: f64,
    /// HP fraction below which a creature never initiates.
    pub min_initiator_hp: f32,
    /// Distance at which hits land.
    pub melee_range: f32,
    /// Seconds between alternating hits.
    pub hit_interval: f32,
    /// Random damage multiplier window.
    pub damage_roll: (f32, f32),
    /// Elemental advantage multiplier.
    pub advantage: f32,
    /// Minimum damage per hit.
    pub min_damage: f32,
    /// Hits each side may land before forced disengagement.
    pub hit_cap: u32,
    /// Seconds after which any fight is force-ended.
    pub safety_timeout: f32,
    /// Seconds before either participant may fight again.
    pub cooldown: f32,
    /// Flee chance table.
    pub flee: FleeTable,
    /// Seconds a flee sprint lasts.
    pub flee_duration: f32,
    /// Speed multiplier while fleeing.
    pub flee_speed: f32,
    /// Seconds a creature stays scared after fleeing.
    pub scared_duration: f32,
    /// Distance at which a scared creature sprints again.
    pub resprint_radius: f32,
    /// Winner HP fraction needed to chase.
    pub chase_min_hp: f32,
    /// Base chase chance before the personality multiplier.
    pub chase_chance: f64,
    /// Prey HP fraction below which the hunter goes for the kill.
    pub kill_threshold: f32,
    /// Chase chance when going for the kill.
    pub kill_chance: f64,
    /// Seconds a chase lasts.
    pub chase_duration: f32,
    /// Head start before catch checks begin.
    pub chase_grace: f32,
    /// Speed multiplier while chasing.
    pub chase_speed: f32,
    /// Distance that counts as caught.
    pub catch_distance: f32,
    /// Distance that counts as escaped.
    pub escape_distance: f32,
    /// Durability fraction at which a warning fires.
    pub durability_warning: f32,
    /// Flat XP per kill.
    pub kill_xp: u32,
    /// Extra XP per victim level.
    pub kill_xp_per_level: u32,
    /// XP per level needed to level up.
    pub xp_per_level: u32,
    /// Max HP gained per level.
    pub level_hp: f32,
    /// Attack gained per level.
    pub level_atk: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            engagement_radius: 6.0,
            engagement_rate: 0.06,
            same_species_skip: 0.9,
            min_initiator_hp: 0.25,
            melee_range: 1.8,
            hit_interval: 1.0,
            damage_roll: (0.8, 1.2),
            advantage: 1.5,
            min_damage: 1.0,
            hit_cap: 4,
            safety_timeout: 20.0,
            cooldown: 10.0,
            flee: FleeTable::default(),
            flee_duration: 4.0,
            flee_speed: 1.6,
            scared_duration: 12.0,
            resprint_radius: 8.0,
            chase_min_hp: 0.4,
            chase_chance: 0.3,
            kill_threshold: 0.2,
            kill_chance: 0.95,
            chase_duration: 8.0,
            chase_grace: 1.0,
            chase_speed: 1.3,
            catch_distance: 1.5,
            escape_distance: 25.0,
            durability_warning: 0.2,
            kill_xp: 20,
            kill_xp_per_level: 5,
            xp_per_level: 50,
            level_hp: 10.0,
            level_atk: 2.0,
        }
    }
}

/// Settlements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VillageConfig {
    /// Lifetime gathers needed to claim a home.
    pub home_threshold: u32,
    /// Seconds a build takes.
    pub build_duration: f32,
    /// Distance from home that counts as being home.
    pub home_radius: f32,
    /// Food items kept when depositing.
    pub food_reserve: u32,
    /// Items of each material kept when depositing.
    pub material_reserve: u32,
    /// Maximum items a storage building holds.
    pub storage_limit: usize,
    /// Walk home to sleep only within this distance.
    pub sleep_detour: f32,
}

impl Default for VillageConfig {
    fn default() -> Self {
        Self {
            home_threshold: 8,
            build_duration: 10.0,
            home_radius: 3.0,
            food_reserve: 2,
            material_reserve: 3,
            storage_limit: 40,
            sleep_detour: 60.0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn flee_table_buckets() {
        let table = FleeTable::default();
        assert!(table.chance(0.9).abs() < f64::EPSILON);
        assert!((table.chance(0.5) - 0.2).abs() < f64::EPSILON);
        assert!((table.chance(0.3) - 0.5).abs() < f64::EPSILON);
        assert!((table.chance(0.1) - 0.75).abs() < f64::EPSILON);
        // Boundaries are exclusive.
        assert!((table.chance(0.6) - 0.2).abs() < f64::EPSILON);
        assert!((table.chance(0.2) - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: CreatureConfig =
            serde_json::from_str(r#"{"combat": {"hit_cap": 6}}"#).unwrap();
        assert_eq!(cfg.combat.hit_cap, 6);
        assert!((cfg.combat.engagement_radius - 6.0).abs() < f32::EPSILON);
        assert_eq!(cfg.inventory.base_capacity, 12);
    }
}
