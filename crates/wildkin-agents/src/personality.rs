//! Personality traits.
//!
//! Each of the eight personalities sets the thresholds that trigger eating
//! and sleeping, how eagerly the creature fights and pursues, which equipment
//! it crafts first, and how it values each item category.

use wildkin_types::{ItemCategory, Personality};

/// Which equipment slot a creature fills first when crafting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CraftBias {
    /// Weapons before armor.
    Weapon,
    /// Armor before weapons.
    Armor,
    /// Whichever gap is larger.
    Balanced,
}

/// Per-category valuation multipliers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueBias {
    /// Raw materials.
    pub material: f32,
    /// Food.
    pub food: f32,
    /// Weapons.
    pub weapon: f32,
    /// Armor.
    pub armor: f32,
    /// Consumables.
    pub consumable: f32,
}

impl ValueBias {
    const NEUTRAL: Self = Self {
        material: 1.0,
        food: 1.0,
        weapon: 1.0,
        armor: 1.0,
        consumable: 1.0,
    };

    /// Multiplier for an item category.
    pub const fn for_category(&self, category: ItemCategory) -> f32 {
        match category {
            ItemCategory::Material => self.material,
            ItemCategory::Food => self.food,
            ItemCategory::Weapon => self.weapon,
            ItemCategory::Armor => self.armor,
            ItemCategory::Consumable => self.consumable,
        }
    }
}

/// Behavioral parameters derived from a personality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonalityTraits {
    /// Hunger below which the creature seeks food (20--45).
    pub hunger_threshold: f32,
    /// Energy below which the creature sleeps (3--20).
    pub sleep_threshold: f32,
    /// Seconds a sleep lasts (15--40).
    pub sleep_duration: f32,
    /// Engagement multiplier.
    pub aggression: f32,
    /// Chase chance multiplier.
    pub chase: f32,
    /// Crafting preference.
    pub craft_bias: CraftBias,
    /// Valuation multipliers.
    pub value: ValueBias,
}

/// Look up the traits for a personality.
pub const fn traits(personality: Personality) -> PersonalityTraits {
    match personality {
        Personality::Aggressive => PersonalityTraits {
            hunger_threshold: 20.0,
            sleep_threshold: 8.0,
            sleep_duration: 20.0,
            aggression: 1.8,
            chase: 1.8,
            craft_bias: CraftBias::Weapon,
            value: ValueBias {
                weapon: 1.4,
                armor: 0.9,
                ..ValueBias::NEUTRAL
            },
        },
        Personality::Defensive => PersonalityTraits {
            hunger_threshold: 35.0,
            sleep_threshold: 15.0,
            sleep_duration: 30.0,
            aggression: 0.5,
            chase: 0.6,
            craft_bias: CraftBias::Armor,
            value: ValueBias {
                armor: 1.4,
                consumable: 1.2,
                ..ValueBias::NEUTRAL
            },
        },
        Personality::Brave => PersonalityTraits {
            hunger_threshold: 25.0,
            sleep_threshold: 3.0,
            sleep_duration: 15.0,
            aggression: 1.3,
            chase: 1.4,
            craft_bias: CraftBias::Weapon,
            value: ValueBias {
                weapon: 1.2,
                armor: 1.1,
                ..ValueBias::NEUTRAL
            },
        },
        Personality::Timid => PersonalityTraits {
            hunger_threshold: 45.0,
            sleep_threshold: 20.0,
            sleep_duration: 40.0,
            aggression: 0.3,
            chase: 0.3,
            craft_bias: CraftBias::Armor,
            value: ValueBias {
                armor: 1.3,
                consumable: 1.3,
                weapon: 0.8,
                ..ValueBias::NEUTRAL
            },
        },
        Personality::Curious => PersonalityTraits {
            hunger_threshold: 30.0,
            sleep_threshold: 10.0,
            sleep_duration: 25.0,
            aggression: 0.8,
            chase: 1.0,
            craft_bias: CraftBias::Balanced,
            value: ValueBias {
                material: 1.2,
                ..ValueBias::NEUTRAL
            },
        },
        Personality::Lazy => PersonalityTraits {
            hunger_threshold: 40.0,
            sleep_threshold: 18.0,
            sleep_duration: 40.0,
            aggression: 0.6,
            chase: 0.5,
            craft_bias: CraftBias::Balanced,
            value: ValueBias {
                material: 0.9,
                food: 1.2,
                ..ValueBias::NEUTRAL
            },
        },
        Personality::Greedy => PersonalityTraits {
            hunger_threshold: 30.0,
            sleep_threshold: 10.0,
            sleep_duration: 25.0,
            aggression: 1.0,
            chase: 1.2,
            craft_bias: CraftBias::Balanced,
            value: ValueBias {
                material: 1.3,
                weapon: 1.1,
                ..ValueBias::NEUTRAL
            },
        },
        Personality::Social => PersonalityTraits {
            hunger_threshold: 35.0,
            sleep_threshold: 12.0,
            sleep_duration: 30.0,
            aggression: 0.5,
            chase: 0.7,
            craft_bias: CraftBias::Balanced,
            value: ValueBias {
                food: 1.2,
                consumable: 1.1,
                ..ValueBias::NEUTRAL
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_within_documented_ranges() {
        for p in Personality::ALL {
            let t = traits(p);
            assert!((20.0..=45.0).contains(&t.hunger_threshold), "{p:?}");
            assert!((3.0..=20.0).contains(&t.sleep_threshold), "{p:?}");
            assert!((15.0..=40.0).contains(&t.sleep_duration), "{p:?}");
        }
    }

    #[test]
    fn biases_follow_temperament() {
        assert_eq!(traits(Personality::Aggressive).craft_bias, CraftBias::Weapon);
        assert_eq!(traits(Personality::Defensive).craft_bias, CraftBias::Armor);
        assert!(traits(Personality::Aggressive).chase > traits(Personality::Timid).chase);
    }
}
