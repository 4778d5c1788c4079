//! Static species profiles.
//!
//! Read-only input to every system: base stats, behavior weights, drain
//! rates, and the elemental type used for combat advantage.

use wildkin_types::{Element, Species};

/// Base stats and behavior weights for one species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesProfile {
    /// Elemental type.
    pub element: Element,
    /// Starting max HP.
    pub base_hp: f32,
    /// Starting attack.
    pub base_atk: f32,
    /// Top walking speed in units per second.
    pub base_spd: f32,
    /// Engagement weight in `[0, 1]`.
    pub aggression: f32,
    /// Hunger lost per second.
    pub hunger_drain: f32,
    /// Energy lost per second while still.
    pub energy_drain: f32,
    /// Preferred wander distance.
    pub wander_range: f32,
}

/// Look up the profile for a species.
pub const fn profile(species: Species) -> SpeciesProfile {
    match species {
        Species::Emberfox => SpeciesProfile {
            element: Element::Fire,
            base_hp: 90.0,
            base_atk: 14.0,
            base_spd: 4.2,
            aggression: 0.8,
            hunger_drain: 0.40,
            energy_drain: 0.25,
            wander_range: 14.0,
        },
        Species::Tidecrab => SpeciesProfile {
            element: Element::Water,
            base_hp: 120.0,
            base_atk: 10.0,
            base_spd: 2.8,
            aggression: 0.4,
            hunger_drain: 0.30,
            energy_drain: 0.18,
            wander_range: 8.0,
        },
        Species::Mossling => SpeciesProfile {
            element: Element::Grass,
            base_hp: 100.0,
            base_atk: 9.0,
            base_spd: 3.2,
            aggression: 0.2,
            hunger_drain: 0.25,
            energy_drain: 0.15,
            wander_range: 10.0,
        },
        Species::Sparkwing => SpeciesProfile {
            element: Element::Electric,
            base_hp: 80.0,
            base_atk: 13.0,
            base_spd: 4.8,
            aggression: 0.6,
            hunger_drain: 0.45,
            energy_drain: 0.30,
            wander_range: 18.0,
        },
        Species::Stonebeak => SpeciesProfile {
            element: Element::Earth,
            base_hp: 130.0,
            base_atk: 12.0,
            base_spd: 2.6,
            aggression: 0.5,
            hunger_drain: 0.35,
            energy_drain: 0.20,
            wander_range: 9.0,
        },
        Species::Thornback => SpeciesProfile {
            element: Element::Grass,
            base_hp: 110.0,
            base_atk: 11.0,
            base_spd: 3.0,
            aggression: 0.7,
            hunger_drain: 0.30,
            energy_drain: 0.20,
            wander_range: 11.0,
        },
    }
}
