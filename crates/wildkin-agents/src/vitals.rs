//! Vital mechanics applied to creatures each tick.
//!
//! - Hunger drains at the species rate (not while eating)
//! - Energy drains at the species rate, faster while moving
//! - While asleep energy and HP regenerate instead; an owned shelter nearby
//!   doubles energy regeneration
//! - At zero hunger HP drains until death
//! - Age advances
//!
//! The caller decides whether the creature is sheltered.

use wildkin_types::DeathCause;

use crate::config::VitalsConfig;
use crate::creature::{Activity, Creature};

/// Result of applying one tick of vital mechanics to a creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VitalTickResult {
    /// If the creature died during this tick, the cause of death.
    pub death: Option<DeathCause>,
}

/// Speed multiplier from energy: full speed at or above `slow_energy`,
/// falling linearly to `min_speed_factor` at zero energy.
pub fn speed_factor(energy: f32, config: &VitalsConfig) -> f32 {
    if energy >= config.slow_energy || config.slow_energy <= 0.0 {
        return 1.0;
    }
    let t = (energy / config.slow_energy).clamp(0.0, 1.0);
    config.min_speed_factor + (1.0 - config.min_speed_factor) * t
}

/// Apply `dt` seconds of vital mechanics to a creature.
///
/// # Order of operations
///
/// 1. Age the creature
/// 2. Drain hunger (skipped while eating)
/// 3. Drain energy, or regenerate energy and HP while asleep
/// 4. Apply starvation damage at zero hunger
/// 5. Check death by HP depletion
pub fn apply_vital_tick(
    creature: &mut Creature,
    config: &VitalsConfig,
    dt: f32,
    sheltered: bool,
) -> VitalTickResult {
    let profile = creature.profile();
    creature.age += dt;

    if !matches!(creature.activity, Activity::Eating { .. }) {
        creature.hunger = (creature.hunger - profile.hunger_drain * dt).clamp(0.0, config.max_vital);
    }

    if matches!(creature.activity, Activity::Sleeping { .. }) {
        let regen = if sheltered {
            config.shelter_sleep_regen
        } else {
            config.sleep_regen
        };
        creature.energy = (creature.energy + regen * dt).min(config.max_vital);
        creature.hp = (creature.hp + config.sleep_hp_regen * dt).min(creature.max_hp);
    } else {
        let factor = if creature.activity.is_moving() {
            config.moving_energy_factor
        } else {
            1.0
        };
        creature.energy = (creature.energy - profile.energy_drain * factor * dt).max(0.0);
    }

    if creature.hunger <= 0.0 {
        creature.hp -= config.starvation_damage * dt;
    }

    if creature.hp <= 0.0 {
        creature.hp = 0.0;
        return VitalTickResult {
            death: Some(DeathCause::Starvation),
        };
    }
    VitalTickResult { death: None }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wildkin_types::{CreatureId, Personality, Species, Vec2};

    use super::*;

    fn test_creature() -> Creature {
        Creature::new(CreatureId(0), "Fern", Species::Mossling, Personality::Curious, Vec2::ZERO)
    }

    #[test]
    fn hunger_and_energy_drain() {
        let cfg = VitalsConfig::default();
        let mut c = test_creature();
        let result = apply_vital_tick(&mut c, &cfg, 1.0, false);
        assert_eq!(result.death, None);
        assert!((c.hunger - 99.75).abs() < 1e-4);
        assert!((c.energy - 99.85).abs() < 1e-4);
        assert!((c.age - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn moving_drains_energy_faster() {
        let cfg = VitalsConfig::default();
        let mut c = test_creature();
        c.activity = Activity::Wandering { target: Vec2::new(5.0, 5.0) };
        apply_vital_tick(&mut c, &cfg, 1.0, false);
        assert!((c.energy - 99.7).abs() < 1e-4);
    }

    #[test]
    fn eating_pauses_hunger() {
        let cfg = VitalsConfig::default();
        let mut c = test_creature();
        c.hunger = 50.0;
        c.activity = Activity::Eating {
            source: None,
            remaining: 3.0,
            restore: 25.0,
        };
        apply_vital_tick(&mut c, &cfg, 1.0, false);
        assert!((c.hunger - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn shelter_doubles_sleep_regen() {
        let cfg = VitalsConfig::default();
        let mut open = test_creature();
        open.energy = 10.0;
        open.activity = Activity::Sleeping { remaining: 10.0 };
        let mut sheltered = open.clone();
        apply_vital_tick(&mut open, &cfg, 1.0, false);
        apply_vital_tick(&mut sheltered, &cfg, 1.0, true);
        assert!((open.energy - 14.0).abs() < 1e-4);
        assert!((sheltered.energy - 18.0).abs() < 1e-4);
    }

    #[test]
    fn starvation_kills() {
        let cfg = VitalsConfig::default();
        let mut c = test_creature();
        c.hunger = 0.0;
        c.hp = 1.5;
        assert_eq!(apply_vital_tick(&mut c, &cfg, 1.0, false).death, None);
        assert_eq!(
            apply_vital_tick(&mut c, &cfg, 1.0, false).death,
            Some(DeathCause::Starvation)
        );
        assert!(c.hp.abs() < f32::EPSILON);
    }

    #[test]
    fn low_energy_slows_to_half() {
        let cfg = VitalsConfig::default();
        assert!((speed_factor(100.0, &cfg) - 1.0).abs() < f32::EPSILON);
        assert!((speed_factor(25.0, &cfg) - 1.0).abs() < f32::EPSILON);
        assert!((speed_factor(0.0, &cfg) - 0.5).abs() < f32::EPSILON);
        assert!((speed_factor(12.5, &cfg) - 0.75).abs() < 1e-5);
    }
}
