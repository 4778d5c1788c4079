//! Statistical checks on the combat tables.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wildkin_agents::combat::{self, Engagement, compute_blow};
use wildkin_agents::{Activity, Creature, CreatureConfig, SimContext, SpeciesMemory};
use wildkin_types::{CreatureId, Personality, SimEvent, Species, Vec2};
use wildkin_world::{FlatTerrain, WorldState};

const SAMPLES: u32 = 10_000;

/// Arena for one-blow trials: a fresh world reused across trials.
struct Arena {
    world: WorldState,
    memory: SpeciesMemory,
    config: CreatureConfig,
    rng: StdRng,
    events: Vec<SimEvent>,
}

impl Arena {
    fn new(seed: u64) -> Self {
        Self {
            world: WorldState::new(40.0, Box::new(FlatTerrain::default()), Vec::new(), Vec::new(), Vec::new())
                .unwrap(),
            memory: SpeciesMemory::default(),
            config: CreatureConfig::default(),
            rng: StdRng::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Engage, land exactly one blow on a defender starting at `start_hp`,
    /// and report the defender's HP fraction after the blow and whether it
    /// fled.
    fn one_blow(&mut self, start_hp: f32) -> (f32, bool) {
        let mut attacker = Creature::new(CreatureId(0), "Attacker", Species::Tidecrab, Personality::Curious, Vec2::ZERO);
        attacker.base_atk = 10.0;
        let mut defender = Creature::new(
            CreatureId(1),
            "Defender",
            Species::Stonebeak,
            Personality::Curious,
            Vec2::new(1.0, 0.0),
        );
        defender.max_hp = 100.0;
        defender.hp = start_hp;
        let mut cs = vec![attacker, defender];
        self.events.clear();
        let mut ctx = SimContext {
            world: &mut self.world,
            species_memory: &mut self.memory,
            config: &self.config,
            rng: &mut self.rng,
            events: &mut self.events,
        };
        combat::engage(&mut cs, 0, 1, &mut ctx);
        let hit_interval = ctx.config.combat.hit_interval;
        combat::update_fight(&mut cs, 0, Engagement::new(CreatureId(1), true), &mut ctx, hit_interval * 1.5);
        assert!(cs[1].hp < start_hp, "the blow must land");
        (cs[1].hp_fraction(), matches!(cs[1].activity, Activity::Fleeing { .. }))
    }
}

/// Expected flee chance for the band the post-blow fraction falls in.
fn band(fraction: f32) -> f64 {
    if fraction > 0.6 {
        0.0
    } else if fraction > 0.4 {
        0.2
    } else if fraction > 0.2 {
        0.5
    } else {
        0.75
    }
}

#[test]
fn flee_rates_follow_hp_after_the_blow() {
    let mut arena = Arena::new(77);
    // Damage lands in 8..=12, so each start keeps every trial in one band.
    for start_hp in [95.0, 60.0, 40.0, 20.0] {
        let mut expected = None;
        let mut fled = 0_u32;
        for _ in 0..SAMPLES {
            let (fraction, ran) = arena.one_blow(start_hp);
            let chance = band(fraction);
            assert_eq!(*expected.get_or_insert(chance), chance, "start {start_hp} straddles a band");
            if ran {
                fled += 1;
            }
        }
        let observed = f64::from(fled) / f64::from(SAMPLES);
        let expected = expected.unwrap();
        assert!(
            (observed - expected).abs() < 0.03,
            "start hp {start_hp}: observed {observed}, expected {expected}"
        );
    }
}

#[test]
fn healthy_defender_never_flees() {
    let mut arena = Arena::new(3);
    for _ in 0..1_000 {
        let (fraction, ran) = arena.one_blow(100.0);
        assert!(fraction > 0.6);
        assert!(!ran);
    }
}

fn fighter(species: Species) -> Creature {
    Creature::new(CreatureId(0), "Test", species, Personality::Curious, Vec2::ZERO)
}

#[test]
fn damage_stays_inside_roll_window() {
    let cfg = CreatureConfig::default().combat;
    let mut attacker = fighter(Species::Tidecrab);
    attacker.base_atk = 10.0;
    // Water does not beat Earth.
    let defender = fighter(Species::Stonebeak);
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..1_000 {
        let roll = rng.random_range(cfg.damage_roll.0..=cfg.damage_roll.1);
        let blow = compute_blow(&attacker, &defender, roll, cfg.advantage, cfg.min_damage);
        assert!(!blow.super_effective);
        assert!((8..=12).contains(&blow.damage), "damage {}", blow.damage);
    }
}

#[test]
fn advantage_raises_mean_damage() {
    let cfg = CreatureConfig::default().combat;
    let mut fox = fighter(Species::Emberfox);
    fox.base_atk = 10.0;
    let moss = fighter(Species::Mossling);
    let rock = fighter(Species::Stonebeak);
    let mut rng = StdRng::seed_from_u64(5);
    let mut with = 0_u32;
    let mut without = 0_u32;
    for _ in 0..SAMPLES {
        let roll = rng.random_range(cfg.damage_roll.0..=cfg.damage_roll.1);
        with += compute_blow(&fox, &moss, roll, cfg.advantage, cfg.min_damage).damage;
        without += compute_blow(&fox, &rock, roll, cfg.advantage, cfg.min_damage).damage;
    }
    let ratio = f64::from(with) / f64::from(without);
    assert!((ratio - 1.5).abs() < 0.05, "ratio {ratio}");
}

#[test]
fn weak_hit_is_floored_at_minimum() {
    let cfg = CreatureConfig::default().combat;
    let mut attacker = fighter(Species::Tidecrab);
    attacker.base_atk = 0.1;
    let defender = fighter(Species::Stonebeak);
    let blow = compute_blow(&attacker, &defender, 0.8, cfg.advantage, cfg.min_damage);
    assert_eq!(blow.damage, 1);
}
