//! Long-running sweeps that check state invariants after every tick.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use wildkin_agents::Activity;
use wildkin_core::{SimulationConfig, SimulationState};
use wildkin_types::StateLabel;

fn check(state: &SimulationState) {
    let config = &state.config.creatures;
    let max_vital = config.vitals.max_vital;

    for (index, creature) in state.creatures.iter().enumerate() {
        assert_eq!(creature.id.index(), index);
        assert!(creature.inventory.len() <= creature.capacity(config));
        assert!((0.0..=max_vital).contains(&creature.hunger), "hunger {}", creature.hunger);
        assert!((0.0..=max_vital).contains(&creature.energy), "energy {}", creature.energy);
        assert!(creature.hp >= 0.0 && creature.hp <= creature.max_hp);
        assert!(creature.position.x.abs() <= state.world.half_extent);
        assert!(creature.position.z.abs() <= state.world.half_extent);

        if creature.alive {
            assert_ne!(creature.state_label(), StateLabel::Dead);
        } else {
            assert_eq!(creature.activity, Activity::Dead);
            assert!(creature.death_cause.is_some());
        }

        if let Activity::Fighting(fight) = &creature.activity {
            assert!(fight.hits_dealt <= config.combat.hit_cap);
            assert_ne!(fight.opponent, creature.id);
        }
    }

    for resource in &state.world.resources {
        match resource.gatherer {
            Some(holder) => {
                assert!(resource.being_gathered);
                assert!(!resource.depleted);
                let holder = &state.creatures[holder.index()];
                assert!(
                    matches!(holder.activity, Activity::Gathering { resource: id, .. } if id == resource.id),
                    "{} holds {} while {:?}",
                    holder.id,
                    resource.id,
                    holder.activity
                );
            }
            None => assert!(!resource.being_gathered),
        }
    }
}

fn sweep(seed: u64, ticks: usize) {
    let mut config = SimulationConfig::default();
    config.world.seed = seed;
    config.world.creature_count = 16;
    config.world.half_extent = 30.0;
    let mut state = SimulationState::new(config).unwrap();
    check(&state);
    for _ in 0..ticks {
        state.run_tick(0.1, true).unwrap();
        check(&state);
    }
}

#[test]
fn invariants_hold_across_seeds() {
    for seed in [1, 7, 42, 1234] {
        sweep(seed, 1_500);
    }
}

#[test]
fn invariants_hold_under_coarse_steps() {
    let mut config = SimulationConfig::default();
    config.world.seed = 99;
    config.world.creature_count = 12;
    let mut state = SimulationState::new(config).unwrap();
    for _ in 0..600 {
        state.run_tick(1.0, false).unwrap();
        check(&state);
    }
}

#[test]
fn dead_creatures_stay_dead() {
    let mut config = SimulationConfig::default();
    config.world.seed = 5;
    config.world.creature_count = 8;
    let mut state = SimulationState::new(config).unwrap();
    state.creatures[0].hunger = 0.0;
    state.creatures[0].hp = 1.0;
    let mut died_at = None;
    for tick in 0..200 {
        state.run_tick(0.5, true).unwrap();
        if !state.creatures[0].alive {
            died_at.get_or_insert(tick);
            assert_eq!(state.creatures[0].state_label(), StateLabel::Dead);
        }
    }
    assert!(died_at.is_some());
    assert!(!state.creatures[0].alive);
    check(&state);
}
