//! Save/load behavior across the public persistence API.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use wildkin_core::{SimulationConfig, SimulationState, Snapshot, load_or_regenerate, try_save};
use wildkin_types::StateLabel;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("wildkin-it-{name}-{}.json", std::process::id()))
}

fn config(seed: u64) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.world.seed = seed;
    config.world.creature_count = 6;
    config
}

fn run(state: &mut SimulationState, ticks: usize) {
    for _ in 0..ticks {
        state.run_tick(0.1, true).unwrap();
    }
}

#[test]
fn load_restores_durable_state() {
    let path = temp_path("durable");
    let mut state = SimulationState::new(config(21)).unwrap();
    run(&mut state, 300);
    assert!(try_save(&state, &path));

    let loaded = load_or_regenerate(&config(21), &path).unwrap();
    let restored = loaded.state;

    let mut expected = state.creatures.clone();
    for creature in &mut expected {
        creature.reset_volatile();
    }
    assert_eq!(restored.creatures, expected);
    assert_eq!(restored.species_memory, state.species_memory);
    assert_eq!(restored.world.resource_states(), state.world.resource_states());
    assert!((restored.clock.elapsed() - state.clock.elapsed()).abs() < 1e-9);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn save_load_save_is_stable() {
    let path = temp_path("stable");
    let mut state = SimulationState::new(config(22)).unwrap();
    run(&mut state, 150);
    let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();

    let first = Snapshot::capture(&state, at);
    first.save_to_path(&path).unwrap();
    let restored = Snapshot::load_from_path(&path).unwrap().restore(config(22)).unwrap();
    let second = Snapshot::capture(&restored, at);

    assert_eq!(first.creatures, second.creatures);
    assert_eq!(first.resources, second.resources);
    assert_eq!(first.species_memory, second.species_memory);
    assert_eq!(first.seed, second.seed);
    assert_eq!(second.saved_at, at);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn restored_creatures_start_idle_or_dead() {
    let path = temp_path("volatile");
    let mut state = SimulationState::new(config(23)).unwrap();
    state.creatures[1].alive = false;
    state.creatures[1].hp = 0.0;
    run(&mut state, 50);
    assert!(try_save(&state, &path));

    let restored = load_or_regenerate(&config(23), &path).unwrap().state;
    for creature in &restored.creatures {
        let expected = if creature.alive { StateLabel::Idle } else { StateLabel::Dead };
        assert_eq!(creature.state_label(), expected);
        assert!(creature.goal.is_none());
        assert!(creature.fear.is_none());
    }
    assert!(!restored.creatures[1].alive);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn restored_simulation_keeps_running() {
    let path = temp_path("continue");
    let mut state = SimulationState::new(config(24)).unwrap();
    run(&mut state, 100);
    assert!(try_save(&state, &path));

    let mut restored = load_or_regenerate(&config(24), &path).unwrap().state;
    let start = restored.clock.elapsed();
    run(&mut restored, 100);
    assert!((restored.clock.elapsed() - start - 10.0).abs() < 1e-3);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn snapshot_seed_overrides_config_seed() {
    let path = temp_path("seed");
    let state = SimulationState::new(config(25)).unwrap();
    assert!(try_save(&state, &path));

    let restored = load_or_regenerate(&config(99), &path).unwrap().state;
    assert_eq!(restored.config.world.seed, 25);
    assert_eq!(restored.world.resource_states(), state.world.resource_states());
    std::fs::remove_file(&path).unwrap();
}
