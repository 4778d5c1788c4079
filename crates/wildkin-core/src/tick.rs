//! Tick cycle: the per-step loop that drives the Wildkin simulation.
//!
//! Each tick runs through these phases, in order:
//!
//! 1. **Clock** -- validate the step and advance simulated time. A bad step
//!    is rejected here, before anything else changes.
//!
//! 2. **World** -- count down resource regrowth (relocating the objects that
//!    finish) and berry bush respawns.
//!
//! 3. **Creatures** -- update every creature in index order. Each update
//!    mutates shared state in place, so later creatures see what earlier
//!    ones claimed, engaged, or dropped this tick. First claim wins.
//!
//! 4. **Drops** -- count down dropped items and despawn the expired ones.
//!
//! 5. **Log** -- render the tick's events into the rolling activity log.
//!    When the tick is suppressed (an early catch-up sub-step) the events
//!    are discarded after logging and the summary carries none.
//!
//! All per-creature failures degrade to an idle or re-plan state inside the
//! agent systems; nothing a creature does can fail the tick.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};
use wildkin_agents::movement::BODY_RADIUS;
use wildkin_agents::{Creature, SimContext, SpeciesMemory, update_creature};
use wildkin_types::{CreatureId, CreatureView, LogEntry, SimEvent, Vec2};
use wildkin_world::{WorldState, create_starting_world, random_open_position};

use crate::clock::{ClockError, WorldClock};
use crate::config::SimulationConfig;
use crate::log::ActivityLog;

/// Extra clearance kept between a spawn point and any obstacle.
const SPAWN_CLEARANCE: f32 = 0.6;

/// Share of the world's half extent used for spawn positions.
const SPAWN_SPREAD: f32 = 0.8;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// A world operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: wildkin_world::WorldError,
    },
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Simulated seconds after this tick.
    pub time: f64,
    /// Events for the renderer. Empty for suppressed ticks.
    pub events: Vec<SimEvent>,
    /// Creatures alive at the end of the tick.
    pub alive: usize,
    /// World objects that finished regrowing.
    pub regrown: usize,
    /// Dropped items that despawned.
    pub despawned: usize,
}

/// The whole simulation: world arena, creature arena, and shared state.
///
/// Creatures are never removed; a dead creature stays in the arena so that
/// [`CreatureId`]s remain valid indices.
pub struct SimulationState {
    /// The shared world.
    pub world: WorldState,
    /// Every creature ever spawned, indexed by [`CreatureId`].
    pub creatures: Vec<Creature>,
    /// Cross-creature death statistics.
    pub species_memory: SpeciesMemory,
    /// Simulated time.
    pub clock: WorldClock,
    /// Rolling human-readable activity.
    pub log: ActivityLog,
    /// Configuration the simulation was built from.
    pub config: SimulationConfig,
    rng: StdRng,
}

impl SimulationState {
    /// A fresh world populated with `config.world.creature_count` creatures,
    /// fully determined by `config.world.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::World`] if the configured layout is invalid.
    pub fn new(config: SimulationConfig) -> Result<Self, TickError> {
        let mut rng = StdRng::seed_from_u64(config.world.seed);
        let world = create_starting_world(&config.world.layout(), &mut rng)?;
        let mut state = Self {
            world,
            creatures: Vec::new(),
            species_memory: SpeciesMemory::default(),
            clock: WorldClock::new(),
            log: ActivityLog::new(),
            config,
            rng,
        };
        state.populate();
        info!(
            seed = state.config.world.seed,
            creatures = state.creatures.len(),
            resources = state.world.resources.len(),
            "fresh world generated"
        );
        Ok(state)
    }

    /// Assemble a simulation from restored parts. Volatile creature state is
    /// reset to safe defaults.
    pub(crate) fn from_parts(
        config: SimulationConfig,
        world: WorldState,
        mut creatures: Vec<Creature>,
        species_memory: SpeciesMemory,
        clock: WorldClock,
    ) -> Self {
        for creature in &mut creatures {
            creature.reset_volatile();
        }
        let rng = StdRng::seed_from_u64(config.world.seed ^ clock.elapsed().to_bits());
        Self {
            world,
            creatures,
            species_memory,
            clock,
            log: ActivityLog::new(),
            config,
            rng,
        }
    }

    fn populate(&mut self) {
        for _ in 0..self.config.world.creature_count {
            self.spawn_creature();
        }
    }

    /// Add one random creature at a random open position.
    pub fn spawn_creature(&mut self) -> CreatureId {
        let id = CreatureId::from_index(self.creatures.len());
        let half = self.world.half_extent;
        let position = random_open_position(
            &mut self.rng,
            Vec2::ZERO,
            half * SPAWN_SPREAD,
            half,
            &self.world.obstacles,
            BODY_RADIUS + SPAWN_CLEARANCE,
            None,
        )
        .unwrap_or(Vec2::ZERO);
        let creature = Creature::random(id, position, &mut self.rng);
        debug!(creature = %id, name = %creature.name, species = creature.species.label(), "creature spawned");
        self.creatures.push(creature);
        id
    }

    /// Throw everything away and regenerate the default world from the seed.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::World`] if the configured layout is invalid; the
    /// current state is left untouched in that case.
    pub fn reset(&mut self) -> Result<(), TickError> {
        let fresh = Self::new(self.config.clone())?;
        *self = fresh;
        info!("simulation reset");
        Ok(())
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// With `emit` false the tick's events are logged and then discarded.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::Clock`] if `dt` is not a positive finite number
    /// or the tick counter overflows. Nothing is mutated in that case.
    pub fn run_tick(&mut self, dt: f32, emit: bool) -> Result<TickSummary, TickError> {
        let tick = self.clock.advance(dt)?;

        let regrown = self.world.regrow(dt, &mut self.rng).len();
        self.world.tick_food(dt);

        let mut events = Vec::new();
        {
            let mut ctx = SimContext {
                world: &mut self.world,
                species_memory: &mut self.species_memory,
                config: &self.config.creatures,
                rng: &mut self.rng,
                events: &mut events,
            };
            for index in 0..self.creatures.len() {
                update_creature(&mut self.creatures, index, &mut ctx, dt);
            }
        }

        let despawned = self.world.tick_drops(dt);

        let creatures = &self.creatures;
        self.log.record(self.clock.elapsed(), &events, |id| {
            creatures.get(id.index()).map_or("someone", |c| c.name.as_str())
        });
        if !emit {
            events.clear();
        }

        let alive = self.creatures.iter().filter(|c| c.alive).count();
        Ok(TickSummary {
            tick,
            time: self.clock.elapsed(),
            events,
            alive,
            regrown,
            despawned,
        })
    }

    /// Read-only snapshots of every live creature for the renderer.
    pub fn views(&self) -> Vec<CreatureView> {
        self.creatures
            .iter()
            .filter(|c| c.alive)
            .map(|c| c.view(self.world.height_at(c.position)))
            .collect()
    }

    /// The rolling activity log, oldest first.
    pub fn log_entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.log.entries()
    }

    /// Look up a creature by id.
    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.get(id.index())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn small_config(seed: u64) -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.world.seed = seed;
        config.world.creature_count = 4;
        config
    }

    #[test]
    fn fresh_world_has_configured_population() {
        let state = SimulationState::new(small_config(1)).unwrap();
        assert_eq!(state.creatures.len(), 4);
        for (i, c) in state.creatures.iter().enumerate() {
            assert_eq!(c.id.index(), i);
            assert!(c.position.x.abs() <= state.world.half_extent);
            assert!(c.position.z.abs() <= state.world.half_extent);
        }
        assert_eq!(state.views().len(), 4);
    }

    #[test]
    fn same_seed_same_world() {
        let a = SimulationState::new(small_config(9)).unwrap();
        let b = SimulationState::new(small_config(9)).unwrap();
        assert_eq!(a.creatures, b.creatures);
        assert_eq!(a.world.resource_states(), b.world.resource_states());
    }

    #[test]
    fn bad_step_changes_nothing() {
        let mut state = SimulationState::new(small_config(2)).unwrap();
        let before = state.creatures.clone();
        assert!(matches!(state.run_tick(-1.0, true), Err(TickError::Clock { .. })));
        assert_eq!(state.clock.tick(), 0);
        assert_eq!(state.creatures, before);
    }

    #[test]
    fn invalid_layout_is_a_world_error() {
        let mut config = small_config(6);
        config.world.half_extent = 1.0;
        assert!(matches!(SimulationState::new(config), Err(TickError::World { .. })));
    }

    #[test]
    fn ticks_advance_clock() {
        let mut state = SimulationState::new(small_config(3)).unwrap();
        for _ in 0..20 {
            state.run_tick(0.1, true).unwrap();
        }
        assert_eq!(state.clock.tick(), 20);
        assert!((state.clock.elapsed() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn suppressed_tick_returns_no_events() {
        let mut state = SimulationState::new(small_config(4)).unwrap();
        state.creatures[0].energy = 1.0;
        let summary = state.run_tick(0.1, false).unwrap();
        assert!(summary.events.is_empty());
        assert!(state.log_entries().any(|e| e.message.ends_with("fell asleep")));
    }

    #[test]
    fn spawn_and_reset() {
        let mut state = SimulationState::new(small_config(5)).unwrap();
        let id = state.spawn_creature();
        assert_eq!(id, CreatureId(4));
        assert!(state.creature(id).is_some());
        state.run_tick(0.5, true).unwrap();
        state.reset().unwrap();
        assert_eq!(state.creatures.len(), 4);
        assert_eq!(state.clock.tick(), 0);
        assert!(state.log.is_empty());
    }
}
