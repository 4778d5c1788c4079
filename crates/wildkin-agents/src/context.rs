//! Shared mutable state handed to every per-creature system call.
//!
//! The simulation owns the world, the species memory, the RNG, and the
//! event list; a [`SimContext`] borrows them for the duration of one
//! creature update so systems never reach for globals.

use rand::rngs::StdRng;
use wildkin_types::{CreatureId, SimEvent, Vec2};
use wildkin_world::WorldState;

use crate::config::CreatureConfig;
use crate::creature::Creature;
use crate::inventory::Item;
use crate::memory::SpeciesMemory;
use crate::scoring::{PickupOutcome, offer_item};

/// Borrowed simulation state for one creature update.
pub struct SimContext<'a> {
    /// The shared world.
    pub world: &'a mut WorldState,
    /// Cross-creature death statistics.
    pub species_memory: &'a mut SpeciesMemory,
    /// Tunables.
    pub config: &'a CreatureConfig,
    /// The simulation's seeded RNG.
    pub rng: &'a mut StdRng,
    /// Events produced so far this tick, in order.
    pub events: &'a mut Vec<SimEvent>,
}

impl SimContext<'_> {
    /// Record an event.
    pub fn emit(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    /// Place an item on the ground at `position`.
    pub fn drop_item(&mut self, owner: CreatureId, item: Item, position: Vec2) {
        self.world.drops.spawn(item.kind, position, item.durability);
        self.emit(SimEvent::ItemDropped {
            creature: owner,
            item: item.kind,
        });
    }

    /// Run the smart-pickup policy. Whatever does not end up in the
    /// inventory lands on the ground. Returns whether `item` was kept.
    pub fn give_item(&mut self, creature: &mut Creature, item: Item) -> bool {
        match offer_item(creature, item, self.species_memory, self.config) {
            PickupOutcome::Added => true,
            PickupOutcome::Swapped { dropped } => {
                self.drop_item(creature.id, dropped, creature.position);
                true
            }
            PickupOutcome::Rejected => {
                self.drop_item(creature.id, item, creature.position);
                false
            }
        }
    }
}
