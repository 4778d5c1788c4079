//! One-shot simulation events and activity-log entries.
//!
//! Each tick returns the events it produced as an ordered list. The external
//! renderer/UI consumes each event once; nothing on the creature itself is
//! left flagged. During a catch-up burst only the final sub-step returns
//! events; earlier sub-steps still feed the activity log.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{BuildingKind, DeathCause, EquipSlot, ItemKind, ResourceKind};
use crate::geometry::Vec2;
use crate::ids::{CreatureId, ResourceId};

/// Something noteworthy that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum SimEvent {
    /// A harvest finished and produced items.
    GatherSucceeded {
        /// The gatherer.
        creature: CreatureId,
        /// The harvested world object.
        resource: ResourceId,
        /// The kind of world object.
        kind: ResourceKind,
        /// Items actually added to the inventory.
        items: Vec<ItemKind>,
    },
    /// A harvest finished but yielded nothing.
    GatherFailed {
        /// The gatherer.
        creature: CreatureId,
        /// The harvested world object.
        resource: ResourceId,
    },
    /// An item was crafted into the inventory.
    Crafted {
        /// The crafter.
        creature: CreatureId,
        /// The crafted item.
        item: ItemKind,
    },
    /// An item moved from the inventory into an equipment slot.
    Equipped {
        /// The creature.
        creature: CreatureId,
        /// The equipped item.
        item: ItemKind,
    },
    /// A healing potion was drunk.
    PotionDrunk {
        /// The creature.
        creature: CreatureId,
        /// Health restored.
        healed: u32,
    },
    /// A creature finished eating.
    Ate {
        /// The creature.
        creature: CreatureId,
        /// Hunger after the meal.
        hunger: f32,
    },
    /// A creature lay down to sleep.
    FellAsleep {
        /// The creature.
        creature: CreatureId,
    },
    /// A creature gained a level.
    LeveledUp {
        /// The creature.
        creature: CreatureId,
        /// The new level.
        level: u32,
    },
    /// Two creatures engaged in combat.
    CombatStarted {
        /// The initiator.
        attacker: CreatureId,
        /// The target.
        defender: CreatureId,
        /// Whether the defender was interrupted mid-activity.
        ambush: bool,
    },
    /// A blow landed.
    CombatHit {
        /// The striker.
        attacker: CreatureId,
        /// The creature that took the damage.
        defender: CreatureId,
        /// Damage dealt after mitigation.
        damage: u32,
        /// Whether elemental advantage applied.
        super_effective: bool,
    },
    /// A creature broke off combat and ran.
    Fled {
        /// The creature that fled.
        creature: CreatureId,
        /// The opponent it fled from.
        from: CreatureId,
    },
    /// The hit cap or safety timeout ended a fight with no winner.
    CombatDisengaged {
        /// One side.
        first: CreatureId,
        /// The other side.
        second: CreatureId,
    },
    /// A winner started pursuing a fleeing opponent.
    ChaseStarted {
        /// The pursuer.
        hunter: CreatureId,
        /// The pursued.
        prey: CreatureId,
        /// Whether the prey is nearly dead.
        going_for_kill: bool,
    },
    /// The pursuer caught the prey; combat resumes.
    ChaseCaught {
        /// The pursuer.
        hunter: CreatureId,
        /// The pursued.
        prey: CreatureId,
    },
    /// The prey got away.
    ChaseEscaped {
        /// The pursuer.
        hunter: CreatureId,
        /// The pursued.
        prey: CreatureId,
    },
    /// The pursuer lost its target or ran out of time.
    ChaseAbandoned {
        /// The pursuer.
        hunter: CreatureId,
    },
    /// A creature killed another.
    Killed {
        /// The winner.
        killer: CreatureId,
        /// The loser.
        victim: CreatureId,
        /// Items transferred from victim to killer.
        loot: Vec<ItemKind>,
    },
    /// A creature died.
    Died {
        /// The creature.
        creature: CreatureId,
        /// Why it died.
        cause: DeathCause,
    },
    /// Equipment durability dropped low.
    EquipmentWarning {
        /// The owner.
        creature: CreatureId,
        /// The worn slot.
        slot: EquipSlot,
        /// The worn item.
        item: ItemKind,
    },
    /// Equipment broke and was removed.
    EquipmentBroke {
        /// The owner.
        creature: CreatureId,
        /// The emptied slot.
        slot: EquipSlot,
        /// The broken item.
        item: ItemKind,
    },
    /// An item was dropped into the world.
    ItemDropped {
        /// The creature that dropped it.
        creature: CreatureId,
        /// The dropped item.
        item: ItemKind,
    },
    /// An item was picked up from the ground.
    ItemPickedUp {
        /// The creature that picked it up.
        creature: CreatureId,
        /// The item.
        item: ItemKind,
    },
    /// A creature claimed its home site.
    HomeClaimed {
        /// The creature.
        creature: CreatureId,
        /// Home coordinates.
        position: Vec2,
    },
    /// A village building was completed.
    BuildingCompleted {
        /// The owner.
        creature: CreatureId,
        /// The building type.
        kind: BuildingKind,
        /// Where it was placed.
        position: Vec2,
    },
    /// Items were moved into the creature's storage building.
    Deposited {
        /// The owner.
        creature: CreatureId,
        /// Number of items deposited.
        count: u32,
    },
}

impl SimEvent {
    /// The creature this event is primarily about.
    pub const fn subject(&self) -> CreatureId {
        match self {
            Self::GatherSucceeded { creature, .. }
            | Self::GatherFailed { creature, .. }
            | Self::Crafted { creature, .. }
            | Self::Equipped { creature, .. }
            | Self::PotionDrunk { creature, .. }
            | Self::Ate { creature, .. }
            | Self::FellAsleep { creature }
            | Self::LeveledUp { creature, .. }
            | Self::Fled { creature, .. }
            | Self::Died { creature, .. }
            | Self::EquipmentWarning { creature, .. }
            | Self::EquipmentBroke { creature, .. }
            | Self::ItemDropped { creature, .. }
            | Self::ItemPickedUp { creature, .. }
            | Self::HomeClaimed { creature, .. }
            | Self::BuildingCompleted { creature, .. }
            | Self::Deposited { creature, .. } => *creature,
            Self::CombatStarted { attacker, .. } | Self::CombatHit { attacker, .. } => *attacker,
            Self::CombatDisengaged { first, .. } => *first,
            Self::ChaseStarted { hunter, .. }
            | Self::ChaseCaught { hunter, .. }
            | Self::ChaseEscaped { hunter, .. }
            | Self::ChaseAbandoned { hunter } => *hunter,
            Self::Killed { killer, .. } => *killer,
        }
    }
}

/// One line of the rolling human-readable activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LogEntry {
    /// World clock (seconds) when the entry was written.
    pub time: f64,
    /// The creature the entry is about.
    pub creature: CreatureId,
    /// Display text.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_of_pairwise_events_is_the_actor() {
        let hit = SimEvent::CombatHit {
            attacker: CreatureId(1),
            defender: CreatureId(2),
            damage: 5,
            super_effective: false,
        };
        assert_eq!(hit.subject(), CreatureId(1));

        let kill = SimEvent::Killed {
            killer: CreatureId(4),
            victim: CreatureId(3),
            loot: Vec::new(),
        };
        assert_eq!(kill.subject(), CreatureId(4));
    }
}
