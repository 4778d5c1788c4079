//! Rolling human-readable activity log.
//!
//! Every event that reaches the log is rendered to a short sentence naming
//! the creatures involved. Only the most recent [`LOG_CAPACITY`] entries are
//! kept. The log is fed on every sub-step, including the suppressed steps of
//! a catch-up burst, so the UI sees a complete history even when no events
//! are returned.

use std::collections::VecDeque;

use wildkin_types::{CreatureId, LogEntry, SimEvent};

/// Entries kept in the rolling log.
pub const LOG_CAPACITY: usize = 50;

/// The most recent activity, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
}

impl ActivityLog {
    /// An empty log.
    pub const fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Append an entry, evicting the oldest once full.
    pub fn push(&mut self, entry: LogEntry) {
        while self.entries.len() >= LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Render and append every loggable event in `events`.
    pub fn record<'n>(&mut self, time: f64, events: &[SimEvent], name: impl Fn(CreatureId) -> &'n str) {
        for event in events {
            if let Some(message) = describe(event, &name) {
                self.push(LogEntry {
                    time,
                    creature: event.subject(),
                    message,
                });
            }
        }
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Number of entries held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// One sentence describing `event`, or `None` for events too frequent to be
/// worth a log line (individual hits, drops, pickups, deposits).
pub fn describe<'n>(event: &SimEvent, name: impl Fn(CreatureId) -> &'n str) -> Option<String> {
    let line = match event {
        SimEvent::GatherSucceeded { creature, items, .. } => {
            let got: Vec<&str> = items.iter().map(|i| i.label()).collect();
            format!("{} gathered {}", name(*creature), got.join(", "))
        }
        SimEvent::GatherFailed { creature, .. } => format!("{} came away empty-handed", name(*creature)),
        SimEvent::Crafted { creature, item } => format!("{} crafted a {item}", name(*creature)),
        SimEvent::Equipped { creature, item } => format!("{} equipped a {item}", name(*creature)),
        SimEvent::PotionDrunk { creature, healed } => {
            format!("{} drank a potion (+{healed} HP)", name(*creature))
        }
        SimEvent::Ate { creature, .. } => format!("{} ate", name(*creature)),
        SimEvent::FellAsleep { creature } => format!("{} fell asleep", name(*creature)),
        SimEvent::LeveledUp { creature, level } => format!("{} reached level {level}", name(*creature)),
        SimEvent::CombatStarted {
            attacker,
            defender,
            ambush,
        } => {
            if *ambush {
                format!("{} ambushed {}", name(*attacker), name(*defender))
            } else {
                format!("{} attacked {}", name(*attacker), name(*defender))
            }
        }
        SimEvent::Fled { creature, from } => format!("{} fled from {}", name(*creature), name(*from)),
        SimEvent::CombatDisengaged { first, second } => {
            format!("{} and {} broke off their fight", name(*first), name(*second))
        }
        SimEvent::ChaseStarted {
            hunter,
            prey,
            going_for_kill,
        } => {
            if *going_for_kill {
                format!("{} is going in for the kill on {}", name(*hunter), name(*prey))
            } else {
                format!("{} gave chase to {}", name(*hunter), name(*prey))
            }
        }
        SimEvent::ChaseCaught { hunter, prey } => format!("{} caught {}", name(*hunter), name(*prey)),
        SimEvent::ChaseEscaped { hunter, prey } => format!("{} escaped from {}", name(*prey), name(*hunter)),
        SimEvent::ChaseAbandoned { hunter } => format!("{} gave up the chase", name(*hunter)),
        SimEvent::Killed { killer, victim, loot } => {
            if loot.is_empty() {
                format!("{} defeated {}", name(*killer), name(*victim))
            } else {
                let got: Vec<&str> = loot.iter().map(|i| i.label()).collect();
                format!("{} defeated {} and took {}", name(*killer), name(*victim), got.join(", "))
            }
        }
        SimEvent::Died { creature, cause } => format!("{} died of {cause}", name(*creature)),
        SimEvent::EquipmentWarning { creature, item, .. } => {
            format!("{}'s {item} is about to break", name(*creature))
        }
        SimEvent::EquipmentBroke { creature, item, .. } => format!("{}'s {item} broke", name(*creature)),
        SimEvent::HomeClaimed { creature, position } => format!(
            "{} settled down at ({:.0}, {:.0})",
            name(*creature),
            position.x,
            position.z
        ),
        SimEvent::BuildingCompleted { creature, kind, .. } => {
            format!("{} built a {}", name(*creature), kind.label())
        }
        SimEvent::CombatHit { .. }
        | SimEvent::ItemDropped { .. }
        | SimEvent::ItemPickedUp { .. }
        | SimEvent::Deposited { .. } => return None,
    };
    Some(line)
}
