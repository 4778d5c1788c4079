//! Learning signals: per-creature strategy memory and shared species memory.
//!
//! Strategy memory records the last few keep/drop decisions a creature made
//! when its inventory was full, and flags a decision as useful once the kept
//! item is actually used. Species memory aggregates death causes across all
//! creatures of a species and biases how descendants value items.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};
use wildkin_types::{DeathCause, ItemKind, Species};

/// One keep/drop decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyEntry {
    /// The item kept.
    pub kept: ItemKind,
    /// The item dropped to make room.
    pub dropped: ItemKind,
    /// The kept item was later consumed or equipped.
    pub proved_useful: bool,
}

/// Rolling record of recent keep/drop decisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyMemory {
    entries: VecDeque<StrategyEntry>,
}

impl StrategyMemory {
    /// Record a decision, evicting the oldest beyond `limit`.
    pub fn record(&mut self, kept: ItemKind, dropped: ItemKind, limit: usize) {
        self.entries.push_back(StrategyEntry {
            kept,
            dropped,
            proved_useful: false,
        });
        while self.entries.len() > limit {
            self.entries.pop_front();
        }
    }

    /// Flag the most recent unproven decision that kept `kind`.
    pub fn mark_used(&mut self, kind: ItemKind) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .rev()
            .find(|e| e.kept == kind && !e.proved_useful)
        {
            entry.proved_useful = true;
        }
    }

    /// Reinforcement for `kind`: useful keeps count up, keeping something
    /// that was then dropped again counts down.
    pub fn reinforcement(&self, kind: ItemKind) -> f32 {
        self.entries
            .iter()
            .map(|e| {
                if e.kept == kind && e.proved_useful {
                    1.0
                } else if e.dropped == kind && e.proved_useful {
                    -0.5
                } else {
                    0.0
                }
            })
            .sum()
    }

    /// Decisions, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &StrategyEntry> {
        self.entries.iter()
    }

    /// Number of recorded decisions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No decisions recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Death counters for one species.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    /// Deaths from hunger.
    pub starvation_deaths: u32,
    /// Deaths in combat.
    pub combat_deaths: u32,
}

impl SpeciesRecord {
    /// All recorded deaths.
    pub const fn total(&self) -> u32 {
        self.starvation_deaths.saturating_add(self.combat_deaths)
    }

    /// Share of deaths from starvation, zero with no deaths.
    pub fn starvation_share(&self) -> f32 {
        share(self.starvation_deaths, self.total())
    }

    /// Share of deaths from combat, zero with no deaths.
    pub fn combat_share(&self) -> f32 {
        share(self.combat_deaths, self.total())
    }
}

fn share(part: u32, total: u32) -> f32 {
    if total == 0 {
        0.0
    } else {
        part as f32 / total as f32
    }
}

/// Shared cross-creature death statistics, keyed by species.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeciesMemory {
    records: BTreeMap<Species, SpeciesRecord>,
}

impl SpeciesMemory {
    /// Count one death.
    pub fn record_death(&mut self, species: Species, cause: DeathCause) {
        let record = self.records.entry(species).or_default();
        match cause {
            DeathCause::Starvation => {
                record.starvation_deaths = record.starvation_deaths.saturating_add(1);
            }
            DeathCause::Combat => {
                record.combat_deaths = record.combat_deaths.saturating_add(1);
            }
        }
    }

    /// Counters for `species`, zeroed if none recorded.
    pub fn record(&self, species: Species) -> SpeciesRecord {
        self.records.get(&species).copied().unwrap_or_default()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
