//! Berry bushes: binary-claim food sources.
//!
//! A creature occupies an active bush for the length of its meal; the first
//! claimant wins. Finishing the meal deactivates the bush until its respawn
//! timer runs out.

use serde::{Deserialize, Serialize};
use wildkin_types::{CreatureId, FoodSourceId, Vec2};

use crate::error::WorldError;

/// Randomized respawn window `(min, max)` in seconds for an eaten bush.
pub const RESPAWN_RANGE: (f32, f32) = (30.0, 60.0);

/// A berry bush.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodSource {
    /// Stable index.
    pub id: FoodSourceId,
    /// Ground position.
    pub position: Vec2,
    /// Has berries to eat.
    pub active: bool,
    /// Seconds until berries return.
    pub respawn_timer: f32,
    /// The creature currently eating here.
    #[serde(skip)]
    pub occupant: Option<CreatureId>,
}

impl FoodSource {
    /// A fresh, active bush.
    pub const fn new(id: FoodSourceId, position: Vec2) -> Self {
        Self {
            id,
            position,
            active: true,
            respawn_timer: 0.0,
            occupant: None,
        }
    }

    /// Active and nobody else eating.
    pub fn is_free_for(&self, creature: CreatureId) -> bool {
        self.active && self.occupant.is_none_or(|o| o == creature)
    }

    /// Start eating here.
    pub fn occupy(&mut self, creature: CreatureId) -> Result<(), WorldError> {
        if !self.active {
            return Err(WorldError::FoodSourceInactive(self.id));
        }
        match self.occupant {
            Some(holder) if holder != creature => Err(WorldError::FoodSourceOccupied {
                source_id: self.id,
                holder,
            }),
            _ => {
                self.occupant = Some(creature);
                Ok(())
            }
        }
    }

    /// Leave without eating (interrupted meal).
    pub fn vacate(&mut self, creature: CreatureId) {
        if self.occupant == Some(creature) {
            self.occupant = None;
        }
    }

    /// Finish the meal: the bush empties and starts respawning.
    pub fn consume(&mut self, respawn: f32) {
        self.active = false;
        self.occupant = None;
        self.respawn_timer = respawn;
    }

    /// Advance the respawn timer. Returns `true` when berries return.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.active {
            return false;
        }
        self.respawn_timer -= dt;
        if self.respawn_timer <= 0.0 {
            self.respawn_timer = 0.0;
            self.active = true;
            return true;
        }
        false
    }
}
