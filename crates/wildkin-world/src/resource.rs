//! Harvestable world objects and their exclusive-claim state.
//!
//! A [`WorldResource`] cycles available -> claimed -> depleted -> regrowing
//! -> available indefinitely. At most one creature may hold the claim at a
//! time, and a claimed resource is never depleted:
//!
//! ```text
//! gatherer.is_some()  =>  being_gathered && !depleted
//! ```
//!
//! Regrowth ramps the visual `scale` linearly from [`REGROW_START_SCALE`] to
//! 1.0 and completes exactly when the timer reaches zero.

use serde::{Deserialize, Serialize};
use wildkin_types::{CreatureId, ResourceId, ResourceKind, Vec2};

use crate::error::WorldError;

/// Scale of a resource at the instant it starts regrowing.
pub const REGROW_START_SCALE: f32 = 0.1;

/// Randomized regrow window `(min, max)` in seconds for a resource kind.
pub const fn regrow_range(kind: ResourceKind) -> (f32, f32) {
    match kind {
        ResourceKind::Tree => (40.0, 70.0),
        ResourceKind::Bush => (25.0, 45.0),
        ResourceKind::Rock => (60.0, 100.0),
    }
}

/// Obstacle radius of a resource kind. Bushes do not block movement.
pub const fn obstacle_radius(kind: ResourceKind) -> Option<f32> {
    match kind {
        ResourceKind::Tree => Some(0.6),
        ResourceKind::Rock => Some(0.9),
        ResourceKind::Bush => None,
    }
}

/// A tree, rock, or bush with mutable claim state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldResource {
    /// Stable index into the world-object list.
    pub id: ResourceId,
    /// Object type.
    pub kind: ResourceKind,
    /// Registered ground position (changes only on relocation).
    pub position: Vec2,
    /// Visual scale in `[REGROW_START_SCALE, 1.0]`.
    pub scale: f32,
    /// Harvested and regrowing.
    pub depleted: bool,
    /// A creature is currently harvesting it.
    pub being_gathered: bool,
    /// The creature holding the claim.
    pub gatherer: Option<CreatureId>,
    /// Seconds of regrowth remaining.
    pub regrow_timer: f32,
    /// Length of the current regrow window.
    pub regrow_duration: f32,
    /// Move to a new position when regrowth completes.
    pub relocate_pending: bool,
}

/// The durable part of a resource persisted alongside the static world list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    /// Current registered position.
    pub position: Vec2,
    /// Visual scale.
    pub scale: f32,
    /// Depleted flag.
    pub depleted: bool,
    /// Seconds of regrowth remaining.
    pub regrow_timer: f32,
    /// Length of the regrow window.
    pub regrow_duration: f32,
    /// Relocation flag.
    pub relocate_pending: bool,
}

/// What happened to a resource during one regrowth step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegrowOutcome {
    /// Still available, nothing to do.
    Idle,
    /// Still regrowing.
    Growing,
    /// Became available this step. `relocate` tells the caller to move it.
    Regrown {
        /// The resource was flagged to relocate on regrowth.
        relocate: bool,
    },
}

impl WorldResource {
    /// A fresh, fully grown resource.
    pub const fn new(id: ResourceId, kind: ResourceKind, position: Vec2) -> Self {
        Self {
            id,
            kind,
            position,
            scale: 1.0,
            depleted: false,
            being_gathered: false,
            gatherer: None,
            regrow_timer: 0.0,
            regrow_duration: 0.0,
            relocate_pending: false,
        }
    }

    /// Not depleted and not claimed by anyone.
    pub const fn is_available(&self) -> bool {
        !self.depleted && self.gatherer.is_none()
    }

    /// Claimed by a creature other than `me`.
    pub fn is_claimed_by_other(&self, me: CreatureId) -> bool {
        self.gatherer.is_some_and(|holder| holder != me)
    }

    /// Take the exclusive harvest claim for `creature`.
    ///
    /// Re-claiming a resource you already hold is a no-op.
    pub fn claim(&mut self, creature: CreatureId) -> Result<(), WorldError> {
        if self.depleted {
            return Err(WorldError::ResourceDepleted(self.id));
        }
        match self.gatherer {
            Some(holder) if holder != creature => Err(WorldError::ResourceClaimed {
                resource: self.id,
                holder,
            }),
            _ => {
                self.gatherer = Some(creature);
                self.being_gathered = true;
                Ok(())
            }
        }
    }

    /// Drop the claim if `creature` holds it. Returns whether it did.
    pub fn release(&mut self, creature: CreatureId) -> bool {
        if self.gatherer == Some(creature) {
            self.gatherer = None;
            self.being_gathered = false;
            true
        } else {
            false
        }
    }

    /// Mark harvested: clear the claim, shrink, and start regrowing for
    /// `regrow_duration` seconds. The resource relocates on regrowth.
    pub fn deplete(&mut self, regrow_duration: f32) {
        self.gatherer = None;
        self.being_gathered = false;
        self.depleted = true;
        self.scale = REGROW_START_SCALE;
        self.regrow_duration = regrow_duration.max(f32::EPSILON);
        self.regrow_timer = self.regrow_duration;
        self.relocate_pending = true;
    }

    /// Advance regrowth by `dt` seconds.
    pub fn tick_regrow(&mut self, dt: f32) -> RegrowOutcome {
        if !self.depleted {
            return RegrowOutcome::Idle;
        }
        self.regrow_timer = (self.regrow_timer - dt).max(0.0);
        if self.regrow_timer <= 0.0 {
            self.depleted = false;
            self.scale = 1.0;
            let relocate = self.relocate_pending;
            self.relocate_pending = false;
            return RegrowOutcome::Regrown { relocate };
        }
        let progress = 1.0 - self.regrow_timer / self.regrow_duration;
        self.scale = REGROW_START_SCALE + (1.0 - REGROW_START_SCALE) * progress;
        RegrowOutcome::Growing
    }

    /// The durable part of this resource.
    pub const fn state(&self) -> ResourceState {
        ResourceState {
            position: self.position,
            scale: self.scale,
            depleted: self.depleted,
            regrow_timer: self.regrow_timer,
            regrow_duration: self.regrow_duration,
            relocate_pending: self.relocate_pending,
        }
    }

    /// Restore durable state. Claims are volatile and always start empty.
    pub const fn restore(&mut self, state: &ResourceState) {
        self.position = state.position;
        self.scale = state.scale;
        self.depleted = state.depleted;
        self.regrow_timer = state.regrow_timer;
        self.regrow_duration = state.regrow_duration;
        self.relocate_pending = state.relocate_pending;
        self.gatherer = None;
        self.being_gathered = false;
    }
}
