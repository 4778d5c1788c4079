//! The world arena: every shared, mutable world object in one place.
//!
//! [`WorldState`] owns the world-object list, berry bushes, dropped items,
//! and the obstacle circles derived from them. It is passed by reference
//! into each creature update; creatures address objects by stable index.

use rand::Rng;
use tracing::debug;
use wildkin_types::{CreatureId, FoodSourceId, ResourceId, ResourceKind, Vec2};

use crate::drops::DropField;
use crate::error::WorldError;
use crate::food::FoodSource;
use crate::placement::random_open_position;
use crate::resource::{RegrowOutcome, ResourceState, WorldResource, obstacle_radius};
use crate::terrain::{Obstacle, TerrainQuery, clamp_movement, is_clear};

/// Maximum distance a regrown resource moves from its previous spot.
pub const RELOCATE_RADIUS: f32 = 12.0;

/// Extra clearance kept around a relocated resource.
const RELOCATE_CLEARANCE: f32 = 1.0;

/// How a creature looks for a resource of a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Only unclaimed, non-depleted resources of exactly this kind.
    Strict,
    /// Prefer unclaimed resources, but accept one another creature is
    /// already harvesting rather than come back empty-handed.
    Competitive,
}

/// Shared world state.
#[derive(Debug)]
pub struct WorldState {
    /// Half the side length of the square world.
    pub half_extent: f32,
    /// Read-only terrain height function.
    pub terrain: Box<dyn TerrainQuery>,
    /// Obstacle circles: ponds plus every tree and rock.
    pub obstacles: Vec<Obstacle>,
    /// Harvestable world objects, indexed by [`ResourceId`].
    pub resources: Vec<WorldResource>,
    /// Berry bushes, indexed by [`FoodSourceId`].
    pub food: Vec<FoodSource>,
    /// Items on the ground.
    pub drops: DropField,
}

impl WorldState {
    /// Assemble a world and derive its obstacle list.
    pub fn new(
        half_extent: f32,
        terrain: Box<dyn TerrainQuery>,
        ponds: Vec<Obstacle>,
        resources: Vec<WorldResource>,
        food: Vec<FoodSource>,
    ) -> Result<Self, WorldError> {
        if !(half_extent.is_finite() && half_extent > 0.0) {
            return Err(WorldError::InvalidLayout {
                reason: format!("half extent must be positive, got {half_extent}"),
            });
        }
        let mut obstacles = ponds;
        obstacles.extend(resources.iter().filter_map(|r| {
            obstacle_radius(r.kind).map(|radius| Obstacle {
                center: r.position,
                radius,
                source: Some(r.id),
            })
        }));
        Ok(Self {
            half_extent,
            terrain,
            obstacles,
            resources,
            food,
            drops: DropField::new(),
        })
    }

    /// Terrain height under a ground position.
    pub fn height_at(&self, position: Vec2) -> f32 {
        self.terrain.height(position.x, position.z)
    }

    /// Resolve a movement endpoint against obstacles and world bounds.
    pub fn clamp(&self, point: Vec2, body_radius: f32) -> Vec2 {
        clamp_movement(&self.obstacles, self.half_extent, point, body_radius)
    }

    /// Whether `point` is inside the world and clear of obstacles.
    pub fn is_open(&self, point: Vec2, clearance: f32) -> bool {
        point.x.abs() <= self.half_extent
            && point.z.abs() <= self.half_extent
            && is_clear(&self.obstacles, point, clearance)
    }

    /// Look up a world object.
    pub fn resource(&self, id: ResourceId) -> Result<&WorldResource, WorldError> {
        self.resources
            .get(id.index())
            .ok_or(WorldError::ResourceNotFound(id))
    }

    /// Look up a world object mutably.
    pub fn resource_mut(&mut self, id: ResourceId) -> Result<&mut WorldResource, WorldError> {
        self.resources
            .get_mut(id.index())
            .ok_or(WorldError::ResourceNotFound(id))
    }

    /// Look up a berry bush.
    pub fn food_source(&self, id: FoodSourceId) -> Result<&FoodSource, WorldError> {
        self.food
            .get(id.index())
            .ok_or(WorldError::FoodSourceNotFound(id))
    }

    /// Look up a berry bush mutably.
    pub fn food_source_mut(&mut self, id: FoodSourceId) -> Result<&mut FoodSource, WorldError> {
        self.food
            .get_mut(id.index())
            .ok_or(WorldError::FoodSourceNotFound(id))
    }

    /// Nearest resource of `kind` from `from` according to `mode`.
    ///
    /// Resources `seeker` already holds count as unclaimed.
    pub fn find_resource(
        &self,
        from: Vec2,
        kind: ResourceKind,
        mode: SearchMode,
        seeker: CreatureId,
    ) -> Option<ResourceId> {
        let nearest = |contested: bool| {
            self.resources
                .iter()
                .filter(|r| r.kind == kind && !r.depleted)
                .filter(|r| r.is_claimed_by_other(seeker) == contested)
                .min_by(|a, b| {
                    a.position
                        .distance(from)
                        .total_cmp(&b.position.distance(from))
                })
                .map(|r| r.id)
        };
        match mode {
            SearchMode::Strict => nearest(false),
            SearchMode::Competitive => nearest(false).or_else(|| nearest(true)),
        }
    }

    /// Nearest active, unoccupied berry bush within `max_distance`.
    pub fn nearest_food(&self, from: Vec2, seeker: CreatureId, max_distance: f32) -> Option<FoodSourceId> {
        self.food
            .iter()
            .filter(|f| f.is_free_for(seeker))
            .map(|f| (f.id, f.position.distance(from)))
            .filter(|(_, d)| *d <= max_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Drop every claim and meal held by `creature` (death, reset of a plan).
    pub fn release_all(&mut self, creature: CreatureId) {
        for resource in &mut self.resources {
            resource.release(creature);
        }
        for source in &mut self.food {
            source.vacate(creature);
        }
    }

    /// Advance every depleted resource's regrowth, relocating the ones that
    /// finish. Returns the resources that became available this step.
    pub fn regrow(&mut self, dt: f32, rng: &mut impl Rng) -> Vec<ResourceId> {
        let mut regrown = Vec::new();
        let mut to_relocate = Vec::new();
        for resource in &mut self.resources {
            if let RegrowOutcome::Regrown { relocate } = resource.tick_regrow(dt) {
                regrown.push(resource.id);
                if relocate {
                    to_relocate.push(resource.id);
                }
            }
        }
        for id in to_relocate {
            self.relocate(id, rng);
        }
        regrown
    }

    /// Move a resource to a random open spot near its old one, keeping its
    /// obstacle circle in sync. Stays in place if no spot is found.
    fn relocate(&mut self, id: ResourceId, rng: &mut impl Rng) {
        let Some(resource) = self.resources.get(id.index()) else {
            return;
        };
        let clearance = obstacle_radius(resource.kind).unwrap_or(0.5) + RELOCATE_CLEARANCE;
        let Some(target) = random_open_position(
            rng,
            resource.position,
            RELOCATE_RADIUS,
            self.half_extent,
            &self.obstacles,
            clearance,
            Some(id),
        ) else {
            return;
        };
        if let Some(resource) = self.resources.get_mut(id.index()) {
            resource.position = target;
        }
        for obstacle in &mut self.obstacles {
            if obstacle.source == Some(id) {
                obstacle.center = target;
            }
        }
        debug!(resource = %id, x = target.x, z = target.z, "resource relocated");
    }

    /// Count down berry bush respawns. Returns how many came back.
    pub fn tick_food(&mut self, dt: f32) -> usize {
        self.food.iter_mut().filter_map(|f| f.tick(dt).then_some(())).count()
    }

    /// Count down dropped items. Returns how many despawned.
    pub fn tick_drops(&mut self, dt: f32) -> usize {
        self.drops.tick(dt)
    }

    /// Durable claim state of every world object, aligned 1:1 with
    /// [`WorldState::resources`].
    pub fn resource_states(&self) -> Vec<ResourceState> {
        self.resources.iter().map(WorldResource::state).collect()
    }

    /// Restore durable claim state. Fails without mutating anything if the
    /// list does not line up with the world-object list.
    pub fn restore_resource_states(&mut self, states: &[ResourceState]) -> Result<(), WorldError> {
        if states.len() != self.resources.len() {
            return Err(WorldError::ResourceStateMismatch {
                expected: self.resources.len(),
                found: states.len(),
            });
        }
        for (resource, state) in self.resources.iter_mut().zip(states) {
            resource.restore(state);
        }
        for obstacle in &mut self.obstacles {
            if let Some(source) = obstacle.source
                && let Some(resource) = self.resources.get(source.index())
            {
                obstacle.center = resource.position;
            }
        }
        Ok(())
    }
}
