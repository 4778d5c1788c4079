//! Default starting world for the Wildkin simulation.
//!
//! Scatters ponds, trees, rocks, herb bushes, and berry bushes across a
//! square meadow on rolling terrain. Generation is fully determined by the
//! RNG passed in, so the same seed always yields the same layout.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wildkin_types::{FoodSourceId, ResourceId, ResourceKind, Vec2};

use crate::error::WorldError;
use crate::food::FoodSource;
use crate::placement::{random_open_position, roll_between};
use crate::resource::WorldResource;
use crate::terrain::{Obstacle, RollingTerrain};
use crate::world::WorldState;

/// Spacing kept between generated world objects.
const OBJECT_SPACING: f32 = 1.5;

/// Pond radius range.
const POND_RADIUS: (f32, f32) = (3.0, 5.5);

/// Parameters for [`create_starting_world`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldLayout {
    /// Half the side length of the square world.
    #[serde(default = "default_half_extent")]
    pub half_extent: f32,
    /// Number of trees.
    #[serde(default = "default_tree_count")]
    pub tree_count: u32,
    /// Number of rocks.
    #[serde(default = "default_rock_count")]
    pub rock_count: u32,
    /// Number of herb bushes.
    #[serde(default = "default_bush_count")]
    pub bush_count: u32,
    /// Number of berry bushes.
    #[serde(default = "default_berry_bush_count")]
    pub berry_bush_count: u32,
    /// Number of ponds.
    #[serde(default = "default_pond_count")]
    pub pond_count: u32,
}

const fn default_half_extent() -> f32 {
    60.0
}
const fn default_tree_count() -> u32 {
    18
}
const fn default_rock_count() -> u32 {
    12
}
const fn default_bush_count() -> u32 {
    10
}
const fn default_berry_bush_count() -> u32 {
    8
}
const fn default_pond_count() -> u32 {
    2
}

impl Default for WorldLayout {
    fn default() -> Self {
        Self {
            half_extent: default_half_extent(),
            tree_count: default_tree_count(),
            rock_count: default_rock_count(),
            bush_count: default_bush_count(),
            berry_bush_count: default_berry_bush_count(),
            pond_count: default_pond_count(),
        }
    }
}

/// Generate the default world from `layout`.
///
/// Objects that cannot find an open spot are skipped, so a crowded layout
/// produces fewer objects rather than failing.
pub fn create_starting_world(layout: &WorldLayout, rng: &mut impl Rng) -> Result<WorldState, WorldError> {
    let half = layout.half_extent;
    if !(half.is_finite() && half > POND_RADIUS.1 * 2.0) {
        return Err(WorldError::InvalidLayout {
            reason: format!("half extent {half} is too small for a world"),
        });
    }
    let inner = half * 0.9;

    let mut ponds = Vec::new();
    for _ in 0..layout.pond_count {
        let radius = roll_between(rng, POND_RADIUS);
        let span = (inner - radius).max(0.0);
        if let Some(center) = random_open_position(rng, Vec2::ZERO, span, half, &ponds, radius + OBJECT_SPACING, None) {
            ponds.push(Obstacle {
                center,
                radius,
                source: None,
            });
        }
    }

    // Everything placed so far, including bushes, so objects do not stack.
    let mut occupied: Vec<Obstacle> = ponds.clone();
    let mut resources = Vec::new();
    let plan = [
        (ResourceKind::Tree, layout.tree_count),
        (ResourceKind::Rock, layout.rock_count),
        (ResourceKind::Bush, layout.bush_count),
    ];
    for (kind, count) in plan {
        for _ in 0..count {
            let Some(position) = random_open_position(rng, Vec2::ZERO, inner, half, &occupied, OBJECT_SPACING, None) else {
                continue;
            };
            let id = ResourceId::from_index(resources.len());
            occupied.push(Obstacle {
                center: position,
                radius: 0.5,
                source: Some(id),
            });
            resources.push(WorldResource::new(id, kind, position));
        }
    }

    let mut food = Vec::new();
    for _ in 0..layout.berry_bush_count {
        let Some(position) = random_open_position(rng, Vec2::ZERO, inner, half, &occupied, OBJECT_SPACING, None) else {
            continue;
        };
        occupied.push(Obstacle {
            center: position,
            radius: 0.5,
            source: None,
        });
        food.push(FoodSource::new(FoodSourceId::from_index(food.len()), position));
    }

    debug!(
        ponds = ponds.len(),
        resources = resources.len(),
        food = food.len(),
        "starting world generated"
    );

    WorldState::new(half, Box::new(RollingTerrain::default()), ponds, resources, food)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn default_layout_populates_world() {
        let mut rng = StdRng::seed_from_u64(42);
        let world = create_starting_world(&WorldLayout::default(), &mut rng).unwrap();
        assert_eq!(world.resources.len(), 40);
        assert_eq!(world.food.len(), 8);
        for (i, r) in world.resources.iter().enumerate() {
            assert_eq!(r.id.index(), i);
            assert!(r.position.x.abs() <= world.half_extent);
        }
    }

    #[test]
    fn same_seed_same_world() {
        let a = create_starting_world(&WorldLayout::default(), &mut StdRng::seed_from_u64(7)).unwrap();
        let b = create_starting_world(&WorldLayout::default(), &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a.resource_states(), b.resource_states());
    }

    #[test]
    fn tiny_world_is_rejected() {
        let layout = WorldLayout {
            half_extent: 2.0,
            ..WorldLayout::default()
        };
        let result = create_starting_world(&layout, &mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(WorldError::InvalidLayout { .. })));
    }

    #[test]
    fn resources_avoid_ponds() {
        let world = create_starting_world(&WorldLayout::default(), &mut StdRng::seed_from_u64(3)).unwrap();
        let ponds: Vec<&Obstacle> = world.obstacles.iter().filter(|o| o.source.is_none()).collect();
        for r in &world.resources {
            for pond in &ponds {
                assert!(!pond.overlaps(r.position, 0.0));
            }
        }
    }
}
