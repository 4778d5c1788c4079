//! Collision-checked placement for buildings, relocated resources, and
//! freshly spawned creatures.

use core::f32::consts::FRAC_PI_4;

use rand::Rng;
use wildkin_types::{ResourceId, Vec2};

use crate::terrain::{Obstacle, is_clear};

/// Radii around home tried, in order, when placing a building.
pub const BUILDING_RADII: [f32; 2] = [3.0, 5.0];

/// Minimum distance between two buildings.
pub const BUILDING_CLEARANCE: f32 = 2.5;

/// Extra margin kept between a building and any obstacle circle.
pub const OBSTACLE_MARGIN: f32 = 1.0;

/// Offset from home used when every compass point is blocked.
pub const FALLBACK_OFFSET: Vec2 = Vec2::new(2.0, 2.0);

/// Number of random candidates drawn before giving up on an open position.
const MAX_ATTEMPTS: u32 = 32;

/// Draw a value in `[range.0, range.1]`. A degenerate range yields its lower bound.
pub fn roll_between(rng: &mut impl Rng, range: (f32, f32)) -> f32 {
    let (lo, hi) = range;
    if hi <= lo {
        return lo;
    }
    rng.random_range(lo..=hi)
}

/// Pick a site for a new building near `home`.
///
/// Tries the 8 compass points at each radius in [`BUILDING_RADII`], keeping
/// [`BUILDING_CLEARANCE`] from existing buildings and obstacle radius plus
/// [`OBSTACLE_MARGIN`] from every obstacle. Falls back to
/// `home + FALLBACK_OFFSET` if nothing fits.
pub fn building_site(home: Vec2, obstacles: &[Obstacle], buildings: &[Vec2], half_extent: f32) -> Vec2 {
    for radius in BUILDING_RADII {
        for step in 0..8_u8 {
            let angle = f32::from(step) * FRAC_PI_4;
            let candidate = home + Vec2::from_heading(angle) * radius;
            if candidate.x.abs() > half_extent || candidate.z.abs() > half_extent {
                continue;
            }
            let clear_of_buildings = buildings
                .iter()
                .all(|b| b.distance(candidate) >= BUILDING_CLEARANCE);
            if clear_of_buildings && is_clear(obstacles, candidate, OBSTACLE_MARGIN) {
                return candidate;
            }
        }
    }
    home + FALLBACK_OFFSET
}

/// A random point within `spread` of `center`, inside the world bounds and
/// at least `clearance` away from every obstacle except the one owned by
/// `ignore` (the object being moved).
pub fn random_open_position(
    rng: &mut impl Rng,
    center: Vec2,
    spread: f32,
    half_extent: f32,
    obstacles: &[Obstacle],
    clearance: f32,
    ignore: Option<ResourceId>,
) -> Option<Vec2> {
    for _ in 0..MAX_ATTEMPTS {
        let candidate = Vec2::new(
            (center.x + roll_between(rng, (-spread, spread))).clamp(-half_extent, half_extent),
            (center.z + roll_between(rng, (-spread, spread))).clamp(-half_extent, half_extent),
        );
        let blocked = obstacles
            .iter()
            .filter(|o| ignore.is_none() || o.source != ignore)
            .any(|o| o.overlaps(candidate, clearance));
        if !blocked {
            return Some(candidate);
        }
    }
    None
}
