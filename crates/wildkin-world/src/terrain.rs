//! The world query surface: terrain height and static obstacle circles.
//!
//! Terrain is consumed read-only through [`TerrainQuery`]. Obstacles are
//! derived from world objects (trees, rocks) and ponds; the only mutation the
//! simulation performs is moving a relocated resource's circle.

use serde::{Deserialize, Serialize};
use wildkin_types::{ResourceId, Vec2};

/// A pure function from ground-plane coordinates to terrain height.
pub trait TerrainQuery: core::fmt::Debug + Send + Sync {
    /// Height of the terrain at `(x, z)`.
    fn height(&self, x: f32, z: f32) -> f32;
}

/// Perfectly flat ground at a fixed height.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlatTerrain {
    /// Constant height.
    pub level: f32,
}

impl TerrainQuery for FlatTerrain {
    fn height(&self, _x: f32, _z: f32) -> f32 {
        self.level
    }
}

/// Gentle sinusoidal hills. Deterministic and cheap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollingTerrain {
    /// Peak deviation from zero.
    pub amplitude: f32,
    /// Spatial frequency of the hills.
    pub frequency: f32,
}

impl Default for RollingTerrain {
    fn default() -> Self {
        Self {
            amplitude: 1.5,
            frequency: 0.08,
        }
    }
}

impl TerrainQuery for RollingTerrain {
    fn height(&self, x: f32, z: f32) -> f32 {
        let f = self.frequency;
        self.amplitude * 0.5 * ((x * f).sin() + (z * f * 1.3).cos())
    }
}

/// A circular region creatures cannot walk through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Circle center.
    pub center: Vec2,
    /// Circle radius.
    pub radius: f32,
    /// The world object this circle belongs to, if it is not a pond.
    pub source: Option<ResourceId>,
}

impl Obstacle {
    /// Whether a circle of `clearance` around `point` overlaps this obstacle.
    pub fn overlaps(&self, point: Vec2, clearance: f32) -> bool {
        self.center.distance(point) < self.radius + clearance
    }

    /// Move `point` to the obstacle boundary if it lies inside.
    pub fn push_out(&self, point: Vec2, body_radius: f32) -> Vec2 {
        let offset = point - self.center;
        let dist = offset.length();
        let min = self.radius + body_radius;
        if dist >= min {
            return point;
        }
        let dir = if dist <= f32::EPSILON {
            Vec2::new(1.0, 0.0)
        } else {
            offset.normalized()
        };
        self.center + dir * min
    }
}

/// Whether `point` (with `clearance`) is free of every obstacle.
pub fn is_clear(obstacles: &[Obstacle], point: Vec2, clearance: f32) -> bool {
    obstacles.iter().all(|o| !o.overlaps(point, clearance))
}

/// Resolve a movement endpoint against obstacles and the square world bounds.
pub fn clamp_movement(obstacles: &[Obstacle], half_extent: f32, point: Vec2, body_radius: f32) -> Vec2 {
    let mut p = point;
    for obstacle in obstacles {
        p = obstacle.push_out(p, body_radius);
    }
    Vec2::new(
        p.x.clamp(-half_extent, half_extent),
        p.z.clamp(-half_extent, half_extent),
    )
}
