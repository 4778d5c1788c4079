//! Steering, collision clamping, and stuck detection.

use rand::Rng;
use wildkin_types::Vec2;
use wildkin_world::{WorldState, roll_between};

/// Collision radius of a creature body.
pub const BODY_RADIUS: f32 = 0.4;

/// Detects a creature making no progress toward its target.
///
/// Tracks the best distance seen so far; if it fails to improve by at least
/// `epsilon` for longer than `limit` seconds, the approach is abandoned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StuckTracker {
    best: f32,
    idle: f32,
    limit: f32,
    epsilon: f32,
}

impl StuckTracker {
    /// Start tracking with a random limit drawn from `limit_range`.
    pub fn new(rng: &mut impl Rng, limit_range: (f32, f32), epsilon: f32) -> Self {
        Self {
            best: f32::INFINITY,
            idle: 0.0,
            limit: roll_between(rng, limit_range),
            epsilon,
        }
    }

    /// Feed the current distance. Returns `true` once stuck.
    pub fn update(&mut self, distance: f32, dt: f32) -> bool {
        if distance < self.best - self.epsilon {
            self.best = distance;
            self.idle = 0.0;
        } else {
            self.idle += dt;
        }
        self.idle > self.limit
    }
}

/// Move `position` toward `target` by at most `speed * dt`, resolving
/// collisions. Returns the new position and heading.
pub fn step_toward(world: &WorldState, position: Vec2, target: Vec2, speed: f32, dt: f32) -> (Vec2, f32) {
    let offset = target - position;
    let distance = offset.length();
    if distance <= f32::EPSILON {
        return (position, offset.heading());
    }
    let step = (speed * dt).min(distance);
    let dir = offset.normalized();
    let next = world.clamp(position + dir * step, BODY_RADIUS);
    (next, dir.heading())
}

/// Move `position` in `direction` by `speed * dt`, resolving collisions.
pub fn step_along(world: &WorldState, position: Vec2, direction: Vec2, speed: f32, dt: f32) -> Vec2 {
    world.clamp(position + direction.normalized() * (speed * dt), BODY_RADIUS)
}

/// A random wander destination within `range` of `anchor`.
pub fn wander_target(rng: &mut impl Rng, world: &WorldState, anchor: Vec2, range: f32) -> Vec2 {
    let heading = roll_between(rng, (0.0, core::f32::consts::TAU));
    let dist = roll_between(rng, (range * 0.3, range));
    world.clamp(anchor + Vec2::from_heading(heading) * dist, BODY_RADIUS)
}
