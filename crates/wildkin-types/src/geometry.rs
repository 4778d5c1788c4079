//! Ground-plane geometry.
//!
//! The simulation runs on the horizontal (x, z) plane. Height comes from the
//! external terrain query and is never stored here.

use core::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A point or direction on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Vec2 {
    /// East-west coordinate.
    pub x: f32,
    /// North-south coordinate.
    pub z: f32,
}

impl Vec2 {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, z: 0.0 };

    /// Construct a vector.
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Unit vector pointing along `heading` (radians, 0 = +z).
    pub fn from_heading(heading: f32) -> Self {
        Self::new(heading.sin(), heading.cos())
    }

    /// Euclidean length.
    pub fn length(self) -> f32 {
        self.x.hypot(self.z)
    }

    /// Distance to another point.
    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len <= f32::EPSILON {
            Self::ZERO
        } else {
            Self::new(self.x / len, self.z / len)
        }
    }

    /// Heading (radians, 0 = +z) of this vector.
    pub fn heading(self) -> f32 {
        self.x.atan2(self.z)
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.z + rhs.z)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.z += rhs.z;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.z * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 6.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-5);
        assert!((b.distance(a) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn normalized_zero_stays_zero() {
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
    }

    #[test]
    fn heading_roundtrip() {
        let dir = Vec2::new(3.0, -3.0).normalized();
        let back = Vec2::from_heading(dir.heading());
        assert!((back.x - dir.x).abs() < 1e-5);
        assert!((back.z - dir.z).abs() < 1e-5);
    }
}
