//! Rays and pick hits

use glam::Vec3;

use crate::part::PartId;

/// A half-line with a unit direction, so ray parameters are world distances
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; the direction is normalized
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t`
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A part intersected by a pick ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub part: PartId,
    /// Ray parameter of the entry point (distance from the ray origin)
    pub distance: f32,
}
