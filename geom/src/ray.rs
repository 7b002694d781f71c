//! Ray primitive and the shared `RayIntersection` result type used by every
//! segment variant's ray-intersection query (spec.md §3, §4.1).

use crate::math::{Point, Vector};

/// A ray: an origin point and a (conventionally unit-length) direction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point,
    pub direction: Vector,
}

impl Ray {
    pub fn new(origin: Point, direction: Vector) -> Self {
        Ray { origin, direction: direction.normalize() }
    }

    #[inline]
    pub fn at(&self, distance: f64) -> Point {
        self.origin + self.direction * distance
    }
}

/// The result of a ray hitting a segment: distance along the ray, the hit
/// point, the outward normal (oriented against the ray), and the winding
/// sign contributed by crossing this segment in this direction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayIntersection {
    /// Distance from the ray's origin to the hit point, along `direction`.
    pub distance: f64,
    pub point: Point,
    pub normal: Vector,
    /// +1 or -1, per spec.md §4.1.1's tangent-vs-ray-perpendicular sign rule.
    pub winding: i32,
}
