//! Line segments, spec.md §4.1.1.

use crate::error::{check_finite, PathKitError, Result};
use crate::math::{self, union_point, Bounds, Point, Vector};
use crate::ray::{Ray, RayIntersection};
use crate::utils::min_max;

/// A straight segment from `start` to `end`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Result<Self> {
        check_finite(&[start.x, start.y, end.x, end.y], "Line")?;
        Ok(Line { start, end })
    }

    #[inline]
    pub fn position(&self, t: f64) -> Point {
        math::blend(self.start, self.end, t)
    }

    #[inline]
    pub fn tangent(&self, _t: f64) -> Vector {
        self.end - self.start
    }

    #[inline]
    pub fn start_tangent(&self) -> Vector {
        self.tangent(0.0).normalize()
    }

    #[inline]
    pub fn end_tangent(&self) -> Vector {
        self.tangent(1.0).normalize()
    }

    #[inline]
    pub fn curvature(&self, _t: f64) -> f64 {
        0.0
    }

    pub fn bounds(&self) -> Bounds {
        let (min_x, max_x) = min_max(self.start.x, self.end.x);
        let (min_y, max_y) = min_max(self.start.y, self.end.y);
        Bounds::new(math::point(min_x, min_y), math::point(max_x, max_y))
    }

    /// Splits at `t`, `t` in `(0, 1)`; `t` in `{0, 1}` returns the segment
    /// unchanged on that side (spec.md §3's "subdivided" invariant).
    pub fn subdivided(&self, t: f64) -> (Line, Line) {
        let mid = self.position(t);
        (Line { start: self.start, end: mid }, Line { start: mid, end: self.end })
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// spec.md §4.1.1 `getNondegenerateSegments`.
    pub fn nondegenerate_segments(&self) -> Vec<Line> {
        if self.is_degenerate() {
            Vec::new()
        } else {
            vec![*self]
        }
    }

    /// spec.md §4.1.1 `getInteriorExtremaTs`: a line has no interior
    /// extrema, its derivative is constant.
    pub fn interior_extrema_ts(&self) -> Vec<f64> {
        Vec::new()
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).length()
    }

    pub fn transformed(&self, m: &crate::math::Transform) -> Line {
        Line {
            start: m.transform_point(self.start),
            end: m.transform_point(self.end),
        }
    }

    /// spec.md §4.1.7: `∫(-y/2 dx + x/2 dy)` over `[0, 1]` for a line reduces
    /// to the shoelace-formula term for one edge.
    pub fn signed_area_fragment(&self) -> f64 {
        (self.start.x * self.end.y - self.end.x * self.start.y) * 0.5
    }

    /// Solves the 2x2 linear system `ray.origin + d * ray.direction ==
    /// start + t * (end - start)` and accepts the hit only if it lies
    /// within the segment (`t` in `[0, 1]`) and ahead of the ray
    /// (`d >= 0`).
    pub fn intersect_ray(&self, ray: &Ray) -> Option<RayIntersection> {
        let seg = self.end - self.start;
        let denom = ray.direction.x * seg.y - ray.direction.y * seg.x;
        if denom.abs() < 1e-12 {
            return None;
        }
        let diff = self.start - ray.origin;
        let t = (diff.x * ray.direction.y - diff.y * ray.direction.x) / denom;
        let d = (diff.x * seg.y - diff.y * seg.x) / denom;
        if !(0.0..=1.0).contains(&t) || d < 0.0 {
            return None;
        }
        let point = self.position(t);
        let tangent = seg;
        let normal_raw = math::perpendicular(tangent).normalize();
        // Orient the normal against the ray direction.
        let normal = if normal_raw.dot(ray.direction) > 0.0 { -normal_raw } else { normal_raw };
        let winding = if math::perpendicular(ray.direction).dot(tangent) > 0.0 { 1 } else { -1 };
        Some(RayIntersection { distance: d, point, normal, winding })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l(sx: f64, sy: f64, ex: f64, ey: f64) -> Line {
        Line::new(math::point(sx, sy), math::point(ex, ey)).unwrap()
    }

    #[test]
    fn position_endpoints() {
        let line = l(0.0, 0.0, 10.0, 20.0);
        assert_eq!(line.position(0.0), line.start);
        assert_eq!(line.position(1.0), line.end);
    }

    #[test]
    fn subdivided_concatenates() {
        let line = l(0.0, 0.0, 10.0, 0.0);
        let (a, b) = line.subdivided(0.25);
        assert_eq!(a.end, b.start);
        assert_eq!(a.start, line.start);
        assert_eq!(b.end, line.end);
    }

    #[test]
    fn bounds_contains_endpoints() {
        let line = l(5.0, -3.0, -2.0, 7.0);
        let b = line.bounds();
        assert!(b.contains(line.start));
        assert!(b.contains(line.end));
    }

    #[test]
    fn nondegenerate_drops_zero_length() {
        let line = l(1.0, 1.0, 1.0, 1.0);
        assert!(line.nondegenerate_segments().is_empty());
    }

    #[test]
    fn rejects_nonfinite() {
        assert!(Line::new(math::point(f64::NAN, 0.0), math::point(1.0, 1.0)).is_err());
    }

    #[test]
    fn ray_intersection_perpendicular() {
        let line = l(0.0, -5.0, 0.0, 5.0);
        let ray = Ray::new(math::point(-5.0, 0.0), math::vector(1.0, 0.0));
        let hit = line.intersect_ray(&ray).unwrap();
        assert!((hit.point.x - 0.0).abs() < 1e-9);
        assert!((hit.point.y - 0.0).abs() < 1e-9);
        assert!((hit.distance - 5.0).abs() < 1e-9);
    }
}
