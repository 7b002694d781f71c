//! Circular arcs, spec.md §4.1.2.

use crate::error::{check_finite, PathKitError, Result};
use crate::math::{self, union_point, Bounds, Point, Vector};
use crate::ray::{Ray, RayIntersection};
use crate::utils::normalize_angle;
use std::f64::consts::PI;

/// A circular arc, canonicalized so `radius >= 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub anticlockwise: bool,
}

impl Arc {
    /// Constructs an arc, canonicalizing a negative radius by adding `PI`
    /// to both angles and flipping its sign (spec.md §3).
    pub fn new(
        center: Point,
        mut radius: f64,
        mut start_angle: f64,
        mut end_angle: f64,
        anticlockwise: bool,
    ) -> Result<Self> {
        check_finite(&[center.x, center.y, radius, start_angle, end_angle], "Arc")?;
        if radius < 0.0 {
            radius = -radius;
            start_angle += PI;
            end_angle += PI;
        }
        let swept = Self::signed_sweep(start_angle, end_angle, anticlockwise);
        if swept.abs() > 2.0 * PI + 1e-9 {
            return Err(PathKitError::invalid_geometry(
                "Arc's swept angle must not exceed 2*PI in magnitude",
            ));
        }
        Ok(Arc { center, radius, start_angle, end_angle, anticlockwise })
    }

    /// The signed angle actually swept from `start_angle` to `end_angle`
    /// in the declared direction. A full ±2π sweep must survive this: a
    /// plain `diff % two_pi` collapses `diff == 2*PI` to `0.0` (a full
    /// circle would otherwise look like a zero-length arc).
    fn signed_sweep(start_angle: f64, end_angle: f64, anticlockwise: bool) -> f64 {
        let two_pi = 2.0 * PI;
        let diff = end_angle - start_angle;
        let r = diff.rem_euclid(two_pi);
        let is_full_sweep = diff.abs() > 1e-9 && (r < 1e-9 || r > two_pi - 1e-9);
        if anticlockwise {
            if is_full_sweep {
                return -two_pi;
            }
            let d = diff % two_pi;
            if d > 0.0 {
                d - two_pi
            } else {
                d
            }
        } else {
            if is_full_sweep {
                return two_pi;
            }
            let d = diff % two_pi;
            if d < 0.0 {
                d + two_pi
            } else {
                d
            }
        }
    }

    /// `startAngle` shifted by the signed swept angle so parameter
    /// direction is monotone, spec.md §4.1.2.
    pub fn actual_end_angle(&self) -> f64 {
        self.start_angle
            + Self::signed_sweep(self.start_angle, self.end_angle, self.anticlockwise)
    }

    #[inline]
    pub fn angle_at(&self, t: f64) -> f64 {
        self.start_angle + (self.actual_end_angle() - self.start_angle) * t
    }

    pub fn position(&self, t: f64) -> Point {
        self.position_at_angle(self.angle_at(t))
    }

    pub fn position_at_angle(&self, angle: f64) -> Point {
        self.center + Vector::new(angle.cos(), angle.sin()) * self.radius
    }

    pub fn tangent(&self, t: f64) -> Vector {
        let angle = self.angle_at(t);
        let radial = Vector::new(angle.cos(), angle.sin());
        let perp = math::perpendicular(radial);
        let sweep = self.actual_end_angle() - self.start_angle;
        if sweep >= 0.0 {
            perp
        } else {
            -perp
        }
    }

    pub fn start_tangent(&self) -> Vector {
        self.tangent(0.0).normalize()
    }

    pub fn end_tangent(&self) -> Vector {
        self.tangent(1.0).normalize()
    }

    /// Signed curvature, positive for visual clockwise turning
    /// (spec.md §4.1 invariant).
    pub fn curvature(&self, _t: f64) -> f64 {
        if self.radius == 0.0 {
            return 0.0;
        }
        let sign = if self.anticlockwise { -1.0 } else { 1.0 };
        sign / self.radius
    }

    pub fn angle_difference(&self) -> f64 {
        (self.actual_end_angle() - self.start_angle).abs()
    }

    /// spec.md §4.1.2 `containsAngle`: true iff the normalized offset from
    /// the sweep's origin angle is within the total swept magnitude.
    pub fn contains_angle(&self, angle: f64) -> bool {
        let origin = if self.anticlockwise { self.end_angle } else { self.start_angle };
        let offset = normalize_angle(angle - origin);
        offset <= self.angle_difference() + 1e-10
    }

    pub fn bounds(&self) -> Bounds {
        let mut b = union_point(math::empty_bounds(), self.position(0.0));
        b = union_point(b, self.position(1.0));
        for cardinal in [0.0, PI / 2.0, PI, 3.0 * PI / 2.0] {
            if self.contains_angle(cardinal) {
                b = union_point(b, self.position_at_angle(cardinal));
            }
        }
        b
    }

    pub fn subdivided(&self, t: f64) -> (Arc, Arc) {
        let mid_angle = self.angle_at(t);
        let first = Arc {
            center: self.center,
            radius: self.radius,
            start_angle: self.start_angle,
            end_angle: mid_angle,
            anticlockwise: self.anticlockwise,
        };
        let second = Arc {
            center: self.center,
            radius: self.radius,
            start_angle: mid_angle,
            end_angle: self.end_angle,
            anticlockwise: self.anticlockwise,
        };
        (first, second)
    }

    pub fn is_degenerate(&self) -> bool {
        self.radius <= 0.0 || self.angle_difference() < 1e-12
    }

    pub fn nondegenerate_segments(&self) -> Vec<Arc> {
        if self.is_degenerate() {
            Vec::new()
        } else {
            vec![*self]
        }
    }

    /// Arcs have no interior dx/dt=0 or dy/dt=0 zero that isn't already at a
    /// cardinal angle; those are folded into `bounds` directly rather than
    /// reported as generic extrema (an arc's position is linear in angle,
    /// not in `t` beyond the angular reparameterization).
    pub fn interior_extrema_ts(&self) -> Vec<f64> {
        let mut result = Vec::new();
        let start = self.start_angle.min(self.actual_end_angle());
        let sweep = self.actual_end_angle() - self.start_angle;
        for cardinal in [0.0, PI / 2.0, PI, 3.0 * PI / 2.0, 2.0 * PI] {
            if self.contains_angle(cardinal) {
                let t = (cardinal - self.start_angle) / sweep;
                let t = ((t % 1.0) + 1.0) % 1.0;
                if t > 1e-9 && t < 1.0 - 1e-9 {
                    result.push(t);
                }
            }
        }
        let _ = start;
        result.sort_by(|a, b| a.partial_cmp(b).unwrap());
        result.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
        result
    }

    pub fn transformed(&self, m: &crate::math::Transform) -> Segment {
        let det = m.m11 * m.m22 - m.m12 * m.m21;
        let scale_x = Vector::new(m.m11, m.m12).length();
        let scale_y = Vector::new(m.m21, m.m22).length();
        if (scale_x - scale_y).abs() < 1e-9 {
            // Uniform scale (+ optional reflection/rotation/translation): stays a circular Arc.
            let mut anticlockwise = self.anticlockwise;
            let (mut start_angle, mut end_angle) = (self.start_angle, self.end_angle);
            if det < 0.0 {
                anticlockwise = !anticlockwise;
            }
            // Re-derive angles from the transformed start/end points so an
            // arbitrary rotation component is folded in correctly.
            let center = m.transform_point(self.center);
            let start_point = m.transform_point(self.position_at_angle(self.start_angle));
            let end_point = m.transform_point(self.position_at_angle(self.end_angle));
            start_angle = (start_point - center).angle_from_x_axis().radians;
            end_angle = (end_point - center).angle_from_x_axis().radians;
            Segment::Arc(Arc {
                center,
                radius: self.radius * scale_x,
                start_angle,
                end_angle,
                anticlockwise,
            })
        } else {
            // Non-uniform scale: becomes an EllipticalArc (spec.md §4.1.6).
            Segment::EllipticalArc(crate::elliptical_arc::EllipticalArc::from_transformed_arc(
                self, m,
            ))
        }
    }

    pub fn signed_area_fragment(&self) -> f64 {
        // For a circular arc centered at C with radius r sweeping from a0 to
        // a1, integrating (-y/2 dx + x/2 dy) over the parametrization gives
        // the area of the circular sector plus the signed area of the
        // triangle (origin, start, end) term that the generic shoelace
        // closure already accounts for via the chord; here we report the
        // sector contribution relative to the origin directly.
        let a0 = self.start_angle;
        let a1 = self.actual_end_angle();
        let r2 = self.radius * self.radius;
        let sector = 0.5 * r2 * (a1 - a0);
        let cx = self.center.x;
        let cy = self.center.y;
        let p0 = self.position_at_angle(a0);
        let p1 = self.position_at_angle(a1);
        let chord_term = 0.5 * (cx * (p1.y - p0.y) - cy * (p1.x - p0.x));
        sector + chord_term
    }

    /// Classical quadratic ray-vs-circle intersection, filtered by
    /// `contains_angle`.
    pub fn intersect_ray(&self, ray: &Ray) -> Vec<RayIntersection> {
        let mut hits = Vec::new();
        let oc = ray.origin - self.center;
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;
        let discriminant = b * b - 4.0 * c;
        if discriminant < 0.0 {
            return hits;
        }
        let sqrt_d = discriminant.sqrt();
        for d in [(-b - sqrt_d) / 2.0, (-b + sqrt_d) / 2.0] {
            if d < 0.0 {
                continue;
            }
            let point = ray.at(d);
            let angle = (point - self.center).angle_from_x_axis().radians;
            if !self.contains_angle(angle) {
                continue;
            }
            let radial = (point - self.center).normalize();
            let normal = if radial.dot(ray.direction) > 0.0 { -radial } else { radial };
            let winding = if self.anticlockwise { -1 } else { 1 };
            hits.push(RayIntersection { distance: d, point, normal, winding });
        }
        hits
    }
}

use crate::segment::Segment;

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_circle() -> Arc {
        Arc::new(math::point(0.0, 0.0), 1.0, 0.0, 2.0 * PI, false).unwrap()
    }

    #[test]
    fn position_endpoints() {
        let arc = Arc::new(math::point(0.0, 0.0), 2.0, 0.0, PI / 2.0, false).unwrap();
        let p0 = arc.position(0.0);
        let p1 = arc.position(1.0);
        assert!((p0.x - 2.0).abs() < 1e-9 && p0.y.abs() < 1e-9);
        assert!(p1.x.abs() < 1e-9 && (p1.y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn negative_radius_canonicalized() {
        let arc = Arc::new(math::point(0.0, 0.0), -1.0, 0.0, PI / 2.0, false).unwrap();
        assert!(arc.radius > 0.0);
    }

    #[test]
    fn full_circle_bounds_are_symmetric() {
        let arc = unit_circle();
        let b = arc.bounds();
        assert!((b.min.x + 1.0).abs() < 1e-9);
        assert!((b.max.x - 1.0).abs() < 1e-9);
        assert!((b.min.y + 1.0).abs() < 1e-9);
        assert!((b.max.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn contains_angle_quarter_arc() {
        let arc = Arc::new(math::point(0.0, 0.0), 1.0, 0.0, PI / 2.0, false).unwrap();
        assert!(arc.contains_angle(PI / 4.0));
        assert!(!arc.contains_angle(PI));
    }

    #[test]
    fn ray_hits_circle_twice() {
        let arc = unit_circle();
        let ray = Ray::new(math::point(-2.0, 0.0), math::vector(1.0, 0.0));
        let hits = arc.intersect_ray(&ray);
        assert_eq!(hits.len(), 2);
    }
}
