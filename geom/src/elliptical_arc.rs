//! Elliptical arcs, spec.md §4.1.3.

use crate::arc::Arc;
use crate::error::{check_finite, PathKitError, Result};
use crate::math::{self, union_point, Bounds, Point, Transform, Vector};
use crate::ray::{Ray, RayIntersection};
use crate::utils::normalize_angle;
use std::f64::consts::PI;

/// An elliptical arc, canonicalized so `radius_x >= radius_y >= 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct EllipticalArc {
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
    pub rotation: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub anticlockwise: bool,
}

impl EllipticalArc {
    pub fn new(
        center: Point,
        mut radius_x: f64,
        mut radius_y: f64,
        mut rotation: f64,
        mut start_angle: f64,
        mut end_angle: f64,
        anticlockwise: bool,
    ) -> Result<Self> {
        check_finite(
            &[center.x, center.y, radius_x, radius_y, rotation, start_angle, end_angle],
            "EllipticalArc",
        )?;
        if radius_x < 0.0 || radius_y < 0.0 {
            return Err(PathKitError::invalid_geometry("EllipticalArc radii must be non-negative"));
        }
        // Canonicalize so radius_x >= radius_y by swapping radii and
        // rotating the frame a quarter turn (spec.md §4.1.3).
        if radius_x < radius_y {
            std::mem::swap(&mut radius_x, &mut radius_y);
            rotation += PI / 2.0;
            start_angle -= PI / 2.0;
            end_angle -= PI / 2.0;
        }
        if radius_x < radius_y {
            // Guarded branch the source leaves unverified (spec.md §9).
            return Err(PathKitError::unsupported_configuration(
                "radius_x < radius_y after canonicalization",
            ));
        }
        Ok(EllipticalArc { center, radius_x, radius_y, rotation, start_angle, end_angle, anticlockwise })
    }

    /// Maps the unit circle to this ellipse: `translate ∘ rotate ∘
    /// scale(rx, ry)`.
    pub fn unit_transform(&self) -> Transform {
        Transform::scale(self.radius_x, self.radius_y)
            .then_rotate(math::Angle::radians(self.rotation))
            .then_translate(self.center.to_vector())
    }

    /// A full ±2π sweep must survive this: a plain `diff % two_pi`
    /// collapses `diff == 2*PI` to `0.0` (a full ellipse would otherwise
    /// look like a zero-length arc).
    fn signed_sweep(&self) -> f64 {
        let two_pi = 2.0 * PI;
        let diff = self.end_angle - self.start_angle;
        let r = diff.rem_euclid(two_pi);
        let is_full_sweep = diff.abs() > 1e-9 && (r < 1e-9 || r > two_pi - 1e-9);
        if self.anticlockwise {
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

    pub fn actual_end_angle(&self) -> f64 {
        self.start_angle + self.signed_sweep()
    }

    pub fn angle_at(&self, t: f64) -> f64 {
        self.start_angle + (self.actual_end_angle() - self.start_angle) * t
    }

    pub fn position_at_angle(&self, angle: f64) -> Point {
        self.unit_transform().transform_point(math::point(angle.cos(), angle.sin()))
    }

    pub fn position(&self, t: f64) -> Point {
        self.position_at_angle(self.angle_at(t))
    }

    pub fn tangent_at_angle(&self, angle: f64) -> Vector {
        // Derivative of the unit circle parametrization is (-sin, cos);
        // push it through the transform's linear part.
        let unit = self.unit_transform();
        let local = math::vector(-angle.sin(), angle.cos());
        unit.transform_vector(local)
    }

    pub fn tangent(&self, t: f64) -> Vector {
        let sweep = self.actual_end_angle() - self.start_angle;
        let tangent = self.tangent_at_angle(self.angle_at(t));
        if sweep >= 0.0 {
            tangent
        } else {
            -tangent
        }
    }

    pub fn start_tangent(&self) -> Vector {
        self.tangent(0.0).normalize()
    }

    pub fn end_tangent(&self) -> Vector {
        self.tangent(1.0).normalize()
    }

    pub fn curvature(&self, t: f64) -> f64 {
        let theta = self.angle_at(t) - self.rotation;
        let rx = self.radius_x;
        let ry = self.radius_y;
        let sin2 = theta.sin().powi(2);
        let cos2 = theta.cos().powi(2);
        let denom = (rx * rx * sin2 + ry * ry * cos2).powf(1.5);
        if denom.abs() < 1e-15 {
            return 0.0;
        }
        let sign = if self.anticlockwise { -1.0 } else { 1.0 };
        sign * (rx * ry) / denom
    }

    pub fn angle_difference(&self) -> f64 {
        (self.actual_end_angle() - self.start_angle).abs()
    }

    pub fn contains_angle(&self, angle: f64) -> bool {
        let origin = if self.anticlockwise { self.end_angle } else { self.start_angle };
        let offset = normalize_angle(angle - origin);
        offset <= self.angle_difference() + 1e-10
    }

    /// Bounding box: endpoints plus up to four extrema angles, computed in
    /// the unrotated local frame (spec.md §4.1.3).
    pub fn bounds(&self) -> Bounds {
        let mut b = union_point(math::empty_bounds(), self.position(0.0));
        b = union_point(b, self.position(1.0));
        let rx = self.radius_x;
        let ry = self.radius_y;
        let rot = self.rotation;
        if rx.abs() > 1e-12 && rot.cos().abs() > 1e-12 {
            let base = (-(ry / rx) * rot.tan()).atan();
            for candidate in [base, base + PI] {
                if self.contains_angle(candidate) {
                    b = union_point(b, self.position_at_angle(candidate));
                }
            }
        }
        if rot.sin().abs() > 1e-12 {
            let base = ((ry / rx) / rot.tan()).atan();
            for candidate in [base, base + PI] {
                if self.contains_angle(candidate) {
                    b = union_point(b, self.position_at_angle(candidate));
                }
            }
        } else if rx.abs() > 1e-12 {
            // rot == 0: axis-aligned extrema are at 0/PI (x) and PI/2, 3PI/2 (y).
            for candidate in [0.0, PI, PI / 2.0, 3.0 * PI / 2.0] {
                if self.contains_angle(candidate) {
                    b = union_point(b, self.position_at_angle(candidate));
                }
            }
        }
        b
    }

    pub fn subdivided(&self, t: f64) -> (EllipticalArc, EllipticalArc) {
        let mid = self.angle_at(t);
        let first = EllipticalArc { end_angle: mid, ..*self };
        let second = EllipticalArc { start_angle: mid, ..*self };
        (first, second)
    }

    pub fn is_degenerate(&self) -> bool {
        self.radius_x <= 0.0 || self.radius_y <= 0.0 || self.angle_difference() < 1e-12
    }

    /// Reduces to a circular `Arc` when `radius_x == radius_y`.
    pub fn nondegenerate_segments(&self) -> Vec<EllipseOrArc> {
        if self.is_degenerate() {
            return Vec::new();
        }
        if (self.radius_x - self.radius_y).abs() < 1e-9 {
            vec![EllipseOrArc::Arc(Arc {
                center: self.center,
                radius: self.radius_x,
                start_angle: self.start_angle + self.rotation,
                end_angle: self.end_angle + self.rotation,
                anticlockwise: self.anticlockwise,
            })]
        } else {
            vec![EllipseOrArc::Ellipse(*self)]
        }
    }

    pub fn interior_extrema_ts(&self) -> Vec<f64> {
        let mut result = Vec::new();
        let sweep = self.actual_end_angle() - self.start_angle;
        if sweep.abs() < 1e-12 {
            return result;
        }
        let rx = self.radius_x;
        let ry = self.radius_y;
        let rot = self.rotation;
        let mut candidates = Vec::new();
        if rot.cos().abs() > 1e-12 {
            let base = (-(ry / rx) * rot.tan()).atan();
            candidates.push(base);
            candidates.push(base + PI);
        }
        if rot.sin().abs() > 1e-12 {
            let base = ((ry / rx) / rot.tan()).atan();
            candidates.push(base);
            candidates.push(base + PI);
        } else {
            candidates.extend([0.0, PI, PI / 2.0, 3.0 * PI / 2.0]);
        }
        for candidate in candidates {
            if self.contains_angle(candidate) {
                let t = (candidate - self.start_angle) / sweep;
                let t = ((t % 1.0) + 1.0) % 1.0;
                if t > 1e-9 && t < 1.0 - 1e-9 {
                    result.push(t);
                }
            }
        }
        result.sort_by(|a, b| a.partial_cmp(b).unwrap());
        result.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
        result
    }

    pub fn from_transformed_arc(arc: &Arc, m: &Transform) -> EllipticalArc {
        let det = m.m11 * m.m22 - m.m12 * m.m21;
        let center = m.transform_point(arc.center);
        let p_x = m.transform_vector(math::vector(arc.radius, 0.0));
        let p_y = m.transform_vector(math::vector(0.0, arc.radius));
        let radius_x = p_x.length();
        let radius_y = p_y.length();
        let rotation = p_x.angle_from_x_axis().radians;
        let mut start_angle = arc.start_angle;
        let mut end_angle = arc.end_angle;
        let mut anticlockwise = arc.anticlockwise;
        if det < 0.0 {
            start_angle = -start_angle;
            end_angle = -end_angle;
            anticlockwise = !anticlockwise;
        }
        let (radius_x, radius_y, rotation) = if radius_x >= radius_y {
            (radius_x, radius_y, rotation)
        } else {
            (radius_y, radius_x, rotation + PI / 2.0)
        };
        EllipticalArc {
            center,
            radius_x,
            radius_y,
            rotation,
            start_angle,
            end_angle,
            anticlockwise,
        }
    }

    pub fn transformed(&self, m: &Transform) -> EllipticalArc {
        let det = m.m11 * m.m22 - m.m12 * m.m21;
        let center = m.transform_point(self.center);
        let rotation_only = math::Rotation::new(math::Angle::radians(self.rotation));
        let radius_x_vec = m.transform_vector(rotation_only.transform_vector(math::vector(self.radius_x, 0.0)));
        let radius_y_vec = m.transform_vector(rotation_only.transform_vector(math::vector(0.0, self.radius_y)));
        let radius_x = radius_x_vec.length();
        let radius_y = radius_y_vec.length();
        let rotation = radius_x_vec.angle_from_x_axis().radians;
        let mut start_angle = self.start_angle;
        let mut end_angle = self.end_angle;
        let mut anticlockwise = self.anticlockwise;
        if det < 0.0 {
            start_angle = -start_angle;
            end_angle = -end_angle;
            anticlockwise = !anticlockwise;
        }
        if radius_x >= radius_y {
            EllipticalArc { center, radius_x, radius_y, rotation, start_angle, end_angle, anticlockwise }
        } else {
            EllipticalArc {
                center,
                radius_x: radius_y,
                radius_y: radius_x,
                rotation: rotation + PI / 2.0,
                start_angle: start_angle - PI / 2.0,
                end_angle: end_angle - PI / 2.0,
                anticlockwise,
            }
        }
    }

    pub fn signed_area_fragment(&self) -> f64 {
        let a0 = self.start_angle;
        let a1 = self.actual_end_angle();
        let sector = 0.5 * self.radius_x * self.radius_y * (a1 - a0);
        let cx = self.center.x;
        let cy = self.center.y;
        let p0 = self.position_at_angle(a0);
        let p1 = self.position_at_angle(a1);
        let chord_term = 0.5 * (cx * (p1.y - p0.y) - cy * (p1.x - p0.x));
        sector + chord_term
    }

    /// Transforms the ray into the unit-circle frame, reduces to
    /// circle-arc intersection, then maps hits back (spec.md §4.1.3).
    pub fn intersect_ray(&self, ray: &Ray) -> Vec<RayIntersection> {
        let unit_transform = self.unit_transform();
        let inverse = match unit_transform.inverse() {
            Some(inv) => inv,
            None => return Vec::new(),
        };
        let local_origin = inverse.transform_point(ray.origin);
        let local_dir = inverse.transform_vector(ray.direction);
        let local_ray = Ray { origin: local_origin, direction: local_dir.normalize() };
        let scale = local_dir.length();
        let unit_circle = Arc {
            center: math::point(0.0, 0.0),
            radius: 1.0,
            start_angle: self.start_angle,
            end_angle: self.end_angle,
            anticlockwise: self.anticlockwise,
        };
        let local_hits = unit_circle.intersect_ray(&local_ray);
        local_hits
            .into_iter()
            .map(|hit| {
                let point = unit_transform.transform_point(hit.point);
                let normal_local = hit.normal;
                // Inverse-transpose for correcting the normal under a
                // non-conformal map.
                let normal = inverse.transform_vector(normal_local).normalize();
                let normal = if normal.dot(ray.direction) > 0.0 { -normal } else { normal };
                RayIntersection { distance: hit.distance / scale.max(1e-12), point, normal, winding: hit.winding }
            })
            .collect()
    }
}

/// Result of `nondegenerate_segments`: either stays elliptical or reduces
/// to a circular arc when `radius_x == radius_y`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EllipseOrArc {
    Ellipse(EllipticalArc),
    Arc(Arc),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_endpoints_match_axes() {
        let arc = EllipticalArc::new(math::point(0.0, 0.0), 2.0, 1.0, 0.0, 0.0, PI / 2.0, false).unwrap();
        let p0 = arc.position(0.0);
        let p1 = arc.position(1.0);
        assert!((p0.x - 2.0).abs() < 1e-9 && p0.y.abs() < 1e-9);
        assert!(p1.x.abs() < 1e-9 && (p1.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn canonicalizes_radii_order() {
        let arc = EllipticalArc::new(math::point(0.0, 0.0), 1.0, 2.0, 0.0, 0.0, PI / 2.0, false).unwrap();
        assert!(arc.radius_x >= arc.radius_y);
    }

    #[test]
    fn reduces_to_circle_when_radii_equal() {
        let arc = EllipticalArc::new(math::point(0.0, 0.0), 3.0, 3.0, 0.0, 0.0, PI, false).unwrap();
        let segs = arc.nondegenerate_segments();
        assert_eq!(segs.len(), 1);
        assert!(matches!(segs[0], EllipseOrArc::Arc(_)));
    }
}
