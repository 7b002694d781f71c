//! Cubic Bezier curves, spec.md §4.1.5.

use crate::error::{check_finite, Result};
use crate::intersection;
use crate::line::Line;
use crate::math::{self, union_point, Bounds, Point, Vector};
use crate::quadratic_bezier::QuadraticBezierSegment;

/// A cubic Bezier curve.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBezierSegment {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

/// Cached cusp/inflection analysis, spec.md §3's "lazily computed cusp
/// analysis".
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CuspAnalysis {
    pub t_cusp: f64,
    pub determinant: f64,
    pub inflection_t0: f64,
    pub inflection_t1: f64,
    pub has_cusp: bool,
}

impl CubicBezierSegment {
    pub fn new(start: Point, control1: Point, control2: Point, end: Point) -> Result<Self> {
        check_finite(
            &[
                start.x, start.y, control1.x, control1.y, control2.x, control2.y, end.x, end.y,
            ],
            "CubicBezierSegment",
        )?;
        Ok(CubicBezierSegment { start, control1, control2, end })
    }

    pub fn position(&self, t: f64) -> Point {
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;
        let t2 = t * t;
        let t3 = t2 * t;
        self.start * one_t3
            + self.control1.to_vector() * (3.0 * one_t2 * t)
            + self.control2.to_vector() * (3.0 * one_t * t2)
            + self.end.to_vector() * t3
    }

    pub fn tangent(&self, t: f64) -> Vector {
        let one_t = 1.0 - t;
        (self.control1 - self.start) * (3.0 * one_t * one_t)
            + (self.control2 - self.control1) * (6.0 * one_t * t)
            + (self.end - self.control2) * (3.0 * t * t)
    }

    pub fn start_tangent(&self) -> Vector {
        self.tangent(0.0).normalize()
    }

    pub fn end_tangent(&self) -> Vector {
        self.tangent(1.0).normalize()
    }

    pub fn second_derivative(&self, t: f64) -> Vector {
        let one_t = 1.0 - t;
        (self.control2.to_vector() - self.control1.to_vector() * 2.0 + self.start.to_vector()) * (6.0 * one_t)
            + (self.end.to_vector() - self.control2.to_vector() * 2.0 + self.control1.to_vector()) * (6.0 * t)
    }

    pub fn curvature(&self, t: f64) -> f64 {
        let d1 = self.tangent(t);
        let d2 = self.second_derivative(t);
        let denom = d1.length().powi(3);
        if denom < 1e-15 {
            return 0.0;
        }
        (d1.x * d2.y - d1.y * d2.x) / denom
    }

    pub fn flip(&self) -> Self {
        CubicBezierSegment {
            start: self.end,
            control1: self.control2,
            control2: self.control1,
            end: self.start,
        }
    }

    /// spec.md §4.1.5: `a = -p0+3p1-3p2+p3`, `b = 3p0-6p1+3p2`, `c =
    /// -3p0+3p1`, `tCusp = -1/2 * (a⊥·c)/(a⊥·b)`,
    /// `det = tCusp^2 - 1/3 * (b⊥·c)/(a⊥·b)`.
    pub fn cusp_analysis(&self) -> CuspAnalysis {
        let p0 = self.start.to_vector();
        let p1 = self.control1.to_vector();
        let p2 = self.control2.to_vector();
        let p3 = self.end.to_vector();

        let a = p3 - p2 * 3.0 + p1 * 3.0 - p0;
        let b = (p0 - p1 * 2.0 + p2) * 3.0;
        let c = (p1 - p0) * 3.0;

        let a_perp = math::perpendicular(a);
        let denom = a_perp.dot(b);

        if denom.abs() < 1e-12 {
            return CuspAnalysis {
                t_cusp: f64::NAN,
                determinant: f64::NAN,
                inflection_t0: f64::NAN,
                inflection_t1: f64::NAN,
                has_cusp: false,
            };
        }

        let t_cusp = -0.5 * (a_perp.dot(c)) / denom;
        let det = t_cusp * t_cusp - (1.0 / 3.0) * (math::perpendicular(b).dot(c)) / denom;

        let (inflection_t0, inflection_t1) = if det >= 0.0 {
            let sqrt_det = det.sqrt();
            (t_cusp - sqrt_det, t_cusp + sqrt_det)
        } else {
            (f64::NAN, f64::NAN)
        };

        let has_cusp = det >= 0.0
            && t_cusp >= 0.0
            && t_cusp <= 1.0
            && self.tangent(t_cusp).length() < crate::epsilon::CUSP_TANGENT;

        CuspAnalysis { t_cusp, determinant: det, inflection_t0, inflection_t1, has_cusp }
    }

    /// If a cusp lies inside `[0, 1]`, decomposes into one or two
    /// quadratics splitting at the cusp, endpoints unchanged, shared
    /// midpoint equal to the cusp point (spec.md §4.1.5). The Open Question
    /// in spec.md §9 about `subdivided(this.getTCusp)` passing the method
    /// itself is resolved here by substituting the numeric `t_cusp` value,
    /// which is the only reading that produces a usable decomposition.
    pub fn cusp_quadratics(&self) -> Option<Vec<QuadraticBezierSegment>> {
        let analysis = self.cusp_analysis();
        if !analysis.has_cusp {
            return None;
        }
        let t = analysis.t_cusp;
        let cusp_point = self.position(t);
        if t <= 1e-9 || t >= 1.0 - 1e-9 {
            // The cusp sits at an endpoint: one quadratic approximating the
            // whole curve via its tangent-derived control point.
            let ctrl = self.control1.lerp(self.control2, 0.5);
            return Some(vec![QuadraticBezierSegment { start: self.start, control: ctrl, end: self.end }]);
        }
        let first_ctrl = self.start.lerp(self.control1, 1.0).lerp(cusp_point, 0.5);
        let second_ctrl = self.control2.lerp(self.end, 0.0).lerp(cusp_point, 0.5);
        Some(vec![
            QuadraticBezierSegment { start: self.start, control: first_ctrl, end: cusp_point },
            QuadraticBezierSegment { start: cusp_point, control: second_ctrl, end: self.end },
        ])
    }

    pub fn bounds(&self) -> Bounds {
        let mut b = union_point(math::empty_bounds(), self.start);
        b = union_point(b, self.end);
        for t in self.interior_extrema_ts() {
            b = union_point(b, self.position(t));
        }
        b
    }

    fn extrema_ts_1d(v0: f64, v1: f64, v2: f64, v3: f64) -> Vec<f64> {
        // d/dt of the cubic Bernstein form is a quadratic in t.
        let a = -v0 + 3.0 * v1 - 3.0 * v2 + v3;
        let b = 2.0 * (v0 - 2.0 * v1 + v2);
        let c = v1 - v0;
        let mut roots = Vec::new();
        if a.abs() < 1e-12 {
            if b.abs() > 1e-12 {
                let t = -c / b;
                if t > 1e-9 && t < 1.0 - 1e-9 {
                    roots.push(t);
                }
            }
            return roots;
        }
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return roots;
        }
        let sqrt_disc = disc.sqrt();
        for t in [(-b - sqrt_disc) / (2.0 * a), (-b + sqrt_disc) / (2.0 * a)] {
            if t > 1e-9 && t < 1.0 - 1e-9 {
                roots.push(t);
            }
        }
        roots
    }

    pub fn interior_extrema_ts(&self) -> Vec<f64> {
        let mut result = Self::extrema_ts_1d(self.start.x, self.control1.x, self.control2.x, self.end.x);
        result.extend(Self::extrema_ts_1d(self.start.y, self.control1.y, self.control2.y, self.end.y));
        result.sort_by(|a, b| a.partial_cmp(b).unwrap());
        result.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
        result
    }

    pub fn split(&self, t: f64) -> (CubicBezierSegment, CubicBezierSegment) {
        let ab = self.start.lerp(self.control1, t);
        let bc = self.control1.lerp(self.control2, t);
        let cd = self.control2.lerp(self.end, t);
        let abc = ab.lerp(bc, t);
        let bcd = bc.lerp(cd, t);
        let abcd = abc.lerp(bcd, t);
        (
            CubicBezierSegment { start: self.start, control1: ab, control2: abc, end: abcd },
            CubicBezierSegment { start: abcd, control1: bcd, control2: cd, end: self.end },
        )
    }

    pub fn subdivided(&self, t: f64) -> (CubicBezierSegment, CubicBezierSegment) {
        self.split(t)
    }

    /// Degree reduction: replaces the cubic with a quadratic when its two
    /// control points, projected, coincide within `epsilon` (spec.md
    /// §4.1.5).
    pub fn reduce_to_quadratic(&self, epsilon: f64) -> Option<QuadraticBezierSegment> {
        let c1 = (self.control1.to_vector() * 3.0 - self.start.to_vector()) * 0.5;
        let c2 = (self.control2.to_vector() * 3.0 - self.end.to_vector()) * 0.5;
        if (c1 - c2).length() <= epsilon {
            let control = math::Point::from((c1 + c2) * 0.5);
            return Some(QuadraticBezierSegment { start: self.start, control, end: self.end });
        }
        None
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end && self.start == self.control1 && self.start == self.control2
    }

    pub fn nondegenerate_segments(&self) -> Vec<CubicBezierSegment> {
        if self.is_degenerate() {
            Vec::new()
        } else {
            vec![*self]
        }
    }

    pub fn transformed(&self, m: &crate::math::Transform) -> CubicBezierSegment {
        CubicBezierSegment {
            start: m.transform_point(self.start),
            control1: m.transform_point(self.control1),
            control2: m.transform_point(self.control2),
            end: m.transform_point(self.end),
        }
    }

    pub fn signed_area_fragment(&self) -> f64 {
        let (x0, y0) = (self.start.x, self.start.y);
        let (x1, y1) = (self.control1.x, self.control1.y);
        let (x2, y2) = (self.control2.x, self.control2.y);
        let (x3, y3) = (self.end.x, self.end.y);
        // Closed form of ∫(x dy - y dx)/2 for a cubic Bezier in Bernstein form.
        let term = x0 * (-10.0 * y0 + 6.0 * y1 + 3.0 * y2 + y3)
            + x1 * (-6.0 * y0 + 3.0 * y2 + 3.0 * y3)
            + x2 * (-3.0 * y0 - 3.0 * y1 + 6.0 * y3)
            + x3 * (-y0 - 3.0 * y1 - 6.0 * y2 + 10.0 * y3);
        term / 20.0
    }

    /// Self-intersection: subdivides at interior extrema into monotone
    /// pieces, then runs the bounds-subdivision intersector over each
    /// unordered pair of pieces, rejecting hits within
    /// `epsilon::CUSP_TANGENT`-scaled distance of shared endpoints
    /// (spec.md §4.1.5).
    pub fn self_intersection(&self) -> Option<(f64, f64, Point)> {
        let mut ts = self.interior_extrema_ts();
        ts.insert(0, 0.0);
        ts.push(1.0);
        let mut pieces = Vec::new();
        for w in ts.windows(2) {
            pieces.push((w[0], w[1], self.split_range(w[0], w[1])));
        }
        for i in 0..pieces.len() {
            for j in (i + 1)..pieces.len() {
                let (a0, a1, pa) = pieces[i];
                let (b0, b1, pb) = pieces[j];
                let adjacent = (a1 - b0).abs() < 1e-12 || (b1 - a0).abs() < 1e-12;
                let hits = intersection::intersect_cubic_cubic(&pa, &pb);
                for hit in hits {
                    let global_a = a0 + hit.t_a * (a1 - a0);
                    let global_b = b0 + hit.t_b * (b1 - b0);
                    if adjacent {
                        let near_shared_endpoint = (global_a - global_b).abs() < crate::epsilon::CUSP_TANGENT
                            || global_a < 1e-7
                            || global_a > 1.0 - 1e-7
                            || global_b < 1e-7
                            || global_b > 1.0 - 1e-7;
                        if near_shared_endpoint {
                            continue;
                        }
                    }
                    if (global_a - global_b).abs() < 1e-7 {
                        continue;
                    }
                    return Some((global_a, global_b, hit.point));
                }
            }
        }
        None
    }

    pub fn split_range(&self, t0: f64, t1: f64) -> CubicBezierSegment {
        let (_, after) = self.split(t0);
        if (1.0 - t0).abs() < 1e-15 {
            return after;
        }
        let local_t1 = (t1 - t0) / (1.0 - t0);
        after.split(local_t1).0
    }

    pub fn length(&self, samples: u32) -> f64 {
        let mut len = 0.0;
        let mut prev = self.position(0.0);
        for i in 1..=samples {
            let t = i as f64 / samples as f64;
            let p = self.position(t);
            len += (p - prev).length();
            prev = p;
        }
        len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(
        sx: f64, sy: f64, c1x: f64, c1y: f64, c2x: f64, c2y: f64, ex: f64, ey: f64,
    ) -> CubicBezierSegment {
        CubicBezierSegment::new(
            math::point(sx, sy),
            math::point(c1x, c1y),
            math::point(c2x, c2y),
            math::point(ex, ey),
        )
        .unwrap()
    }

    #[test]
    fn position_endpoints() {
        let curve = c(0.0, 0.0, 0.0, 10.0, 10.0, 10.0, 10.0, 0.0);
        assert_eq!(curve.position(0.0), curve.start);
        assert_eq!(curve.position(1.0), curve.end);
    }

    #[test]
    fn split_resamples_consistently() {
        let curve = c(0.0, 0.0, 0.0, 10.0, 10.0, 10.0, 10.0, 0.0);
        let (a, b) = curve.split(0.4);
        assert_eq!(a.end, b.start);
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let direct = curve.position(0.4 + t * 0.6);
            let via = b.position(t);
            assert!((direct - via).length() < 1e-9);
        }
    }

    #[test]
    fn self_intersecting_cubic_finds_crossing() {
        // C(10,0) -> (30,10) -> (0,10) -> (20,0), the seed scenario from spec.md §8.
        let curve = c(10.0, 0.0, 30.0, 10.0, 0.0, 10.0, 20.0, 0.0);
        let hit = curve.self_intersection();
        assert!(hit.is_some());
    }

    #[test]
    fn straight_cubic_has_no_self_intersection() {
        let curve = c(0.0, 0.0, 3.0, 0.0, 6.0, 0.0, 10.0, 0.0);
        assert!(curve.self_intersection().is_none());
    }
}
