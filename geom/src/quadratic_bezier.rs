//! Quadratic Bezier curves, spec.md §4.1.4.

use crate::error::{check_finite, Result};
use crate::line::Line;
use crate::math::{self, union_point, Bounds, Point, Vector};
use crate::utils::min_max;

/// A quadratic Bezier curve: `P(t) = (1-t)^2*start + 2(1-t)t*control + t^2*end`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadraticBezierSegment {
    pub start: Point,
    pub control: Point,
    pub end: Point,
}

impl QuadraticBezierSegment {
    pub fn new(start: Point, control: Point, end: Point) -> Result<Self> {
        check_finite(
            &[start.x, start.y, control.x, control.y, end.x, end.y],
            "QuadraticBezierSegment",
        )?;
        Ok(QuadraticBezierSegment { start, control, end })
    }

    pub fn position(&self, t: f64) -> Point {
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;
        let t2 = t * t;
        self.start * one_t2 + self.control.to_vector() * (2.0 * one_t * t) + self.end.to_vector() * t2
    }

    pub fn tangent(&self, t: f64) -> Vector {
        (self.control - self.start) * (2.0 * (1.0 - t)) + (self.end - self.control) * (2.0 * t)
    }

    pub fn start_tangent(&self) -> Vector {
        self.tangent(0.0).normalize()
    }

    pub fn end_tangent(&self) -> Vector {
        self.tangent(1.0).normalize()
    }

    /// spec.md §4.1.4: closed form at the endpoints, one subdivision in
    /// between.
    pub fn curvature(&self, t: f64) -> f64 {
        if t <= 1e-9 {
            self.endpoint_curvature(self.start, self.control, self.end)
        } else if t >= 1.0 - 1e-9 {
            let flipped = self.flip();
            -flipped.endpoint_curvature(flipped.start, flipped.control, flipped.end)
        } else {
            let (_, after) = self.split(t);
            after.endpoint_curvature(after.start, after.control, after.end)
        }
    }

    fn endpoint_curvature(&self, p0: Point, p1: Point, p2: Point) -> f64 {
        let a = (p1 - p0).length();
        if a < 1e-12 {
            return 0.0;
        }
        let tangent_dir = (p1 - p0).normalize();
        let h = (p2 - p0).dot(math::perpendicular(tangent_dir));
        // degree = 2: h * (degree - 1) / (degree * a^2)
        h * 1.0 / (2.0 * a * a)
    }

    pub fn flip(&self) -> Self {
        QuadraticBezierSegment { start: self.end, control: self.control, end: self.start }
    }

    pub fn bounds(&self) -> Bounds {
        let mut b = union_point(math::empty_bounds(), self.start);
        b = union_point(b, self.end);
        for t in self.interior_extrema_ts() {
            b = union_point(b, self.position(t));
        }
        b
    }

    /// spec.md: `extremaT(v0,v1,v2) = -(v1-v0) / (v2 - 2v1 + v0)`.
    fn extrema_t(v0: f64, v1: f64, v2: f64) -> Option<f64> {
        let denom = v2 - 2.0 * v1 + v0;
        if denom.abs() < 1e-12 {
            return None;
        }
        let t = -(v1 - v0) / denom;
        if t > 1e-9 && t < 1.0 - 1e-9 {
            Some(t)
        } else {
            None
        }
    }

    pub fn interior_extrema_ts(&self) -> Vec<f64> {
        let mut result = Vec::new();
        if let Some(t) = Self::extrema_t(self.start.x, self.control.x, self.end.x) {
            result.push(t);
        }
        if let Some(t) = Self::extrema_t(self.start.y, self.control.y, self.end.y) {
            result.push(t);
        }
        result.sort_by(|a, b| a.partial_cmp(b).unwrap());
        result
    }

    pub fn split(&self, t: f64) -> (QuadraticBezierSegment, QuadraticBezierSegment) {
        let split_point = self.position(t);
        (
            QuadraticBezierSegment {
                start: self.start,
                control: self.start.lerp(self.control, t),
                end: split_point,
            },
            QuadraticBezierSegment {
                start: split_point,
                control: self.control.lerp(self.end, t),
                end: self.end,
            },
        )
    }

    pub fn subdivided(&self, t: f64) -> (QuadraticBezierSegment, QuadraticBezierSegment) {
        self.split(t)
    }

    /// Is this curve degenerate: a point, or its control collinear with the
    /// chord such that it reduces to one or two line segments?
    pub fn nondegenerate_segments(&self) -> Vec<QuadOrLine> {
        if self.start == self.end && self.start == self.control {
            return Vec::new();
        }
        let area2 =
            (self.control.x - self.start.x) * (self.end.y - self.start.y)
                - (self.control.y - self.start.y) * (self.end.x - self.start.x);
        if area2.abs() < 1e-12 {
            // Collinear: emit one or two line segments through the extremum.
            let mut pts = vec![self.start, self.end];
            // If the control point lies outside the segment [start, end],
            // the curve's extremum is the control point itself.
            let seg = self.end - self.start;
            if seg.length() > 1e-12 {
                let t_ctrl = (self.control - self.start).dot(seg) / seg.dot(seg);
                if !(0.0..=1.0).contains(&t_ctrl) {
                    pts = vec![self.start, self.control, self.end];
                }
            }
            let mut out = Vec::new();
            for pair in pts.windows(2) {
                if pair[0] != pair[1] {
                    out.push(QuadOrLine::Line(Line { start: pair[0], end: pair[1] }));
                }
            }
            out
        } else {
            vec![QuadOrLine::Quad(*self)]
        }
    }

    pub fn transformed(&self, m: &crate::math::Transform) -> QuadraticBezierSegment {
        QuadraticBezierSegment {
            start: m.transform_point(self.start),
            control: m.transform_point(self.control),
            end: m.transform_point(self.end),
        }
    }

    pub fn signed_area_fragment(&self) -> f64 {
        // Shoelace-style closed form for a quadratic's Bernstein coefficients.
        let (x0, y0) = (self.start.x, self.start.y);
        let (x1, y1) = (self.control.x, self.control.y);
        let (x2, y2) = (self.end.x, self.end.y);
        ((x0 * (2.0 * y1 + y2 - 3.0 * y0))
            + (x1 * (2.0 * y2 - 2.0 * y0))
            + (x2 * (3.0 * y2 - 2.0 * y1 - y0)))
            / 6.0
    }

    /// Offsets the curve by subdividing 5 levels deep (32 sub-curves) and
    /// applying a first-order normal offset to each sub-curve's three
    /// points (spec.md §4.1.4).
    pub fn offset(&self, r: f64, left_side: bool) -> Vec<QuadraticBezierSegment> {
        const LEVELS: u32 = 5;
        let count = 1u32 << LEVELS;
        let mut pieces = Vec::with_capacity(count as usize);
        let sign = if left_side { 1.0 } else { -1.0 };
        for i in 0..count {
            let t0 = i as f64 / count as f64;
            let t1 = (i + 1) as f64 / count as f64;
            let (_, rest) = self.split(t0);
            let piece = if t1 < 1.0 {
                rest.split((t1 - t0) / (1.0 - t0)).0
            } else {
                rest
            };
            let n_start = math::perpendicular(piece.tangent(0.0).normalize()) * sign * r;
            let n_mid = math::perpendicular(piece.tangent(0.5).normalize()) * sign * r;
            let n_end = math::perpendicular(piece.tangent(1.0).normalize()) * sign * r;
            pieces.push(QuadraticBezierSegment {
                start: piece.start + n_start,
                control: piece.control + n_mid,
                end: piece.end + n_end,
            });
        }
        if !left_side {
            pieces.reverse();
            for p in &mut pieces {
                *p = p.flip();
            }
        }
        pieces
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

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum QuadOrLine {
    Quad(QuadraticBezierSegment),
    Line(Line),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(sx: f64, sy: f64, cx: f64, cy: f64, ex: f64, ey: f64) -> QuadraticBezierSegment {
        QuadraticBezierSegment::new(math::point(sx, sy), math::point(cx, cy), math::point(ex, ey)).unwrap()
    }

    #[test]
    fn position_endpoints() {
        let c = q(0.0, 0.0, 5.0, 10.0, 10.0, 0.0);
        assert_eq!(c.position(0.0), c.start);
        assert_eq!(c.position(1.0), c.end);
    }

    #[test]
    fn split_concatenates() {
        let c = q(0.0, 0.0, 5.0, 10.0, 10.0, 0.0);
        let (a, b) = c.split(0.3);
        assert_eq!(a.end, b.start);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let direct = c.position(0.3 + t * 0.7);
            let via_split = b.position(t);
            assert!((direct - via_split).length() < 1e-9);
        }
    }

    #[test]
    fn collinear_reduces_to_lines() {
        let c = q(0.0, 0.0, 5.0, 0.0, 10.0, 0.0);
        let segs = c.nondegenerate_segments();
        assert_eq!(segs.len(), 1);
        assert!(matches!(segs[0], QuadOrLine::Line(_)));
    }

    #[test]
    fn degenerate_point_is_empty() {
        let c = q(1.0, 1.0, 1.0, 1.0, 1.0, 1.0);
        assert!(c.nondegenerate_segments().is_empty());
    }

    #[test]
    fn bounds_contain_samples() {
        let c = q(0.0, 0.0, 10.0, 10.0, 20.0, 0.0);
        let b = c.bounds();
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            assert!(b.contains(c.position(t)));
        }
    }
}
