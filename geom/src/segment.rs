//! The `Segment` sum type, spec.md's "Sum type over Segment" redesign:
//! one enum dispatching to whichever of the five primitives it holds, so
//! the rest of the kernel (stroking, CAG) never has to match on kind by
//! hand.

use crate::arc::Arc;
use crate::cubic_bezier::CubicBezierSegment;
use crate::elliptical_arc::EllipticalArc;
use crate::line::Line;
use crate::math::{Bounds, Point, Transform, Vector};
use crate::quadratic_bezier::QuadraticBezierSegment;
use crate::ray::{Ray, RayIntersection};

/// One of the five segment primitives, spec.md §4.1.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum Segment {
    Line(Line),
    Arc(Arc),
    EllipticalArc(EllipticalArc),
    Quadratic(QuadraticBezierSegment),
    Cubic(CubicBezierSegment),
}

impl Segment {
    pub fn position(&self, t: f64) -> Point {
        match self {
            Segment::Line(s) => s.position(t),
            Segment::Arc(s) => s.position(t),
            Segment::EllipticalArc(s) => s.position(t),
            Segment::Quadratic(s) => s.position(t),
            Segment::Cubic(s) => s.position(t),
        }
    }

    pub fn tangent(&self, t: f64) -> Vector {
        match self {
            Segment::Line(s) => s.tangent(t),
            Segment::Arc(s) => s.tangent(t),
            Segment::EllipticalArc(s) => s.tangent(t),
            Segment::Quadratic(s) => s.tangent(t),
            Segment::Cubic(s) => s.tangent(t),
        }
    }

    pub fn start_tangent(&self) -> Vector {
        match self {
            Segment::Line(s) => s.start_tangent(),
            Segment::Arc(s) => s.start_tangent(),
            Segment::EllipticalArc(s) => s.start_tangent(),
            Segment::Quadratic(s) => s.start_tangent(),
            Segment::Cubic(s) => s.start_tangent(),
        }
    }

    pub fn end_tangent(&self) -> Vector {
        match self {
            Segment::Line(s) => s.end_tangent(),
            Segment::Arc(s) => s.end_tangent(),
            Segment::EllipticalArc(s) => s.end_tangent(),
            Segment::Quadratic(s) => s.end_tangent(),
            Segment::Cubic(s) => s.end_tangent(),
        }
    }

    pub fn curvature(&self, t: f64) -> f64 {
        match self {
            Segment::Line(s) => s.curvature(t),
            Segment::Arc(s) => s.curvature(t),
            Segment::EllipticalArc(s) => s.curvature(t),
            Segment::Quadratic(s) => s.curvature(t),
            Segment::Cubic(s) => s.curvature(t),
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            Segment::Line(s) => s.bounds(),
            Segment::Arc(s) => s.bounds(),
            Segment::EllipticalArc(s) => s.bounds(),
            Segment::Quadratic(s) => s.bounds(),
            Segment::Cubic(s) => s.bounds(),
        }
    }

    pub fn subdivided(&self, t: f64) -> (Segment, Segment) {
        match self {
            Segment::Line(s) => {
                let (a, b) = s.subdivided(t);
                (Segment::Line(a), Segment::Line(b))
            }
            Segment::Arc(s) => {
                let (a, b) = s.subdivided(t);
                (Segment::Arc(a), Segment::Arc(b))
            }
            Segment::EllipticalArc(s) => {
                let (a, b) = s.subdivided(t);
                (Segment::EllipticalArc(a), Segment::EllipticalArc(b))
            }
            Segment::Quadratic(s) => {
                let (a, b) = s.subdivided(t);
                (Segment::Quadratic(a), Segment::Quadratic(b))
            }
            Segment::Cubic(s) => {
                let (a, b) = s.subdivided(t);
                (Segment::Cubic(a), Segment::Cubic(b))
            }
        }
    }

    pub fn interior_extrema_ts(&self) -> Vec<f64> {
        match self {
            Segment::Line(s) => s.interior_extrema_ts(),
            Segment::Arc(s) => s.interior_extrema_ts(),
            Segment::EllipticalArc(s) => s.interior_extrema_ts(),
            Segment::Quadratic(s) => s.interior_extrema_ts(),
            Segment::Cubic(s) => s.interior_extrema_ts(),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        match self {
            Segment::Line(s) => s.is_degenerate(),
            Segment::Arc(s) => s.is_degenerate(),
            Segment::EllipticalArc(s) => s.is_degenerate(),
            Segment::Quadratic(s) => s.nondegenerate_segments().is_empty(),
            Segment::Cubic(s) => s.is_degenerate(),
        }
    }

    /// Collapses degenerate control configurations into simpler segments:
    /// a near-straight quadratic or elliptical arc reduces to a `Line` or
    /// circular `Arc` respectively (spec.md §4.1 `getNondegenerateSegments`).
    pub fn nondegenerate_segments(&self) -> Vec<Segment> {
        match self {
            Segment::Line(s) => s.nondegenerate_segments().into_iter().map(Segment::Line).collect(),
            Segment::Arc(s) => s.nondegenerate_segments().into_iter().map(Segment::Arc).collect(),
            Segment::EllipticalArc(s) => s
                .nondegenerate_segments()
                .into_iter()
                .map(|e| match e {
                    EllipseOrArc::Ellipse(e) => Segment::EllipticalArc(e),
                    EllipseOrArc::Arc(a) => Segment::Arc(a),
                })
                .collect(),
            Segment::Quadratic(s) => s
                .nondegenerate_segments()
                .into_iter()
                .map(|q| match q {
                    QuadOrLine::Quad(q) => Segment::Quadratic(q),
                    QuadOrLine::Line(l) => Segment::Line(l),
                })
                .collect(),
            Segment::Cubic(s) => s.nondegenerate_segments().into_iter().map(Segment::Cubic).collect(),
        }
    }

    pub fn transformed(&self, m: &Transform) -> Segment {
        match self {
            Segment::Line(s) => Segment::Line(s.transformed(m)),
            Segment::Arc(s) => s.transformed(m),
            Segment::EllipticalArc(s) => Segment::EllipticalArc(s.transformed(m)),
            Segment::Quadratic(s) => Segment::Quadratic(s.transformed(m)),
            Segment::Cubic(s) => Segment::Cubic(s.transformed(m)),
        }
    }

    pub fn signed_area_fragment(&self) -> f64 {
        match self {
            Segment::Line(s) => s.signed_area_fragment(),
            Segment::Arc(s) => s.signed_area_fragment(),
            Segment::EllipticalArc(s) => s.signed_area_fragment(),
            Segment::Quadratic(s) => s.signed_area_fragment(),
            Segment::Cubic(s) => s.signed_area_fragment(),
        }
    }

    pub fn intersect_ray(&self, ray: &Ray) -> Vec<RayIntersection> {
        match self {
            Segment::Line(s) => s.intersect_ray(ray).into_iter().collect(),
            Segment::Arc(s) => s.intersect_ray(ray),
            Segment::EllipticalArc(s) => s.intersect_ray(ray),
            Segment::Quadratic(_) | Segment::Cubic(_) => {
                // Curved non-arc segments have no closed-form ray intersection;
                // approximated via their monotone pieces by the caller (CAG
                // hit-testing flattens first, see spec.md §4.7).
                Vec::new()
            }
        }
    }

    pub fn start(&self) -> Point {
        self.position(0.0)
    }

    pub fn end(&self) -> Point {
        self.position(1.0)
    }

    /// Pairwise intersection against another segment, via the
    /// bounds-subdivision intersector (spec.md §4.2).
    pub fn intersect(&self, other: &Segment) -> Vec<crate::intersection::Hit> {
        crate::intersection::intersect(self, other)
    }
}

use crate::elliptical_arc::EllipseOrArc;
use crate::quadratic_bezier::QuadOrLine;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math;

    #[test]
    fn dispatches_position_by_variant() {
        let line = Segment::Line(Line::new(math::point(0.0, 0.0), math::point(10.0, 0.0)).unwrap());
        assert_eq!(line.position(0.5), math::point(5.0, 0.0));
    }

    #[test]
    fn subdivided_preserves_variant() {
        let cubic = Segment::Cubic(
            CubicBezierSegment::new(
                math::point(0.0, 0.0),
                math::point(0.0, 10.0),
                math::point(10.0, 10.0),
                math::point(10.0, 0.0),
            )
            .unwrap(),
        );
        let (a, b) = cubic.subdivided(0.5);
        assert!(matches!(a, Segment::Cubic(_)));
        assert!(matches!(b, Segment::Cubic(_)));
    }

    #[test]
    fn nondegenerate_line_passthrough() {
        let line = Segment::Line(Line::new(math::point(0.0, 0.0), math::point(1.0, 1.0)).unwrap());
        assert_eq!(line.nondegenerate_segments().len(), 1);
    }
}
