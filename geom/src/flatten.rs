//! Flattening: discretizes any `Segment` into a polyline, driven by the
//! `DiscretizationOptions` record (spec.md §9's "dynamic option object").

use crate::math::Point;
use crate::segment::Segment;

/// Recognized options for `toPiecewiseLinear`, spec.md §9.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DiscretizationOptions {
    pub min_levels: u32,
    pub max_levels: u32,
    pub distance_epsilon: Option<f64>,
    pub curve_epsilon: Option<f64>,
}

impl Default for DiscretizationOptions {
    fn default() -> Self {
        DiscretizationOptions {
            min_levels: 0,
            max_levels: 12,
            distance_epsilon: Some(1e-3),
            curve_epsilon: None,
        }
    }
}

impl DiscretizationOptions {
    /// `distanceEpsilon`/`curveEpsilon` unset, forced to `levels` deep.
    pub fn fixed_levels(levels: u32) -> Self {
        DiscretizationOptions {
            min_levels: levels,
            max_levels: levels,
            distance_epsilon: None,
            curve_epsilon: None,
        }
    }

    fn should_stop(&self, depth: u32, a: Point, mid: Point, b: Point, tangent_a: crate::math::Vector, tangent_b: crate::math::Vector) -> bool {
        if depth < self.min_levels {
            return false;
        }
        if depth >= self.max_levels {
            return true;
        }
        let mut stop = self.distance_epsilon.is_none() && self.curve_epsilon.is_none();
        if let Some(eps) = self.distance_epsilon {
            let chord_mid = crate::math::blend(a, b, 0.5);
            stop = stop || (mid - chord_mid).length() < eps;
        }
        if let Some(eps) = self.curve_epsilon {
            let ta = tangent_a.normalize();
            let tb = tangent_b.normalize();
            let cos_angle = ta.dot(tb).clamp(-1.0, 1.0);
            stop = stop || cos_angle.acos() < eps;
        }
        stop
    }
}

/// Recursively subdivides `[t0, t1]` by chord/angle flatness, appending
/// points after `t0` (the caller is expected to have already pushed the
/// segment's start).
fn subdivide_into(
    seg: &Segment,
    t0: f64,
    t1: f64,
    depth: u32,
    options: &DiscretizationOptions,
    out: &mut Vec<Point>,
) {
    let a = seg.position(t0);
    let b = seg.position(t1);
    let mid_t = (t0 + t1) * 0.5;
    let mid = seg.position(mid_t);
    let tangent_a = seg.tangent(t0);
    let tangent_b = seg.tangent(t1);
    if options.should_stop(depth, a, mid, b, tangent_a, tangent_b) {
        out.push(b);
        return;
    }
    subdivide_into(seg, t0, mid_t, depth + 1, options, out);
    subdivide_into(seg, mid_t, t1, depth + 1, options, out);
}

/// Flattens a segment to a polyline honoring `options`; the first emitted
/// point is `segment.position(0)`.
pub fn flatten(seg: &Segment, options: &DiscretizationOptions) -> Vec<Point> {
    if let Segment::Line(line) = seg {
        return vec![line.start, line.end];
    }
    let mut out = vec![seg.position(0.0)];
    subdivide_into(seg, 0.0, 1.0, 0, options, &mut out);
    out
}

/// `Segment::flattened`, spec.md §9's discretization consumer: a point
/// iterator (materialized, since the recursive subdivision has no natural
/// streaming form without heap recursion state).
pub fn flattened(seg: &Segment, options: &DiscretizationOptions) -> impl Iterator<Item = Point> {
    flatten(seg, options).into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arc::Arc;
    use crate::math;

    #[test]
    fn line_flattens_to_its_two_endpoints() {
        let seg = Segment::Line(crate::line::Line::new(math::point(0.0, 0.0), math::point(10.0, 0.0)).unwrap());
        let pts = flatten(&seg, &DiscretizationOptions::default());
        assert_eq!(pts, vec![math::point(0.0, 0.0), math::point(10.0, 0.0)]);
    }

    #[test]
    fn arc_flattening_stays_close_to_the_curve() {
        let seg = Segment::Arc(Arc::new(math::point(0.0, 0.0), 10.0, 0.0, std::f64::consts::PI, false).unwrap());
        let options = DiscretizationOptions { distance_epsilon: Some(0.05), ..Default::default() };
        let pts = flatten(&seg, &options);
        assert!(pts.len() > 2);
        for p in &pts {
            let radius = p.to_vector().length();
            assert!((radius - 10.0).abs() < 0.1);
        }
    }

    #[test]
    fn fixed_levels_produces_two_pow_n_plus_one_points_for_curves() {
        let seg = Segment::Quadratic(
            crate::quadratic_bezier::QuadraticBezierSegment::new(
                math::point(0.0, 0.0),
                math::point(5.0, 10.0),
                math::point(10.0, 0.0),
            )
            .unwrap(),
        );
        let pts = flatten(&seg, &DiscretizationOptions::fixed_levels(3));
        assert_eq!(pts.len(), (1usize << 3) + 1);
    }
}
