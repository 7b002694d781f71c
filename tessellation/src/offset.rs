//! Per-segment parallel-offset curves, the building block `Stroker` walks
//! front-to-back (left side) and back-to-front (right side) over, spec.md
//! §4.5.

use pathkit_geom::arc::Arc;
use pathkit_geom::cubic_bezier::CubicBezierSegment;
use pathkit_geom::elliptical_arc::EllipticalArc;
use pathkit_geom::flatten::{self, DiscretizationOptions};
use pathkit_geom::line::Line;
use pathkit_geom::math::{self, perpendicular};
use pathkit_geom::segment::Segment;

/// Reverses a segment's direction of travel (`position(t)` becomes
/// `position(1-t)`), used to turn a "walk the right side back-to-front"
/// pass into an equivalent "walk the left side of the reversed path
/// front-to-back" pass.
pub fn flip_segment(seg: &Segment) -> Segment {
    match seg {
        Segment::Line(l) => Segment::Line(Line { start: l.end, end: l.start }),
        Segment::Arc(a) => Segment::Arc(Arc {
            start_angle: a.end_angle,
            end_angle: a.start_angle,
            anticlockwise: !a.anticlockwise,
            ..*a
        }),
        Segment::EllipticalArc(e) => Segment::EllipticalArc(EllipticalArc {
            start_angle: e.end_angle,
            end_angle: e.start_angle,
            anticlockwise: !e.anticlockwise,
            ..*e
        }),
        Segment::Quadratic(q) => Segment::Quadratic(q.flip()),
        Segment::Cubic(c) => Segment::Cubic(c.flip()),
    }
}

fn offset_arc(a: &Arc, r: f64, left_side: bool) -> Arc {
    let sign = if left_side { 1.0 } else { -1.0 };
    let normal = perpendicular(a.tangent(0.0).normalize()) * sign;
    let to_center = (a.center - a.position(0.0)).normalize();
    let toward_center = normal.dot(to_center) > 0.0;
    let new_radius = if toward_center { a.radius - r } else { a.radius + r };
    Arc::new(a.center, new_radius, a.start_angle, a.end_angle, a.anticlockwise)
        .unwrap_or(Arc { radius: new_radius.abs().max(1e-9), ..*a })
}

/// Elliptical arcs have no closed-form parallel curve; approximate by
/// flattening and offsetting each resulting chord by its own local normal.
fn offset_elliptical_arc(e: &EllipticalArc, r: f64, left_side: bool) -> Vec<Segment> {
    let sign = if left_side { 1.0 } else { -1.0 };
    let seg = Segment::EllipticalArc(*e);
    let pts = flatten::flatten(&seg, &DiscretizationOptions::default());
    let mut out = Vec::new();
    for w in pts.windows(2) {
        let tangent = w[1] - w[0];
        if tangent.length() < 1e-12 {
            continue;
        }
        let n = perpendicular(tangent.normalize()) * sign * r;
        if let Ok(line) = Line::new(w[0] + n, w[1] + n) {
            out.push(Segment::Line(line));
        }
    }
    out
}

/// Cubics are offset by subdividing into 32 pieces (5 levels, mirroring
/// the quadratic offset scheme) and approximating each with a reduced
/// quadratic where the reduction is tight enough, falling back to a
/// straight chord otherwise.
fn offset_cubic(c: &CubicBezierSegment, r: f64, left_side: bool) -> Vec<Segment> {
    const LEVELS: u32 = 5;
    let count = 1u32 << LEVELS;
    let sign = if left_side { 1.0 } else { -1.0 };
    let mut out = Vec::with_capacity(count as usize);
    for i in 0..count {
        let t0 = i as f64 / count as f64;
        let t1 = (i + 1) as f64 / count as f64;
        let piece = c.split_range(t0, t1);
        if let Some(quad) = piece.reduce_to_quadratic(0.5) {
            out.extend(quad.offset(r, left_side).into_iter().map(Segment::Quadratic));
        } else {
            let n_start = perpendicular(piece.tangent(0.0).normalize()) * sign * r;
            let n_end = perpendicular(piece.tangent(1.0).normalize()) * sign * r;
            if let Ok(line) = Line::new(piece.start + n_start, piece.end + n_end) {
                out.push(Segment::Line(line));
            }
        }
    }
    out
}

/// `segment.strokeLeft`/`segment.strokeRight`: the parallel offset of one
/// segment at distance `r`, to its left or right side of travel.
pub fn segment_offset(seg: &Segment, r: f64, left_side: bool) -> Vec<Segment> {
    match seg {
        Segment::Line(l) => {
            let sign = if left_side { 1.0 } else { -1.0 };
            let n = perpendicular(l.tangent(0.0).normalize()) * sign * r;
            match Line::new(l.start + n, l.end + n) {
                Ok(line) => vec![Segment::Line(line)],
                Err(_) => Vec::new(),
            }
        }
        Segment::Arc(a) => vec![Segment::Arc(offset_arc(a, r, left_side))],
        Segment::EllipticalArc(e) => offset_elliptical_arc(e, r, left_side),
        Segment::Quadratic(q) => q.offset(r, left_side).into_iter().map(Segment::Quadratic).collect(),
        Segment::Cubic(c) => offset_cubic(c, r, left_side),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_offset_is_parallel_and_shifted() {
        let line = Line::new(math::point(0.0, 0.0), math::point(10.0, 0.0)).unwrap();
        let pieces = segment_offset(&Segment::Line(line), 2.0, true);
        assert_eq!(pieces.len(), 1);
        if let Segment::Line(offset) = pieces[0] {
            assert!((offset.start.y - 2.0).abs() < 1e-9);
            assert!((offset.end.y - 2.0).abs() < 1e-9);
        } else {
            panic!("expected a Line");
        }
    }

    #[test]
    fn arc_offset_shrinks_or_grows_the_radius() {
        let arc = Arc::new(math::point(0.0, 0.0), 10.0, 0.0, std::f64::consts::PI, false).unwrap();
        let inner = offset_arc(&arc, 2.0, true);
        let outer = offset_arc(&arc, 2.0, false);
        assert!((inner.radius - outer.radius).abs() > 1.0);
    }

    #[test]
    fn flip_reverses_a_line() {
        let line = Segment::Line(Line::new(math::point(0.0, 0.0), math::point(1.0, 1.0)).unwrap());
        let flipped = flip_segment(&line);
        assert_eq!(flipped.start(), line.end());
        assert_eq!(flipped.end(), line.start());
    }
}
