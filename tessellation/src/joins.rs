//! Corner joins and end caps, spec.md §4.4.

use pathkit_geom::arc::Arc;
use pathkit_geom::line::Line;
use pathkit_geom::math::{self, perpendicular, Point, Vector};
use pathkit_geom::segment::Segment;
use pathkit_path::{LineCap, LineJoin, LineStyles};

fn miter_apex(p_from: Point, from_tangent: Vector, p_to: Point, to_tangent: Vector) -> Option<Point> {
    let d1 = from_tangent.normalize();
    let d2 = to_tangent.normalize();
    let denom = d1.x * d2.y - d1.y * d2.x;
    if denom.abs() < 1e-12 {
        return None;
    }
    let diff = p_to - p_from;
    let t = (diff.x * d2.y - diff.y * d2.x) / denom;
    Some(p_from + d1 * t)
}

fn join(styles: &LineStyles, corner: Point, from_tangent: Vector, to_tangent: Vector, sign: f64) -> Vec<Segment> {
    let half = styles.line_width * 0.5;
    let n_from = perpendicular(from_tangent.normalize()) * sign;
    let n_to = perpendicular(to_tangent.normalize()) * sign;
    let p_from = corner + n_from * half;
    let p_to = corner + n_to * half;
    if (p_from - p_to).length() < 1e-12 {
        return Vec::new();
    }
    match styles.line_join {
        LineJoin::Bevel => match Line::new(p_from, p_to) {
            Ok(line) => vec![Segment::Line(line)],
            Err(_) => Vec::new(),
        },
        LineJoin::Round => {
            let start_angle = math::angle_of(p_from - corner);
            let end_angle = math::angle_of(p_to - corner);
            let cross = from_tangent.x * to_tangent.y - from_tangent.y * to_tangent.x;
            let anticlockwise = (cross * sign) < 0.0;
            match Arc::new(corner, half, start_angle, end_angle, anticlockwise) {
                Ok(arc) => vec![Segment::Arc(arc)],
                Err(_) => match Line::new(p_from, p_to) {
                    Ok(line) => vec![Segment::Line(line)],
                    Err(_) => Vec::new(),
                },
            }
        }
        LineJoin::Miter => match miter_apex(p_from, from_tangent, p_to, to_tangent) {
            Some(apex) if (apex - corner).length() / half <= styles.miter_limit => {
                let mut out = Vec::new();
                if let Ok(l1) = Line::new(p_from, apex) {
                    out.push(Segment::Line(l1));
                }
                if let Ok(l2) = Line::new(apex, p_to) {
                    out.push(Segment::Line(l2));
                }
                out
            }
            _ => match Line::new(p_from, p_to) {
                Ok(line) => vec![Segment::Line(line)],
                Err(_) => Vec::new(),
            },
        },
    }
}

/// The join on the left-offset boundary between two consecutive segments
/// sharing `corner`.
pub fn left_join(styles: &LineStyles, corner: Point, from_tangent: Vector, to_tangent: Vector) -> Vec<Segment> {
    join(styles, corner, from_tangent, to_tangent, 1.0)
}

/// The join on the right-offset boundary between two consecutive segments
/// sharing `corner`.
pub fn right_join(styles: &LineStyles, corner: Point, from_tangent: Vector, to_tangent: Vector) -> Vec<Segment> {
    join(styles, corner, from_tangent, to_tangent, -1.0)
}

/// The end cap at an open subpath's endpoint, `outward_tangent` pointing
/// away from the stroked body.
pub fn cap(styles: &LineStyles, endpoint: Point, outward_tangent: Vector) -> Vec<Segment> {
    let half = styles.line_width * 0.5;
    let tangent = outward_tangent.normalize();
    let n = perpendicular(tangent) * half;
    let left = endpoint + n;
    let right = endpoint - n;
    match styles.line_cap {
        LineCap::Butt => match Line::new(left, right) {
            Ok(line) => vec![Segment::Line(line)],
            Err(_) => Vec::new(),
        },
        LineCap::Square => {
            let out = tangent * half;
            let left_out = left + out;
            let right_out = right + out;
            let mut segs = Vec::new();
            if let Ok(l) = Line::new(left, left_out) {
                segs.push(Segment::Line(l));
            }
            if let Ok(l) = Line::new(left_out, right_out) {
                segs.push(Segment::Line(l));
            }
            if let Ok(l) = Line::new(right_out, right) {
                segs.push(Segment::Line(l));
            }
            segs
        }
        LineCap::Round => {
            let start_angle = math::angle_of(left - endpoint);
            let end_angle = math::angle_of(right - endpoint);
            let a = Arc::new(endpoint, half, start_angle, end_angle, true);
            let b = Arc::new(endpoint, half, start_angle, end_angle, false);
            let bulge_out = |arc: &Arc| (arc.position(0.5) - endpoint).dot(tangent);
            let chosen = match (a, b) {
                (Ok(a), Ok(b)) => {
                    if bulge_out(&a) >= bulge_out(&b) {
                        Some(a)
                    } else {
                        Some(b)
                    }
                }
                (Ok(a), Err(_)) => Some(a),
                (Err(_), Ok(b)) => Some(b),
                _ => None,
            };
            match chosen {
                Some(arc) => vec![Segment::Arc(arc)],
                None => match Line::new(left, right) {
                    Ok(line) => vec![Segment::Line(line)],
                    Err(_) => Vec::new(),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathkit_geom::math;

    fn styles(join: LineJoin, cap: LineCap) -> LineStyles {
        let mut s = LineStyles::default();
        s.line_join = join;
        s.line_cap = cap;
        s.line_width = 4.0;
        s
    }

    #[test]
    fn bevel_join_is_a_single_chord() {
        let s = styles(LineJoin::Bevel, LineCap::Butt);
        let pieces = left_join(&s, math::point(0.0, 0.0), math::vector(1.0, 0.0), math::vector(0.0, 1.0));
        assert_eq!(pieces.len(), 1);
    }

    #[test]
    fn miter_join_falls_back_to_bevel_past_the_limit() {
        let mut s = styles(LineJoin::Miter, LineCap::Butt);
        s.miter_limit = 1.0;
        let pieces = left_join(&s, math::point(0.0, 0.0), math::vector(1.0, 0.0), math::vector(-0.99, 0.14).normalize());
        assert_eq!(pieces.len(), 1);
    }

    #[test]
    fn square_cap_emits_three_segments() {
        let s = styles(LineJoin::Bevel, LineCap::Square);
        let pieces = cap(&s, math::point(0.0, 0.0), math::vector(1.0, 0.0));
        assert_eq!(pieces.len(), 3);
    }

    #[test]
    fn round_cap_bulges_toward_the_outward_tangent() {
        let s = styles(LineJoin::Bevel, LineCap::Round);
        let pieces = cap(&s, math::point(0.0, 0.0), math::vector(1.0, 0.0));
        assert_eq!(pieces.len(), 1);
        if let Segment::Arc(arc) = &pieces[0] {
            let mid = arc.position(0.5);
            assert!(mid.x > 0.0);
        } else {
            panic!("expected an Arc");
        }
    }
}
