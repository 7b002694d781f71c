//! The bounds-subdivision intersector, spec.md §4.2: the generic
//! segment-vs-segment intersection fallback, used directly for curve-vs-curve
//! pairs and as the engine behind `Segment::intersect`.

use crate::math::{self, Bounds, Point};
use crate::segment::Segment;

/// One intersection between two segments: parametric locations on both,
/// and the (averaged) intersection point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hit {
    pub t_a: f64,
    pub t_b: f64,
    pub point: Point,
}

#[derive(Copy, Clone, Debug)]
struct BoundsCandidate {
    a_range: (f64, f64),
    b_range: (f64, f64),
}

/// Exact bounds of a monotone sub-range: since the range contains no
/// interior extremum, both x and y vary monotonically across it, so the
/// bounding box is simply the box spanned by its two endpoints.
fn monotone_bounds(pos: &dyn Fn(f64) -> Point, t0: f64, t1: f64) -> Bounds {
    let p0 = pos(t0);
    let p1 = pos(t1);
    Bounds::new(
        math::point(p0.x.min(p1.x), p0.y.min(p1.y)),
        math::point(p0.x.max(p1.x), p0.y.max(p1.y)),
    )
}

fn candidate_overlaps(
    cand: &BoundsCandidate,
    pos_a: &dyn Fn(f64) -> Point,
    pos_b: &dyn Fn(f64) -> Point,
) -> bool {
    let ba = monotone_bounds(pos_a, cand.a_range.0, cand.a_range.1);
    let bb = monotone_bounds(pos_b, cand.b_range.0, cand.b_range.1);
    ba.intersects(&bb) || ba.to_rect().contains_rect(&bb.to_rect()) || bb.to_rect().contains_rect(&ba.to_rect())
}

/// Core bisection loop over two monotone sub-ranges, spec.md §4.2 steps 3-5.
pub fn intersect_monotone_pair(
    pos_a: &dyn Fn(f64) -> Point,
    a_range: (f64, f64),
    pos_b: &dyn Fn(f64) -> Point,
    b_range: (f64, f64),
) -> Vec<Hit> {
    let initial = BoundsCandidate { a_range, b_range };
    if !candidate_overlaps(&initial, pos_a, pos_b) {
        return Vec::new();
    }

    let mut candidates = vec![initial];
    for _ in 0..crate::epsilon::INTERSECTION_ITERATION_CAP {
        let mut next = Vec::with_capacity(candidates.len());
        let mut changed = false;
        for cand in &candidates {
            let am = (cand.a_range.0 + cand.a_range.1) * 0.5;
            let bm = (cand.b_range.0 + cand.b_range.1) * 0.5;
            let a_floor = am <= cand.a_range.0 || am >= cand.a_range.1;
            let b_floor = bm <= cand.b_range.0 || bm >= cand.b_range.1;
            if a_floor && b_floor {
                next.push(*cand);
                continue;
            }
            changed = true;
            let a_halves: Vec<(f64, f64)> = if a_floor {
                vec![cand.a_range]
            } else {
                vec![(cand.a_range.0, am), (am, cand.a_range.1)]
            };
            let b_halves: Vec<(f64, f64)> = if b_floor {
                vec![cand.b_range]
            } else {
                vec![(cand.b_range.0, bm), (bm, cand.b_range.1)]
            };
            for a_half in &a_halves {
                for b_half in &b_halves {
                    let sub = BoundsCandidate { a_range: *a_half, b_range: *b_half };
                    if candidate_overlaps(&sub, pos_a, pos_b) {
                        next.push(sub);
                    }
                }
            }
        }
        candidates = next;
        if candidates.is_empty() || !changed {
            break;
        }
    }

    if candidates.len() > 8 {
        log::debug!(
            "bounds-subdivision intersector hit the iteration cap with {} surviving candidates; \
             likely a tangential touch or overlapping curves",
            candidates.len()
        );
    }

    cluster(candidates, pos_a, pos_b)
}

/// Clusters survivors by parametric distance (spec.md §4.2 step 5:
/// `threshold = 1e-13`) and emits one averaged intersection per cluster.
fn cluster(
    candidates: Vec<BoundsCandidate>,
    pos_a: &dyn Fn(f64) -> Point,
    pos_b: &dyn Fn(f64) -> Point,
) -> Vec<Hit> {
    let mut clusters: Vec<Vec<BoundsCandidate>> = Vec::new();
    'outer: for cand in candidates {
        for cluster in &mut clusters {
            let rep = cluster[0];
            let d = (cand.a_range.0 - rep.a_range.0).powi(2)
                + (cand.a_range.1 - rep.a_range.1).powi(2)
                + (cand.b_range.0 - rep.b_range.0).powi(2)
                + (cand.b_range.1 - rep.b_range.1).powi(2);
            if d < crate::epsilon::INTERSECTION_CLUSTER {
                cluster.push(cand);
                continue 'outer;
            }
        }
        clusters.push(vec![cand]);
    }

    clusters
        .into_iter()
        .map(|members| {
            let n = members.len() as f64;
            let t_a = members.iter().map(|c| (c.a_range.0 + c.a_range.1) * 0.5).sum::<f64>() / n;
            let t_b = members.iter().map(|c| (c.b_range.0 + c.b_range.1) * 0.5).sum::<f64>() / n;
            let pa = pos_a(t_a);
            let pb = pos_b(t_b);
            let point = math::blend(pa, pb, 0.5);
            Hit { t_a, t_b, point }
        })
        .collect()
}

fn monotone_ranges(extrema: &[f64]) -> Vec<(f64, f64)> {
    let mut bounds = vec![0.0];
    bounds.extend_from_slice(extrema);
    bounds.push(1.0);
    bounds.windows(2).map(|w| (w[0], w[1])).collect()
}

/// Generic fallback: splits each segment at its own interior extrema, then
/// runs [`intersect_monotone_pair`] over every monotone-vs-monotone pair
/// whose ranges' bounding boxes overlap (spec.md §4.2 steps 1-2).
pub fn intersect(a: &Segment, b: &Segment) -> Vec<Hit> {
    if !a.bounds().intersects(&b.bounds()) {
        return Vec::new();
    }

    let a_ranges = monotone_ranges(&a.interior_extrema_ts());
    let b_ranges = monotone_ranges(&b.interior_extrema_ts());

    let pos_a = |t: f64| a.position(t);
    let pos_b = |t: f64| b.position(t);

    let mut hits = Vec::new();
    for ar in &a_ranges {
        for br in &b_ranges {
            let cand = BoundsCandidate { a_range: *ar, b_range: *br };
            if !candidate_overlaps(&cand, &pos_a, &pos_b) {
                continue;
            }
            hits.extend(intersect_monotone_pair(&pos_a, *ar, &pos_b, *br));
        }
    }
    hits
}

/// Specialization used by `CubicBezierSegment::self_intersection` and by
/// the CAG self-intersect pass's cubic fast path: runs the same bisection
/// directly on two cubic pieces without going through the `Segment` enum.
pub fn intersect_cubic_cubic(
    a: &crate::cubic_bezier::CubicBezierSegment,
    b: &crate::cubic_bezier::CubicBezierSegment,
) -> Vec<Hit> {
    if !a.bounds().intersects(&b.bounds()) {
        return Vec::new();
    }
    let a_ranges = monotone_ranges(&a.interior_extrema_ts());
    let b_ranges = monotone_ranges(&b.interior_extrema_ts());
    let pos_a = |t: f64| a.position(t);
    let pos_b = |t: f64| b.position(t);
    let mut hits = Vec::new();
    for ar in &a_ranges {
        for br in &b_ranges {
            hits.extend(intersect_monotone_pair(&pos_a, *ar, &pos_b, *br));
        }
    }
    hits
}

/// Line-line closed form, used as a fast path ahead of the generic
/// bisection by the CAG self/cross-intersect passes (spec.md §4.7 step 2).
pub fn intersect_line_line(a: &crate::line::Line, b: &crate::line::Line) -> Option<Hit> {
    let d1 = a.end - a.start;
    let d2 = b.end - b.start;
    let denom = d1.x * d2.y - d1.y * d2.x;
    if denom.abs() < 1e-12 {
        return None;
    }
    let diff = b.start - a.start;
    let t_a = (diff.x * d2.y - diff.y * d2.x) / denom;
    let t_b = (diff.x * d1.y - diff.y * d1.x) / denom;
    if (0.0..=1.0).contains(&t_a) && (0.0..=1.0).contains(&t_b) {
        Some(Hit { t_a, t_b, point: a.position(t_a) })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::Line;

    #[test]
    fn crossing_lines_intersect_at_midpoint() {
        let a = Line::new(math::point(-1.0, 0.0), math::point(1.0, 0.0)).unwrap();
        let b = Line::new(math::point(0.0, -1.0), math::point(0.0, 1.0)).unwrap();
        let hit = intersect_line_line(&a, &b).unwrap();
        assert!(hit.point.to_vector().length() < 1e-9);
    }

    #[test]
    fn parallel_lines_do_not_intersect() {
        let a = Line::new(math::point(0.0, 0.0), math::point(1.0, 0.0)).unwrap();
        let b = Line::new(math::point(0.0, 1.0), math::point(1.0, 1.0)).unwrap();
        assert!(intersect_line_line(&a, &b).is_none());
    }

    #[test]
    fn segment_intersect_finds_line_crossing() {
        let a = Segment::Line(Line::new(math::point(-5.0, 0.0), math::point(5.0, 0.0)).unwrap());
        let b = Segment::Line(Line::new(math::point(0.0, -5.0), math::point(0.0, 5.0)).unwrap());
        let hits = intersect(&a, &b);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].point.to_vector().length() < 1e-6);
    }

    #[test]
    fn disjoint_bounds_short_circuit() {
        let a = Segment::Line(Line::new(math::point(0.0, 0.0), math::point(1.0, 0.0)).unwrap());
        let b = Segment::Line(Line::new(math::point(10.0, 10.0), math::point(11.0, 10.0)).unwrap());
        assert!(intersect(&a, &b).is_empty());
    }
}
