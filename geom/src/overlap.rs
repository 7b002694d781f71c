//! Curve-overlap detector, spec.md §4.3: decides whether one curve is a
//! linear reparameterisation of another, `p(t) = q(a*t + b)`.

use crate::arc::Arc;
use crate::cubic_bezier::CubicBezierSegment;
use crate::elliptical_arc::EllipticalArc;
use crate::quadratic_bezier::QuadraticBezierSegment;

/// A detected overlap: `a.position(t)` equals `b.position(a_coeff*t +
/// b_coeff)` for `t` in `[0, 1]` intersected with the curves' domains.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Overlap {
    pub a_coeff: f64,
    pub b_coeff: f64,
}

fn power_basis_quad(v0: f64, v1: f64, v2: f64) -> [f64; 3] {
    [v0, 2.0 * (v1 - v0), v0 - 2.0 * v1 + v2]
}

fn power_basis_cubic(v0: f64, v1: f64, v2: f64, v3: f64) -> [f64; 4] {
    [
        v0,
        3.0 * (v1 - v0),
        3.0 * (v0 - 2.0 * v1 + v2),
        -v0 + 3.0 * v1 - 3.0 * v2 + v3,
    ]
}

/// Picks whichever axis has a larger coordinate spread across both curves'
/// control points, for a better-conditioned linear solve (spec.md §4.3 step 2).
fn better_conditioned_axis(pts_a: &[(f64, f64)], pts_b: &[(f64, f64)]) -> usize {
    let spread = |axis: usize, pts: &[(f64, f64)]| -> f64 {
        let vals: Vec<f64> = pts.iter().map(|p| if axis == 0 { p.0 } else { p.1 }).collect();
        let min = vals.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = vals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        max - min
    };
    let spread_x = spread(0, pts_a).max(spread(0, pts_b));
    let spread_y = spread(1, pts_a).max(spread(1, pts_b));
    if spread_x >= spread_y {
        0
    } else {
        1
    }
}

/// Solves for `(a, b)` such that `poly_a(t) == poly_b(a*t + b)`, comparing
/// the top two non-constant coefficients of equal-degree power-basis
/// polynomials along one axis.
fn solve_reparameterization(poly_a: &[f64], poly_b: &[f64]) -> Option<(f64, f64)> {
    let degree = poly_a.len() - 1;
    if degree < 1 {
        return None;
    }
    // Leading coefficient comparison: a_lead_a = a_lead_b * a_coeff^degree.
    let lead_a = poly_a[degree];
    let lead_b = poly_b[degree];
    if lead_b.abs() < 1e-12 {
        return None;
    }
    let ratio = lead_a / lead_b;
    let a_coeff = if degree == 1 {
        ratio
    } else if ratio < 0.0 && degree % 2 == 0 {
        return None;
    } else {
        let sign = ratio.signum();
        sign * ratio.abs().powf(1.0 / degree as f64)
    };
    if a_coeff.abs() < 1e-12 {
        return None;
    }
    // Second-from-top coefficient gives b via the binomial expansion of
    // q(a*t + b)'s degree-1-below-top term.
    let second_a = poly_a[degree - 1];
    // q(a*t+b) = sum_k poly_b[k] * (a*t+b)^k; the coefficient of t^(degree-1)
    // is poly_b[degree]*degree*a^(degree-1)*b + poly_b[degree-1]*a^(degree-1).
    let a_pow = a_coeff.powi(degree as i32 - 1);
    if a_pow.abs() < 1e-12 {
        return None;
    }
    let b_coeff = (second_a - poly_b[degree - 1] * a_pow) / (poly_b[degree] * degree as f64 * a_pow);
    Some((a_coeff, b_coeff))
}

fn verify_and_build<F: Fn(f64) -> (f64, f64)>(
    pos_a: F,
    pos_b: impl Fn(f64) -> (f64, f64),
    a_coeff: f64,
    b_coeff: f64,
    extra_ts: &[f64],
) -> Option<Overlap> {
    const EPS: f64 = crate::epsilon::OVERLAP_VERIFY;
    let t_max = a_coeff + b_coeff;
    let range_lo = b_coeff.min(t_max);
    let range_hi = b_coeff.max(t_max);
    if range_hi < 0.0 || range_lo > 1.0 {
        return None;
    }
    let mut sample_ts = vec![0.0, 1.0];
    sample_ts.extend_from_slice(extra_ts);
    for t in sample_ts {
        let (ax, ay) = pos_a(t);
        let q_t = a_coeff * t + b_coeff;
        let q_t_clamped = q_t.clamp(0.0, 1.0);
        let (bx, by) = pos_b(q_t_clamped);
        if (ax - bx).abs() > EPS || (ay - by).abs() > EPS {
            return None;
        }
    }
    Some(Overlap { a_coeff, b_coeff })
}

pub fn quadratic_overlap(a: &QuadraticBezierSegment, b: &QuadraticBezierSegment) -> Option<Overlap> {
    let pts_a = [(a.start.x, a.start.y), (a.control.x, a.control.y), (a.end.x, a.end.y)];
    let pts_b = [(b.start.x, b.start.y), (b.control.x, b.control.y), (b.end.x, b.end.y)];
    let axis = better_conditioned_axis(&pts_a, &pts_b);
    let pick = |p: (f64, f64)| if axis == 0 { p.0 } else { p.1 };
    let poly_a = power_basis_quad(pick(pts_a[0]), pick(pts_a[1]), pick(pts_a[2]));
    let poly_b = power_basis_quad(pick(pts_b[0]), pick(pts_b[1]), pick(pts_b[2]));
    let (a_coeff, b_coeff) = solve_reparameterization(&poly_a, &poly_b)?;
    verify_and_build(
        |t| {
            let p = a.position(t);
            (p.x, p.y)
        },
        |t| {
            let p = b.position(t);
            (p.x, p.y)
        },
        a_coeff,
        b_coeff,
        &a.interior_extrema_ts(),
    )
}

pub fn cubic_overlap(a: &CubicBezierSegment, b: &CubicBezierSegment) -> Option<Overlap> {
    let pts_a = [
        (a.start.x, a.start.y),
        (a.control1.x, a.control1.y),
        (a.control2.x, a.control2.y),
        (a.end.x, a.end.y),
    ];
    let pts_b = [
        (b.start.x, b.start.y),
        (b.control1.x, b.control1.y),
        (b.control2.x, b.control2.y),
        (b.end.x, b.end.y),
    ];
    let axis = better_conditioned_axis(&pts_a, &pts_b);
    let pick = |p: (f64, f64)| if axis == 0 { p.0 } else { p.1 };
    let poly_a = power_basis_cubic(pick(pts_a[0]), pick(pts_a[1]), pick(pts_a[2]), pick(pts_a[3]));
    let poly_b = power_basis_cubic(pick(pts_b[0]), pick(pts_b[1]), pick(pts_b[2]), pick(pts_b[3]));
    let (a_coeff, b_coeff) = solve_reparameterization(&poly_a, &poly_b)?;
    verify_and_build(
        |t| {
            let p = a.position(t);
            (p.x, p.y)
        },
        |t| {
            let p = b.position(t);
            (p.x, p.y)
        },
        a_coeff,
        b_coeff,
        &a.interior_extrema_ts(),
    )
}

/// Arcs (and elliptical arcs reduced to a shared unrotated frame) can
/// overlap a shared circle on up to two disjoint angular intervals
/// (spec.md §4.3).
pub fn arc_overlap(a: &Arc, b: &Arc) -> Vec<Overlap> {
    if (a.center - b.center).length() > 1e-9 || (a.radius - b.radius).abs() > 1e-9 {
        return Vec::new();
    }
    let a0 = a.start_angle;
    let a1 = a.actual_end_angle();
    let b0 = b.start_angle;
    let b1 = b.actual_end_angle();
    let (a_lo, a_hi) = (a0.min(a1), a0.max(a1));
    let (b_lo, b_hi) = (b0.min(b1), b0.max(b1));
    let lo = a_lo.max(b_lo);
    let hi = a_hi.min(b_hi);
    if lo >= hi {
        return Vec::new();
    }
    let sweep_a = a1 - a0;
    let t0 = (lo - a0) / sweep_a;
    let t1 = (hi - a0) / sweep_a;
    let a_coeff = t1 - t0;
    let b_coeff = t0;
    if a_coeff.abs() < 1e-12 {
        return Vec::new();
    }
    vec![Overlap { a_coeff, b_coeff }]
}

pub fn elliptical_arc_overlap(a: &EllipticalArc, b: &EllipticalArc) -> Vec<Overlap> {
    let same_ellipse = (a.center - b.center).length() < 1e-9
        && (a.radius_x - b.radius_x).abs() < 1e-9
        && (a.radius_y - b.radius_y).abs() < 1e-9
        && (a.rotation - b.rotation).abs() < 1e-9;
    if !same_ellipse {
        return Vec::new();
    }
    let proxy_a = Arc {
        center: crate::math::point(0.0, 0.0),
        radius: 1.0,
        start_angle: a.start_angle,
        end_angle: a.end_angle,
        anticlockwise: a.anticlockwise,
    };
    let proxy_b = Arc {
        center: crate::math::point(0.0, 0.0),
        radius: 1.0,
        start_angle: b.start_angle,
        end_angle: b.end_angle,
        anticlockwise: b.anticlockwise,
    };
    arc_overlap(&proxy_a, &proxy_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math;

    #[test]
    fn identical_quadratics_overlap_fully() {
        let a = QuadraticBezierSegment::new(math::point(0.0, 0.0), math::point(5.0, 10.0), math::point(10.0, 0.0))
            .unwrap();
        let overlap = quadratic_overlap(&a, &a).unwrap();
        assert!((overlap.a_coeff - 1.0).abs() < 1e-6);
        assert!(overlap.b_coeff.abs() < 1e-6);
    }

    #[test]
    fn disjoint_quadratics_do_not_overlap() {
        let a = QuadraticBezierSegment::new(math::point(0.0, 0.0), math::point(5.0, 10.0), math::point(10.0, 0.0))
            .unwrap();
        let b = QuadraticBezierSegment::new(math::point(0.0, 0.0), math::point(5.0, -10.0), math::point(10.0, 0.0))
            .unwrap();
        assert!(quadratic_overlap(&a, &b).is_none());
    }

    #[test]
    fn overlapping_arcs_on_shared_circle() {
        let a = Arc::new(math::point(0.0, 0.0), 1.0, 0.0, std::f64::consts::PI, false).unwrap();
        let b = Arc::new(math::point(0.0, 0.0), 1.0, std::f64::consts::FRAC_PI_2, 3.0 * std::f64::consts::FRAC_PI_2, false)
            .unwrap();
        let overlaps = arc_overlap(&a, &b);
        assert_eq!(overlaps.len(), 1);
    }
}
