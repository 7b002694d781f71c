//! Small numeric helpers shared by the segment variants, grounded on the
//! teacher's own `geom/src/utils.rs`.

use crate::math::{vector, Vector};
use arrayvec::ArrayVec;

#[inline]
pub fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// 90-degree counter-clockwise rotation.
#[inline]
pub fn tangent(v: Vector) -> Vector {
    vector(-v.y, v.x)
}

#[inline]
pub fn normalized_tangent(v: Vector) -> Vector {
    tangent(v).normalize()
}

/// Angle between two vectors, oriented clockwise with y pointing down,
/// result in `[0, 2*PI)`.
#[inline]
pub fn directed_angle(v1: Vector, v2: Vector) -> f64 {
    let angle = v2.y.atan2(v2.x) - v1.y.atan2(v1.x);
    if angle < 0.0 {
        angle + 2.0 * std::f64::consts::PI
    } else {
        angle
    }
}

/// Normalizes `angle - reference` into `[0, 2*PI)`.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let two_pi = 2.0 * std::f64::consts::PI;
    let a = angle % two_pi;
    if a < 0.0 {
        a + two_pi
    } else {
        a
    }
}

/// Real roots of `a*t^3 + b*t^2 + c*t + d = 0`, deduplicating repeated roots.
/// Used by the elliptical-arc extrema search and by cusp/inflection
/// analysis.
pub fn cubic_polynomial_roots(a: f64, b: f64, c: f64, d: f64) -> ArrayVec<f64, 3> {
    let mut result = ArrayVec::new();
    const EPS: f64 = 1e-12;

    if a.abs() < EPS {
        if b.abs() < EPS {
            if c.abs() < EPS {
                return result;
            }
            result.push(-d / c);
            return result;
        }
        let delta = c * c - 4.0 * b * d;
        if delta > 0.0 {
            let sqrt_delta = delta.sqrt();
            result.push((-c - sqrt_delta) / (2.0 * b));
            result.push((-c + sqrt_delta) / (2.0 * b));
        } else if delta.abs() < EPS {
            result.push(-c / (2.0 * b));
        }
        return result;
    }

    let frac_1_3 = 1.0 / 3.0;
    let bn = b / a;
    let cn = c / a;
    let dn = d / a;

    let delta0 = (3.0 * cn - bn * bn) / 9.0;
    let delta1 = (9.0 * bn * cn - 27.0 * dn - 2.0 * bn * bn * bn) / 54.0;
    let delta_01 = delta0 * delta0 * delta0 + delta1 * delta1;

    if delta_01 >= 0.0 {
        let delta_p_sqrt = delta1 + delta_01.sqrt();
        let delta_m_sqrt = delta1 - delta_01.sqrt();

        let s = delta_p_sqrt.signum() * delta_p_sqrt.abs().powf(frac_1_3);
        let t = delta_m_sqrt.signum() * delta_m_sqrt.abs().powf(frac_1_3);

        result.push(-bn * frac_1_3 + (s + t));

        if (s - t).abs() < EPS && (s + t).abs() >= EPS {
            result.push(-bn * frac_1_3 - (s + t) / 2.0);
        }
    } else {
        let theta = (delta1 / (-delta0 * delta0 * delta0).sqrt()).acos();
        let two_sqrt_delta0 = 2.0 * (-delta0).sqrt();
        result.push(two_sqrt_delta0 * (theta * frac_1_3).cos() - bn * frac_1_3);
        result.push(
            two_sqrt_delta0 * ((theta + 2.0 * std::f64::consts::PI) * frac_1_3).cos() - bn * frac_1_3,
        );
        result.push(
            two_sqrt_delta0 * ((theta + 4.0 * std::f64::consts::PI) * frac_1_3).cos() - bn * frac_1_3,
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_roots_approx(mut got: ArrayVec<f64, 3>, expected: &[f64], eps: f64) {
        got.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let mut want: Vec<f64> = expected.to_vec();
        want.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(got.len(), want.len(), "{:?} vs {:?}", got, want);
        for (a, b) in got.iter().zip(want.iter()) {
            assert!((a - b).abs() <= eps, "{} vs {}", a, b);
        }
    }

    #[test]
    fn cubic_polynomial() {
        assert_roots_approx(cubic_polynomial_roots(2.0, -4.0, 2.0, 0.0), &[0.0, 1.0], 1e-7);
        assert_roots_approx(cubic_polynomial_roots(-1.0, 1.0, -1.0, 1.0), &[1.0], 1e-6);
        assert_roots_approx(cubic_polynomial_roots(1.0, -3.0, 3.0, -1.0), &[1.0], 5e-5);
        assert_roots_approx(cubic_polynomial_roots(0.0, 1.0, -5.0, -14.0), &[-2.0, 7.0], 5e-5);
        assert_roots_approx(cubic_polynomial_roots(0.0, 0.0, 2.0, 1.0), &[-0.5], 5e-5);
    }

    #[test]
    fn min_max_orders() {
        assert_eq!(min_max(3.0, 1.0), (1.0, 3.0));
        assert_eq!(min_max(1.0, 3.0), (1.0, 3.0));
    }
}
