//! Basic 2D types shared by every module in the kernel, reexported from
//! [`euclid`] the way most lyon crates reexport their own `math` module.

use crate::euclid;

/// Untyped unit: this kernel works in one flat coordinate space, there is no
/// separate "world"/"screen" unit distinction to encode at the type level.
pub type Unit = euclid::UnknownUnit;

/// A point in the plane: a pair of finite 64-bit floats.
pub type Point = euclid::Point2D<f64, Unit>;

/// A free vector in the plane.
pub type Vector = euclid::Vector2D<f64, Unit>;

/// An angle in radians.
pub type Angle = euclid::Angle<f64>;

/// A 3x3 affine transform (2x3 matrix + implicit last row).
pub type Transform = euclid::Transform2D<f64, Unit, Unit>;

/// A rotation-only transform, used to build join/cap arcs.
pub type Rotation = euclid::Rotation2D<f64, Unit, Unit>;

/// Axis-aligned bounding rectangle, with a distinguished "nothing" (empty)
/// value, spec.md §3.
pub type Bounds = euclid::Box2D<f64, Unit>;

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector(x: f64, y: f64) -> Vector {
    Vector::new(x, y)
}

/// The empty `Bounds`, spec.md's "NOTHING" value: a union with any point or
/// bounds returns the other operand unchanged.
#[inline]
pub fn empty_bounds() -> Bounds {
    Bounds::zero().inflate(-f64::INFINITY, -f64::INFINITY)
}

/// Returns `true` if `b` is the "nothing" value (`min` not finite, or
/// `min.x > max.x`).
#[inline]
pub fn is_empty_bounds(b: &Bounds) -> bool {
    b.is_empty() || !b.min.x.is_finite() || !b.min.y.is_finite()
}

/// Union of a `Bounds` with a point, handling the empty case.
#[inline]
pub fn union_point(b: Bounds, p: Point) -> Bounds {
    if is_empty_bounds(&b) {
        return Bounds::new(p, p);
    }
    b.union(&Bounds::new(p, p))
}

/// Union of two `Bounds`, handling the empty cases on either side.
#[inline]
pub fn union_bounds(a: Bounds, b: Bounds) -> Bounds {
    if is_empty_bounds(&a) {
        return b;
    }
    if is_empty_bounds(&b) {
        return a;
    }
    a.union(&b)
}

/// 90-degree counter-clockwise rotation of a vector (spec.md §3 "perpendicular").
#[inline]
pub fn perpendicular(v: Vector) -> Vector {
    vector(-v.y, v.x)
}

/// Linear interpolation between two points, spec.md §3 "blend".
#[inline]
pub fn blend(a: Point, b: Point, t: f64) -> Point {
    a + (b - a) * t
}

/// Angle (in radians, `(-pi, pi]`) of a vector relative to the positive x axis.
#[inline]
pub fn angle_of(v: Vector) -> f64 {
    v.y.atan2(v.x)
}

/// Build a unit vector from a polar angle, spec.md §3 "polar construction".
#[inline]
pub fn from_polar(angle: f64) -> Vector {
    vector(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bounds_union_with_point_is_point() {
        let b = empty_bounds();
        assert!(is_empty_bounds(&b));
        let p = point(1.0, 2.0);
        let u = union_point(b, p);
        assert_eq!(u.min, p);
        assert_eq!(u.max, p);
    }

    #[test]
    fn perpendicular_is_ccw_quarter_turn() {
        let v = vector(1.0, 0.0);
        let p = perpendicular(v);
        assert!((p.x - 0.0).abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
    }
}
