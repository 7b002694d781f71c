//! Constructive area geometry, spec.md §4.7 steps 8-9: turns a labelled
//! `PlanarGraph` into a `Shape` by keeping only the faces a predicate
//! accepts.

use crate::graph::{Face, PlanarGraph};
use pathkit_path::Shape;

/// Which combination of "inside A" / "inside B" a face must satisfy to
/// survive a combine operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CombineOp {
    Union,
    Intersection,
    /// A minus B.
    Difference,
    Xor,
}

fn accepts(op: CombineOp, face: &Face) -> bool {
    let a = face.winding_a() != 0;
    let b = face.winding_b() != 0;
    match op {
        CombineOp::Union => a || b,
        CombineOp::Intersection => a && b,
        CombineOp::Difference => a && !b,
        CombineOp::Xor => a != b,
    }
}

/// Combines `a` and `b` under `op`, building the planar subdivision of both
/// shapes and keeping only the faces `op` accepts (spec.md §4.7).
///
/// Faces are emitted independently; a hole's boundary and its enclosing
/// loop both survive as separate subpaths of the result rather than being
/// nested, which `Shape`'s winding-based consumers don't need.
pub fn combine(a: &Shape, b: &Shape, op: CombineOp) -> Shape {
    let mut graph = PlanarGraph::build(a, b);
    let faces = graph.faces();
    let subpaths = faces
        .into_iter()
        .filter(|f| accepts(op, f))
        .filter_map(|f| f.into_subpath())
        .collect();
    Shape::from_subpaths(subpaths)
}

pub fn union(a: &Shape, b: &Shape) -> Shape {
    combine(a, b, CombineOp::Union)
}

pub fn intersection(a: &Shape, b: &Shape) -> Shape {
    combine(a, b, CombineOp::Intersection)
}

pub fn difference(a: &Shape, b: &Shape) -> Shape {
    combine(a, b, CombineOp::Difference)
}

pub fn xor(a: &Shape, b: &Shape) -> Shape {
    combine(a, b, CombineOp::Xor)
}

/// Extension trait giving `Shape` itself `shape_union`/`shape_intersection`/
/// `shape_difference`/`shape_xor` methods, mirroring how `pathkit-path`
/// already reads for its own path-building calls.
pub trait ShapeCombineExt {
    fn shape_union(&self, other: &Shape) -> Shape;
    fn shape_intersection(&self, other: &Shape) -> Shape;
    fn shape_difference(&self, other: &Shape) -> Shape;
    fn shape_xor(&self, other: &Shape) -> Shape;
}

impl ShapeCombineExt for Shape {
    fn shape_union(&self, other: &Shape) -> Shape {
        union(self, other)
    }

    fn shape_intersection(&self, other: &Shape) -> Shape {
        intersection(self, other)
    }

    fn shape_difference(&self, other: &Shape) -> Shape {
        difference(self, other)
    }

    fn shape_xor(&self, other: &Shape) -> Shape {
        xor(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathkit_geom::math;

    fn square(x: f64, y: f64, s: f64) -> Shape {
        let mut shape = Shape::new();
        shape.rect(x, y, s, s).unwrap();
        shape
    }

    #[test]
    fn union_of_two_overlapping_squares_contains_a_corner_of_each() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 5.0, 10.0);
        let result = union(&a, &b);
        assert!(result.contains_point(math::point(1.0, 1.0)));
        assert!(result.contains_point(math::point(14.0, 14.0)));
    }

    #[test]
    fn intersection_of_disjoint_squares_is_empty() {
        let a = square(0.0, 0.0, 5.0);
        let b = square(100.0, 100.0, 5.0);
        let result = intersection(&a, &b);
        assert!(!result.contains_point(math::point(2.0, 2.0)));
        assert!(!result.contains_point(math::point(102.0, 102.0)));
    }

    #[test]
    fn difference_removes_the_overlap_region() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 0.0, 10.0);
        let result = difference(&a, &b);
        assert!(result.contains_point(math::point(1.0, 5.0)));
        assert!(!result.contains_point(math::point(7.0, 5.0)));
    }

    #[test]
    fn xor_keeps_only_the_non_overlapping_regions() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 0.0, 10.0);
        let result = xor(&a, &b);
        assert!(result.contains_point(math::point(1.0, 5.0)));
        assert!(result.contains_point(math::point(12.0, 5.0)));
        assert!(!result.contains_point(math::point(7.0, 5.0)));
    }

    #[test]
    fn extension_trait_matches_the_free_function() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 5.0, 10.0);
        let via_trait = a.shape_union(&b);
        let via_fn = union(&a, &b);
        assert_eq!(via_trait.finished_subpaths().len(), via_fn.finished_subpaths().len());
    }
}
