//! End-to-end constructive-area-geometry scenarios, spec.md §8.
//!
//! There's no rasterizer in this crate, so "matches the raster within a
//! threshold" is checked the way `Shape::contains_point` and `Shape::area`
//! can: dense sample grids and area arithmetic rather than pixel diffs.

use pathkit_algorithms::{difference, union, ShapeCombineExt};
use pathkit_geom::math;
use pathkit_path::Shape;

fn triangle(points: [(f64, f64); 3]) -> Shape {
    let mut shape = Shape::new();
    shape.move_to(math::point(points[0].0, points[0].1));
    shape.line_to(math::point(points[1].0, points[1].1)).unwrap();
    shape.line_to(math::point(points[2].0, points[2].1)).unwrap();
    shape.close().unwrap();
    shape
}

fn sample_grid(n: usize) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(n * n);
    for iy in 0..n {
        for ix in 0..n {
            points.push((ix as f64, iy as f64));
        }
    }
    points
}

#[test]
fn opposite_orientation_triangle_union_matches_pointwise_or() {
    let up = triangle([(10.0, 10.0), (90.0, 10.0), (50.0, 90.0)]);
    let down = triangle([(10.0, 90.0), (90.0, 90.0), (50.0, 10.0)]);
    let combined = union(&up, &down);

    let mut mismatches = 0;
    for (x, y) in sample_grid(100) {
        let p = math::point(x, y);
        let expected = up.contains_point(p) || down.contains_point(p);
        if combined.contains_point(p) != expected {
            mismatches += 1;
        }
    }
    assert!(mismatches <= 100, "{} mismatching pixels out of 10000", mismatches);
}

#[test]
fn half_circle_join_reproduces_the_full_disc() {
    let mut top = Shape::new();
    top.arc(math::point(50.0, 50.0), 30.0, 0.0, std::f64::consts::PI, false).unwrap();
    top.close().unwrap();

    let mut bottom = Shape::new();
    bottom.arc(math::point(50.0, 50.0), 30.0, std::f64::consts::PI, std::f64::consts::TAU, false).unwrap();
    bottom.close().unwrap();

    let disc = union(&top, &bottom);

    let mut full = Shape::new();
    full.arc(math::point(50.0, 50.0), 30.0, 0.0, std::f64::consts::TAU, false).unwrap();
    full.close().unwrap();

    let mut mismatches = 0;
    for (x, y) in sample_grid(100) {
        let p = math::point(x, y);
        if disc.contains_point(p) != full.contains_point(p) {
            mismatches += 1;
        }
    }
    assert!(mismatches <= 100);
}

#[test]
fn four_adjacent_circles_union_covers_each_disc() {
    let mut result: Option<Shape> = None;
    for (cx, cy) in [(-5.0, 0.0), (5.0, 0.0), (0.0, -5.0), (0.0, 5.0)] {
        let mut circle = Shape::new();
        circle.arc(math::point(cx, cy), 5.0, 0.0, std::f64::consts::TAU, false).unwrap();
        circle.close().unwrap();
        result = Some(match result {
            None => circle,
            Some(acc) => acc.shape_union(&circle),
        });
    }
    let combined = result.unwrap();
    assert!(combined.contains_point(math::point(-5.0, 0.0)));
    assert!(combined.contains_point(math::point(5.0, 0.0)));
    assert!(combined.contains_point(math::point(0.0, -5.0)));
    assert!(combined.contains_point(math::point(0.0, 5.0)));
}

#[test]
fn cubic_self_intersection_union_with_rect_resolves_the_crossing() {
    let mut cubic_shape = Shape::new();
    cubic_shape.move_to(math::point(10.0, 0.0));
    cubic_shape
        .cubic_curve_to(math::point(30.0, 10.0), math::point(0.0, 10.0), math::point(20.0, 0.0))
        .unwrap();
    cubic_shape.close().unwrap();

    let mut rect = Shape::new();
    rect.rect(0.0, 0.0, 5.0, 5.0).unwrap();

    let combined = union(&cubic_shape, &rect);
    assert!(combined.contains_point(math::point(1.0, 1.0)));
    // Inside the cubic's own self-intersection loop (self-crossing sits at
    // (15, 3), the loop's peak at (15, 7.5)), far outside the rect: only
    // the cubic's winding can explain containment here.
    assert!(combined.contains_point(math::point(15.0, 5.0)));
    assert!(!combined.finished_subpaths().is_empty());
}

#[test]
fn two_adjacent_stroke_rectangles_collapse_under_union() {
    let body = {
        let mut s = Shape::new();
        s.rect(0.0, 0.0, 100.0, 10.0).unwrap();
        s
    };
    let cap = {
        let mut s = Shape::new();
        s.rect(95.0, 0.0, 10.0, 10.0).unwrap();
        s
    };
    let covering = {
        let mut s = Shape::new();
        s.rect(0.0, 0.0, 105.0, 10.0).unwrap();
        s
    };

    let combined = union(&body, &cap);
    for (x, y) in [(2.0, 5.0), (97.0, 5.0), (104.0, 5.0)] {
        let p = math::point(x, y);
        assert_eq!(combined.contains_point(p), covering.contains_point(p), "mismatch at {:?}", p);
    }
}

#[test]
fn difference_of_full_circle_and_concentric_disc_leaves_an_annulus() {
    let mut outer = Shape::new();
    outer.arc(math::point(0.0, 0.0), 10.0, 0.0, std::f64::consts::TAU, false).unwrap();
    outer.close().unwrap();

    let mut inner = Shape::new();
    inner.arc(math::point(0.0, 0.0), 5.0, 0.0, std::f64::consts::TAU, false).unwrap();
    inner.close().unwrap();

    let annulus = difference(&outer, &inner);
    assert!(annulus.contains_point(math::point(7.0, 0.0)));
    assert!(!annulus.contains_point(math::point(2.0, 0.0)));
    assert!(!annulus.contains_point(math::point(20.0, 0.0)));
}
