//! Dashed-line stroke area scenario, spec.md §8 seed test 4: a 100-unit
//! horizontal line stroked with width 10, `lineDash=[5,5]`, offset 0, butt
//! cap must enclose exactly 10 disjoint 5x10 rectangles totalling area 500.

use pathkit_geom::flatten::DiscretizationOptions;
use pathkit_geom::math;
use pathkit_path::{LineCap, LineStyles, Shape};
use pathkit_tessellation::stroke_shape;

#[test]
fn dashed_line_stroke_encloses_ten_rectangles_of_total_area_500() {
    let mut shape = Shape::new();
    shape.move_to(math::point(0.0, 0.0));
    shape.line_to(math::point(100.0, 0.0)).unwrap();

    let mut styles = LineStyles::default();
    styles.line_width = 10.0;
    styles.line_cap = LineCap::Butt;
    styles.line_dash = vec![5.0, 5.0];
    styles.line_dash_offset = 0.0;

    let stroked = stroke_shape(&shape, &styles, &DiscretizationOptions::default()).unwrap();

    assert_eq!(stroked.finished_subpaths().len(), 10);
    assert!((stroked.area() - 500.0).abs() < 0.1, "area was {}", stroked.area());
}
