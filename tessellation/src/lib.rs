//! Turns a centerline path into stroked boundary geometry: per-segment
//! offset curves, joins, caps and dash expansion on top of
//! [`pathkit_path`]'s `Subpath`/`Shape`, spec.md §4.4-4.5.

pub mod dash;
pub mod joins;
pub mod offset;
pub mod stroker;

pub use stroker::{stroke_subpath, stroke_subpath_dashed};

use pathkit_geom::error::Result;
use pathkit_geom::flatten::DiscretizationOptions;
use pathkit_path::{LineStyles, Shape, Subpath};

/// Strokes every finished subpath of `shape`, concatenating the resulting
/// boundary subpaths into one `Shape` (spec.md §4.5).
pub fn stroke_shape(shape: &Shape, styles: &LineStyles, flatten_options: &DiscretizationOptions) -> Result<Shape> {
    let mut boundary: Vec<Subpath> = Vec::new();
    for subpath in shape.finished_subpaths() {
        if subpath.is_empty() {
            continue;
        }
        boundary.extend(stroker::stroke_subpath_dashed(subpath, styles, flatten_options)?);
    }
    Ok(Shape::from_subpaths(boundary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathkit_geom::math;

    #[test]
    fn stroking_a_rectangle_shape_yields_two_boundaries() {
        let mut shape = Shape::new();
        shape.rect(0.0, 0.0, 10.0, 10.0).unwrap();
        let mut styles = LineStyles::default();
        styles.line_width = 2.0;
        let stroked = stroke_shape(&shape, &styles, &DiscretizationOptions::default()).unwrap();
        assert_eq!(stroked.finished_subpaths().len(), 2);
    }

    #[test]
    fn stroking_an_open_path_yields_one_boundary() {
        let mut shape = Shape::new();
        shape.move_to(math::point(0.0, 0.0));
        shape.line_to(math::point(10.0, 0.0)).unwrap();
        let styles = LineStyles::default();
        let stroked = stroke_shape(&shape, &styles, &DiscretizationOptions::default()).unwrap();
        assert_eq!(stroked.finished_subpaths().len(), 1);
    }
}
