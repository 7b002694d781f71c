//! Constructive area geometry and external-interface adapters built on top
//! of [`pathkit_path`]: planar subdivision, boolean combine, SVG path
//! emission/parsing and a canvas-context writer, spec.md §4.7 and §6.
//!
//! Hit-testing (`Shape::contains_point`) stays an inherent method on
//! `pathkit_path::Shape` itself: it only needs the ray/segment
//! intersection that already lives in `pathkit-geom`, and gains nothing
//! from being routed through the half-edge graph built here. The CAG
//! combine operators, by contrast, genuinely need that graph, so they're
//! the ones that get an extension trait in this crate.

pub mod cag;
pub mod canvas;
pub mod graph;
pub mod parser;
pub mod svg;

pub use cag::{combine, difference, intersection, union, xor, CombineOp, ShapeCombineExt};
pub use canvas::{write_shape, write_subpath, CanvasContext};
pub use parser::{parse_tokens, PathToken};
pub use svg::{shape_to_svg_path, subpath_to_svg_path};
