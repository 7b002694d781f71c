#![doc(html_logo_url = "https://example.invalid/pathkit-logo.svg")]

//! A 2D vector-path geometry kernel: building, querying, transforming,
//! stroking and performing constructive area geometry (CAG) on planar paths
//! made of lines, circular and elliptical arcs, and quadratic/cubic Bezier
//! curves.
//!
//! # Crates
//!
//! * **pathkit-geom** - segment primitives, the bounds-subdivision
//!   intersector, and the curve-overlap detector.
//! * **pathkit-path** - `Subpath`, `Shape`, `LineStyles` and the fluent
//!   builder API.
//! * **pathkit-tessellation** - the stroker: offsetting, joining, capping
//!   and dashing.
//! * **pathkit-algorithms** - the CAG planar subdivision, SVG emission, and
//!   hit testing.
//!
//! This meta-crate reexports the above for convenience, the way the
//! `lyon` meta-crate reexports its constituent crates.

pub use pathkit_geom as geom;
pub use pathkit_path as path;
pub use pathkit_tessellation as tessellation;
pub use pathkit_algorithms as algorithms;

pub use pathkit_geom::{
    Point, Vector, Bounds, Transform, Ray, Segment, Line, Arc, EllipticalArc,
    QuadraticBezierSegment, CubicBezierSegment, PathKitError, Result,
};
pub use pathkit_path::{Subpath, Shape, LineStyles, LineCap, LineJoin};
pub use pathkit_algorithms::{
    combine, difference, intersection, union, xor, CanvasContext, CombineOp, PathToken,
    ShapeCombineExt,
};
pub use pathkit_tessellation::stroke_shape;
