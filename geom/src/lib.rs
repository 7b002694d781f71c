#![deny(bare_trait_objects)]

//! Segment primitives, the bounds-subdivision intersector and the
//! curve-overlap detector on top of [`euclid`].
//!
//! This crate implements the closed-form maths for:
//!
//! - line segments,
//! - circular and elliptical arcs,
//! - quadratic and cubic Bezier curves,
//!
//! plus the generic machinery that lets the rest of the kernel (stroking,
//! CAG) treat all five as one `Segment` sum type: bounds, subdivision,
//! transforms, ray intersection and pairwise curve intersection.

pub use euclid;
pub use arrayvec;

pub mod math;
pub mod error;
mod utils;
pub mod ray;
pub mod line;
pub mod arc;
pub mod elliptical_arc;
pub mod quadratic_bezier;
pub mod cubic_bezier;
pub mod segment;
pub mod intersection;
pub mod overlap;
pub mod flatten;

#[doc(inline)]
pub use crate::math::{Point, Vector, Bounds, Transform, Angle};
#[doc(inline)]
pub use crate::ray::Ray;
#[doc(inline)]
pub use crate::error::{PathKitError, ErrorKind, Result};
#[doc(inline)]
pub use crate::line::Line;
#[doc(inline)]
pub use crate::arc::Arc;
#[doc(inline)]
pub use crate::elliptical_arc::EllipticalArc;
#[doc(inline)]
pub use crate::quadratic_bezier::QuadraticBezierSegment;
#[doc(inline)]
pub use crate::cubic_bezier::CubicBezierSegment;
#[doc(inline)]
pub use crate::segment::Segment;

/// Named epsilon constants used throughout the kernel. Centralized here per
/// the source's own design note: "every epsilon is a named constant... tuning
/// is one place."
pub mod epsilon {
    /// Tangent magnitude below which a cubic's candidate cusp `t` is treated
    /// as an actual cusp.
    pub const CUSP_TANGENT: f64 = 1e-7;
    /// Distance below which two edge endpoints are merged into one vertex
    /// during CAG graph construction.
    pub const VERTEX_MERGE: f64 = 1e-8;
    /// Distance below which consecutive segment endpoints are considered
    /// continuous (the `Subpath` end-to-start invariant).
    pub const ENDPOINT_CONTINUITY: f64 = 1e-9;
    /// Angular distance below which two angles are considered equal.
    pub const ANGLE_EQUALITY: f64 = 1e-10;
    /// Parametric-distance threshold for clustering bounds-subdivision
    /// intersection candidates.
    pub const INTERSECTION_CLUSTER: f64 = 1e-13;
    /// Maximum bisection rounds run by the bounds-subdivision intersector.
    pub const INTERSECTION_ITERATION_CAP: u32 = 50;
    /// Default sampling tolerance used to verify a candidate curve overlap.
    pub const OVERLAP_VERIFY: f64 = 1e-6;
}
