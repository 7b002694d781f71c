//! Error taxonomy for the kernel, spec.md §6-§7.
//!
//! Errors are data values: constructors and builder calls that receive
//! malformed input return `Err` immediately, but the intersector and the CAG
//! planar subdivision treat most internal failures as "no result found"
//! (logged through the [`log`] facade) rather than propagating a partial
//! shape — see spec.md §7's propagation policy.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PathKitError>;

/// The four error kinds named in spec.md §6.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ErrorKind {
    /// A constructor or setter received a non-finite coordinate, a negative
    /// line width, a negative miter limit, a negative dash entry, or a null
    /// vector where a non-zero one was required.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A parametric query fell outside `[0, 1]`, an angle fell outside what
    /// `contains_angle` accepts, or an index fell outside an entity's range.
    #[error("value out of range: {0}")]
    OutOfRange(String),

    /// CAG planar-subdivision construction reached an inconsistent state
    /// (an unclosed face loop, a vertex with a single half-edge, an
    /// under-determined winding predicate).
    #[error("topology failure: {0}")]
    TopologyFailure(String),

    /// Reserved for the `radius_x < radius_y` post-canonicalization branch
    /// of `EllipticalArc`, which the source marks as not-yet-verified
    /// (spec.md §9 Open Questions).
    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),
}

/// The concrete error type returned across the public API.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind}")]
pub struct PathKitError {
    #[source]
    pub kind: ErrorKind,
}

impl PathKitError {
    pub fn invalid_geometry(msg: impl Into<String>) -> Self {
        PathKitError { kind: ErrorKind::InvalidGeometry(msg.into()) }
    }

    pub fn out_of_range(msg: impl Into<String>) -> Self {
        PathKitError { kind: ErrorKind::OutOfRange(msg.into()) }
    }

    pub fn topology_failure(msg: impl Into<String>) -> Self {
        PathKitError { kind: ErrorKind::TopologyFailure(msg.into()) }
    }

    pub fn unsupported_configuration(msg: impl Into<String>) -> Self {
        PathKitError { kind: ErrorKind::UnsupportedConfiguration(msg.into()) }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

/// Returns `Err(InvalidGeometry)` if any of `coords` is non-finite.
pub fn check_finite(coords: &[f64], what: &str) -> Result<()> {
    if coords.iter().any(|c| !c.is_finite()) {
        return Err(PathKitError::invalid_geometry(format!(
            "{} has a non-finite coordinate",
            what
        )));
    }
    Ok(())
}

/// Returns `Err(OutOfRange)` if `t` is outside `[0, 1]`.
pub fn check_unit_range(t: f64, what: &str) -> Result<()> {
    if !(0.0..=1.0).contains(&t) {
        return Err(PathKitError::out_of_range(format!(
            "{} must be in [0, 1], got {}",
            what, t
        )));
    }
    Ok(())
}
