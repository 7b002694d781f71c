//! Stroke style record, spec.md §4.4.

use pathkit_geom::error::{PathKitError, Result};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

/// Stroke parameters; equality is field-wise including the dash sequence
/// (spec.md §3).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineStyles {
    pub line_width: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub line_dash: Vec<f64>,
    pub line_dash_offset: f64,
    pub miter_limit: f64,
}

impl Default for LineStyles {
    fn default() -> Self {
        LineStyles {
            line_width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            line_dash: Vec::new(),
            line_dash_offset: 0.0,
            miter_limit: 10.0,
        }
    }
}

impl LineStyles {
    pub fn new(
        line_width: f64,
        line_cap: LineCap,
        line_join: LineJoin,
        line_dash: Vec<f64>,
        line_dash_offset: f64,
        miter_limit: f64,
    ) -> Result<Self> {
        if !(line_width > 0.0) || !line_width.is_finite() {
            return Err(PathKitError::invalid_geometry("lineWidth must be positive and finite"));
        }
        if miter_limit < 1.0 || !miter_limit.is_finite() {
            return Err(PathKitError::invalid_geometry("miterLimit must be >= 1"));
        }
        if line_dash.iter().any(|d| *d < 0.0 || !d.is_finite()) {
            return Err(PathKitError::invalid_geometry("lineDash entries must be non-negative and finite"));
        }
        if !line_dash_offset.is_finite() {
            return Err(PathKitError::invalid_geometry("lineDashOffset must be finite"));
        }
        Ok(LineStyles { line_width, line_cap, line_join, line_dash, line_dash_offset, miter_limit })
    }

    pub fn has_dash(&self) -> bool {
        !self.line_dash.is_empty() && self.line_dash.iter().any(|d| *d > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nonpositive_width() {
        assert!(LineStyles::new(0.0, LineCap::Butt, LineJoin::Miter, vec![], 0.0, 4.0).is_err());
    }

    #[test]
    fn rejects_miter_limit_below_one() {
        assert!(LineStyles::new(1.0, LineCap::Butt, LineJoin::Miter, vec![], 0.0, 0.5).is_err());
    }

    #[test]
    fn default_has_no_dash() {
        assert!(!LineStyles::default().has_dash());
    }
}
