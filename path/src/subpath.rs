//! `Subpath`, spec.md §3: an ordered sequence of segments sharing
//! consecutive endpoints, plus an optional closed flag.

use pathkit_geom::error::{PathKitError, Result};
use pathkit_geom::math::{self, Bounds, Point, Transform};
use pathkit_geom::segment::Segment;
use std::cell::RefCell;

/// An ordered, endpoint-continuous chain of segments.
///
/// Bounds are recomputed lazily and cached; the cache is cleared by every
/// mutating method rather than through an observer channel, since segments
/// here are immutable value types and the only way to change a `Subpath` is
/// through its own API (spec.md §9's "pure accessors guarded by a dirty
/// flag" alternative to the source's invalidation-observer wiring).
#[derive(Debug)]
pub struct Subpath {
    segments: Vec<Segment>,
    closed: bool,
    bounds_cache: RefCell<Option<Bounds>>,
}

impl Clone for Subpath {
    fn clone(&self) -> Self {
        Subpath {
            segments: self.segments.clone(),
            closed: self.closed,
            bounds_cache: RefCell::new(*self.bounds_cache.borrow()),
        }
    }
}

impl PartialEq for Subpath {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments && self.closed == other.closed
    }
}

impl Subpath {
    pub fn new() -> Self {
        Subpath { segments: Vec::new(), closed: false, bounds_cache: RefCell::new(None) }
    }

    pub fn from_segments(segments: Vec<Segment>, closed: bool) -> Result<Self> {
        let subpath = Subpath { segments, closed, bounds_cache: RefCell::new(None) };
        subpath.check_continuity()?;
        Ok(subpath)
    }

    fn check_continuity(&self) -> Result<()> {
        for pair in self.segments.windows(2) {
            let gap = (pair[0].end() - pair[1].start()).length();
            if gap > pathkit_geom::epsilon::ENDPOINT_CONTINUITY {
                return Err(PathKitError::invalid_geometry(format!(
                    "Subpath segments must share endpoints within {}, found a gap of {}",
                    pathkit_geom::epsilon::ENDPOINT_CONTINUITY,
                    gap
                )));
            }
        }
        Ok(())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    pub fn push_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
        *self.bounds_cache.borrow_mut() = None;
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn start(&self) -> Option<Point> {
        self.segments.first().map(|s| s.start())
    }

    pub fn end(&self) -> Option<Point> {
        self.segments.last().map(|s| s.end())
    }

    /// spec.md §3: "ordered sequence of points, typically the start of each
    /// segment plus the end of the last".
    pub fn points(&self) -> Vec<Point> {
        if self.segments.is_empty() {
            return Vec::new();
        }
        let mut pts = Vec::with_capacity(self.segments.len() + 1);
        pts.push(self.segments[0].start());
        for seg in &self.segments {
            pts.push(seg.end());
        }
        pts
    }

    pub fn bounds(&self) -> Bounds {
        if let Some(b) = *self.bounds_cache.borrow() {
            return b;
        }
        let mut b = math::empty_bounds();
        for seg in &self.segments {
            b = math::union_bounds(b, seg.bounds());
        }
        *self.bounds_cache.borrow_mut() = Some(b);
        b
    }

    /// The implicit closing line, iff `closed` and the last segment's end
    /// differs from the first segment's start (spec.md §4.5 step 1).
    pub fn implicit_closing_line(&self) -> Option<pathkit_geom::line::Line> {
        if !self.closed {
            return None;
        }
        let (start, end) = (self.start()?, self.end()?);
        if (start - end).length() < pathkit_geom::epsilon::ENDPOINT_CONTINUITY {
            return None;
        }
        pathkit_geom::line::Line::new(end, start).ok()
    }

    pub fn transformed(&self, m: &Transform) -> Subpath {
        Subpath {
            segments: self.segments.iter().map(|s| s.transformed(m)).collect(),
            closed: self.closed,
            bounds_cache: RefCell::new(None),
        }
    }

    /// Σ `segment.signed_area_fragment()`, spec.md §4.1.7 / §4.7 step 6.
    pub fn signed_area(&self) -> f64 {
        let mut area: f64 = self.segments.iter().map(|s| s.signed_area_fragment()).sum();
        if let Some(closing) = self.implicit_closing_line() {
            area += closing.signed_area_fragment();
        }
        area
    }

    pub fn flattened(&self, options: &pathkit_geom::flatten::DiscretizationOptions) -> Vec<Point> {
        let mut pts = Vec::new();
        for (i, seg) in self.segments.iter().enumerate() {
            let mut seg_pts = pathkit_geom::flatten::flatten(seg, options);
            if i > 0 {
                seg_pts.remove(0);
            }
            pts.extend(seg_pts);
        }
        pts
    }
}

impl Default for Subpath {
    fn default() -> Self {
        Subpath::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathkit_geom::line::Line;

    fn line_seg(sx: f64, sy: f64, ex: f64, ey: f64) -> Segment {
        Segment::Line(Line::new(math::point(sx, sy), math::point(ex, ey)).unwrap())
    }

    #[test]
    fn continuous_chain_builds() {
        let subpath =
            Subpath::from_segments(vec![line_seg(0.0, 0.0, 10.0, 0.0), line_seg(10.0, 0.0, 10.0, 10.0)], false)
                .unwrap();
        assert_eq!(subpath.points().len(), 3);
    }

    #[test]
    fn discontinuous_chain_rejected() {
        let result =
            Subpath::from_segments(vec![line_seg(0.0, 0.0, 10.0, 0.0), line_seg(11.0, 0.0, 11.0, 10.0)], false);
        assert!(result.is_err());
    }

    #[test]
    fn closed_rectangle_has_no_implicit_closing_line() {
        let subpath = Subpath::from_segments(
            vec![
                line_seg(0.0, 0.0, 10.0, 0.0),
                line_seg(10.0, 0.0, 10.0, 10.0),
                line_seg(10.0, 10.0, 0.0, 10.0),
                line_seg(0.0, 10.0, 0.0, 0.0),
            ],
            true,
        )
        .unwrap();
        assert!(subpath.implicit_closing_line().is_none());
    }

    #[test]
    fn rectangle_signed_area_is_positive() {
        let subpath = Subpath::from_segments(
            vec![
                line_seg(0.0, 0.0, 10.0, 0.0),
                line_seg(10.0, 0.0, 10.0, 5.0),
                line_seg(10.0, 5.0, 0.0, 5.0),
                line_seg(0.0, 5.0, 0.0, 0.0),
            ],
            true,
        )
        .unwrap();
        assert!((subpath.signed_area().abs() - 50.0).abs() < 1e-9);
    }
}
