//! The stroking algorithm, spec.md §4.5: turns a centerline `Subpath`
//! into one or two boundary `Subpath`s built from left/right offset
//! curves, joins and caps.

use crate::{dash, joins, offset};
use pathkit_geom::error::{PathKitError, Result};
use pathkit_geom::flatten::DiscretizationOptions;
use pathkit_geom::segment::Segment;
use pathkit_path::{LineStyles, Subpath};

fn offset_chain(segments: &[Segment], half_width: f64, styles: &LineStyles, closed: bool) -> Vec<Segment> {
    let mut out = Vec::new();
    let n = segments.len();
    for (i, seg) in segments.iter().enumerate() {
        out.extend(offset::segment_offset(seg, half_width, true));
        if i + 1 < n {
            let next = &segments[i + 1];
            out.extend(joins::left_join(styles, seg.end(), seg.end_tangent(), next.start_tangent()));
        }
    }
    if closed && n > 1 {
        out.extend(joins::left_join(
            styles,
            segments[n - 1].end(),
            segments[n - 1].end_tangent(),
            segments[0].start_tangent(),
        ));
    }
    out
}

/// The centerline's segments, plus an implicit closing line if `subpath`
/// is closed and its endpoints don't already coincide (spec.md §4.5 step 1).
fn effective_segments(subpath: &Subpath) -> Vec<Segment> {
    let mut segments = subpath.segments().to_vec();
    if let Some(closing) = subpath.implicit_closing_line() {
        segments.push(Segment::Line(closing));
    }
    segments
}

/// Strokes one subpath.
///
/// A closed subpath produces two closed boundary subpaths (outer, inner);
/// an open one produces a single closed subpath made of the left chain,
/// the end cap, the right chain and the start cap (spec.md §4.5 steps
/// 2-6). No per-`LineStyles` stroke-result cache is kept here: recomputing
/// is the only behavior that matters, caching it would be a pure
/// performance concern out of scope for this crate.
pub fn stroke_subpath(subpath: &Subpath, styles: &LineStyles) -> Result<Vec<Subpath>> {
    let segments = effective_segments(subpath);
    if segments.is_empty() {
        return Err(PathKitError::invalid_geometry("cannot stroke an empty subpath"));
    }
    let half_width = styles.line_width * 0.5;
    let closed = subpath.is_closed();

    let left = offset_chain(&segments, half_width, styles, closed);
    let reversed_flipped: Vec<Segment> = segments.iter().rev().map(offset::flip_segment).collect();
    let right = offset_chain(&reversed_flipped, half_width, styles, closed);

    if closed {
        let outer = Subpath::from_segments(left, true)?;
        let inner = Subpath::from_segments(right, true)?;
        Ok(vec![outer, inner])
    } else {
        let end_point = segments.last().unwrap().end();
        let end_tangent = segments.last().unwrap().end_tangent();
        let start_point = segments.first().unwrap().start();
        let start_tangent = -segments.first().unwrap().start_tangent();

        let mut combined = left;
        combined.extend(joins::cap(styles, end_point, end_tangent));
        combined.extend(right);
        combined.extend(joins::cap(styles, start_point, start_tangent));
        Ok(vec![Subpath::from_segments(combined, true)?])
    }
}

/// Strokes one subpath, first splitting it into dash runs if `styles`
/// carries a dash pattern (spec.md §4.5).
pub fn stroke_subpath_dashed(
    subpath: &Subpath,
    styles: &LineStyles,
    flatten_options: &DiscretizationOptions,
) -> Result<Vec<Subpath>> {
    if !styles.has_dash() {
        return stroke_subpath(subpath, styles);
    }
    let mut out = Vec::new();
    for run in dash::dash_subpath(subpath, styles, flatten_options) {
        out.extend(stroke_subpath(&run, styles)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathkit_geom::line::Line;
    use pathkit_geom::math;
    use pathkit_path::{LineCap, LineJoin};

    fn two_segment_line() -> Subpath {
        let a = Segment::Line(Line::new(math::point(0.0, 0.0), math::point(10.0, 0.0)).unwrap());
        let b = Segment::Line(Line::new(math::point(10.0, 0.0), math::point(10.0, 10.0)).unwrap());
        Subpath::from_segments(vec![a, b], false).unwrap()
    }

    fn closed_square() -> Subpath {
        let p = [
            math::point(0.0, 0.0),
            math::point(10.0, 0.0),
            math::point(10.0, 10.0),
            math::point(0.0, 10.0),
        ];
        let segs = vec![
            Segment::Line(Line::new(p[0], p[1]).unwrap()),
            Segment::Line(Line::new(p[1], p[2]).unwrap()),
            Segment::Line(Line::new(p[2], p[3]).unwrap()),
            Segment::Line(Line::new(p[3], p[0]).unwrap()),
        ];
        Subpath::from_segments(segs, true).unwrap()
    }

    #[test]
    fn open_path_strokes_to_one_closed_subpath() {
        let mut styles = LineStyles::default();
        styles.line_width = 2.0;
        styles.line_cap = LineCap::Square;
        styles.line_join = LineJoin::Miter;
        let result = stroke_subpath(&two_segment_line(), &styles).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result[0].is_closed());
    }

    #[test]
    fn closed_path_strokes_to_two_closed_subpaths() {
        let mut styles = LineStyles::default();
        styles.line_width = 2.0;
        let result = stroke_subpath(&closed_square(), &styles).unwrap();
        assert_eq!(result.len(), 2);
        assert!(result[0].is_closed() && result[1].is_closed());
    }

    #[test]
    fn dashed_open_path_yields_multiple_subpaths() {
        let mut styles = LineStyles::default();
        styles.line_width = 1.0;
        styles.line_dash = vec![2.0, 2.0];
        let result = stroke_subpath_dashed(&two_segment_line(), &styles, &DiscretizationOptions::default()).unwrap();
        assert!(result.len() > 1);
    }
}
