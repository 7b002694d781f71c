//! Dash expansion, spec.md §4.5: cuts a subpath into on/off runs driven by
//! arc length, `lineDash` and `lineDashOffset`.
//!
//! Runs are rebuilt as polylines over the flattened path rather than by
//! re-subdividing each original segment symbolically; curvature within a
//! single dash is lost at the flattening tolerance, which is an acceptable
//! trade for a stroker that otherwise works entirely in closed form.

use pathkit_geom::line::Line;
use pathkit_geom::math::{self, Point};
use pathkit_geom::segment::Segment;
use pathkit_path::{LineStyles, Subpath};

fn polyline_to_subpath(points: &[Point]) -> Option<Subpath> {
    if points.len() < 2 {
        return None;
    }
    let mut segments = Vec::with_capacity(points.len() - 1);
    for w in points.windows(2) {
        if let Ok(line) = Line::new(w[0], w[1]) {
            segments.push(Segment::Line(line));
        }
    }
    if segments.is_empty() {
        return None;
    }
    Subpath::from_segments(segments, false).ok()
}

/// Splits `subpath` into the "on" runs of its dash pattern. Returns a
/// single clone of `subpath` unchanged if `styles` carries no dash.
pub fn dash_subpath(
    subpath: &Subpath,
    styles: &LineStyles,
    options: &pathkit_geom::flatten::DiscretizationOptions,
) -> Vec<Subpath> {
    if !styles.has_dash() {
        return vec![subpath.clone()];
    }
    let pattern = &styles.line_dash;
    let total: f64 = pattern.iter().sum();
    if total <= 0.0 {
        return vec![subpath.clone()];
    }

    let mut points = subpath.flattened(options);
    if let Some(closing) = subpath.implicit_closing_line() {
        points.push(closing.end);
    }
    if points.len() < 2 {
        return Vec::new();
    }

    let mut offset = styles.line_dash_offset % total;
    if offset < 0.0 {
        offset += total;
    }
    let mut idx = 0usize;
    let mut remaining = offset;
    while remaining >= pattern[idx] {
        remaining -= pattern[idx];
        idx = (idx + 1) % pattern.len();
    }
    let mut on = idx % 2 == 0;
    let mut dash_left = pattern[idx] - remaining;

    let mut runs: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = if on { vec![points[0]] } else { Vec::new() };

    let mut prev = points[0];
    for &p in &points[1..] {
        let mut seg_start = prev;
        let mut seg_len = (p - seg_start).length();
        while seg_len > 1e-12 {
            if dash_left >= seg_len {
                dash_left -= seg_len;
                if on {
                    current.push(p);
                }
                seg_len = 0.0;
            } else {
                let t = dash_left / seg_len;
                let split = math::blend(seg_start, p, t);
                if on {
                    current.push(split);
                    runs.push(std::mem::take(&mut current));
                } else {
                    current = vec![split];
                }
                seg_len -= dash_left;
                seg_start = split;
                idx = (idx + 1) % pattern.len();
                dash_left = pattern[idx];
                on = !on;
            }
        }
        prev = p;
    }
    if on && current.len() > 1 {
        runs.push(current);
    }

    runs.iter().filter_map(|pts| polyline_to_subpath(pts)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathkit_geom::flatten::DiscretizationOptions;

    fn straight_line(len: f64) -> Subpath {
        let line = Line::new(math::point(0.0, 0.0), math::point(len, 0.0)).unwrap();
        Subpath::from_segments(vec![Segment::Line(line)], false).unwrap()
    }

    #[test]
    fn no_dash_returns_the_subpath_unchanged() {
        let subpath = straight_line(10.0);
        let styles = LineStyles::default();
        let runs = dash_subpath(&subpath, &styles, &DiscretizationOptions::default());
        assert_eq!(runs.len(), 1);
    }

    #[test]
    fn even_dash_pattern_splits_into_runs() {
        let subpath = straight_line(10.0);
        let mut styles = LineStyles::default();
        styles.line_dash = vec![2.0, 2.0];
        let runs = dash_subpath(&subpath, &styles, &DiscretizationOptions::default());
        assert_eq!(runs.len(), 3);
    }

    #[test]
    fn dash_offset_shifts_the_first_run() {
        let subpath = straight_line(10.0);
        let mut styles = LineStyles::default();
        styles.line_dash = vec![2.0, 2.0];
        styles.line_dash_offset = 1.0;
        let runs = dash_subpath(&subpath, &styles, &DiscretizationOptions::default());
        assert!(!runs.is_empty());
    }
}
