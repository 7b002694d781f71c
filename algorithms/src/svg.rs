//! SVG path emission, spec.md §6: `M`/`L`/`Q`/`C`/`A` command sequences with
//! a fixed-point decimal formatter that never falls back to scientific
//! notation.

use pathkit_geom::math::{self, Point};
use pathkit_geom::segment::Segment;
use pathkit_path::{Shape, Subpath};
use std::fmt::Write as _;

const FRACTIONAL_DIGITS: usize = 20;

/// Formats `value` as fixed-point with exactly [`FRACTIONAL_DIGITS`] digits
/// after the decimal point. `{:.*}` never emits scientific notation for
/// finite `f64` values, which is the property SVG parsers need.
fn fmt_number(value: f64) -> String {
    format!("{:.*}", FRACTIONAL_DIGITS, value)
}

fn push_xy(out: &mut String, cmd: char, p: Point) {
    let _ = write!(out, "{} {} {} ", cmd, fmt_number(p.x), fmt_number(p.y));
}

/// Emits one or two `A` commands for `center`/`radius`/angles, splitting a
/// full circle at its antipodal point since a single SVG arc command can't
/// describe one.
fn push_arc(
    out: &mut String,
    radius_x: f64,
    radius_y: f64,
    rotation_deg: f64,
    start_angle: f64,
    end_angle: f64,
    anticlockwise: bool,
    center: Point,
    start: Point,
    end: Point,
) {
    let sweep = if anticlockwise { start_angle - end_angle } else { end_angle - start_angle };
    let sweep = sweep.rem_euclid(std::f64::consts::TAU);
    let is_full_circle = sweep.abs() < 1e-9 || (std::f64::consts::TAU - sweep).abs() < 1e-9;

    let sweep_flag = if anticlockwise { 0 } else { 1 };

    if is_full_circle {
        let mid_angle = if anticlockwise {
            start_angle - std::f64::consts::PI
        } else {
            start_angle + std::f64::consts::PI
        };
        let mid = math::point(
            center.x + radius_x * mid_angle.cos(),
            center.y + radius_y * mid_angle.sin(),
        );
        let _ = write!(
            out,
            "A {} {} {} 0 {} {} {} ",
            fmt_number(radius_x),
            fmt_number(radius_y),
            fmt_number(rotation_deg),
            sweep_flag,
            fmt_number(mid.x),
            fmt_number(mid.y)
        );
        let _ = write!(
            out,
            "A {} {} {} 0 {} {} {} ",
            fmt_number(radius_x),
            fmt_number(radius_y),
            fmt_number(rotation_deg),
            sweep_flag,
            fmt_number(end.x),
            fmt_number(end.y)
        );
        return;
    }

    let large_arc_flag = if sweep > std::f64::consts::PI { 1 } else { 0 };
    let _ = write!(
        out,
        "A {} {} {} {} {} {} {} ",
        fmt_number(radius_x),
        fmt_number(radius_y),
        fmt_number(rotation_deg),
        large_arc_flag,
        sweep_flag,
        fmt_number(end.x),
        fmt_number(end.y)
    );
}

fn push_segment(out: &mut String, seg: &Segment) {
    match seg {
        Segment::Line(l) => push_xy(out, 'L', l.end),
        Segment::Quadratic(q) => {
            let _ = write!(
                out,
                "Q {} {} {} {} ",
                fmt_number(q.control.x),
                fmt_number(q.control.y),
                fmt_number(q.end.x),
                fmt_number(q.end.y)
            );
        }
        Segment::Cubic(c) => {
            let _ = write!(
                out,
                "C {} {} {} {} {} {} ",
                fmt_number(c.control1.x),
                fmt_number(c.control1.y),
                fmt_number(c.control2.x),
                fmt_number(c.control2.y),
                fmt_number(c.end.x),
                fmt_number(c.end.y)
            );
        }
        Segment::Arc(a) => push_arc(
            out,
            a.radius,
            a.radius,
            0.0,
            a.start_angle,
            a.end_angle,
            a.anticlockwise,
            a.center,
            a.position(0.0),
            a.position(1.0),
        ),
        Segment::EllipticalArc(e) => push_arc(
            out,
            e.radius_x,
            e.radius_y,
            e.rotation.to_degrees(),
            e.start_angle,
            e.end_angle,
            e.anticlockwise,
            e.center,
            e.position(0.0),
            e.position(1.0),
        ),
    }
}

/// Renders one subpath's `M ... Z?` command sequence.
pub fn subpath_to_svg_path(subpath: &Subpath) -> String {
    let mut out = String::new();
    let segments = subpath.segments();
    if segments.is_empty() {
        return out;
    }
    push_xy(&mut out, 'M', segments[0].start());
    for seg in segments {
        push_segment(&mut out, seg);
    }
    if subpath.is_closed() {
        out.push('Z');
    } else {
        out.pop();
    }
    out
}

/// Renders every finished subpath of `shape`, concatenated with spaces.
pub fn shape_to_svg_path(shape: &Shape) -> String {
    shape
        .finished_subpaths()
        .into_iter()
        .map(subpath_to_svg_path)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathkit_geom::arc::Arc;
    use pathkit_geom::line::Line;
    use pathkit_geom::math;

    #[test]
    fn decimal_formatter_never_uses_scientific_notation() {
        let s = fmt_number(1.0e-30);
        assert!(!s.contains('e') && !s.contains('E'));
        assert_eq!(s.matches('.').count(), 1);
        assert_eq!(s.split('.').nth(1).unwrap().len(), FRACTIONAL_DIGITS);
    }

    #[test]
    fn line_subpath_emits_move_and_line() {
        let line = Segment::Line(Line::new(math::point(0.0, 0.0), math::point(10.0, 0.0)).unwrap());
        let subpath = Subpath::from_segments(vec![line], false).unwrap();
        let svg = subpath_to_svg_path(&subpath);
        assert!(svg.starts_with("M "));
        assert!(svg.contains("L "));
        assert!(!svg.ends_with('Z'));
    }

    #[test]
    fn closed_subpath_ends_with_z() {
        let mut shape = Shape::new();
        shape.rect(0.0, 0.0, 5.0, 5.0).unwrap();
        let svg = shape_to_svg_path(&shape);
        assert!(svg.trim_end().ends_with('Z'));
    }

    #[test]
    fn full_circle_arc_emits_two_a_commands() {
        let arc = Segment::Arc(Arc::new(math::point(0.0, 0.0), 5.0, 0.0, std::f64::consts::TAU, false).unwrap());
        let subpath = Subpath::from_segments(vec![arc], true).unwrap();
        let svg = subpath_to_svg_path(&subpath);
        assert_eq!(svg.matches('A').count(), 2);
    }
}
