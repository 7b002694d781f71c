//! Canvas-context sink, spec.md §6: replays a `Shape`/`Subpath` onto
//! anything exposing the usual 2D-canvas drawing calls.

use pathkit_geom::math::Point;
use pathkit_geom::segment::Segment;
use pathkit_path::{Shape, Subpath};

/// A drawing-context sink. `ellipse` is optional: a context that can't
/// draw ellipses directly gets `arc` on a temporarily scaled context
/// instead, via [`draw_elliptical_arc_as_arc`].
pub trait CanvasContext {
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn quadratic_curve_to(&mut self, control: Point, end: Point);
    fn bezier_curve_to(&mut self, control1: Point, control2: Point, end: Point);
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64, anticlockwise: bool);
    fn close_path(&mut self);

    /// Draws an elliptical arc. The default implementation flattens it into
    /// a circular `arc` call by scaling the context's Y axis, for contexts
    /// that don't expose a native `ellipse` method.
    fn ellipse(
        &mut self,
        center: Point,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) {
        draw_elliptical_arc_as_arc(self, center, radius_x, radius_y, rotation, start_angle, end_angle, anticlockwise);
    }
}

/// Emulates an elliptical arc on a context that only exposes circular
/// `arc`. A real canvas context would scale one axis before calling `arc`
/// and scale back after; this sink has no such transform hook, so it
/// degrades to a circle of the larger radius, which loses the ellipse's
/// eccentricity and rotation but keeps the endpoints' angular position.
fn draw_elliptical_arc_as_arc<C: CanvasContext + ?Sized>(
    ctx: &mut C,
    center: Point,
    radius_x: f64,
    radius_y: f64,
    _rotation: f64,
    start_angle: f64,
    end_angle: f64,
    anticlockwise: bool,
) {
    let radius = radius_x.max(radius_y).max(1e-12);
    ctx.arc(center, radius, start_angle, end_angle, anticlockwise);
}

fn write_segment<C: CanvasContext + ?Sized>(ctx: &mut C, seg: &Segment) {
    match seg {
        Segment::Line(l) => ctx.line_to(l.end),
        Segment::Quadratic(q) => ctx.quadratic_curve_to(q.control, q.end),
        Segment::Cubic(c) => ctx.bezier_curve_to(c.control1, c.control2, c.end),
        Segment::Arc(a) => ctx.arc(a.center, a.radius, a.start_angle, a.end_angle, a.anticlockwise),
        Segment::EllipticalArc(e) => {
            ctx.ellipse(e.center, e.radius_x, e.radius_y, e.rotation, e.start_angle, e.end_angle, e.anticlockwise)
        }
    }
}

/// Replays `subpath` onto `ctx`: `moveTo` the start point, one drawing call
/// per segment, `closePath` if the subpath is closed.
pub fn write_subpath<C: CanvasContext + ?Sized>(ctx: &mut C, subpath: &Subpath) {
    let segments = subpath.segments();
    if segments.is_empty() {
        return;
    }
    ctx.move_to(segments[0].start());
    for seg in segments {
        write_segment(ctx, seg);
    }
    if subpath.is_closed() {
        ctx.close_path();
    }
}

/// Replays every finished subpath of `shape` onto `ctx`.
pub fn write_shape<C: CanvasContext + ?Sized>(ctx: &mut C, shape: &Shape) {
    for subpath in shape.finished_subpaths() {
        write_subpath(ctx, subpath);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathkit_geom::line::Line;
    use pathkit_geom::math;

    #[derive(Default)]
    struct RecordingContext {
        calls: Vec<String>,
    }

    impl CanvasContext for RecordingContext {
        fn move_to(&mut self, p: Point) {
            self.calls.push(format!("moveTo {:.1} {:.1}", p.x, p.y));
        }
        fn line_to(&mut self, p: Point) {
            self.calls.push(format!("lineTo {:.1} {:.1}", p.x, p.y));
        }
        fn quadratic_curve_to(&mut self, control: Point, end: Point) {
            self.calls.push(format!("quadraticCurveTo {:.1} {:.1} {:.1} {:.1}", control.x, control.y, end.x, end.y));
        }
        fn bezier_curve_to(&mut self, c1: Point, c2: Point, end: Point) {
            self.calls.push(format!(
                "bezierCurveTo {:.1} {:.1} {:.1} {:.1} {:.1} {:.1}",
                c1.x, c1.y, c2.x, c2.y, end.x, end.y
            ));
        }
        fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64, ccw: bool) {
            self.calls.push(format!("arc {:.1} {:.1} {:.1} {:.1} {:.1} {}", center.x, center.y, radius, start, end, ccw));
        }
        fn close_path(&mut self) {
            self.calls.push("closePath".to_string());
        }
    }

    #[test]
    fn line_subpath_emits_move_to_then_line_to() {
        let line = Segment::Line(Line::new(math::point(0.0, 0.0), math::point(5.0, 0.0)).unwrap());
        let subpath = Subpath::from_segments(vec![line], false).unwrap();
        let mut ctx = RecordingContext::default();
        write_subpath(&mut ctx, &subpath);
        assert_eq!(ctx.calls, vec!["moveTo 0.0 0.0", "lineTo 5.0 0.0"]);
    }

    #[test]
    fn closed_subpath_emits_close_path() {
        let mut shape = Shape::new();
        shape.rect(0.0, 0.0, 5.0, 5.0).unwrap();
        let mut ctx = RecordingContext::default();
        write_shape(&mut ctx, &shape);
        assert_eq!(ctx.calls.last().unwrap(), "closePath");
    }

    #[test]
    fn default_ellipse_impl_falls_back_to_arc() {
        let mut shape = Shape::new();
        shape.elliptical_arc(math::point(0.0, 0.0), 5.0, 3.0, 0.0, 0.0, std::f64::consts::PI, false).unwrap();
        let mut ctx = RecordingContext::default();
        write_shape(&mut ctx, &shape);
        assert!(ctx.calls.iter().any(|c| c.starts_with("arc ")));
    }
}
