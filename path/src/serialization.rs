//! The external JSON contract, spec.md §6: exact field names per segment
//! kind, independent of whatever derives `pathkit-geom` carries internally
//! behind its own `serialization` feature.

use pathkit_geom::arc::Arc;
use pathkit_geom::cubic_bezier::CubicBezierSegment;
use pathkit_geom::elliptical_arc::EllipticalArc;
use pathkit_geom::error::{PathKitError, Result};
use pathkit_geom::line::Line;
use pathkit_geom::math;
use pathkit_geom::quadratic_bezier::QuadraticBezierSegment;
use pathkit_geom::segment::Segment;
use serde_json::{json, Value};

use crate::shape::Shape;
use crate::subpath::Subpath;

fn num(v: &Value, field: &str) -> Result<f64> {
    v.get(field)
        .and_then(Value::as_f64)
        .ok_or_else(|| PathKitError::invalid_geometry(format!("missing or non-numeric field `{}`", field)))
}

fn boolean(v: &Value, field: &str) -> Result<bool> {
    v.get(field)
        .and_then(Value::as_bool)
        .ok_or_else(|| PathKitError::invalid_geometry(format!("missing or non-boolean field `{}`", field)))
}

pub fn segment_to_json(seg: &Segment) -> Value {
    match seg {
        Segment::Line(l) => json!({
            "type": "Line",
            "startX": l.start.x, "startY": l.start.y,
            "endX": l.end.x, "endY": l.end.y,
        }),
        Segment::Arc(a) => json!({
            "type": "Arc",
            "centerX": a.center.x, "centerY": a.center.y,
            "radius": a.radius,
            "startAngle": a.start_angle, "endAngle": a.end_angle,
            "anticlockwise": a.anticlockwise,
        }),
        Segment::EllipticalArc(e) => json!({
            "type": "EllipticalArc",
            "centerX": e.center.x, "centerY": e.center.y,
            "radiusX": e.radius_x, "radiusY": e.radius_y,
            "rotation": e.rotation,
            "startAngle": e.start_angle, "endAngle": e.end_angle,
            "anticlockwise": e.anticlockwise,
        }),
        Segment::Quadratic(q) => json!({
            "type": "Quadratic",
            "startX": q.start.x, "startY": q.start.y,
            "controlX": q.control.x, "controlY": q.control.y,
            "endX": q.end.x, "endY": q.end.y,
        }),
        Segment::Cubic(c) => json!({
            "type": "Cubic",
            "startX": c.start.x, "startY": c.start.y,
            "control1X": c.control1.x, "control1Y": c.control1.y,
            "control2X": c.control2.x, "control2Y": c.control2.y,
            "endX": c.end.x, "endY": c.end.y,
        }),
    }
}

pub fn segment_from_json(v: &Value) -> Result<Segment> {
    let kind = v
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| PathKitError::invalid_geometry("segment JSON missing `type`"))?;
    match kind {
        "Line" => Ok(Segment::Line(Line::new(
            math::point(num(v, "startX")?, num(v, "startY")?),
            math::point(num(v, "endX")?, num(v, "endY")?),
        )?)),
        "Arc" => Ok(Segment::Arc(Arc::new(
            math::point(num(v, "centerX")?, num(v, "centerY")?),
            num(v, "radius")?,
            num(v, "startAngle")?,
            num(v, "endAngle")?,
            boolean(v, "anticlockwise")?,
        )?)),
        "EllipticalArc" => Ok(Segment::EllipticalArc(EllipticalArc::new(
            math::point(num(v, "centerX")?, num(v, "centerY")?),
            num(v, "radiusX")?,
            num(v, "radiusY")?,
            num(v, "rotation")?,
            num(v, "startAngle")?,
            num(v, "endAngle")?,
            boolean(v, "anticlockwise")?,
        )?)),
        "Quadratic" => Ok(Segment::Quadratic(QuadraticBezierSegment::new(
            math::point(num(v, "startX")?, num(v, "startY")?),
            math::point(num(v, "controlX")?, num(v, "controlY")?),
            math::point(num(v, "endX")?, num(v, "endY")?),
        )?)),
        "Cubic" => Ok(Segment::Cubic(CubicBezierSegment::new(
            math::point(num(v, "startX")?, num(v, "startY")?),
            math::point(num(v, "control1X")?, num(v, "control1Y")?),
            math::point(num(v, "control2X")?, num(v, "control2Y")?),
            math::point(num(v, "endX")?, num(v, "endY")?),
        )?)),
        other => Err(PathKitError::invalid_geometry(format!("unknown segment type `{}`", other))),
    }
}

pub fn subpath_to_json(subpath: &Subpath) -> Value {
    let segments: Vec<Value> = subpath.segments().iter().map(segment_to_json).collect();
    let points: Vec<Value> = subpath.points().iter().map(|p| json!({"x": p.x, "y": p.y})).collect();
    json!({
        "type": "Subpath",
        "segments": segments,
        "points": points,
        "closed": subpath.is_closed(),
    })
}

pub fn subpath_from_json(v: &Value) -> Result<Subpath> {
    let segments = v
        .get("segments")
        .and_then(Value::as_array)
        .ok_or_else(|| PathKitError::invalid_geometry("Subpath JSON missing `segments`"))?
        .iter()
        .map(segment_from_json)
        .collect::<Result<Vec<_>>>()?;
    let closed = boolean(v, "closed").unwrap_or(false);
    Subpath::from_segments(segments, closed)
}

pub fn shape_to_json(shape: &Shape) -> Value {
    let subpaths: Vec<Value> = shape.subpaths().iter().map(subpath_to_json).collect();
    json!({ "type": "Shape", "subpaths": subpaths })
}

pub fn shape_from_json(v: &Value) -> Result<Shape> {
    let subpaths = v
        .get("subpaths")
        .and_then(Value::as_array)
        .ok_or_else(|| PathKitError::invalid_geometry("Shape JSON missing `subpaths`"))?
        .iter()
        .map(subpath_from_json)
        .collect::<Result<Vec<_>>>()?;
    Ok(Shape::from_subpaths(subpaths))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_round_trips_through_json() {
        let line = Segment::Line(Line::new(math::point(1.0, 2.0), math::point(3.0, 4.0)).unwrap());
        let json = segment_to_json(&line);
        assert_eq!(json["type"], "Line");
        let back = segment_from_json(&json).unwrap();
        assert_eq!(back, line);
    }

    #[test]
    fn arc_json_uses_exact_field_names() {
        let arc = Segment::Arc(Arc::new(math::point(0.0, 0.0), 5.0, 0.0, 1.0, false).unwrap());
        let json = segment_to_json(&arc);
        for field in ["centerX", "centerY", "radius", "startAngle", "endAngle", "anticlockwise"] {
            assert!(json.get(field).is_some(), "missing field {}", field);
        }
    }
}
