//! `Shape`, spec.md §4.6: the fluent path builder, the unit of CAG.

use crate::subpath::Subpath;
use pathkit_geom::arc::Arc;
use pathkit_geom::cubic_bezier::CubicBezierSegment;
use pathkit_geom::elliptical_arc::EllipticalArc;
use pathkit_geom::error::{PathKitError, Result};
use pathkit_geom::flatten::{self, DiscretizationOptions};
use pathkit_geom::line::Line;
use pathkit_geom::math::{self, Bounds, Point, Transform};
use pathkit_geom::quadratic_bezier::QuadraticBezierSegment;
use pathkit_geom::ray::Ray;
use pathkit_geom::segment::Segment;
use std::cell::RefCell;
use std::f64::consts::PI;

/// An ordered collection of subpaths.
#[derive(Debug)]
pub struct Shape {
    subpaths: Vec<Subpath>,
    current_point: Option<Point>,
    bounds_cache: RefCell<Option<Bounds>>,
}

impl Clone for Shape {
    fn clone(&self) -> Self {
        Shape {
            subpaths: self.subpaths.clone(),
            current_point: self.current_point,
            bounds_cache: RefCell::new(*self.bounds_cache.borrow()),
        }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Shape::new()
    }
}

impl Shape {
    pub fn new() -> Self {
        Shape { subpaths: vec![Subpath::new()], current_point: None, bounds_cache: RefCell::new(None) }
    }

    pub fn from_subpaths(subpaths: Vec<Subpath>) -> Self {
        let mut subpaths = subpaths;
        if subpaths.is_empty() || !subpaths.last().unwrap().is_empty() {
            subpaths.push(Subpath::new());
        }
        Shape { subpaths, current_point: None, bounds_cache: RefCell::new(None) }
    }

    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }

    /// Finished subpaths only: drops the in-progress trailing one if it
    /// has no segments yet.
    pub fn finished_subpaths(&self) -> Vec<&Subpath> {
        self.subpaths.iter().filter(|s| !s.is_empty()).collect()
    }

    fn invalidate(&self) {
        *self.bounds_cache.borrow_mut() = None;
    }

    fn current_mut(&mut self) -> &mut Subpath {
        self.subpaths.last_mut().expect("Shape always has a trailing subpath")
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        if !self.current_mut().is_empty() {
            self.subpaths.push(Subpath::new());
        }
        self.current_point = Some(p);
        self.invalidate();
        self
    }

    fn require_current_point(&self) -> Result<Point> {
        self.current_point
            .ok_or_else(|| PathKitError::invalid_geometry("path operation requires a current point; call moveTo first"))
    }

    pub fn line_to(&mut self, p: Point) -> Result<&mut Self> {
        let start = self.require_current_point()?;
        let line = Line::new(start, p)?;
        self.current_mut().push_segment(Segment::Line(line));
        self.current_point = Some(p);
        self.invalidate();
        Ok(self)
    }

    pub fn quadratic_curve_to(&mut self, control: Point, p: Point) -> Result<&mut Self> {
        let start = self.require_current_point()?;
        let curve = QuadraticBezierSegment::new(start, control, p)?;
        self.current_mut().push_segment(Segment::Quadratic(curve));
        self.current_point = Some(p);
        self.invalidate();
        Ok(self)
    }

    pub fn cubic_curve_to(&mut self, control1: Point, control2: Point, p: Point) -> Result<&mut Self> {
        let start = self.require_current_point()?;
        let curve = CubicBezierSegment::new(start, control1, control2, p)?;
        self.current_mut().push_segment(Segment::Cubic(curve));
        self.current_point = Some(p);
        self.invalidate();
        Ok(self)
    }

    /// If there is a current point and it differs from the arc's own
    /// start point, emit a connecting `Line` first (spec.md §4.6).
    pub fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64, anticlockwise: bool) -> Result<&mut Self> {
        let segment = Arc::new(center, radius, start_angle, end_angle, anticlockwise)?;
        let arc_start = segment.position(0.0);
        self.connect_to(arc_start)?;
        let end = segment.position(1.0);
        self.current_mut().push_segment(Segment::Arc(segment));
        self.current_point = Some(end);
        self.invalidate();
        Ok(self)
    }

    pub fn elliptical_arc(
        &mut self,
        center: Point,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) -> Result<&mut Self> {
        let segment = EllipticalArc::new(center, radius_x, radius_y, rotation, start_angle, end_angle, anticlockwise)?;
        let arc_start = segment.position(0.0);
        self.connect_to(arc_start)?;
        let end = segment.position(1.0);
        self.current_mut().push_segment(Segment::EllipticalArc(segment));
        self.current_point = Some(end);
        self.invalidate();
        Ok(self)
    }

    fn connect_to(&mut self, target: Point) -> Result<()> {
        if let Some(current) = self.current_point {
            if (current - target).length() > pathkit_geom::epsilon::ENDPOINT_CONTINUITY {
                let line = Line::new(current, target)?;
                self.current_mut().push_segment(Segment::Line(line));
            }
        } else {
            self.current_point = Some(target);
        }
        Ok(())
    }

    /// Pushes a closed four-line subpath and starts a fresh, independent
    /// current subpath (spec.md §4.6).
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<&mut Self> {
        if !self.current_mut().is_empty() {
            self.subpaths.push(Subpath::new());
        }
        let p0 = math::point(x, y);
        let p1 = math::point(x + w, y);
        let p2 = math::point(x + w, y + h);
        let p3 = math::point(x, y + h);
        let segments = vec![
            Segment::Line(Line::new(p0, p1)?),
            Segment::Line(Line::new(p1, p2)?),
            Segment::Line(Line::new(p2, p3)?),
            Segment::Line(Line::new(p3, p0)?),
        ];
        let rect_subpath = Subpath::from_segments(segments, true)?;
        *self.current_mut() = rect_subpath;
        self.subpaths.push(Subpath::new());
        self.current_point = None;
        self.invalidate();
        Ok(self)
    }

    /// Appends the implicit closing line if non-degenerate, marks the
    /// current subpath closed, then starts a fresh subpath whose first
    /// point is the just-closed subpath's first point (spec.md §4.6).
    pub fn close(&mut self) -> Result<&mut Self> {
        if self.current_mut().is_empty() {
            return Ok(self);
        }
        let start = self.current_mut().start().unwrap();
        let end = self.current_mut().end().unwrap();
        if (start - end).length() > pathkit_geom::epsilon::ENDPOINT_CONTINUITY {
            let closing = Line::new(end, start)?;
            self.current_mut().push_segment(Segment::Line(closing));
        }
        self.current_mut().set_closed(true);
        self.subpaths.push(Subpath::new());
        self.current_point = Some(start);
        self.invalidate();
        Ok(self)
    }

    pub fn bounds(&self) -> Bounds {
        if let Some(b) = *self.bounds_cache.borrow() {
            return b;
        }
        let mut b = math::empty_bounds();
        for subpath in &self.subpaths {
            b = math::union_bounds(b, subpath.bounds());
        }
        *self.bounds_cache.borrow_mut() = Some(b);
        b
    }

    pub fn transformed(&self, m: &Transform) -> Shape {
        Shape {
            subpaths: self.subpaths.iter().map(|s| s.transformed(m)).collect(),
            current_point: self.current_point.map(|p| m.transform_point(p)),
            bounds_cache: RefCell::new(None),
        }
    }

    /// Σ subpath signed areas, spec.md §4.1.7's public shape-area entry point.
    pub fn area(&self) -> f64 {
        self.subpaths.iter().map(|s| s.signed_area()).sum::<f64>().abs()
    }

    fn edges_for_winding(&self) -> Vec<Segment> {
        let mut edges = Vec::new();
        for subpath in &self.subpaths {
            edges.extend_from_slice(subpath.segments());
            if let Some(closing) = subpath.implicit_closing_line() {
                edges.push(Segment::Line(closing));
            }
        }
        edges
    }

    fn ray_winding(&self, ray: &Ray, edges: &[Segment]) -> Option<i32> {
        let mut winding = 0;
        let flatten_options = DiscretizationOptions::default();
        for seg in edges {
            let hits = match seg {
                Segment::Quadratic(_) | Segment::Cubic(_) => {
                    let pts = flatten::flatten(seg, &flatten_options);
                    let mut hits = Vec::new();
                    for w in pts.windows(2) {
                        if let Ok(line) = Line::new(w[0], w[1]) {
                            if let Some(hit) = line.intersect_ray(ray) {
                                hits.push(hit);
                            }
                        }
                    }
                    hits
                }
                _ => seg.intersect_ray(ray),
            };
            for hit in hits {
                if hit.distance < 1e-5 {
                    return None;
                }
                let near_endpoint =
                    (hit.point - seg.start()).length() < 1e-5 || (hit.point - seg.end()).length() < 1e-5;
                if near_endpoint {
                    return None;
                }
                winding += hit.winding;
            }
        }
        Some(winding)
    }

    /// Non-zero winding rule, casting a ray from `p` and retrying with a
    /// fresh random direction (bounded) whenever it lands within 1e-5 of a
    /// segment endpoint or tangent (spec.md §4.6).
    pub fn contains_point(&self, p: Point) -> bool {
        const MAX_RETRIES: u32 = 8;
        let edges = self.edges_for_winding();
        let mut angle = 0.0_f64;
        for _ in 0..MAX_RETRIES {
            let direction = math::vector(angle.cos(), angle.sin());
            let ray = Ray::new(p, direction);
            if let Some(winding) = self.ray_winding(&ray, &edges) {
                return winding != 0;
            }
            angle = rand_angle();
        }
        log::warn!("containsPoint exhausted its retry budget on near-tangent rays; reporting outside");
        false
    }

    pub fn serialize(&self) -> String {
        crate::serialization::shape_to_json(self).to_string()
    }

    pub fn deserialize(json: &str) -> Result<Shape> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| PathKitError::invalid_geometry(format!("invalid Shape JSON: {}", e)))?;
        crate::serialization::shape_from_json(&value)
    }
}

fn rand_angle() -> f64 {
    use rand::Rng;
    rand::thread_rng().gen_range(0.0, 2.0 * PI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_a_closed_rectangle() {
        let mut shape = Shape::new();
        shape.move_to(math::point(0.0, 0.0));
        shape.line_to(math::point(10.0, 0.0)).unwrap();
        shape.line_to(math::point(10.0, 10.0)).unwrap();
        shape.line_to(math::point(0.0, 10.0)).unwrap();
        shape.close().unwrap();
        assert_eq!(shape.finished_subpaths().len(), 1);
        assert!((shape.area() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn rect_helper_matches_manual_build() {
        let mut shape = Shape::new();
        shape.rect(0.0, 0.0, 4.0, 5.0).unwrap();
        assert!((shape.area() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn contains_point_inside_rectangle() {
        let mut shape = Shape::new();
        shape.rect(0.0, 0.0, 10.0, 10.0).unwrap();
        assert!(shape.contains_point(math::point(5.0, 5.0)));
        assert!(!shape.contains_point(math::point(50.0, 50.0)));
    }

    #[test]
    fn serialize_round_trips() {
        let mut shape = Shape::new();
        shape.rect(0.0, 0.0, 3.0, 3.0).unwrap();
        let json = shape.serialize();
        let back = Shape::deserialize(&json).unwrap();
        assert!((back.area() - shape.area()).abs() < 1e-9);
    }
}
