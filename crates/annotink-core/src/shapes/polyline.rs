//! Polyline shape (open path through a series of vertices).

use super::{InteractionFlags, ShapeId, ShapeStyle, ShapeTrait, point_to_polyline_dist};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An open path through a series of vertices.
///
/// The bounding box and path offset are stored alongside the vertices and
/// must be refreshed with [`Polyline::recalculate`] whenever the vertex list
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub(crate) id: ShapeId,
    /// Vertices in drawing order.
    pub points: Vec<Point>,
    /// Left edge of the bounding box.
    pub left: f64,
    /// Top edge of the bounding box.
    pub top: f64,
    /// Width of the bounding box.
    pub width: f64,
    /// Height of the bounding box.
    pub height: f64,
    /// Center of the bounding box; vertices are drawn relative to it.
    pub path_offset: Point,
    /// Style properties.
    pub style: ShapeStyle,
    /// Interaction flags.
    #[serde(default)]
    pub flags: InteractionFlags,
    /// Render cache needs rebuilding.
    #[serde(skip)]
    pub(crate) dirty: bool,
}

impl Polyline {
    /// Create a polyline through `points`.
    pub fn new(points: Vec<Point>) -> Self {
        let mut polyline = Self {
            id: Uuid::new_v4(),
            points,
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
            path_offset: Point::ZERO,
            style: ShapeStyle::default(),
            flags: InteractionFlags::default(),
            dirty: false,
        };
        polyline.recalculate();
        polyline
    }

    /// Append a vertex and refresh the derived dimensions.
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
        self.recalculate();
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the render cache must be rebuilt before the next frame.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Recompute bounding box and path offset from the full vertex list.
    pub fn recalculate(&mut self) {
        let bounds = vertex_bounds(&self.points);
        self.left = bounds.x0;
        self.top = bounds.y0;
        self.width = bounds.width();
        self.height = bounds.height();
        self.path_offset = bounds.center();
        self.dirty = true;
    }
}

fn vertex_bounds(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::ZERO;
    };
    points
        .iter()
        .skip(1)
        .fold(Rect::from_points(*first, *first), |acc, p| acc.union_pt(*p))
}

impl ShapeTrait for Polyline {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let reach = tolerance + self.style.stroke_width / 2.0;
        match self.points.as_slice() {
            [] => false,
            [only] => only.distance(point) <= reach,
            points => point_to_polyline_dist(point, points) <= reach,
        }
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn flags(&self) -> &InteractionFlags {
        &self.flags
    }

    fn flags_mut(&mut self) -> &mut InteractionFlags {
        &mut self.flags
    }

    fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
        self.recalculate();
    }

    fn is_degenerate(&self) -> bool {
        self.width.abs() < f64::EPSILON && self.height.abs() < f64::EPSILON
    }
}
