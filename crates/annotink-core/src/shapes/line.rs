//! Line shape.

use super::{InteractionFlags, ShapeId, ShapeStyle, ShapeTrait, point_to_segment_dist};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight line segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ShapeId,
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
    /// Interaction flags.
    #[serde(default)]
    pub flags: InteractionFlags,
}

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style: ShapeStyle::default(),
            flags: InteractionFlags::default(),
        }
    }

    /// Get the length of the line.
    pub fn length(&self) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_segment_dist(point, self.start, self.end)
            <= tolerance + self.style.stroke_width / 2.0
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
        self.start += delta;
        self.end += delta;
    }

    fn is_degenerate(&self) -> bool {
        self.length() < f64::EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_length() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!((line.length() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_horizontal_line_is_not_degenerate() {
        let line = Line::new(Point::new(0.0, 10.0), Point::new(50.0, 10.0));
        assert!(!line.is_degenerate());
        assert!(Line::new(Point::new(1.0, 1.0), Point::new(1.0, 1.0)).is_degenerate());
    }

    #[test]
    fn test_bounds_any_direction() {
        let line = Line::new(Point::new(50.0, 40.0), Point::new(10.0, 80.0));
        assert_eq!(line.bounds(), Rect::new(10.0, 40.0, 50.0, 80.0));
    }
}
