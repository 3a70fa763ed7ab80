//! Oval (ellipse) shape.

use super::{Frame, InteractionFlags, ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ellipse inscribed in its frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Oval {
    pub(crate) id: ShapeId,
    /// Bounding box of the ellipse.
    pub frame: Frame,
    /// Style properties.
    pub style: ShapeStyle,
    /// Interaction flags.
    #[serde(default)]
    pub flags: InteractionFlags,
}

impl Oval {
    /// Create an oval whose bounding box starts at `position`.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            frame: Frame::new(position, width, height),
            style: ShapeStyle::default(),
            flags: InteractionFlags::default(),
        }
    }

    pub fn center(&self) -> Point {
        self.frame.as_rect().center()
    }

    pub fn radius_x(&self) -> f64 {
        self.frame.width / 2.0
    }

    pub fn radius_y(&self) -> f64 {
        self.frame.height / 2.0
    }
}

impl ShapeTrait for Oval {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.frame.as_rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let center = self.center();
        let reach = tolerance + self.style.stroke_width / 2.0;
        let outer_x = self.radius_x() + reach;
        let outer_y = self.radius_y() + reach;
        if outer_x <= 0.0 || outer_y <= 0.0 {
            return false;
        }
        let dx = point.x - center.x;
        let dy = point.y - center.y;
        let outer = (dx / outer_x).powi(2) + (dy / outer_y).powi(2);
        if outer > 1.0 {
            return false;
        }
        if self.style.fill_color.is_some() {
            return true;
        }
        let inner_x = self.radius_x() - reach;
        let inner_y = self.radius_y() - reach;
        if inner_x <= 0.0 || inner_y <= 0.0 {
            return true;
        }
        (dx / inner_x).powi(2) + (dy / inner_y).powi(2) >= 1.0
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
        self.frame.translate(delta);
    }

    fn is_degenerate(&self) -> bool {
        self.frame.is_degenerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radii_follow_frame() {
        let oval = Oval::new(Point::new(0.0, 0.0), 40.0, 20.0);
        assert!((oval.radius_x() - 20.0).abs() < f64::EPSILON);
        assert!((oval.radius_y() - 10.0).abs() < f64::EPSILON);
        assert_eq!(oval.center(), Point::new(20.0, 10.0));
    }

    #[test]
    fn test_hit_test_outline() {
        let oval = Oval::new(Point::new(0.0, 0.0), 100.0, 50.0);
        assert!(oval.hit_test(Point::new(0.0, 25.0), 1.0));
        assert!(!oval.hit_test(Point::new(50.0, 25.0), 1.0));
        assert!(!oval.hit_test(Point::new(2.0, 2.0), 1.0));
    }
}
