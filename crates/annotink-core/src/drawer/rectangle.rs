//! Rectangle drawer.

use super::{Drawer, DrawerOptions, DrawingMode};
use crate::shapes::{Rectangle, Shape};
use kurbo::Point;
use std::future::{Ready, ready};

/// Draws rectangles spanning from the pointer-down anchor to the pointer.
#[derive(Debug, Default)]
pub struct RectangleDrawer {
    anchor: Point,
}

impl Drawer for RectangleDrawer {
    fn mode(&self) -> DrawingMode {
        DrawingMode::Rectangle
    }

    fn make(
        &mut self,
        x: f64,
        y: f64,
        options: &DrawerOptions,
        width: Option<f64>,
        height: Option<f64>,
    ) -> Ready<Shape> {
        self.anchor = Point::new(x, y);
        let rect = Rectangle::new(self.anchor, width.unwrap_or(0.0), height.unwrap_or(0.0));
        let mut shape = Shape::Rectangle(rect);
        options.apply(&mut shape);
        ready(shape)
    }

    fn resize(&mut self, shape: &mut Shape, x: f64, y: f64) {
        match shape {
            Shape::Rectangle(rect) => rect.frame.span(self.anchor, Point::new(x, y)),
            other => log::debug!("Rectangle drawer cannot resize {:?}", other.id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Origin, OriginX, OriginY};

    fn frame_of(shape: &Shape) -> crate::shapes::Frame {
        match shape {
            Shape::Rectangle(r) => r.frame,
            _ => panic!("expected a rectangle"),
        }
    }

    #[test]
    fn test_drag_up_left_flips_origin() {
        let mut drawer = RectangleDrawer::default();
        let mut shape = drawer
            .make(100.0, 100.0, &DrawerOptions::default(), None, None)
            .into_inner();

        drawer.resize(&mut shape, 50.0, 50.0);

        let frame = frame_of(&shape);
        assert_eq!(frame.origin, Origin::new(OriginX::Right, OriginY::Bottom));
        assert!((frame.width - 50.0).abs() < f64::EPSILON);
        assert!((frame.height - 50.0).abs() < f64::EPSILON);
        assert_eq!(shape.bounds(), kurbo::Rect::new(50.0, 50.0, 100.0, 100.0));
    }

    #[test]
    fn test_drag_down_right_keeps_top_left() {
        let mut drawer = RectangleDrawer::default();
        let mut shape = drawer
            .make(100.0, 100.0, &DrawerOptions::default(), None, None)
            .into_inner();

        drawer.resize(&mut shape, 50.0, 50.0);
        drawer.resize(&mut shape, 150.0, 150.0);

        let frame = frame_of(&shape);
        assert_eq!(frame.origin, Origin::TOP_LEFT);
        assert!((frame.width - 50.0).abs() < f64::EPSILON);
        assert!((frame.height - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_size_hint() {
        let mut drawer = RectangleDrawer::default();
        let shape = drawer
            .make(0.0, 0.0, &DrawerOptions::default(), Some(30.0), Some(20.0))
            .into_inner();
        assert_eq!(shape.bounds(), kurbo::Rect::new(0.0, 0.0, 30.0, 20.0));
    }
}
