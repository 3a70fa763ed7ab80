//! Triangle drawer.

use super::{Drawer, DrawerOptions, DrawingMode};
use crate::shapes::{Shape, Triangle};
use kurbo::Point;
use std::future::{Ready, ready};

/// Draws triangles filling the box from the anchor to the pointer.
#[derive(Debug, Default)]
pub struct TriangleDrawer {
    anchor: Point,
}

impl Drawer for TriangleDrawer {
    fn mode(&self) -> DrawingMode {
        DrawingMode::Triangle
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
        let triangle = Triangle::new(self.anchor, width.unwrap_or(0.0), height.unwrap_or(0.0));
        let mut shape = Shape::Triangle(triangle);
        options.apply(&mut shape);
        ready(shape)
    }

    fn resize(&mut self, shape: &mut Shape, x: f64, y: f64) {
        match shape {
            Shape::Triangle(triangle) => triangle.frame.span(self.anchor, Point::new(x, y)),
            other => log::debug!("Triangle drawer cannot resize {:?}", other.id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Origin, OriginX, OriginY};

    #[test]
    fn test_origin_flip() {
        let mut drawer = TriangleDrawer::default();
        let mut shape = drawer
            .make(100.0, 100.0, &DrawerOptions::default(), None, None)
            .into_inner();

        drawer.resize(&mut shape, 50.0, 50.0);
        let Shape::Triangle(tri) = &shape else {
            panic!("expected a triangle");
        };
        assert_eq!(tri.frame.origin, Origin::new(OriginX::Right, OriginY::Bottom));
        assert!((tri.frame.width - 50.0).abs() < f64::EPSILON);
        assert!((tri.frame.height - 50.0).abs() < f64::EPSILON);

        drawer.resize(&mut shape, 150.0, 150.0);
        let Shape::Triangle(tri) = &shape else {
            panic!("expected a triangle");
        };
        assert_eq!(tri.frame.origin, Origin::TOP_LEFT);
        assert!((tri.frame.width - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wrong_shape_is_left_alone() {
        let mut drawer = TriangleDrawer::default();
        let mut line = Shape::Line(crate::shapes::Line::new(Point::ZERO, Point::new(5.0, 5.0)));
        let before = line.clone();
        drawer.resize(&mut line, 100.0, 100.0);
        assert_eq!(line, before);
    }
}
