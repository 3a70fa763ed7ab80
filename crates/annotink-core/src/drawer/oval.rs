//! Oval drawer.

use super::{Drawer, DrawerOptions, DrawingMode};
use crate::shapes::{Oval, Shape};
use kurbo::Point;
use std::future::{Ready, ready};

/// Draws ovals inscribed in the box from the anchor to the pointer.
#[derive(Debug, Default)]
pub struct OvalDrawer {
    anchor: Point,
}

impl Drawer for OvalDrawer {
    fn mode(&self) -> DrawingMode {
        DrawingMode::Oval
    }

    fn make(
        &mut self,
        x: f64,
        y: f64,
        options: &DrawerOptions,
        rx: Option<f64>,
        ry: Option<f64>,
    ) -> Ready<Shape> {
        self.anchor = Point::new(x, y);
        let width = rx.map_or(0.0, |r| r * 2.0);
        let height = ry.map_or(0.0, |r| r * 2.0);
        let mut shape = Shape::Oval(Oval::new(self.anchor, width, height));
        options.apply(&mut shape);
        ready(shape)
    }

    fn resize(&mut self, shape: &mut Shape, x: f64, y: f64) {
        match shape {
            Shape::Oval(oval) => oval.frame.span(self.anchor, Point::new(x, y)),
            other => log::debug!("Oval drawer cannot resize {:?}", other.id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Origin, OriginX, OriginY};

    #[test]
    fn test_origin_flip_and_radii() {
        let mut drawer = OvalDrawer::default();
        let mut shape = drawer
            .make(100.0, 100.0, &DrawerOptions::default(), None, None)
            .into_inner();

        drawer.resize(&mut shape, 50.0, 50.0);
        let Shape::Oval(oval) = &shape else {
            panic!("expected an oval");
        };
        assert_eq!(oval.frame.origin, Origin::new(OriginX::Right, OriginY::Bottom));
        assert!((oval.frame.width - 50.0).abs() < f64::EPSILON);
        assert!((oval.radius_y() - 25.0).abs() < f64::EPSILON);

        drawer.resize(&mut shape, 150.0, 150.0);
        let Shape::Oval(oval) = &shape else {
            panic!("expected an oval");
        };
        assert_eq!(oval.frame.origin, Origin::TOP_LEFT);
        assert!((oval.frame.height - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_radius_hint() {
        let mut drawer = OvalDrawer::default();
        let shape = drawer
            .make(0.0, 0.0, &DrawerOptions::default(), Some(10.0), Some(5.0))
            .into_inner();
        assert_eq!(shape.bounds(), kurbo::Rect::new(0.0, 0.0, 20.0, 10.0));
    }
}
