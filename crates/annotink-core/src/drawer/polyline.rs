//! Polyline drawer.

use super::{Drawer, DrawerOptions, DrawingMode};
use crate::shapes::{Polyline, Shape};
use kurbo::Point;
use std::future::{Ready, ready};

/// Traces the pointer path: every move appends a vertex.
#[derive(Debug, Default)]
pub struct PolylineDrawer;

impl Drawer for PolylineDrawer {
    fn mode(&self) -> DrawingMode {
        DrawingMode::Polyline
    }

    fn make(
        &mut self,
        x: f64,
        y: f64,
        options: &DrawerOptions,
        _x2: Option<f64>,
        _y2: Option<f64>,
    ) -> Ready<Shape> {
        let mut shape = Shape::Polyline(Polyline::new(vec![Point::new(x, y)]));
        options.apply(&mut shape);
        ready(shape)
    }

    fn resize(&mut self, shape: &mut Shape, x: f64, y: f64) {
        match shape {
            Shape::Polyline(polyline) => polyline.push(Point::new(x, y)),
            other => log::debug!("Polyline drawer cannot resize {:?}", other.id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_resize_appends_a_vertex() {
        let mut drawer = PolylineDrawer;
        let mut shape = Shape::Polyline(Polyline::new(Vec::new()));

        drawer.resize(&mut shape, 0.0, 0.0);
        drawer.resize(&mut shape, 10.0, 0.0);
        drawer.resize(&mut shape, 10.0, 10.0);

        let Shape::Polyline(polyline) = &shape else {
            panic!("expected a polyline");
        };
        assert_eq!(polyline.len(), 3);
        assert!((polyline.width - 10.0).abs() < f64::EPSILON);
        assert!((polyline.height - 10.0).abs() < f64::EPSILON);
        assert_eq!(polyline.path_offset, Point::new(5.0, 5.0));
    }

    #[test]
    fn test_make_starts_at_anchor() {
        let mut drawer = PolylineDrawer;
        let mut shape = drawer
            .make(0.0, 0.0, &DrawerOptions::default(), None, None)
            .into_inner();
        drawer.resize(&mut shape, 10.0, 0.0);
        drawer.resize(&mut shape, 10.0, 10.0);

        let Shape::Polyline(polyline) = &shape else {
            panic!("expected a polyline");
        };
        assert_eq!(polyline.points[0], Point::new(0.0, 0.0));
        assert_eq!(polyline.len(), 3);
        assert_eq!(shape.bounds(), kurbo::Rect::new(0.0, 0.0, 10.0, 10.0));
    }
}
