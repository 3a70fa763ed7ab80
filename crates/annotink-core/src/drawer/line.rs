//! Line drawer.

use super::{Drawer, DrawerOptions, DrawingMode};
use crate::shapes::{Line, Shape};
use kurbo::Point;
use std::future::{Ready, ready};

/// Draws straight lines from the anchor to the pointer.
#[derive(Debug, Default)]
pub struct LineDrawer;

impl Drawer for LineDrawer {
    fn mode(&self) -> DrawingMode {
        DrawingMode::Line
    }

    fn make(
        &mut self,
        x: f64,
        y: f64,
        options: &DrawerOptions,
        x2: Option<f64>,
        y2: Option<f64>,
    ) -> Ready<Shape> {
        let start = Point::new(x, y);
        let end = match (x2, y2) {
            (Some(x2), Some(y2)) => Point::new(x2, y2),
            _ => start,
        };
        let mut shape = Shape::Line(Line::new(start, end));
        options.apply(&mut shape);
        ready(shape)
    }

    fn resize(&mut self, shape: &mut Shape, x: f64, y: f64) {
        match shape {
            Shape::Line(line) => line.end = Point::new(x, y),
            other => log::debug!("Line drawer cannot resize {:?}", other.id()),
        }
    }
}
