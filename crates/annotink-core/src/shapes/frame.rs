//! Box geometry shared by rectangles, ovals and triangles.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Horizontal side of the box that `left` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OriginX {
    #[default]
    Left,
    Right,
}

/// Vertical side of the box that `top` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OriginY {
    #[default]
    Top,
    Bottom,
}

/// The corner of a box anchored at `(left, top)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Origin {
    pub x: OriginX,
    pub y: OriginY,
}

impl Origin {
    pub const TOP_LEFT: Origin = Origin {
        x: OriginX::Left,
        y: OriginY::Top,
    };

    pub fn new(x: OriginX, y: OriginY) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned box positioned relative to one of its corners.
///
/// `left`/`top` is the position of the corner named by `origin`, so a box
/// dragged up and to the left of its anchor keeps the anchor as its
/// bottom-right corner instead of moving `left`/`top` around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub origin: Origin,
}

impl Frame {
    /// Create a frame anchored at its top-left corner.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            left: position.x,
            top: position.y,
            width,
            height,
            origin: Origin::TOP_LEFT,
        }
    }

    /// The anchor corner position.
    pub fn position(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Get the frame as a kurbo Rect in logical coordinates.
    pub fn as_rect(&self) -> Rect {
        let x0 = match self.origin.x {
            OriginX::Left => self.left,
            OriginX::Right => self.left - self.width,
        };
        let y0 = match self.origin.y {
            OriginY::Top => self.top,
            OriginY::Bottom => self.top - self.height,
        };
        Rect::new(x0, y0, x0 + self.width, y0 + self.height)
    }

    /// Re-derive size and origin so the box spans from `anchor` to `current`.
    pub fn span(&mut self, anchor: Point, current: Point) {
        self.origin = Origin::new(
            if anchor.x > current.x {
                OriginX::Right
            } else {
                OriginX::Left
            },
            if anchor.y > current.y {
                OriginY::Bottom
            } else {
                OriginY::Top
            },
        );
        self.width = (anchor.x - current.x).abs();
        self.height = (anchor.y - current.y).abs();
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.left += delta.x;
        self.top += delta.y;
    }

    /// Zero area boxes cannot be seen or grabbed.
    pub fn is_degenerate(&self) -> bool {
        self.width.abs() < f64::EPSILON || self.height.abs() < f64::EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_for_each_origin() {
        let mut frame = Frame::new(Point::new(100.0, 100.0), 50.0, 20.0);
        assert_eq!(frame.as_rect(), Rect::new(100.0, 100.0, 150.0, 120.0));

        frame.origin = Origin::new(OriginX::Right, OriginY::Bottom);
        assert_eq!(frame.as_rect(), Rect::new(50.0, 80.0, 100.0, 100.0));
    }

    #[test]
    fn test_span_mixed_quadrant() {
        let mut frame = Frame::new(Point::new(100.0, 100.0), 0.0, 0.0);
        frame.span(Point::new(100.0, 100.0), Point::new(130.0, 60.0));

        assert_eq!(frame.origin, Origin::new(OriginX::Left, OriginY::Bottom));
        assert!((frame.width - 30.0).abs() < f64::EPSILON);
        assert!((frame.height - 40.0).abs() < f64::EPSILON);
        assert_eq!(frame.as_rect(), Rect::new(100.0, 60.0, 130.0, 100.0));
    }

    #[test]
    fn test_degenerate() {
        assert!(Frame::new(Point::ZERO, 0.0, 10.0).is_degenerate());
        assert!(Frame::new(Point::ZERO, 10.0, 0.0).is_degenerate());
        assert!(!Frame::new(Point::ZERO, 10.0, 10.0).is_degenerate());
    }
}
