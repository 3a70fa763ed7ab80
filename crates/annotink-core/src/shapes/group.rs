//! Group shape for carrying several shapes as one unit.

use super::{InteractionFlags, Shape, ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A group of shapes that can be manipulated as a single unit.
///
/// Children keep absolute logical coordinates, so dissolving the group
/// never moves them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub(crate) id: ShapeId,
    /// Child shapes in z-order.
    pub children: Vec<Shape>,
    /// Style properties (not directly used, but kept for consistency).
    style: ShapeStyle,
    /// Interaction flags.
    #[serde(default)]
    flags: InteractionFlags,
}

impl Group {
    /// Create a new group from a list of shapes.
    pub fn new(children: Vec<Shape>) -> Self {
        Self {
            id: Uuid::new_v4(),
            children,
            style: ShapeStyle::default(),
            flags: InteractionFlags::default(),
        }
    }

    /// Get the children of this group.
    pub fn children(&self) -> &[Shape] {
        &self.children
    }

    /// Dissolve this group and return its children.
    pub fn ungroup(self) -> Vec<Shape> {
        self.children
    }
}

impl ShapeTrait for Group {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let mut children = self.children.iter();
        let Some(first) = children.next() else {
            return Rect::ZERO;
        };
        children.fold(first.bounds(), |acc, child| acc.union(child.bounds()))
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.children
            .iter()
            .any(|child| child.hit_test(point, tolerance))
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
        for child in &mut self.children {
            child.translate(delta);
        }
    }

    fn is_degenerate(&self) -> bool {
        self.children.iter().all(Shape::is_degenerate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Line, Rectangle};

    #[test]
    fn test_group_bounds() {
        let rect1 = Rectangle::new(Point::new(0.0, 0.0), 100.0, 50.0);
        let rect2 = Rectangle::new(Point::new(200.0, 200.0), 50.0, 100.0);

        let group = Group::new(vec![Shape::Rectangle(rect1), Shape::Rectangle(rect2)]);
        let bounds = group.bounds();

        assert!((bounds.x0 - 0.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 0.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 250.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_translate_moves_every_child() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let rect = Rectangle::new(Point::new(20.0, 20.0), 10.0, 10.0);
        let mut group = Group::new(vec![Shape::Line(line), Shape::Rectangle(rect)]);

        group.translate(Vec2::new(15.0, 15.0));

        assert_eq!(group.bounds(), Rect::new(15.0, 15.0, 45.0, 45.0));
    }

    #[test]
    fn test_empty_group_is_degenerate() {
        assert!(Group::new(Vec::new()).is_degenerate());
    }
}
