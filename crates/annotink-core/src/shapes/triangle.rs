//! Triangle shape.

use super::{Frame, InteractionFlags, ShapeId, ShapeStyle, ShapeTrait, point_to_polyline_dist};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An isosceles triangle with its apex at the top-center of its frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub(crate) id: ShapeId,
    /// Bounding box of the triangle.
    pub frame: Frame,
    /// Style properties.
    pub style: ShapeStyle,
    /// Interaction flags.
    #[serde(default)]
    pub flags: InteractionFlags,
}

impl Triangle {
    /// Create a triangle whose bounding box starts at `position`.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            frame: Frame::new(position, width, height),
            style: ShapeStyle::default(),
            flags: InteractionFlags::default(),
        }
    }

    /// Apex, bottom-right and bottom-left corners.
    pub fn vertices(&self) -> [Point; 3] {
        let rect = self.frame.as_rect();
        [
            Point::new(rect.center().x, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        ]
    }
}

fn sign(p: Point, a: Point, b: Point) -> f64 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}

impl ShapeTrait for Triangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.frame.as_rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let [a, b, c] = self.vertices();
        let reach = tolerance + self.style.stroke_width / 2.0;
        if point_to_polyline_dist(point, &[a, b, c, a]) <= reach {
            return true;
        }
        if self.style.fill_color.is_none() {
            return false;
        }
        let d1 = sign(point, a, b);
        let d2 = sign(point, b, c);
        let d3 = sign(point, c, a);
        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        !(has_neg && has_pos)
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
