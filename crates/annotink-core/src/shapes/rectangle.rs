//! Rectangle shape.

use super::{Frame, InteractionFlags, ShapeId, ShapeRole, ShapeStyle, ShapeTrait};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle.
///
/// Also used, with [`ShapeRole::Workspace`], as the marker of the logical
/// drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Box geometry.
    pub frame: Frame,
    /// Style properties.
    pub style: ShapeStyle,
    /// Interaction flags.
    #[serde(default)]
    pub flags: InteractionFlags,
    /// Role on the canvas.
    #[serde(default)]
    pub role: ShapeRole,
}

impl Rectangle {
    /// Create a new rectangle anchored at its top-left corner.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            frame: Frame::new(position, width, height),
            style: ShapeStyle::default(),
            flags: InteractionFlags::default(),
            role: ShapeRole::Drawing,
        }
    }

    /// Create the white, locked marker of a logical drawing surface.
    pub fn workspace_marker(width: f64, height: f64) -> Self {
        let mut marker = Self::new(Point::ZERO, width, height);
        marker.style.fill_color = Some(super::SerializableColor::white());
        marker.style.stroke_width = 0.0;
        marker.flags = InteractionFlags::locked();
        marker.role = ShapeRole::Workspace;
        marker
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        self.frame.as_rect()
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let rect = self.as_rect();
        if self.style.fill_color.is_some() {
            rect.inflate(tolerance, tolerance).contains(point)
        } else {
            // Outline only: hit on the border
            let reach = tolerance + self.style.stroke_width / 2.0;
            let outer = rect.inflate(reach, reach);
            let inner = rect.inflate(-reach, -reach);
            outer.contains(point) && !inner.contains(point)
        }
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
