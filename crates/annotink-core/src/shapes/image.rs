//! Image shape.

use super::{Frame, InteractionFlags, ShapeId, ShapeRole, ShapeStyle, ShapeTrait};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bitmap placed on the canvas.
///
/// Only the reference is stored; decoding and drawing the pixels is the
/// rendering engine's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub(crate) id: ShapeId,
    /// Opaque reference (URL, asset key) the rendering engine resolves.
    pub reference: String,
    /// Placement and natural size.
    pub frame: Frame,
    /// Style properties (unused for drawing, kept for consistency).
    pub style: ShapeStyle,
    /// Interaction flags.
    #[serde(default)]
    pub flags: InteractionFlags,
    /// Role on the canvas.
    #[serde(default)]
    pub role: ShapeRole,
}

impl Image {
    /// Create an image at `position` with its natural `size`.
    pub fn new(reference: impl Into<String>, position: Point, size: Size) -> Self {
        Self {
            id: Uuid::new_v4(),
            reference: reference.into(),
            frame: Frame::new(position, size.width, size.height),
            style: ShapeStyle::default(),
            flags: InteractionFlags::default(),
            role: ShapeRole::Drawing,
        }
    }

    /// Create the locked bitmap under an annotation workspace.
    pub fn background(reference: impl Into<String>, size: Size) -> Self {
        let mut image = Self::new(reference, Point::ZERO, size);
        image.flags = InteractionFlags::locked();
        image.role = ShapeRole::Background;
        image
    }
}

impl ShapeTrait for Image {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.frame.as_rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
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
