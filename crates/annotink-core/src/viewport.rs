//! Viewport module for the logical-to-pixel view transform.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// The view transform of the canvas element.
///
/// Maps logical coordinates to viewport pixels with a uniform zoom followed
/// by a translation, and optionally clips drawing to a logical rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Translation applied after scaling (pixels).
    pub offset: Vec2,
    /// Uniform scale factor.
    pub zoom: f64,
    /// Pixel size of the viewport element.
    pub size: Size,
    /// Logical region outside of which nothing is drawn.
    pub clip: Option<Rect>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            size: Size::ZERO,
            clip: None,
        }
    }
}

impl Viewport {
    /// Create an identity viewport of the given pixel size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts logical coordinates to viewport pixels.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Get the inverse transform for input handling.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a viewport pixel position to logical coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a logical point to viewport pixels.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Center of the viewport element, in pixels.
    pub fn center(&self) -> Point {
        Point::new(self.size.width / 2.0, self.size.height / 2.0)
    }

    /// Replace the whole transform.
    pub fn set_transform(&mut self, zoom: f64, offset: Vec2) {
        self.zoom = zoom;
        self.offset = offset;
    }

    /// Reset to the identity transform.
    pub fn reset_transform(&mut self) {
        self.set_transform(1.0, Vec2::ZERO);
    }

    /// Set the zoom to `zoom`, keeping the given pixel position fixed.
    pub fn zoom_to_point(&mut self, screen_point: Point, zoom: f64) {
        let world_point = self.screen_to_world(screen_point);
        self.zoom = zoom;

        // Adjust offset so world_point stays at screen_point
        let new_screen = self.world_to_screen(world_point);
        self.offset += Vec2::new(
            screen_point.x - new_screen.x,
            screen_point.y - new_screen.y,
        );
    }

    /// Multiply the zoom by `factor` around a pixel position, clamped to
    /// `[min_zoom, max_zoom]`.
    pub fn zoom_by(&mut self, screen_point: Point, factor: f64, min_zoom: f64, max_zoom: f64) {
        let new_zoom = (self.zoom * factor).clamp(min_zoom, max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }
        self.zoom_to_point(screen_point, new_zoom);
    }

    /// Pan the view by a delta in pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Restrict drawing to a logical rectangle.
    pub fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
    }
}
