//! Shape-creation strategies, one per drawing mode.
//!
//! A [`Drawer`] creates a shape anchored at the pointer-down position and
//! then reshapes it on every pointer move until the gesture ends.

mod line;
mod oval;
mod polyline;
mod rectangle;
mod triangle;

pub use line::LineDrawer;
pub use oval::OvalDrawer;
pub use polyline::PolylineDrawer;
pub use rectangle::RectangleDrawer;
pub use triangle::TriangleDrawer;

use crate::shapes::{SerializableColor, Shape};
use serde::{Deserialize, Serialize};
use std::future::Ready;

/// Kinds of shape the user can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawingMode {
    Line,
    Rectangle,
    Oval,
    Triangle,
    Polyline,
}

impl DrawingMode {
    pub const ALL: [DrawingMode; 5] = [
        DrawingMode::Line,
        DrawingMode::Rectangle,
        DrawingMode::Oval,
        DrawingMode::Triangle,
        DrawingMode::Polyline,
    ];

    fn index(self) -> usize {
        match self {
            DrawingMode::Line => 0,
            DrawingMode::Rectangle => 1,
            DrawingMode::Oval => 2,
            DrawingMode::Triangle => 3,
            DrawingMode::Polyline => 4,
        }
    }
}

/// Style and interaction defaults applied to every newly drawn shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawerOptions {
    pub stroke_color: SerializableColor,
    pub stroke_width: f64,
    pub stroke_uniform: bool,
    pub selectable: bool,
    pub no_scale_cache: bool,
}

impl Default for DrawerOptions {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 5.0,
            stroke_uniform: true,
            selectable: true,
            no_scale_cache: false,
        }
    }
}

impl DrawerOptions {
    /// Stamp these options onto a freshly made shape.
    pub fn apply(&self, shape: &mut Shape) {
        let style = shape.style_mut();
        style.stroke_color = self.stroke_color;
        style.stroke_width = self.stroke_width;
        style.stroke_uniform = self.stroke_uniform;
        style.fill_color = None;

        let flags = shape.flags_mut();
        flags.selectable = self.selectable;
        flags.no_scale_cache = self.no_scale_cache;
    }
}

/// Creation and live-resize strategy for one kind of shape.
pub trait Drawer {
    /// The mode this drawer serves.
    fn mode(&self) -> DrawingMode;

    /// Create a shape anchored at `(x, y)`.
    ///
    /// `x2`/`y2` is an optional second point or size hint whose meaning
    /// depends on the shape kind. The shape is handed back as an
    /// already-resolved future so every drawer shares one calling shape.
    fn make(
        &mut self,
        x: f64,
        y: f64,
        options: &DrawerOptions,
        x2: Option<f64>,
        y2: Option<f64>,
    ) -> Ready<Shape>;

    /// Reshape `shape` so it reflects the pointer at `(x, y)`.
    fn resize(&mut self, shape: &mut Shape, x: f64, y: f64);
}

/// Lookup table from drawing mode to its drawer.
pub struct DrawerSet {
    drawers: [Box<dyn Drawer>; 5],
}

impl Default for DrawerSet {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawerSet {
    /// Create one drawer for every mode.
    pub fn new() -> Self {
        Self {
            drawers: [
                Box::new(LineDrawer::default()),
                Box::new(RectangleDrawer::default()),
                Box::new(OvalDrawer::default()),
                Box::new(TriangleDrawer::default()),
                Box::new(PolylineDrawer),
            ],
        }
    }

    /// Get the drawer for `mode`.
    pub fn get_mut(&mut self, mode: DrawingMode) -> &mut dyn Drawer {
        self.drawers[mode.index()].as_mut()
    }
}

impl std::fmt::Debug for DrawerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.drawers.iter().map(|d| d.mode()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_resolves_every_mode() {
        let mut set = DrawerSet::new();
        for mode in DrawingMode::ALL {
            assert_eq!(set.get_mut(mode).mode(), mode);
        }
    }

    #[test]
    fn test_options_applied_to_new_shapes() {
        let options = DrawerOptions {
            stroke_width: 3.0,
            selectable: false,
            ..DrawerOptions::default()
        };
        let mut set = DrawerSet::new();
        for mode in DrawingMode::ALL {
            let shape = set.get_mut(mode).make(1.0, 2.0, &options, None, None).into_inner();
            assert!((shape.style().stroke_width - 3.0).abs() < f64::EPSILON);
            assert!(shape.style().stroke_uniform);
            assert!(shape.style().fill_color.is_none());
            assert!(!shape.flags().selectable);
        }
    }

    #[test]
    fn test_fresh_shapes_are_degenerate() {
        let options = DrawerOptions::default();
        let mut set = DrawerSet::new();
        for mode in DrawingMode::ALL {
            let shape = set.get_mut(mode).make(40.0, 40.0, &options, None, None).into_inner();
            assert!(shape.is_degenerate(), "{mode:?} should start degenerate");
        }
    }
}
