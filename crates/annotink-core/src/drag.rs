//! Drag-to-pan gesture.

use crate::surface::Surface;
use kurbo::Point;

/// Pans the viewport by the pointer delta while a drag is in progress.
///
/// During the drag only the workspace marker is selectable; on release
/// every shape's selectability is restored from its role and controls.
#[derive(Debug, Clone, Default)]
pub struct DragPan {
    /// Pan every drag, not just Alt-drags.
    pub drag_mode: bool,
    last: Option<Point>,
}

impl DragPan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_drag_mode(&mut self) -> bool {
        self.drag_mode = !self.drag_mode;
        self.drag_mode
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    /// Start panning from a viewport pixel position.
    pub fn begin<S: Surface>(&mut self, surface: &mut S, screen: Point) {
        surface.set_selection_enabled(false);
        surface.discard_active_selection();
        for shape in surface.shapes_mut() {
            let selectable = shape.is_workspace();
            shape.flags_mut().selectable = selectable;
        }
        self.last = Some(screen);
        surface.request_render();
    }

    /// Pan by the distance moved since the previous position.
    /// Returns false when no drag is in progress.
    pub fn drag<S: Surface>(&mut self, surface: &mut S, screen: Point) -> bool {
        let Some(last) = self.last else {
            return false;
        };
        surface.viewport_mut().pan(screen - last);
        self.last = Some(screen);
        surface.request_render();
        true
    }

    /// Finish the drag and restore selectability.
    /// Returns false when no drag is in progress.
    pub fn end<S: Surface>(&mut self, surface: &mut S) -> bool {
        if self.last.take().is_none() {
            return false;
        }
        surface.set_selection_enabled(true);
        for shape in surface.shapes_mut() {
            let selectable = !shape.is_workspace() && shape.flags().has_controls;
            shape.flags_mut().selectable = selectable;
        }
        surface.request_render();
        true
    }
}
