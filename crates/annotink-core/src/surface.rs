//! The object-model collaborator the editor drives.
//!
//! A [`Surface`] owns the live shapes, the selection and the view
//! transform. It is also the source of selection-lifecycle notifications,
//! which the editor polls with [`Surface::poll_event`].

use crate::error::EditorResult;
use crate::shapes::{Shape, ShapeId};
use crate::viewport::Viewport;
use kurbo::{Point, Size};
use std::fmt;

/// Opaque serialized form of every shape on a surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot(String);

impl Snapshot {
    pub fn new(data: impl Into<String>) -> Self {
        Self(data.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Notifications emitted by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasEvent {
    /// The selection went from empty to non-empty.
    SelectionCreated,
    /// A non-empty selection changed.
    SelectionUpdated,
    /// The selection went from non-empty to empty.
    SelectionCleared,
    /// The user finished moving or transforming a shape.
    ObjectModified(ShapeId),
    /// A snapshot passed to [`Surface::load_snapshot`] finished loading.
    SnapshotLoaded,
}

/// Shape storage, selection and view state of a rendering canvas.
pub trait Surface {
    /// Look up a mount target, returning its pixel size.
    fn mount(&mut self, target: &str) -> Option<Size>;

    /// Add a shape on top of the stack.
    fn add(&mut self, shape: Shape);

    /// Remove a shape, dropping it from the selection as well.
    fn remove(&mut self, id: ShapeId) -> Option<Shape>;

    fn get(&self, id: ShapeId) -> Option<&Shape>;

    fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape>;

    /// Shapes back to front.
    fn shapes(&self) -> impl Iterator<Item = &Shape>;

    /// Shapes in no particular order.
    fn shapes_mut(&mut self) -> impl Iterator<Item = &mut Shape>;

    /// Ids of the currently selected shapes.
    fn active_selection(&self) -> Vec<ShapeId>;

    /// Replace the selection.
    fn set_active_selection(&mut self, ids: Vec<ShapeId>);

    /// Clear the selection.
    fn discard_active_selection(&mut self);

    /// Enable or disable rubber-band multi-selection.
    fn set_selection_enabled(&mut self, enabled: bool);

    fn selection_enabled(&self) -> bool;

    fn viewport(&self) -> &Viewport;

    fn viewport_mut(&mut self) -> &mut Viewport;

    /// Map a pointer position in viewport pixels to logical coordinates.
    fn to_logical(&self, screen: Point) -> Point {
        self.viewport().screen_to_world(screen)
    }

    /// Schedule a redraw.
    fn request_render(&mut self);

    /// Serialize every shape.
    fn snapshot(&self) -> EditorResult<Snapshot>;

    /// Replace every shape with the contents of `snapshot`.
    ///
    /// Completion is reported with [`CanvasEvent::SnapshotLoaded`]. An `Err`
    /// means the load was rejected and no completion will follow.
    fn load_snapshot(&mut self, snapshot: &Snapshot) -> EditorResult<()>;

    /// Natural size of an image reference.
    fn resolve_image(&mut self, reference: &str) -> EditorResult<Size>;

    /// Next pending notification, if any.
    fn poll_event(&mut self) -> Option<CanvasEvent>;
}
