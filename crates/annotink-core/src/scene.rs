//! In-memory surface: shape storage, selection and view state without a
//! rendering backend.

use crate::error::{EditorError, EditorResult};
use crate::shapes::{Shape, ShapeId};
use crate::surface::{CanvasEvent, Snapshot, Surface};
use crate::viewport::Viewport;
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Version tag written into every snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Default hit-test tolerance in logical units.
const HIT_TOLERANCE: f64 = 4.0;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    objects: Vec<&'a Shape>,
}

#[derive(Deserialize)]
struct SnapshotDocument {
    version: u32,
    objects: Vec<Shape>,
}

/// A surface that keeps everything in memory.
#[derive(Debug, Clone)]
pub struct Scene {
    shapes: HashMap<ShapeId, Shape>,
    /// Back to front.
    z_order: Vec<ShapeId>,
    selection: Vec<ShapeId>,
    selection_enabled: bool,
    viewport: Viewport,
    targets: HashMap<String, Size>,
    images: HashMap<String, Size>,
    events: VecDeque<CanvasEvent>,
    render_requests: usize,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with no mount targets.
    pub fn new() -> Self {
        Self {
            shapes: HashMap::new(),
            z_order: Vec::new(),
            selection: Vec::new(),
            selection_enabled: true,
            viewport: Viewport::default(),
            targets: HashMap::new(),
            images: HashMap::new(),
            events: VecDeque::new(),
            render_requests: 0,
        }
    }

    /// Create a scene exposing the default `canvas` and `workspace` targets.
    pub fn mounted(size: Size) -> Self {
        Self::new()
            .with_target("canvas", size)
            .with_target("workspace", size)
    }

    /// Register a mount target.
    pub fn with_target(mut self, name: impl Into<String>, size: Size) -> Self {
        self.targets.insert(name.into(), size);
        self
    }

    /// Make an image reference resolvable.
    pub fn register_image(&mut self, reference: impl Into<String>, size: Size) {
        self.images.insert(reference.into(), size);
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Number of redraws requested so far.
    pub fn render_requests(&self) -> usize {
        self.render_requests
    }

    /// Find shapes at a logical point, front to back.
    pub fn shapes_at_point(&self, point: Point, tolerance: f64) -> Vec<ShapeId> {
        self.z_order
            .iter()
            .rev()
            .filter_map(|&id| {
                self.shapes
                    .get(&id)
                    .filter(|s| s.hit_test(point, tolerance))
                    .map(|_| id)
            })
            .collect()
    }

    /// Click-select at a viewport pixel position: selects the topmost
    /// selectable shape under the pointer, or clears the selection.
    pub fn select_at(&mut self, screen: Point) -> Option<ShapeId> {
        let point = self.to_logical(screen);
        let hit = self
            .shapes_at_point(point, HIT_TOLERANCE / self.viewport.zoom)
            .into_iter()
            .find(|id| {
                self.shapes
                    .get(id)
                    .is_some_and(|s| s.flags().selectable && s.flags().evented)
            });
        match hit {
            Some(id) => self.set_active_selection(vec![id]),
            None => self.discard_active_selection(),
        }
        hit
    }

    /// Move a shape as a user drag would, reporting the modification.
    ///
    /// Locked movement axes are honored. Returns false for unknown ids.
    pub fn move_shape(&mut self, id: ShapeId, delta: Vec2) -> bool {
        let Some(shape) = self.shapes.get_mut(&id) else {
            return false;
        };
        let flags = shape.flags();
        let delta = Vec2::new(
            if flags.lock_movement_x { 0.0 } else { delta.x },
            if flags.lock_movement_y { 0.0 } else { delta.y },
        );
        shape.translate(delta);
        self.events.push_back(CanvasEvent::ObjectModified(id));
        true
    }

    fn replace_selection(&mut self, ids: Vec<ShapeId>) {
        let was_empty = self.selection.is_empty();
        if ids == self.selection {
            return;
        }
        self.selection = ids;
        let event = match (was_empty, self.selection.is_empty()) {
            (true, false) => CanvasEvent::SelectionCreated,
            (false, true) => CanvasEvent::SelectionCleared,
            _ => CanvasEvent::SelectionUpdated,
        };
        self.events.push_back(event);
    }
}

impl Surface for Scene {
    fn mount(&mut self, target: &str) -> Option<Size> {
        self.targets.get(target).copied()
    }

    fn add(&mut self, shape: Shape) {
        let id = shape.id();
        if self.shapes.insert(id, shape).is_none() {
            self.z_order.push(id);
        }
    }

    fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let shape = self.shapes.remove(&id)?;
        self.z_order.retain(|&shape_id| shape_id != id);
        if self.selection.contains(&id) {
            let remaining = self
                .selection
                .iter()
                .copied()
                .filter(|&shape_id| shape_id != id)
                .collect();
            self.replace_selection(remaining);
        }
        Some(shape)
    }

    fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    fn shapes_mut(&mut self) -> impl Iterator<Item = &mut Shape> {
        self.shapes.values_mut()
    }

    fn active_selection(&self) -> Vec<ShapeId> {
        self.selection.clone()
    }

    fn set_active_selection(&mut self, ids: Vec<ShapeId>) {
        let ids = ids
            .into_iter()
            .filter(|id| self.shapes.contains_key(id))
            .collect();
        self.replace_selection(ids);
    }

    fn discard_active_selection(&mut self) {
        self.replace_selection(Vec::new());
    }

    fn set_selection_enabled(&mut self, enabled: bool) {
        self.selection_enabled = enabled;
    }

    fn selection_enabled(&self) -> bool {
        self.selection_enabled
    }

    fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    fn request_render(&mut self) {
        self.render_requests += 1;
    }

    fn snapshot(&self) -> EditorResult<Snapshot> {
        let document = SnapshotRef {
            version: SNAPSHOT_VERSION,
            objects: self.shapes().collect(),
        };
        Ok(Snapshot::new(serde_json::to_string(&document)?))
    }

    fn load_snapshot(&mut self, snapshot: &Snapshot) -> EditorResult<()> {
        let document: SnapshotDocument = serde_json::from_str(snapshot.as_str())?;
        if document.version != SNAPSHOT_VERSION {
            return Err(EditorError::UnsupportedSnapshotVersion(document.version));
        }

        self.shapes.clear();
        self.z_order.clear();
        self.replace_selection(Vec::new());
        for shape in document.objects {
            self.add(shape);
        }
        log::debug!("Loaded snapshot with {} shapes", self.shapes.len());
        self.events.push_back(CanvasEvent::SnapshotLoaded);
        Ok(())
    }

    fn resolve_image(&mut self, reference: &str) -> EditorResult<Size> {
        self.images
            .get(reference)
            .copied()
            .ok_or_else(|| EditorError::UnknownImage(reference.to_string()))
    }

    fn poll_event(&mut self) -> Option<CanvasEvent> {
        self.events.pop_front()
    }
}
