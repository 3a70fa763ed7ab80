//! Single-slot clipboard for shapes.

use crate::shapes::{Group, Shape, ShapeId, ShapeRole};
use crate::surface::Surface;
use kurbo::Vec2;

/// Remembers one detached copy of the selection and pastes fresh clones of it.
///
/// A multi-shape selection is stored as a [`Group`] and expanded back into
/// individual shapes on paste.
#[derive(Debug, Clone)]
pub struct CopyPasteManager {
    entry: Option<Shape>,
    offset: Vec2,
}

impl CopyPasteManager {
    /// Create an empty clipboard pasting at `offset` from the copied position.
    pub fn new(offset: Vec2) -> Self {
        Self {
            entry: None,
            offset,
        }
    }

    /// The remembered shape, if any.
    pub fn entry(&self) -> Option<&Shape> {
        self.entry.as_ref()
    }

    pub fn has_entry(&self) -> bool {
        self.entry.is_some()
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }

    /// Remember the active selection. Workspace and background shapes are
    /// skipped. Returns false if nothing was copied.
    pub fn copy<S: Surface>(&mut self, surface: &S) -> bool {
        !self.copy_selection(surface).is_empty()
    }

    /// Copy the selection, then remove the shapes that were copied.
    /// Returns the number of shapes removed.
    pub fn cut<S: Surface>(&mut self, surface: &mut S) -> usize {
        let copied = self.copy_selection(surface);
        if copied.is_empty() {
            return 0;
        }
        let removed = copied
            .into_iter()
            .filter_map(|id| surface.remove(id))
            .count();
        surface.request_render();
        removed
    }

    fn copy_selection<S: Surface>(&mut self, surface: &S) -> Vec<ShapeId> {
        let selected: Vec<&Shape> = surface
            .active_selection()
            .into_iter()
            .filter_map(move |id| surface.get(id))
            .filter(|shape| shape.role() == ShapeRole::Drawing)
            .collect();

        let cloned = match selected.as_slice() {
            [] => {
                log::debug!("Nothing selected to copy");
                return Vec::new();
            }
            [shape] => shape.detached_clone(),
            shapes => shapes
                .iter()
                .map(|shape| shape.detached_clone())
                .collect::<Result<Vec<_>, _>>()
                .map(|children| Shape::Group(Group::new(children))),
        };

        match cloned {
            Ok(shape) => {
                log::debug!("Copied {:?}", shape.id());
                self.entry = Some(shape);
                selected.iter().map(|shape| shape.id()).collect()
            }
            Err(e) => {
                log::warn!("Failed to copy selection: {e}");
                Vec::new()
            }
        }
    }

    /// Add a fresh, offset clone of the remembered shape and select it.
    ///
    /// Returns the ids of the added shapes, or `None` with an empty clipboard.
    pub fn paste<S: Surface>(&self, surface: &mut S) -> Option<Vec<ShapeId>> {
        let entry = self.entry.as_ref()?;
        let mut clone = match entry.detached_clone() {
            Ok(clone) => clone,
            Err(e) => {
                log::warn!("Failed to clone clipboard entry: {e}");
                return None;
            }
        };
        clone.regenerate_id();
        clone.translate(self.offset);

        let shapes = match clone {
            Shape::Group(group) => group.ungroup(),
            shape => vec![shape],
        };
        let ids: Vec<ShapeId> = shapes
            .into_iter()
            .map(|mut shape| {
                shape.flags_mut().evented = true;
                let id = shape.id();
                surface.add(shape);
                id
            })
            .collect();

        surface.set_active_selection(ids.clone());
        surface.request_render();
        log::info!("Pasted {} shape(s)", ids.len());
        Some(ids)
    }
}

/// Remove every selected shape and clear the selection.
/// Returns the number of shapes removed.
pub fn delete_selection<S: Surface>(surface: &mut S) -> usize {
    let removed = surface
        .active_selection()
        .into_iter()
        .filter_map(|id| surface.remove(id))
        .count();
    surface.discard_active_selection();
    surface.request_render();
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use crate::shapes::{Line, Rectangle};
    use kurbo::Point;

    fn scene_with_rect() -> (Scene, ShapeId) {
        let mut scene = Scene::new();
        let rect = Shape::Rectangle(Rectangle::new(Point::new(10.0, 20.0), 30.0, 40.0));
        let id = rect.id();
        scene.add(rect);
        scene.set_active_selection(vec![id]);
        (scene, id)
    }

    #[test]
    fn test_paste_offsets_clone() {
        let (mut scene, original) = scene_with_rect();
        let mut clipboard = CopyPasteManager::new(Vec2::new(15.0, 15.0));
        assert!(clipboard.copy(&scene));

        let pasted = clipboard.paste(&mut scene).unwrap();
        assert_eq!(pasted.len(), 1);
        assert_ne!(pasted[0], original);

        let before = scene.get(original).unwrap().bounds();
        let after = scene.get(pasted[0]).unwrap().bounds();
        assert!((after.x0 - before.x0 - 15.0).abs() < f64::EPSILON);
        assert!((after.y0 - before.y0 - 15.0).abs() < f64::EPSILON);
        assert_eq!(scene.active_selection(), pasted);
    }

    #[test]
    fn test_pasted_shape_is_independent() {
        let (mut scene, original) = scene_with_rect();
        let mut clipboard = CopyPasteManager::new(Vec2::new(15.0, 15.0));
        clipboard.copy(&scene);
        let pasted = clipboard.paste(&mut scene).unwrap()[0];

        let before = scene.get(original).unwrap().clone();
        scene.get_mut(pasted).unwrap().translate(Vec2::new(100.0, 100.0));
        scene.get_mut(pasted).unwrap().style_mut().stroke_width = 9.0;

        assert_eq!(scene.get(original).unwrap(), &before);

        // A second paste starts from the stored position again.
        let second = clipboard.paste(&mut scene).unwrap()[0];
        let bounds = scene.get(second).unwrap().bounds();
        assert!((bounds.x0 - 25.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 35.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_multi_selection_pastes_members() {
        let mut scene = Scene::new();
        let a = Shape::Line(Line::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0)));
        let b = Shape::Rectangle(Rectangle::new(Point::new(50.0, 50.0), 10.0, 10.0));
        let ids = vec![a.id(), b.id()];
        scene.add(a);
        scene.add(b);
        scene.set_active_selection(ids.clone());

        let mut clipboard = CopyPasteManager::new(Vec2::new(15.0, 15.0));
        assert!(clipboard.copy(&scene));
        assert!(clipboard.entry().unwrap().as_group().is_some());

        let pasted = clipboard.paste(&mut scene).unwrap();
        assert_eq!(pasted.len(), 2);
        assert_eq!(scene.len(), 4);
        assert!(pasted.iter().all(|id| !ids.contains(id)));
        assert_eq!(scene.active_selection(), pasted);
    }

    #[test]
    fn test_empty_clipboard_and_selection() {
        let mut scene = Scene::new();
        let mut clipboard = CopyPasteManager::new(Vec2::new(15.0, 15.0));
        assert!(!clipboard.copy(&scene));
        assert!(clipboard.paste(&mut scene).is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_workspace_is_never_copied() {
        let mut scene = Scene::new();
        let marker = Shape::Rectangle(Rectangle::workspace_marker(100.0, 100.0));
        let id = marker.id();
        scene.add(marker);
        scene.set_active_selection(vec![id]);

        let mut clipboard = CopyPasteManager::new(Vec2::ZERO);
        assert!(!clipboard.copy(&scene));
    }

    #[test]
    fn test_cut_removes_after_copy() {
        let (mut scene, original) = scene_with_rect();
        let mut clipboard = CopyPasteManager::new(Vec2::new(15.0, 15.0));

        assert_eq!(clipboard.cut(&mut scene), 1);
        assert!(scene.get(original).is_none());
        assert!(scene.active_selection().is_empty());
        assert!(clipboard.has_entry());

        let mut empty = Scene::new();
        let mut other = CopyPasteManager::new(Vec2::ZERO);
        assert_eq!(other.cut(&mut empty), 0);
    }

    #[test]
    fn test_cut_keeps_workspace_shapes() {
        let (mut scene, rect) = scene_with_rect();
        let marker = Shape::Rectangle(Rectangle::workspace_marker(100.0, 100.0));
        let marker_id = marker.id();
        scene.add(marker);
        scene.set_active_selection(vec![marker_id, rect]);

        let mut clipboard = CopyPasteManager::new(Vec2::new(15.0, 15.0));
        assert_eq!(clipboard.cut(&mut scene), 1);
        assert!(scene.get(rect).is_none());
        assert!(scene.get(marker_id).is_some());
        assert_eq!(scene.active_selection(), vec![marker_id]);
    }
}
