//! The fixed-size logical drawing surface and its fit-to-view transform.

use crate::error::EditorResult;
use crate::shapes::{Image, Rectangle, Shape, ShapeId};
use crate::surface::Surface;
use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;

/// Logical dimensions of a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceOption {
    pub width: f64,
    pub height: f64,
}

impl WorkspaceOption {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// What a workspace is built from.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkspaceSource {
    /// A blank white surface of the given size.
    Blank(WorkspaceOption),
    /// A surface sized to, and backed by, an image.
    Image(String),
}

/// A workspace placed on a surface: the white marker rectangle and an
/// optional background image.
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    option: WorkspaceOption,
    marker: ShapeId,
    background: Option<ShapeId>,
    margin: f64,
}

impl Workspace {
    /// Add the workspace shapes to `surface` and fit the view to them.
    pub fn create<S: Surface>(
        surface: &mut S,
        source: &WorkspaceSource,
        margin: f64,
    ) -> EditorResult<Self> {
        let (option, background) = match source {
            WorkspaceSource::Blank(option) => (*option, None),
            WorkspaceSource::Image(reference) => {
                let size = surface.resolve_image(reference)?;
                let image = Image::background(reference.clone(), size);
                (WorkspaceOption::new(size.width, size.height), Some(image))
            }
        };

        let marker = Rectangle::workspace_marker(option.width, option.height);
        let marker_id = marker.id;
        surface.add(Shape::Rectangle(marker));

        let background = background.map(|image| {
            let id = image.id;
            surface.add(Shape::Image(image));
            id
        });

        let workspace = Self {
            option,
            marker: marker_id,
            background,
            margin,
        };
        workspace.auto(surface);
        Ok(workspace)
    }

    pub fn option(&self) -> WorkspaceOption {
        self.option
    }

    pub fn marker_id(&self) -> ShapeId {
        self.marker
    }

    pub fn background_id(&self) -> Option<ShapeId> {
        self.background
    }

    /// Logical bounds of the surface.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size((0.0, 0.0), self.option.size())
    }

    /// Fit the whole workspace into the viewport, centered, and clip to it.
    ///
    /// The scale is `min(vw / w, vh / h) - margin`. Calling this twice
    /// yields the same transform.
    pub fn auto<S: Surface>(&self, surface: &mut S) {
        let viewport = surface.viewport_mut();
        let size = viewport.size;
        if self.option.width <= 0.0 || self.option.height <= 0.0 {
            log::warn!("Workspace has no area, skipping fit");
            return;
        }
        let scale = (size.width / self.option.width).min(size.height / self.option.height)
            - self.margin;
        if scale <= 0.0 {
            log::warn!("Viewport {size:?} too small to fit workspace");
            return;
        }

        let center = viewport.center();
        viewport.reset_transform();
        viewport.zoom_to_point(center, scale);

        let bounds = self.bounds();
        let offset = center.to_vec2() - bounds.center().to_vec2() * viewport.zoom;
        viewport.set_transform(viewport.zoom, offset);
        viewport.set_clip(Some(bounds));

        log::debug!("Fitted workspace at zoom {:.3}", viewport.zoom);
        surface.request_render();
    }

    /// Take the workspace shapes off the surface.
    pub fn remove<S: Surface>(&self, surface: &mut S) {
        surface.remove(self.marker);
        if let Some(background) = self.background {
            surface.remove(background);
        }
        surface.viewport_mut().set_clip(None);
    }
}

/// Leading-and-trailing-edge throttle driven by caller-supplied instants.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
    pending: bool,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
            pending: false,
        }
    }

    /// Register a trigger at `now`. Returns true if the action should run
    /// immediately; otherwise the trigger is remembered for [`Throttle::flush`].
    pub fn hit(&mut self, now: Instant) -> bool {
        if self.within_window(now) {
            self.pending = true;
            return false;
        }
        self.last = Some(now);
        self.pending = false;
        true
    }

    /// Returns true if a remembered trigger is due at `now`.
    pub fn flush(&mut self, now: Instant) -> bool {
        if !self.pending || self.within_window(now) {
            return false;
        }
        self.last = Some(now);
        self.pending = false;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    fn within_window(&self, now: Instant) -> bool {
        self.last
            .is_some_and(|last| now.saturating_duration_since(last) < self.interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use crate::shapes::ShapeRole;
    use kurbo::{Point, Vec2};

    const EPS: f64 = 1e-9;

    #[test]
    fn test_auto_fits_and_centers() {
        let mut scene = Scene::mounted(Size::new(400.0, 300.0));
        scene.viewport_mut().size = Size::new(400.0, 300.0);
        let workspace = Workspace::create(
            &mut scene,
            &WorkspaceSource::Blank(WorkspaceOption::new(800.0, 600.0)),
            0.03,
        )
        .unwrap();

        let viewport = scene.viewport();
        assert!((viewport.zoom - 0.47).abs() < EPS);
        assert!((viewport.offset.x - 12.0).abs() < EPS);
        assert!((viewport.offset.y - 9.0).abs() < EPS);

        let center = viewport.world_to_screen(workspace.bounds().center());
        assert!((center.x - 200.0).abs() < EPS);
        assert!((center.y - 150.0).abs() < EPS);
        assert_eq!(viewport.clip, Some(Rect::new(0.0, 0.0, 800.0, 600.0)));
    }

    #[test]
    fn test_auto_is_idempotent() {
        let mut scene = Scene::mounted(Size::new(1024.0, 768.0));
        scene.viewport_mut().size = Size::new(1024.0, 768.0);
        let workspace = Workspace::create(
            &mut scene,
            &WorkspaceSource::Blank(WorkspaceOption::new(300.0, 500.0)),
            0.03,
        )
        .unwrap();
        let first = scene.viewport().clone();

        scene.viewport_mut().pan(Vec2::new(33.0, -12.0));
        workspace.auto(&mut scene);
        workspace.auto(&mut scene);

        assert_eq!(scene.viewport(), &first);
    }

    #[test]
    fn test_marker_is_locked() {
        let mut scene = Scene::mounted(Size::new(400.0, 300.0));
        let workspace = Workspace::create(
            &mut scene,
            &WorkspaceSource::Blank(WorkspaceOption::new(100.0, 100.0)),
            0.03,
        )
        .unwrap();
        let marker = scene.get(workspace.marker_id()).unwrap();
        assert_eq!(marker.role(), ShapeRole::Workspace);
        assert!(!marker.flags().selectable);
        assert!(!marker.flags().has_controls);
        assert!(workspace.background_id().is_none());
    }

    #[test]
    fn test_image_workspace() {
        let mut scene = Scene::mounted(Size::new(400.0, 300.0));
        scene.viewport_mut().size = Size::new(400.0, 300.0);
        scene.register_image("scan.png", Size::new(800.0, 600.0));

        let workspace =
            Workspace::create(&mut scene, &WorkspaceSource::Image("scan.png".into()), 0.03)
                .unwrap();

        assert_eq!(workspace.option(), WorkspaceOption::new(800.0, 600.0));
        let background = workspace.background_id().unwrap();
        assert_eq!(scene.get(background).unwrap().role(), ShapeRole::Background);
        assert_eq!(scene.len(), 2);
        assert!((scene.viewport().zoom - 0.47).abs() < EPS);
    }

    #[test]
    fn test_unknown_image_adds_nothing() {
        let mut scene = Scene::mounted(Size::new(400.0, 300.0));
        let result = Workspace::create(&mut scene, &WorkspaceSource::Image("nope".into()), 0.03);
        assert!(result.is_err());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_remove_clears_shapes_and_clip() {
        let mut scene = Scene::mounted(Size::new(400.0, 300.0));
        scene.viewport_mut().size = Size::new(400.0, 300.0);
        let workspace = Workspace::create(
            &mut scene,
            &WorkspaceSource::Blank(WorkspaceOption::new(200.0, 200.0)),
            0.03,
        )
        .unwrap();
        workspace.remove(&mut scene);
        assert!(scene.is_empty());
        assert_eq!(scene.viewport().clip, None);
        assert_eq!(scene.to_logical(Point::ZERO), scene.viewport().screen_to_world(Point::ZERO));
    }

    #[test]
    fn test_throttle_leading_and_trailing() {
        let start = Instant::now();
        let mut throttle = Throttle::new(Duration::from_millis(100));

        assert!(throttle.hit(start));
        assert!(!throttle.hit(start + Duration::from_millis(30)));
        assert!(!throttle.hit(start + Duration::from_millis(60)));
        assert!(throttle.is_pending());

        assert!(!throttle.flush(start + Duration::from_millis(90)));
        assert!(throttle.flush(start + Duration::from_millis(100)));
        assert!(!throttle.flush(start + Duration::from_millis(300)));

        assert!(throttle.hit(start + Duration::from_millis(300)));
    }
}
