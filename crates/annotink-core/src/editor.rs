//! The editing state machine.
//!
//! [`Editor`] consumes pointer, keyboard and surface events, routes them to
//! the active drawer, the drag-pan gesture or the clipboard, and commits the
//! results to the undo history.

use crate::clipboard::{CopyPasteManager, delete_selection};
use crate::config::EditorConfig;
use crate::drag::DragPan;
use crate::drawer::{DrawerSet, DrawingMode};
use crate::error::{EditorError, EditorResult};
use crate::history::HistoryManager;
use crate::input::{
    InputBus, InputEvent, KeyEvent, Modifiers, MouseButton, PointerEvent, Subscription,
};
use crate::shapes::{Image, Shape, ShapeId};
use crate::shortcuts::{ShortcutAction, ShortcutManager};
use crate::surface::{CanvasEvent, Snapshot, Surface};
use crate::workspace::{Instant, Throttle, Workspace, WorkspaceSource};
use kurbo::{Point, Size};

/// Which pointer handlers are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    /// Pointer input goes to the surface's own selection handling.
    #[default]
    Selecting,
    /// Pointer input creates shapes with the bound drawer.
    Drawing,
}

/// A shape being drawn, with the mode that created it.
#[derive(Debug, Clone, Copy)]
struct InProgress {
    id: ShapeId,
    mode: DrawingMode,
}

/// Drawing editor over a [`Surface`].
pub struct Editor<S: Surface> {
    surface: S,
    config: EditorConfig,
    state: EditorState,
    drawers: DrawerSet,
    drawer: Option<DrawingMode>,
    in_progress: Option<InProgress>,
    history: HistoryManager,
    clipboard: CopyPasteManager,
    shortcuts: ShortcutManager,
    drag: DragPan,
    workspace: Option<Workspace>,
    resize_throttle: Throttle,
    subscription: Option<Subscription>,
}

impl<S: Surface> Editor<S> {
    /// Mount the editor on `surface`.
    ///
    /// Fails if either configured mount target is missing. The viewport is
    /// sized to the workspace target and the present surface state becomes
    /// the history baseline.
    pub fn new(mut surface: S, config: EditorConfig) -> EditorResult<Self> {
        if surface.mount(&config.canvas_target).is_none() {
            return Err(EditorError::MissingTarget(config.canvas_target.clone()));
        }
        let size = surface
            .mount(&config.workspace_target)
            .ok_or_else(|| EditorError::MissingTarget(config.workspace_target.clone()))?;
        surface.viewport_mut().size = size;

        let history = HistoryManager::from_surface(&surface, config.history_capacity)?;
        log::info!(
            "Editor mounted on '{}' ({}x{})",
            config.canvas_target,
            size.width,
            size.height
        );

        Ok(Self {
            surface,
            state: EditorState::Selecting,
            drawers: DrawerSet::new(),
            drawer: None,
            in_progress: None,
            history,
            clipboard: CopyPasteManager::new(config.paste_offset),
            shortcuts: ShortcutManager::new(config.keymap.clone()),
            drag: DragPan::new(),
            workspace: None,
            resize_throttle: Throttle::new(config.resize_throttle()),
            subscription: None,
            config,
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    /// The bound drawing mode, if any.
    pub fn drawing_mode(&self) -> Option<DrawingMode> {
        self.drawer
    }

    /// Whether a shape is currently being drawn.
    pub fn is_drawing(&self) -> bool {
        self.in_progress.is_some()
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn clipboard(&self) -> &CopyPasteManager {
        &self.clipboard
    }

    pub fn shortcuts(&self) -> &ShortcutManager {
        &self.shortcuts
    }

    pub fn workspace(&self) -> Option<&Workspace> {
        self.workspace.as_ref()
    }

    pub fn drag_mode(&self) -> bool {
        self.drag.drag_mode
    }

    // --- Tools ---

    pub fn line(&mut self) {
        self.select_tool(DrawingMode::Line);
    }

    pub fn rectangle(&mut self) {
        self.select_tool(DrawingMode::Rectangle);
    }

    pub fn oval(&mut self) {
        self.select_tool(DrawingMode::Oval);
    }

    pub fn triangle(&mut self) {
        self.select_tool(DrawingMode::Triangle);
    }

    pub fn polyline(&mut self) {
        self.select_tool(DrawingMode::Polyline);
    }

    /// Bind the drawer for `mode`, or leave drawing mode if a drawer is
    /// already bound.
    pub fn select_tool(&mut self, mode: DrawingMode) {
        if self.drawer.is_some() {
            self.reset_drawer();
            return;
        }
        self.surface.discard_active_selection();
        self.surface.set_selection_enabled(false);
        self.drawer = Some(mode);
        self.state = EditorState::Drawing;
        log::debug!("Drawing with {mode:?}");
    }

    /// Unbind the drawer and return to selecting.
    pub fn reset_drawer(&mut self) {
        self.drawer = None;
        self.state = EditorState::Selecting;
        self.surface.set_selection_enabled(true);
        log::debug!("Back to selecting");
    }

    /// Toggle panning on every drag. Returns the new setting.
    pub fn toggle_drag_mode(&mut self) -> bool {
        let enabled = self.drag.toggle_drag_mode();
        log::debug!("Drag mode {}", if enabled { "on" } else { "off" });
        enabled
    }

    // --- History ---

    /// Returns true if a replay was started.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => self.replay(&snapshot, "Undo"),
            None => false,
        }
    }

    /// Returns true if a replay was started.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => self.replay(&snapshot, "Redo"),
            None => false,
        }
    }

    fn replay(&mut self, snapshot: &Snapshot, label: &str) -> bool {
        self.in_progress = None;
        match self.surface.load_snapshot(snapshot) {
            Ok(()) => {
                log::info!("{label} ({} left)", self.history.undo_len());
                true
            }
            Err(e) => {
                log::warn!("{label} failed to load snapshot: {e}");
                self.history.finish_replay();
                false
            }
        }
    }

    fn commit(&mut self) {
        if self.history.save_state(&self.surface) {
            log::debug!("Committed history entry {}", self.history.undo_len());
        }
    }

    // --- Editing ---

    /// Remove the selected shapes. Returns how many were removed.
    pub fn delete(&mut self) -> usize {
        if self.surface.active_selection().is_empty() {
            return 0;
        }
        let removed = delete_selection(&mut self.surface);
        if removed > 0 {
            log::info!("Deleted {removed} shape(s)");
            self.commit();
        }
        removed
    }

    /// Returns true if the selection was copied.
    pub fn copy(&mut self) -> bool {
        self.clipboard.copy(&self.surface)
    }

    /// Copy and remove the selection. Returns how many shapes were removed.
    pub fn cut(&mut self) -> usize {
        let removed = self.clipboard.cut(&mut self.surface);
        if removed > 0 {
            self.commit();
        }
        removed
    }

    /// Paste the clipboard. Returns the ids of the new shapes.
    pub fn paste(&mut self) -> Option<Vec<ShapeId>> {
        let ids = self.clipboard.paste(&mut self.surface)?;
        self.commit();
        Some(ids)
    }

    /// Add an image at the logical origin. Returns `None` for references
    /// the surface cannot resolve.
    pub fn add_image(&mut self, reference: &str) -> Option<ShapeId> {
        let size = match self.surface.resolve_image(reference) {
            Ok(size) => size,
            Err(e) => {
                log::warn!("Cannot add image: {e}");
                return None;
            }
        };
        let image = Image::new(reference, Point::ZERO, size);
        let id = image.id;
        self.surface.add(Shape::Image(image));
        self.surface.request_render();
        self.commit();
        Some(id)
    }

    // --- Workspace ---

    /// Replace the workspace and reset history. Returns false, leaving
    /// everything untouched, if an image source cannot be resolved.
    pub fn create_workspace(&mut self, source: WorkspaceSource) -> bool {
        if let WorkspaceSource::Image(reference) = &source {
            if let Err(e) = self.surface.resolve_image(reference) {
                log::warn!("Workspace not created: {e}");
                return false;
            }
        }

        if let Some(previous) = self.workspace.take() {
            previous.remove(&mut self.surface);
        }
        let margin = self.config.fit_margin;
        let workspace = match Workspace::create(&mut self.surface, &source, margin) {
            Ok(workspace) => workspace,
            Err(e) => {
                log::warn!("Workspace not created: {e}");
                return false;
            }
        };
        log::info!(
            "Created {}x{} workspace",
            workspace.option().width,
            workspace.option().height
        );
        self.workspace = Some(workspace);

        if let Err(e) = self.history.reset(&self.surface) {
            log::warn!("Failed to reset history: {e}");
        }
        true
    }

    /// Record a new viewport size. The workspace is refitted right away at
    /// most once per throttle window; later resizes are flushed by
    /// [`Editor::tick`].
    pub fn resize_viewport(&mut self, size: Size, now: Instant) {
        self.surface.viewport_mut().size = size;
        if self.resize_throttle.hit(now) {
            self.fit_workspace();
        }
    }

    /// Run deferred work that has come due.
    pub fn tick(&mut self, now: Instant) {
        if self.resize_throttle.flush(now) {
            self.fit_workspace();
        }
    }

    fn fit_workspace(&mut self) {
        if let Some(workspace) = &self.workspace {
            workspace.auto(&mut self.surface);
        }
    }

    // --- Event dispatch ---

    /// Subscribe to `bus`, replacing any earlier subscription.
    pub fn subscribe(&mut self, bus: &mut InputBus) {
        self.subscription = Some(bus.subscribe());
    }

    /// Drop the input subscription and abandon any running gesture.
    pub fn teardown(&mut self) {
        self.subscription = None;
        self.drag.end(&mut self.surface);
        self.in_progress = None;
        log::debug!("Editor torn down");
    }

    /// Dispatch every pending surface notification and subscribed input
    /// event. Notifications raised while handling an input are dispatched
    /// before the next input. Returns the number of events handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        loop {
            if let Some(event) = self.surface.poll_event() {
                self.handle_canvas_event(event);
            } else if let Some(event) = self.next_input() {
                self.handle_input(event);
            } else {
                return handled;
            }
            handled += 1;
        }
    }

    fn next_input(&self) -> Option<InputEvent> {
        self.subscription.as_ref().and_then(Subscription::try_next)
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pointer(event) => self.handle_pointer(event),
            InputEvent::Key(event) => self.handle_key(&event),
        }
    }

    pub fn handle_key(&mut self, event: &KeyEvent) {
        if let Some(action) = self.shortcuts.resolve(event) {
            log::debug!("Shortcut {action:?}");
            self.perform(action);
        }
    }

    /// Run a shortcut action.
    pub fn perform(&mut self, action: ShortcutAction) {
        match action {
            ShortcutAction::Undo => {
                self.undo();
            }
            ShortcutAction::Redo => {
                self.redo();
            }
            ShortcutAction::Copy => {
                self.copy();
            }
            ShortcutAction::Cut => {
                self.cut();
            }
            ShortcutAction::Paste => {
                self.paste();
            }
            ShortcutAction::Delete => {
                self.delete();
            }
            ShortcutAction::Tool(mode) => self.select_tool(mode),
            ShortcutAction::Select => self.reset_drawer(),
        }
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down {
                position,
                button,
                modifiers,
            } => self.pointer_down(position, button, modifiers),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { .. } => self.pointer_up(),
            PointerEvent::Wheel { delta_y, .. } => self.wheel(delta_y),
        }
    }

    fn pointer_down(&mut self, position: Point, button: MouseButton, modifiers: Modifiers) {
        if button != MouseButton::Left {
            return;
        }
        if modifiers.alt || self.drag.drag_mode {
            self.drag.begin(&mut self.surface, position);
            return;
        }
        if self.state != EditorState::Drawing {
            return;
        }
        let Some(mode) = self.drawer else {
            return;
        };

        let point = self.surface.to_logical(position);
        let shape = self
            .drawers
            .get_mut(mode)
            .make(point.x, point.y, &self.config.drawer, None, None)
            .into_inner();
        let id = shape.id();
        self.surface.add(shape);
        self.in_progress = Some(InProgress { id, mode });
        self.surface.request_render();
    }

    fn pointer_move(&mut self, position: Point) {
        if self.drag.drag(&mut self.surface, position) {
            return;
        }
        let Some(InProgress { id, mode }) = self.in_progress else {
            return;
        };
        let point = self.surface.to_logical(position);
        let drawer = self.drawers.get_mut(mode);
        if let Some(shape) = self.surface.get_mut(id) {
            drawer.resize(shape, point.x, point.y);
        }
        self.surface.request_render();
    }

    fn pointer_up(&mut self) {
        if self.drag.end(&mut self.surface) {
            return;
        }
        let Some(InProgress { id, .. }) = self.in_progress.take() else {
            return;
        };

        if self.surface.get(id).is_none_or(Shape::is_degenerate) {
            self.surface.remove(id);
            self.surface.request_render();
            log::debug!("Discarded degenerate shape {id}");
            return;
        }
        self.commit();
        self.surface.request_render();
    }

    fn wheel(&mut self, delta_y: f64) {
        let factor = self.config.wheel_zoom_base.powf(delta_y);
        let viewport = self.surface.viewport_mut();
        let center = viewport.center();
        viewport.zoom_by(center, factor, self.config.min_zoom, self.config.max_zoom);
        self.surface.request_render();
    }

    pub fn handle_canvas_event(&mut self, event: CanvasEvent) {
        match event {
            CanvasEvent::SelectionCreated => self.state = EditorState::Selecting,
            CanvasEvent::SelectionCleared => {
                if self.drawer.is_some() {
                    self.state = EditorState::Drawing;
                }
            }
            CanvasEvent::SelectionUpdated => log::debug!("Selection updated"),
            CanvasEvent::ObjectModified(id) => {
                log::debug!("Shape {id} modified");
                self.commit();
            }
            CanvasEvent::SnapshotLoaded => {
                self.history.finish_replay();
                self.surface.request_render();
            }
        }
    }
}
