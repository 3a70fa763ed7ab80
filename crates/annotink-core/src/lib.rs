//! annotink Core Library
//!
//! Editing engine for the annotink drawing and annotation editor: the
//! draw/select state machine, shape drawers, undo history, workspace
//! fitting and clipboard, over a pluggable [`Surface`].

pub mod clipboard;
pub mod config;
pub mod drag;
pub mod drawer;
pub mod editor;
pub mod error;
pub mod history;
pub mod input;
pub mod scene;
pub mod shapes;
pub mod shortcuts;
pub mod surface;
pub mod viewport;
pub mod workspace;

pub use clipboard::CopyPasteManager;
pub use config::EditorConfig;
pub use drag::DragPan;
pub use drawer::{Drawer, DrawerOptions, DrawerSet, DrawingMode};
pub use editor::{Editor, EditorState};
pub use error::{EditorError, EditorResult};
pub use history::HistoryManager;
pub use input::{InputBus, InputEvent, KeyEvent, Modifiers, MouseButton, PointerEvent, Subscription};
pub use scene::Scene;
pub use shapes::{Shape, ShapeId, ShapeTrait};
pub use shortcuts::{Keymap, Shortcut, ShortcutAction, ShortcutManager};
pub use surface::{CanvasEvent, Snapshot, Surface};
pub use viewport::Viewport;
pub use workspace::{Instant, Throttle, Workspace, WorkspaceOption, WorkspaceSource};
