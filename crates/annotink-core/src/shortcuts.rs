//! Keyboard shortcut mapping.

use crate::drawer::DrawingMode;
use crate::input::{KeyEvent, Modifiers};
use serde::{Deserialize, Serialize};

/// Editor actions reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShortcutAction {
    Undo,
    Redo,
    Copy,
    Cut,
    Paste,
    Delete,
    /// Toggle a drawing tool.
    Tool(DrawingMode),
    /// Leave drawing mode.
    Select,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
    pub action: ShortcutAction,
}

impl Shortcut {
    pub fn new(key: impl Into<String>, ctrl: bool, shift: bool, action: ShortcutAction) -> Self {
        Self {
            key: key.into(),
            ctrl,
            shift,
            action,
        }
    }

    /// Whether a key press triggers this shortcut. Keys compare
    /// case-insensitively; Cmd counts as Ctrl.
    pub fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        key.eq_ignore_ascii_case(&self.key)
            && modifiers.command() == self.ctrl
            && modifiers.shift == self.shift
    }

    /// Format the shortcut for display (e.g., "Ctrl+Shift+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        parts.push(display_key(&self.key));
        parts.join("+")
    }
}

fn display_key(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Ordered list of shortcuts; the first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keymap(Vec<Shortcut>);

impl Default for Keymap {
    fn default() -> Self {
        use ShortcutAction::*;
        Self(vec![
            Shortcut::new("z", true, false, Undo),
            Shortcut::new("z", true, true, Redo),
            Shortcut::new("y", true, false, Redo),
            Shortcut::new("c", true, false, Copy),
            Shortcut::new("x", true, false, Cut),
            Shortcut::new("v", true, false, Paste),
            Shortcut::new("Delete", false, false, Delete),
            Shortcut::new("Backspace", false, false, Delete),
            Shortcut::new("l", false, false, Tool(DrawingMode::Line)),
            Shortcut::new("w", false, false, Tool(DrawingMode::Rectangle)),
            Shortcut::new("o", false, false, Tool(DrawingMode::Oval)),
            Shortcut::new("t", false, false, Tool(DrawingMode::Triangle)),
            Shortcut::new("p", false, false, Tool(DrawingMode::Polyline)),
            Shortcut::new("v", false, false, Select),
            Shortcut::new("Escape", false, false, Select),
        ])
    }
}

impl Keymap {
    pub fn new(shortcuts: Vec<Shortcut>) -> Self {
        Self(shortcuts)
    }

    pub fn shortcuts(&self) -> &[Shortcut] {
        &self.0
    }

    /// Add a shortcut ahead of the existing ones.
    pub fn bind(&mut self, shortcut: Shortcut) {
        self.0.insert(0, shortcut);
    }
}

/// Resolves key presses to editor actions.
#[derive(Debug, Clone, Default)]
pub struct ShortcutManager {
    keymap: Keymap,
}

impl ShortcutManager {
    pub fn new(keymap: Keymap) -> Self {
        Self { keymap }
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Action bound to a key event. Releases never trigger anything.
    pub fn resolve(&self, event: &KeyEvent) -> Option<ShortcutAction> {
        let KeyEvent::Pressed { key, modifiers } = event else {
            return None;
        };
        self.keymap
            .shortcuts()
            .iter()
            .find(|shortcut| shortcut.matches(key, *modifiers))
            .map(|shortcut| shortcut.action)
    }

    /// Display strings of every shortcut bound to `action`.
    pub fn describe(&self, action: ShortcutAction) -> Vec<String> {
        self.keymap
            .shortcuts()
            .iter()
            .filter(|shortcut| shortcut.action == action)
            .map(Shortcut::format)
            .collect()
    }
}
