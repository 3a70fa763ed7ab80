//! Editor configuration.

use crate::drawer::DrawerOptions;
use crate::error::EditorResult;
use crate::shortcuts::Keymap;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunable constants of the editor. Every field has a default, so a
/// partial JSON document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Mount target holding the drawing canvas.
    pub canvas_target: String,
    /// Mount target whose size defines the viewport.
    pub workspace_target: String,
    /// Maximum number of undo entries.
    pub history_capacity: usize,
    /// Subtracted from the fit-to-view scale so the surface never touches the edges.
    pub fit_margin: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom multiplier per unit of wheel delta.
    pub wheel_zoom_base: f64,
    /// Offset applied to pasted shapes, in logical units.
    pub paste_offset: Vec2,
    /// Minimum spacing between two workspace fits during a resize burst.
    pub resize_throttle_ms: u64,
    /// Style applied to newly drawn shapes.
    pub drawer: DrawerOptions,
    pub keymap: Keymap,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_target: "canvas".to_string(),
            workspace_target: "workspace".to_string(),
            history_capacity: 100,
            fit_margin: 0.03,
            min_zoom: 0.01,
            max_zoom: 20.0,
            wheel_zoom_base: 0.999,
            paste_offset: Vec2::new(15.0, 15.0),
            resize_throttle_ms: 100,
            drawer: DrawerOptions::default(),
            keymap: Keymap::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn resize_throttle(&self) -> Duration {
        Duration::from_millis(self.resize_throttle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.history_capacity, 100);
        assert!((config.fit_margin - 0.03).abs() < f64::EPSILON);
        assert_eq!(config.paste_offset, Vec2::new(15.0, 15.0));
        assert_eq!(config.resize_throttle(), Duration::from_millis(100));
        assert!((config.drawer.stroke_width - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{"history_capacity": 10, "drawer": {"stroke_width": 2.0}}"#;
        let config = EditorConfig::from_json(json).unwrap();
        assert_eq!(config.history_capacity, 10);
        assert!((config.drawer.stroke_width - 2.0).abs() < f64::EPSILON);
        assert!(config.drawer.stroke_uniform);
        assert_eq!(config.canvas_target, "canvas");
        assert!(!config.keymap.shortcuts().is_empty());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = EditorConfig {
            max_zoom: 8.0,
            ..EditorConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(EditorConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(EditorConfig::from_json("{ not json").is_err());
    }
}
