//! Error types for the editing engine.

use thiserror::Error;

/// Editor errors.
///
/// Of the [`Editor`](crate::Editor) methods only the constructor returns
/// one; everything else is logged and degraded to a no-op.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Mount target not found: {0}")]
    MissingTarget(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported snapshot version: {0}")]
    UnsupportedSnapshotVersion(u32),
    #[error("Image not available: {0}")]
    UnknownImage(String),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
