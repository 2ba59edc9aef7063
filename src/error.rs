//! Error types for loading type registries and writing navigation output.
//!
//! Tree construction itself does not return errors: a broken tree
//! invariant means the upstream descriptor source is malformed, and the
//! [NavTree](crate::model::NavTree) operations panic right away instead of
//! producing a partial tree. See the `# Panics` sections there.

use thiserror::Error;

/// Result type alias for fallible operations of this crate
pub type NavResult<T> = Result<T, NavError>;

/// Errors at the crate boundary (files, JSON, scripts).
#[derive(Error, Debug)]
pub enum NavError {
    /// Reading or writing a file failed
    #[error("IO error - {0}")]
    Io(#[from] std::io::Error),

    /// Registry JSON is malformed or has the wrong shape
    #[error("invalid type registry - {0}")]
    Json(#[from] serde_json::Error),

    /// Registry script does not contain the expected assignment
    #[error("invalid type registry script - {0}")]
    InvalidScript(String),

    /// A type entry carries neither a qualified name nor a name
    #[error("type without name in type registry - href '{0}'")]
    MissingName(String),
}
