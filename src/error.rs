//! Crate-wide error type.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the ruler core and its collaborators.
#[derive(Debug, Error)]
pub enum RulerError {
    /// A colour string was not `#rgb` or `#rrggbb`.
    #[error("invalid ruler colour {0:?}")]
    InvalidColor(String),

    /// The rendering surface refused an operation.
    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),

    /// Reading or writing a preference or config file failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A preference or config document was not valid JSON.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored preference had an unexpected type.
    #[error("preference {key:?} has unexpected type (expected {expected})")]
    PreferenceType { key: String, expected: &'static str },
}

/// Failures reported by a [`crate::surface::Surface`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The page does not allow the requested mutation.
    #[error("operation {0} is not permitted on this page")]
    NotPermitted(&'static str),

    /// The page context is gone (navigated away, torn down).
    #[error("page context detached")]
    Detached,

    /// Host-specific failure.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RulerError>;
