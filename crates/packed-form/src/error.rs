// File: src/error.rs
// Purpose: Build-time error taxonomy

use std::path::PathBuf;

/// Errors raised while loading or assembling a form
///
/// Per-field validation failures are not errors of this kind; they are
/// collected into [`crate::ValidationErrors`] and never abort anything.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Unsupported field type: {0}")]
    UnsupportedFieldKind(String),

    #[error("Invalid bounds for field `{field}`: {reason}")]
    InvalidBounds { field: String, reason: String },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Failed to parse JSON form definition: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse TOML form definition: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported definition format: {0:?} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),
}

pub type Result<T> = std::result::Result<T, FormError>;
