//! Error types for packaging operations.

use thiserror::Error;

/// Errors that can occur while assembling or inspecting packages.
#[derive(Debug, Error)]
pub enum PackageError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// ZIP archive error.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Metadata validation error.
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// Missing required file in a package.
    #[error("Missing required file: {0}")]
    MissingFile(String),
}
