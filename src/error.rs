//! Error types for the pack generator.

use thiserror::Error;

/// Result type alias using GenError.
pub type Result<T> = std::result::Result<T, GenError>;

/// Main error type for resourcepack generation.
#[derive(Error, Debug)]
pub enum GenError {
    /// Failed to read or write a ZIP archive.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Failed to parse or write JSON data.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to decode or encode an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required input file or directory is missing.
    #[error("Missing required input: {0}")]
    MissingInput(String),

    /// The overrides file failed validation.
    #[error("Invalid overrides: {0}")]
    InvalidOverrides(String),

    /// A sidecar descriptor could not be interpreted.
    #[error("Invalid sidecar {path}: {reason}")]
    InvalidSidecar { path: String, reason: String },

    /// No rounding masks were found where at least one is required.
    #[error("No rounding masks found in {0}")]
    NoMasks(String),
}

impl GenError {
    /// True for failures that skip a single texture instead of aborting
    /// the batch (decode/encode and file I/O problems).
    pub fn is_per_texture(&self) -> bool {
        matches!(self, GenError::Image(_) | GenError::Io(_))
    }
}
