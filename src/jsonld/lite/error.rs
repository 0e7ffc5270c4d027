use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, JsonLdError>;

/// Error type covering the failure cases that can occur when the tool loads
/// stored state or serialises the finished document.
///
/// Degraded content is deliberately not represented here: an unusable
/// testimonial record, malformed services JSON, or an unresolvable image
/// reference all shrink the output instead of failing the render.
#[derive(Debug, Error)]
pub enum JsonLdError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
