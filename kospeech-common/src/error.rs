//! Common error types for the kospeech tools

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for kospeech operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the kospeech tools
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed sibling JSON annotation
    #[error("Malformed annotation {}: {source}", .path.display())]
    Annotation {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Metadata line with unexpected shape
    #[error("Malformed metadata line: {0}")]
    MetadataLine(String),

    /// Attribute code outside the corpus code set
    #[error("Unknown attribute code: {0}")]
    UnknownCode(String),

    /// Two manifest entries claimed the same identifier
    #[error("Duplicate manifest id: {0}")]
    DuplicateId(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
