//! Error types for unnotion library.

use std::io;
use thiserror::Error;

/// Result type alias for unnotion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting pages.
///
/// Only structural problems with the caller's input surface here. Missing or
/// malformed data inside blocks and properties is resolved to defaults and
/// never produces an error.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The page payload is not a page object.
    #[error("Invalid page payload: {0}")]
    InvalidPage(String),

    /// No block sequence was supplied.
    #[error("Missing block sequence")]
    MissingBlocks,

    /// The block payload is neither a block array nor a list response.
    #[error("Invalid block payload: {0}")]
    InvalidBlocks(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingBlocks;
        assert_eq!(err.to_string(), "Missing block sequence");

        let err = Error::InvalidBlocks("expected an array".into());
        assert_eq!(err.to_string(), "Invalid block payload: expected an array");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
