//! Error types for the docgen library.

use std::io;
use thiserror::Error;

use crate::validate::ValidationFailure;

/// Result type alias for docgen operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while configuring or rendering documents.
///
/// The content model and builder never produce errors: malformed style values and
/// mismatched column widths are defaulted in place. Errors only come from opt-in
/// validation, configuration loading and renderers.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when writing rendered output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Invalid font defaults or other configuration input.
    #[error("Configuration error: {0}")]
    Config(String),

    /// One or more body sections failed validation.
    #[error("Validation failed with {} error(s): {}", .0.len(), join_failures(.0))]
    Validation(Vec<ValidationFailure>),

    /// No renderer exists for the requested output format.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

fn join_failures(failures: &[ValidationFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedFormat("rtf".to_string());
        assert_eq!(err.to_string(), "Unsupported output format: rtf");

        let err = Error::Validation(vec![
            ValidationFailure::new("title", "Title cannot be empty."),
            ValidationFailure::new("hierarchy_level", "out of range"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed with 2 error(s): title: Title cannot be empty.; hierarchy_level: out of range"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Config(_)));
    }
}
