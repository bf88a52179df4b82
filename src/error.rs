//! Error types for the orthocluster library.
//!
//! All fallible operations return [`OrthoError`] through the crate-wide
//! [`Result`] alias. The core algorithms are pure, so none of these errors is
//! transient: retrying with the same input reproduces the same error.
//!
//! # Examples
//!
//! ```
//! use orthocluster::error::{OrthoError, Result};
//!
//! fn lookup(language: &str) -> Result<()> {
//!     Err(OrthoError::unsupported_language(language))
//! }
//!
//! match lookup("xx") {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for orthocluster operations.
#[derive(Error, Debug)]
pub enum OrthoError {
    /// No phonetic rule set is registered under the requested identifier.
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// A character class table is malformed (bad replacement, overlapping classes).
    #[error("Invalid encoding rule: {0}")]
    InvalidEncodingRule(String),

    /// The edit-distance backtrace reached a cell with no consistent move.
    #[error("Internal alignment inconsistency: {0}")]
    InternalAlignmentInconsistency(String),

    /// An item handed to ordered linkage has no weight.
    #[error("Missing weight: {0}")]
    MissingWeight(String),

    /// I/O errors (corpus files, dictionaries, config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with OrthoError.
pub type Result<T> = std::result::Result<T, OrthoError>;

impl OrthoError {
    /// Create a new unsupported language error.
    pub fn unsupported_language<S: Into<String>>(language: S) -> Self {
        OrthoError::UnsupportedLanguage(language.into())
    }

    /// Create a new invalid encoding rule error.
    pub fn invalid_rule<S: Into<String>>(msg: S) -> Self {
        OrthoError::InvalidEncodingRule(msg.into())
    }

    /// Create a new alignment inconsistency error.
    pub fn alignment<S: Into<String>>(msg: S) -> Self {
        OrthoError::InternalAlignmentInconsistency(msg.into())
    }

    /// Create a new missing weight error.
    pub fn missing_weight<S: Into<String>>(item: S) -> Self {
        OrthoError::MissingWeight(item.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        OrthoError::InvalidArgument(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        OrthoError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = OrthoError::unsupported_language("xyz");
        assert_eq!(error.to_string(), "Unsupported language: xyz");

        let error = OrthoError::invalid_rule("replacement 'ab' is too long");
        assert_eq!(
            error.to_string(),
            "Invalid encoding rule: replacement 'ab' is too long"
        );

        let error = OrthoError::invalid_argument("code length must be at least 1");
        assert_eq!(
            error.to_string(),
            "Invalid argument: code length must be at least 1"
        );

        let error = OrthoError::other("empty corpus");
        assert!(matches!(error, OrthoError::Other(_)));
        assert_eq!(error.to_string(), "Error: empty corpus");

        let error = OrthoError::alignment("no move at (2, 3)");
        assert_eq!(
            error.to_string(),
            "Internal alignment inconsistency: no move at (2, 3)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let ortho_error = OrthoError::from(io_error);

        match ortho_error {
            OrthoError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
