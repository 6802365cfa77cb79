//! Error types for the TransSpell library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`TransSpellError`] enum.
//!
//! # Examples
//!
//! ```
//! use transspell::error::{Result, TransSpellError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TransSpellError::invalid_config("candidate_count must be positive"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for TransSpell operations.
#[derive(Error, Debug)]
pub enum TransSpellError {
    /// I/O errors (file operations, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Corpus-related errors (unreadable or malformed corpus files)
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Dictionary-related errors (missing or unparsable word lists)
    #[error("Dictionary error: {0}")]
    Dictionary(String),

    /// Language model errors (loading, encoding, inference, decoding)
    #[error("Model error: {0}")]
    Model(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

}

/// Result type alias for operations that may fail with TransSpellError.
pub type Result<T> = std::result::Result<T, TransSpellError>;

impl TransSpellError {
    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        TransSpellError::Corpus(msg.into())
    }

    /// Create a new dictionary error.
    pub fn dictionary<S: Into<String>>(msg: S) -> Self {
        TransSpellError::Dictionary(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        TransSpellError::Model(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        TransSpellError::Config(msg.into())
    }

    /// Create an error for functionality compiled out of this build.
    pub fn missing_feature(feature: &str, what: &str) -> Self {
        TransSpellError::Model(format!(
            "{what} requires the `{feature}` feature; rebuild with `--features {feature}`"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = TransSpellError::corpus("missing column");
        assert_eq!(error.to_string(), "Corpus error: missing column");

        let error = TransSpellError::dictionary("en_US.aff not found");
        assert_eq!(error.to_string(), "Dictionary error: en_US.aff not found");

        let error = TransSpellError::model("no mask token");
        assert_eq!(error.to_string(), "Model error: no mask token");
    }

    #[test]
    fn test_every_variant_names_its_source() {
        let errors = [
            TransSpellError::from(io::Error::other("disk")),
            TransSpellError::corpus("c"),
            TransSpellError::dictionary("d"),
            TransSpellError::model("m"),
            TransSpellError::invalid_config("x"),
            TransSpellError::from(serde_json::from_str::<u32>("?").unwrap_err()),
        ];

        for error in errors {
            let prefix = match &error {
                TransSpellError::Io(_) => "I/O error",
                TransSpellError::Corpus(_) => "Corpus error",
                TransSpellError::Dictionary(_) => "Dictionary error",
                TransSpellError::Model(_) => "Model error",
                TransSpellError::Config(_) => "Configuration error",
                TransSpellError::Csv(_) => "CSV error",
                TransSpellError::Json(_) => "JSON error",
            };
            assert!(error.to_string().starts_with(prefix));
        }
    }

    #[test]
    fn test_missing_feature_message() {
        let error = TransSpellError::missing_feature("candle", "distilbert-base-cased");
        let message = error.to_string();
        assert!(message.contains("`candle`"));
        assert!(message.contains("distilbert-base-cased"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = TransSpellError::from(io_error);

        match error {
            TransSpellError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
