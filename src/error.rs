//! Error types for the skos-analysis library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`SkosError`] enum. Absent concepts, labels and relations are never errors:
//! lookups report them as empty results.
//!
//! # Examples
//!
//! ```
//! use skos_analysis::error::{Result, SkosError};
//!
//! fn pick_format(name: &str) -> Result<()> {
//!     Err(SkosError::format(format!("unsupported serialization '{name}'")))
//! }
//!
//! assert!(pick_format("JSON-LD").is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for skos-analysis operations.
#[derive(Error, Debug)]
pub enum SkosError {
    /// I/O errors (unreadable vocabulary files, config files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported RDF serialization format
    #[error("Format error: {0}")]
    Format(String),

    /// Malformed vocabulary source
    #[error("Parse error: {0}")]
    Parse(String),

    /// Failure while processing a token stream
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Failure of the underlying concept source
    #[error("Store error: {0}")]
    Store(String),

    /// Invalid configuration values
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with SkosError.
pub type Result<T> = std::result::Result<T, SkosError>;

impl SkosError {
    /// Create a new format error.
    pub fn format<S: Into<String>>(msg: S) -> Self {
        SkosError::Format(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        SkosError::Parse(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SkosError::Analysis(msg.into())
    }

    /// Create a new store error.
    pub fn store<S: Into<String>>(msg: S) -> Self {
        SkosError::Store(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SkosError::Config(msg.into())
    }
}
