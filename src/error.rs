//! Error types for the Partisan library.
//!
//! All errors are represented by the [`PartisanError`] enum. The only failure
//! that never reaches a caller is a single token the lemmatizer rejects; the
//! normalizer records it as a skipped outcome instead.
//!
//! # Examples
//!
//! ```
//! use partisan::error::{PartisanError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(PartisanError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Partisan operations.
#[derive(Error, Debug)]
pub enum PartisanError {
    /// I/O errors (reading datasets or configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV decoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Analysis-related errors (tokenization, tagging, lemmatization)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// A model was used before it was fitted
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Missing field or mismatched shape
    #[error("Field error: {0}")]
    Field(String),

    /// Kernel name not known to the SVM solver
    #[error("Unsupported kernel: {0}")]
    UnsupportedKernel(String),

    /// The SVM solver could not train on the given data
    #[error("Solver error: {0}")]
    Solver(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Ad-hoc errors raised with `anyhow!`
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with PartisanError.
pub type Result<T> = std::result::Result<T, PartisanError>;

impl PartisanError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        PartisanError::Analysis(msg.into())
    }

    /// Create a new invalid state error.
    pub fn invalid_state<S: Into<String>>(msg: S) -> Self {
        PartisanError::InvalidState(msg.into())
    }

    /// Create a new field error.
    pub fn field<S: Into<String>>(msg: S) -> Self {
        PartisanError::Field(msg.into())
    }

    /// Create a new unsupported kernel error.
    pub fn unsupported_kernel<S: Into<String>>(name: S) -> Self {
        PartisanError::UnsupportedKernel(name.into())
    }

    /// Create a new solver error.
    pub fn solver<S: Into<String>>(msg: S) -> Self {
        PartisanError::Solver(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        PartisanError::InvalidArgument(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        PartisanError::Config(msg.into())
    }
}
