//! Chart error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while configuring a chart or loading snapshot records.
///
/// Rendering and playback never fail; only the input boundary does.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChartError {
    /// Configuration values are out of range
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the rejected value
        message: String,
    },

    /// JSON input could not be parsed
    #[error("Deserialization error: {message}")]
    DeserializationError {
        /// Underlying error message
        message: String,
    },

    /// A snapshot record is not a JSON object
    #[error("Invalid record at index {index}: {message}")]
    InvalidRecord {
        /// Position of the record in the input sequence
        index: usize,
        /// Description of the problem
        message: String,
    },

    /// Reading a records file failed
    #[error("I/O error on {path:?}: {message}")]
    Io {
        /// The file that could not be read
        path: PathBuf,
        /// Underlying error message
        message: String,
    },
}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        ChartError::DeserializationError {
            message: err.to_string(),
        }
    }
}
