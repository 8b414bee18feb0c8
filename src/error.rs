//! Error types for the benchmark harness

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running a benchmark
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend selection out of the registry's range
    #[error("no backend at index {index}: valid range is [0, {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Backend failed during its one-time load phase
    #[error("backend '{backend}' failed to load: {message}")]
    Load { backend: String, message: String },

    /// Backend failed while parsing a document
    #[error("backend '{backend}' failed on {file}: {message}")]
    Parse {
        backend: String,
        file: PathBuf,
        message: String,
    },

    /// Probe contract violation (double stop, or diff read before stop)
    #[error("probe misuse: {0}")]
    ProbeMisuse(&'static str),

    /// Memory snapshot could not be taken
    #[error("probe error: {0}")]
    Probe(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
