//! Error types for asmwatch
//!
//! Uses `thiserror` for library errors; the binary boundary wraps these in
//! `anyhow::Result`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for asmwatch operations
pub type AsmwatchResult<T> = Result<T, AsmwatchError>;

/// Main error type for asmwatch operations
#[derive(Error, Debug)]
pub enum AsmwatchError {
    /// Could not stat the watched file
    #[error("cannot stat {path}: {source}")]
    Stat {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The external compiler could not be started or exited non-zero.
    /// The detail carries the compiler's own diagnostic (stderr/exit status).
    #[error("compile failed: {detail}")]
    Compile { detail: String },

    /// The intermediate assembly file was unreadable after a successful
    /// compile - an environment problem, not a source-code problem
    #[error("cannot read assembly output {path}: {source}")]
    AsmRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid configuration file
    #[error("invalid config {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
