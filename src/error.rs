//! Error taxonomy shared by every TimeGuard operation
//!
//! Zone resolution and dataset loading failures are fatal to a single
//! command; per-line validation failures are never surfaced here, they are
//! counted as issues by the validator instead.

use thiserror::Error;

/// Errors that can occur while analyzing civil-time behavior
#[derive(Error, Debug)]
pub enum TimeguardError {
    #[error("parse datetime {input:?}: {}", .attempts.join(" / "))]
    Parse {
        input: String,
        /// One message per attempted layout, in the order they were tried
        attempts: Vec<String>,
    },

    #[error("unknown time zone: {0}")]
    UnknownZone(String),

    #[error("unsupported smear method: {0}")]
    UnsupportedMethod(String),

    #[error("{0} is required")]
    MissingArgument(&'static str),

    #[error("line {line} exceeds the {limit} byte limit")]
    LineTooLong { line: usize, limit: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid dataset: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for TimeGuard operations
pub type Result<T> = std::result::Result<T, TimeguardError>;
