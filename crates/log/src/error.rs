//! Event log error types

use thiserror::Error;

/// Errors raised by event log stores
#[derive(Debug, Error)]
pub enum LogError {
    /// File system failure
    #[error("event log io: {0}")]
    Io(#[from] std::io::Error),

    /// A stored line did not parse as a record
    #[error("malformed record at line {line}: {source}")]
    Decode {
        /// One-based line number in the store file
        line: usize,
        /// Parse failure
        #[source]
        source: serde_json::Error,
    },

    /// A record failed to serialize
    #[error("encode record: {0}")]
    Encode(#[from] serde_json::Error),

    /// A payload failed validation on append
    #[error(transparent)]
    Payload(#[from] docket_core::CoreError),
}

/// Result alias for log operations
pub type Result<T> = std::result::Result<T, LogError>;
