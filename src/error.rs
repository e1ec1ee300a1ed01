//! Unified error types for Docket.
//!
//! This module provides a clean error type that wraps internal errors
//! and presents a consistent interface to users.

use thiserror::Error;

/// All Docket errors.
///
/// This is the canonical error type for all Docket operations.
/// It provides a clean, stable interface that hides internal error details.
#[derive(Debug, Error)]
pub enum Error {
    /// Rule-set configuration rejected at build time
    #[error("invalid rule set: {0}")]
    Registry(String),

    /// A payload node a rule owns does not carry its mandatory fields
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Published log does not line up with the configured resume point
    #[error("sequence corrupt: {0}")]
    SequenceCorrupt(String),

    /// Malformed stored record or document text
    #[error("decode error: {0}")]
    Decode(String),

    /// Payload violates the canonical document rules
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for Docket operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error points at the source data rather than the engine.
    ///
    /// Shape mismatches and decode failures mean a stored record needs
    /// fixing; rerunning without touching the data will fail the same way.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Error::ShapeMismatch(_) | Error::Decode(_) | Error::InvalidPayload(_)
        )
    }

    /// Check if this is a rule-set configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Registry(_))
    }

    /// Check if this is a shape-mismatch error.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Error::ShapeMismatch(_))
    }

    /// Check if the published log disagrees with the resume point.
    pub fn is_sequence_corrupt(&self) -> bool {
        matches!(self, Error::SequenceCorrupt(_))
    }
}

// Convert from internal core errors
impl From<docket_core::CoreError> for Error {
    fn from(e: docket_core::CoreError) -> Self {
        Error::InvalidPayload(e.to_string())
    }
}

// Convert from wire codec errors
impl From<docket_wire::DecodeError> for Error {
    fn from(e: docket_wire::DecodeError) -> Self {
        Error::Decode(e.to_string())
    }
}

impl From<docket_wire::EncodeError> for Error {
    fn from(e: docket_wire::EncodeError) -> Self {
        Error::Serialization(e.to_string())
    }
}

// Convert from rule-set errors
impl From<docket_transform::RegistryError> for Error {
    fn from(e: docket_transform::RegistryError) -> Self {
        Error::Registry(e.to_string())
    }
}

impl From<docket_transform::PatternError> for Error {
    fn from(e: docket_transform::PatternError) -> Self {
        Error::Registry(e.to_string())
    }
}

impl From<docket_transform::TransformError> for Error {
    fn from(e: docket_transform::TransformError) -> Self {
        Error::ShapeMismatch(e.to_string())
    }
}

// Convert from log store errors
impl From<docket_log::LogError> for Error {
    fn from(e: docket_log::LogError) -> Self {
        use docket_log::LogError;
        match e {
            LogError::Io(io_err) => Error::Io(io_err),
            decode @ LogError::Decode { .. } => Error::Decode(decode.to_string()),
            LogError::Encode(err) => Error::Serialization(err.to_string()),
            LogError::Payload(core_err) => core_err.into(),
        }
    }
}

// Convert from run driver errors
impl From<docket_runner::RunnerError> for Error {
    fn from(e: docket_runner::RunnerError) -> Self {
        use docket_runner::RunnerError;
        match e {
            RunnerError::Log(log_err) => log_err.into(),
            RunnerError::Transform { event_id, source } => {
                Error::ShapeMismatch(format!("event {}: {}", event_id, source))
            }
            corrupt @ RunnerError::SequenceCorrupt { .. } => {
                Error::SequenceCorrupt(corrupt.to_string())
            }
        }
    }
}
