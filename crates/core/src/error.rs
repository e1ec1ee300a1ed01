//! Core error types

use thiserror::Error;

/// Errors raised by the core payload and record types
#[derive(Debug, Error)]
pub enum CoreError {
    /// Payload root was not an object
    #[error("payload root must be an object, got {0}")]
    PayloadNotObject(&'static str),

    /// A float in the payload is NaN or infinite
    #[error("payload contains a non-finite float at '{0}'")]
    NonFiniteFloat(String),
}

/// Result alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
