//! Error types for the atomic store boundary

use thiserror::Error;

/// Errors surfaced by an [`AtomicStore`](crate::AtomicStore) implementation.
///
/// Callers never see these retried: whatever the store client reports is
/// propagated as-is, and retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timeout")]
    Timeout,

    #[error("Command failed: {0}")]
    Command(String),

    #[error("Wrong value type stored under key {key}")]
    WrongType { key: String },

    #[error("Unrecognized response to {operation}: {detail}")]
    UnrecognizedResponse {
        operation: &'static str,
        detail: String,
    },
}

impl StoreError {
    /// Whether the failure happened below the protocol layer (network, timeout).
    pub fn is_transport(&self) -> bool {
        matches!(self, StoreError::Connection(_) | StoreError::Timeout)
    }
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_timeout() {
            StoreError::Timeout
        } else if err.is_connection_dropped() || err.is_connection_refusal() || err.is_io_error() {
            StoreError::Connection(err.to_string())
        } else if err.kind() == redis::ErrorKind::TypeError {
            StoreError::UnrecognizedResponse {
                operation: "redis",
                detail: err.to_string(),
            }
        } else {
            StoreError::Command(err.to_string())
        }
    }
}
