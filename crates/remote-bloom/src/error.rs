//! Error types for the remote membership filter

use shared_store::StoreError;
use thiserror::Error;

/// Errors that can occur in membership filter operations
///
/// Every variant except `Store` is a local configuration problem and is
/// raised before anything is sent to the store.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Bit count must be greater than 0")]
    ZeroBits,

    #[error("Bit count {bits} exceeds the store limit of {max}")]
    TooManyBits { bits: u64, max: u64 },

    #[error("Invalid probe count: {probes} (must be between 1 and {max})")]
    InvalidProbeCount { probes: usize, max: usize },

    #[error("Offset {offset} is out of range for a {bits}-bit array")]
    OffsetOutOfRange { offset: u64, bits: u64 },

    #[error("Filter key must not be empty")]
    EmptyKey,

    #[error("Invalid filter parameters: {0}")]
    InvalidParameters(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl FilterError {
    /// Whether this error was raised locally, without contacting the store.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, FilterError::Store(_))
    }
}
