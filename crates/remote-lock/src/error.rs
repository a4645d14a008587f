//! Error types for the remote lock

use shared_store::StoreError;
use thiserror::Error;

/// Errors that can occur in lock operations
///
/// Contention is not an error: a lock held by someone else yields `Ok(false)`.
#[derive(Debug, Error)]
pub enum LockError {
    #[error("Lock key must not be empty")]
    EmptyKey,

    #[error("Invalid lock parameters: {0}")]
    InvalidParameters(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
