//! Outbound port (driven port) for the shared key-value store
//!
//! Every method is one indivisible step with respect to other callers touching
//! the same key. Implementations back this with whatever the store offers
//! (server-side scripts, transactions, compare-and-swap); the coordination
//! primitives only rely on the per-key atomicity stated here.

use async_trait::async_trait;

use crate::error::StoreError;

/// Largest bit array a store has to hold. Every bit offset is below this.
///
/// Matches the 512 MiB ceiling of a Redis string.
pub const MAX_BIT_ARRAY_LEN: u64 = 1 << 32;

/// Atomic operations over a shared, network-reachable key space.
#[async_trait]
pub trait AtomicStore: Send + Sync {
    /// Set every bit at `offsets` to 1 in the bit array stored at `key`.
    ///
    /// Creates the array when the key is absent. All bits become visible to
    /// other callers at once.
    async fn set_bits(&self, key: &str, offsets: &[u64]) -> Result<(), StoreError>;

    /// Return true only if every bit at `offsets` is 1.
    ///
    /// An absent key is an all-zero array and yields `Ok(false)`.
    async fn test_bits(&self, key: &str, offsets: &[u64]) -> Result<bool, StoreError>;

    /// Create `key` with `value` and a TTL of `ttl_seconds`, only if it does not
    /// exist. Returns true iff this call created the key.
    async fn set_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<bool, StoreError>;

    /// Delete `key` only if its current value equals `expected`.
    /// Returns true iff a deletion occurred.
    async fn delete_if_equals(&self, key: &str, expected: &str) -> Result<bool, StoreError>;

    /// Remove `key` unconditionally. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Set the TTL of an existing `key`. No-op on an absent key.
    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: AtomicStore + ?Sized> AtomicStore for std::sync::Arc<S> {
    async fn set_bits(&self, key: &str, offsets: &[u64]) -> Result<(), StoreError> {
        (**self).set_bits(key, offsets).await
    }

    async fn test_bits(&self, key: &str, offsets: &[u64]) -> Result<bool, StoreError> {
        (**self).test_bits(key, offsets).await
    }

    async fn set_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<bool, StoreError> {
        (**self).set_if_absent(key, value, ttl_seconds).await
    }

    async fn delete_if_equals(&self, key: &str, expected: &str) -> Result<bool, StoreError> {
        (**self).delete_if_equals(key, expected).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key).await
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<(), StoreError> {
        (**self).expire(key, ttl_seconds).await
    }
}
