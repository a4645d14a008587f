//! Membership Filter Service
//!
//! A Bloom filter whose bit array lives in the shared store. Offsets are
//! computed locally; each `add`/`exists` is a single atomic store call, so no
//! caller can observe half of another caller's insert.

use std::sync::Arc;

use shared_store::AtomicStore;
use tracing::debug;

use crate::domain::hash_functions::probe_locations;
use crate::domain::parameters::false_positive_rate;
use crate::domain::{FilterConfig, FilterConfigBuilder};
use crate::error::FilterError;

/// Probabilistic set membership over a remote bit array.
///
/// Holds configuration only; the store is the single source of truth for the
/// bits. No false negatives, occasional false positives.
pub struct MembershipFilter<S: AtomicStore + ?Sized> {
    store: Arc<S>,
    config: FilterConfig,
}

impl<S: AtomicStore + ?Sized> MembershipFilter<S> {
    /// Create a filter over `bits` bits at `key`, with the default 14 probes.
    pub fn new(store: Arc<S>, key: impl Into<String>, bits: u64) -> Result<Self, FilterError> {
        Self::from_config(store, FilterConfig::new(key, bits)?)
    }

    /// Create a filter sized for `expected_elements` distinct values.
    pub fn with_capacity(
        store: Arc<S>,
        key: impl Into<String>,
        expected_elements: u64,
    ) -> Result<Self, FilterError> {
        let config = FilterConfigBuilder::new()
            .key(key)
            .expected_elements(expected_elements)
            .build()?;
        Self::from_config(store, config)
    }

    pub fn from_config(store: Arc<S>, config: FilterConfig) -> Result<Self, FilterError> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// Record `value` as seen.
    ///
    /// After this returns `Ok`, `exists(value)` returns true until the key is
    /// deleted or expires.
    pub async fn add(&self, value: &[u8]) -> Result<(), FilterError> {
        let offsets = self.locations(value)?;
        self.store.set_bits(&self.config.key, &offsets).await?;
        debug!(key = %self.config.key, probes = offsets.len(), "Added value to filter");
        Ok(())
    }

    /// Whether `value` may have been added.
    ///
    /// `false` is definitive. `true` may be a false positive. A key that was
    /// never populated reads as empty.
    pub async fn exists(&self, value: &[u8]) -> Result<bool, FilterError> {
        let offsets = self.locations(value)?;
        let present = self.store.test_bits(&self.config.key, &offsets).await?;
        debug!(key = %self.config.key, present, "Checked filter membership");
        Ok(present)
    }

    /// Remove the bit array.
    pub async fn delete(&self) -> Result<(), FilterError> {
        self.store.delete(&self.config.key).await?;
        Ok(())
    }

    /// Set the bit array's TTL. Lifetime management is up to the caller.
    pub async fn expire(&self, ttl_seconds: u64) -> Result<(), FilterError> {
        self.store.expire(&self.config.key, ttl_seconds).await?;
        Ok(())
    }

    /// Probe offsets for `value`, checked against the array size.
    pub fn locations(&self, value: &[u8]) -> Result<Vec<u64>, FilterError> {
        let bits = self.config.bits;
        let offsets = probe_locations(value, self.config.probes, bits)?;

        if let Some(&offset) = offsets.iter().find(|&&offset| offset >= bits) {
            return Err(FilterError::OffsetOutOfRange { offset, bits });
        }
        Ok(offsets)
    }

    /// Expected false positive rate once `elements` distinct values are added.
    pub fn estimated_false_positive_rate(&self, elements: u64) -> f64 {
        false_positive_rate(self.config.bits, elements, self.config.probes)
    }

    pub fn key(&self) -> &str {
        &self.config.key
    }

    pub fn bits(&self) -> u64 {
        self.config.bits
    }

    pub fn probes(&self) -> usize {
        self.config.probes
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }
}
