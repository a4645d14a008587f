//! In-memory atomic store for development and testing.
//!
//! A single mutex guards the whole key space, so every operation is
//! indivisible with respect to every other one. Expiration is lazy: an
//! expired entry is dropped the next time its key is touched.
//!
//! Time is read from `tokio::time::Instant`, which lets tests drive TTL
//! expiry with a paused clock.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use bitvec::prelude::*;
use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::trace;

use crate::error::StoreError;
use crate::ports::{AtomicStore, MAX_BIT_ARRAY_LEN};

enum StoredValue {
    Bits(BitVec<u8, Lsb0>),
    Text(String),
}

struct Entry {
    value: StoredValue,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| deadline <= now)
    }
}

/// Process-local [`AtomicStore`] backed by a `HashMap`.
#[derive(Default)]
pub struct InMemoryAtomicStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryAtomicStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` currently holds a live (unexpired) value.
    pub fn contains_key(&self, key: &str) -> bool {
        let mut entries = self.entries.lock();
        purge_expired(&mut entries, key, Instant::now());
        entries.contains_key(key)
    }

    /// Time left before `key` expires, or `None` if it is absent or has no TTL.
    pub fn remaining_ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        purge_expired(&mut entries, key, now);
        entries
            .get(key)
            .and_then(|entry| entry.expires_at)
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Current string value under `key`, if any.
    pub fn get_text(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock();
        purge_expired(&mut entries, key, Instant::now());
        match entries.get(key).map(|entry| &entry.value) {
            Some(StoredValue::Text(value)) => Some(value.clone()),
            _ => None,
        }
    }

    /// Number of bits set to 1 under `key` (0 for absent or non-bit keys).
    pub fn count_ones(&self, key: &str) -> usize {
        let mut entries = self.entries.lock();
        purge_expired(&mut entries, key, Instant::now());
        match entries.get(key).map(|entry| &entry.value) {
            Some(StoredValue::Bits(bits)) => bits.count_ones(),
            _ => 0,
        }
    }
}

fn purge_expired(entries: &mut HashMap<String, Entry>, key: &str, now: Instant) {
    if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
        trace!(key = %key, "Dropping expired entry");
        entries.remove(key);
    }
}

fn to_index(offset: u64) -> Result<usize, StoreError> {
    let out_of_range = || StoreError::Command(format!("bit offset {} is out of range", offset));
    if offset >= MAX_BIT_ARRAY_LEN {
        return Err(out_of_range());
    }
    usize::try_from(offset).map_err(|_| out_of_range())
}

fn ttl_deadline(ttl_seconds: u64, now: Instant) -> Result<Instant, StoreError> {
    if ttl_seconds == 0 {
        return Err(StoreError::Command("invalid expire time".to_string()));
    }
    Ok(now + Duration::from_secs(ttl_seconds))
}

#[async_trait]
impl AtomicStore for InMemoryAtomicStore {
    async fn set_bits(&self, key: &str, offsets: &[u64]) -> Result<(), StoreError> {
        let indices = offsets
            .iter()
            .map(|&offset| to_index(offset))
            .collect::<Result<Vec<_>, _>>()?;

        let mut entries = self.entries.lock();
        purge_expired(&mut entries, key, Instant::now());

        let entry = entries.entry(key.to_string()).or_insert_with(|| Entry {
            value: StoredValue::Bits(BitVec::new()),
            expires_at: None,
        });

        match &mut entry.value {
            StoredValue::Bits(bits) => {
                for idx in indices {
                    if idx >= bits.len() {
                        bits.resize(idx + 1, false);
                    }
                    bits.set(idx, true);
                }
                Ok(())
            }
            StoredValue::Text(_) => Err(StoreError::WrongType {
                key: key.to_string(),
            }),
        }
    }

    async fn test_bits(&self, key: &str, offsets: &[u64]) -> Result<bool, StoreError> {
        let indices = offsets
            .iter()
            .map(|&offset| to_index(offset))
            .collect::<Result<Vec<_>, _>>()?;

        let mut entries = self.entries.lock();
        purge_expired(&mut entries, key, Instant::now());

        match entries.get(key).map(|entry| &entry.value) {
            None => Ok(false),
            Some(StoredValue::Bits(bits)) => Ok(indices
                .iter()
                .all(|&idx| bits.get(idx).map_or(false, |bit| *bit))),
            Some(StoredValue::Text(_)) => Err(StoreError::WrongType {
                key: key.to_string(),
            }),
        }
    }

    async fn set_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<bool, StoreError> {
        let now = Instant::now();
        let deadline = ttl_deadline(ttl_seconds, now)?;

        let mut entries = self.entries.lock();
        purge_expired(&mut entries, key, now);

        if entries.contains_key(key) {
            return Ok(false);
        }

        entries.insert(
            key.to_string(),
            Entry {
                value: StoredValue::Text(value.to_string()),
                expires_at: Some(deadline),
            },
        );
        Ok(true)
    }

    async fn delete_if_equals(&self, key: &str, expected: &str) -> Result<bool, StoreError> {
        let mut entries = self.entries.lock();
        purge_expired(&mut entries, key, Instant::now());

        // A bit array never equals a token.
        let matches = matches!(
            entries.get(key).map(|entry| &entry.value),
            Some(StoredValue::Text(current)) if current == expected
        );

        if matches {
            entries.remove(key);
        }
        Ok(matches)
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().remove(key);
        Ok(())
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<(), StoreError> {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        purge_expired(&mut entries, key, now);

        if ttl_seconds == 0 {
            // A zero TTL expires the key immediately.
            entries.remove(key);
            return Ok(());
        }

        if let Some(entry) = entries.get_mut(key) {
            entry.expires_at = Some(now + Duration::from_secs(ttl_seconds));
        }
        Ok(())
    }
}
