//! Reentrant Lock Service
//!
//! Mutual exclusion across processes through a single store key whose value
//! is this instance's token. Nested acquires on the same instance are counted
//! locally and never touch the network; only the outermost acquire writes the
//! key and only the outermost release deletes it.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use rand::Rng;
use shared_store::AtomicStore;
use tracing::{debug, error, warn};

use crate::domain::{LockConfig, LockToken, ReentrancyCounter};
use crate::error::LockError;

/// Distributed lock with in-process reentrancy.
///
/// Two instances are independent contenders even inside one process: the
/// token, not the process, owns the key. Acquisition is a single non-blocking
/// attempt; retry policy belongs to the caller.
pub struct ReentrantLock<S: AtomicStore + ?Sized> {
    store: Arc<S>,
    key: String,
    token: LockToken,
    ttl_seconds: AtomicU32,
    slack_seconds: u32,
    count: ReentrancyCounter,
}

/// Undoes an outermost `enter` unless the acquire completed.
struct EnterGuard<'a> {
    counter: &'a ReentrancyCounter,
    armed: bool,
}

impl Drop for EnterGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.counter.leave();
        }
    }
}

impl<S: AtomicStore + ?Sized> ReentrantLock<S> {
    /// Create a lock on `key` with the default TTL and a token from the
    /// thread RNG.
    pub fn new(store: Arc<S>, key: impl Into<String>) -> Result<Self, LockError> {
        Self::from_config(store, LockConfig::new(key)?)
    }

    pub fn from_config(store: Arc<S>, config: LockConfig) -> Result<Self, LockError> {
        Self::with_token(store, config, LockToken::random())
    }

    /// Create a lock whose token is drawn from `rng`.
    pub fn with_token_source<R: Rng>(
        store: Arc<S>,
        config: LockConfig,
        rng: &mut R,
    ) -> Result<Self, LockError> {
        Self::with_token(store, config, LockToken::generate(rng))
    }

    fn with_token(store: Arc<S>, config: LockConfig, token: LockToken) -> Result<Self, LockError> {
        config.validate()?;
        Ok(Self {
            store,
            key: config.key,
            token,
            ttl_seconds: AtomicU32::new(config.ttl_seconds),
            slack_seconds: config.slack_seconds,
            count: ReentrancyCounter::new(),
        })
    }

    /// Try once to take the lock.
    ///
    /// Returns `Ok(true)` if this instance now holds the lock (nested calls
    /// succeed immediately), `Ok(false)` if another holder has it.
    pub async fn acquire(&self) -> Result<bool, LockError> {
        if self.count.enter() > 1 {
            return Ok(true);
        }

        let mut guard = EnterGuard {
            counter: &self.count,
            armed: true,
        };

        let ttl =
            u64::from(self.ttl_seconds.load(Ordering::Acquire)) + u64::from(self.slack_seconds);
        match self
            .store
            .set_if_absent(&self.key, self.token.as_str(), ttl)
            .await
        {
            Ok(true) => {
                guard.armed = false;
                debug!(key = %self.key, ttl_seconds = ttl, "Acquired lock");
                Ok(true)
            }
            Ok(false) => {
                debug!(key = %self.key, "Lock is held by another owner");
                Ok(false)
            }
            Err(err) => {
                error!(key = %self.key, error = %err, "Error on acquiring lock");
                Err(err.into())
            }
        }
    }

    /// Release one level of the lock.
    ///
    /// Nested releases return `Ok(true)` without a network call. The outermost
    /// release deletes the key only if it still carries this instance's token
    /// and returns whether a deletion happened.
    pub async fn release(&self) -> Result<bool, LockError> {
        match self.count.leave() {
            None => {
                warn!(key = %self.key, "Release without a matching acquire");
                return Ok(false);
            }
            Some(depth) if depth > 0 => return Ok(true),
            Some(_) => {}
        }

        match self
            .store
            .delete_if_equals(&self.key, self.token.as_str())
            .await
        {
            Ok(true) => {
                debug!(key = %self.key, "Released lock");
                Ok(true)
            }
            Ok(false) => {
                warn!(key = %self.key, "Lock expired or changed owner before release");
                Ok(false)
            }
            Err(err) => {
                error!(key = %self.key, error = %err, "Error on releasing lock");
                Err(err.into())
            }
        }
    }

    /// Set the hold time for the next outermost acquire.
    ///
    /// A key that is already held keeps the TTL it was written with.
    pub fn set_expire(&self, seconds: u32) {
        self.ttl_seconds.store(seconds, Ordering::Release);
    }

    pub fn expire_seconds(&self) -> u32 {
        self.ttl_seconds.load(Ordering::Acquire)
    }

    /// Current local nesting depth.
    pub fn hold_count(&self) -> u32 {
        self.count.depth()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn token(&self) -> &LockToken {
        &self.token
    }
}
