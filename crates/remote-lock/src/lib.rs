//! # Remote Lock
//!
//! A mutual-exclusion lock over a shared key-value store, reentrant within
//! one lock instance.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`):
//!   - `LockToken`: 16-character random owner id, drawn from an injectable RNG
//!   - `ReentrancyCounter`: local nesting depth, never below zero
//!   - `LockConfig` / `LockConfigBuilder`: key, TTL, TTL slack
//!
//! - **Service Layer** (`service/`):
//!   - `ReentrantLock`: `acquire` / `release` / `set_expire`
//!
//! ## Protocol
//!
//! - Outermost acquire: `set_if_absent(key, token, ttl + slack)`.
//! - Outermost release: `delete_if_equals(key, token)`, so a holder whose key
//!   expired and was taken over cannot delete the new owner's lock.
//! - Nested acquire/release only move the local counter.
//! - Contention is `Ok(false)`, never an error; there is no waiting or queueing.
//!
//! ## Usage Example
//!
//! ```ignore
//! use remote_lock::{LockConfigBuilder, ReentrantLock};
//! use shared_store::InMemoryAtomicStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(InMemoryAtomicStore::new());
//! let config = LockConfigBuilder::new().key("order:42").ttl_seconds(5).build()?;
//! let lock = ReentrantLock::from_config(store, config)?;
//!
//! if lock.acquire().await? {
//!     // critical section
//!     lock.release().await?;
//! }
//! ```

pub mod domain;
pub mod error;
pub mod service;

pub use domain::{LockConfig, LockConfigBuilder, LockToken};
pub use error::LockError;
pub use service::ReentrantLock;
