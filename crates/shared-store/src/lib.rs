//! # Shared Store
//!
//! The storage boundary for the remote coordination primitives.
//!
//! ## Architecture
//!
//! - **Ports** (`ports.rs`): `AtomicStore`, the only way the filter and lock
//!   crates talk to the store. Each method is indivisible per key.
//! - **Adapters** (`adapters/`):
//!   - `InMemoryAtomicStore`: single-mutex map with lazy TTL expiry
//!   - `RedisAtomicStore`: Lua scripts over a `ConnectionManager` (feature `redis`)
//!
//! Connection handling, request serialization and transport retries belong to
//! the store client, not to this crate.
//!
//! ## Usage Example
//!
//! ```ignore
//! use shared_store::{AtomicStore, InMemoryAtomicStore};
//!
//! let store = InMemoryAtomicStore::new();
//! store.set_bits("seen", &[3, 17]).await?;
//! assert!(store.test_bits("seen", &[3, 17]).await?);
//! ```

pub mod adapters;
pub mod error;
pub mod ports;

pub use adapters::InMemoryAtomicStore;
#[cfg(feature = "redis")]
pub use adapters::RedisAtomicStore;
pub use error::StoreError;
pub use ports::{AtomicStore, MAX_BIT_ARRAY_LEN};
