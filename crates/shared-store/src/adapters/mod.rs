//! Adapters Layer
//!
//! Concrete [`AtomicStore`](crate::AtomicStore) implementations:
//! - `InMemoryAtomicStore`: process-local, for tests and single-process use
//! - `RedisAtomicStore`: Redis with Lua scripts (feature `redis`)

pub mod memory;
#[cfg(feature = "redis")]
pub mod redis;

pub use memory::InMemoryAtomicStore;
#[cfg(feature = "redis")]
pub use self::redis::RedisAtomicStore;
