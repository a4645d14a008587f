//! # Remote Bloom
//!
//! A Bloom filter whose bit array lives in a shared key-value store, so that
//! independent processes can ask "has this value been seen?" without keeping
//! any authoritative state locally.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `probe_locations`: k salted MurmurHash3 probes reduced modulo m
//!   - `parameters`: FPR formula and sizing helpers
//!   - `FilterConfig` / `FilterConfigBuilder`
//!
//! - **Service Layer** (`service/`):
//!   - `MembershipFilter`: `add` / `exists` / `delete` / `expire` over an
//!     [`AtomicStore`](shared_store::AtomicStore)
//!
//! ## Invariants
//!
//! - Every offset sent to the store is in `[0, bits)`; anything else is a
//!   local configuration error.
//! - Identical (value, probes, bits) always yield identical offsets.
//! - No false negatives: after `add(v)` succeeds, `exists(v)` is true until
//!   the key is deleted or expires.
//! - FPR = (1 - e^(-kn/m))^k; with k = 14 and m = 20n that is about 6.7e-5.
//!
//! ## Usage Example
//!
//! ```ignore
//! use remote_bloom::MembershipFilter;
//! use shared_store::InMemoryAtomicStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(InMemoryAtomicStore::new());
//! let filter = MembershipFilter::new(store, "seen:orders", 2_000_000)?;
//!
//! filter.add(b"foo").await?;
//! assert!(filter.exists(b"foo").await?);
//! ```

pub mod domain;
pub mod error;
pub mod service;

pub use domain::{FilterConfig, FilterConfigBuilder, DEFAULT_PROBES};
pub use error::FilterError;
pub use service::MembershipFilter;
