//! # Remote Coordination Test Suite
//!
//! Cross-crate scenarios for the membership filter and the reentrant lock.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── bloom_scenarios.rs   # MembershipFilter over a shared store
//!     ├── lock_scenarios.rs    # ReentrantLock contention, reentrancy, expiry
//!     └── redis_smoke.rs       # Same scenarios against Redis (feature `redis`)
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p coord-tests
//!
//! # Against a local Redis
//! REDIS_URL=redis://127.0.0.1/ cargo test -p coord-tests --features redis -- --ignored
//!
//! # Benchmarks
//! cargo bench -p coord-tests
//! ```
