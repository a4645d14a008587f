//! Service Layer

pub mod reentrant_lock;

pub use reentrant_lock::ReentrantLock;
