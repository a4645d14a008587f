//! Domain Layer - Pure business logic
//!
//! - Ownership tokens
//! - Local reentrancy counting
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod config;
pub mod counter;
pub mod token;

pub use config::{LockConfig, LockConfigBuilder, DEFAULT_SLACK_SECONDS, DEFAULT_TTL_SECONDS};
pub use counter::ReentrancyCounter;
pub use token::{LockToken, TOKEN_LEN};
