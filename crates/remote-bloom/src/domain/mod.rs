//! Domain Layer - Pure business logic
//!
//! This layer contains:
//! - Hash-to-offset mapping (salted MurmurHash3)
//! - Sizing math
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod config;
pub mod hash_functions;
pub mod parameters;

pub use config::{FilterConfig, FilterConfigBuilder};
pub use hash_functions::{probe_locations, MAX_PROBES};
pub use parameters::{
    false_positive_rate, optimal_parameters, recommended_bits, FilterParams, DEFAULT_PROBES,
};
