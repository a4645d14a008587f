//! Membership filter configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use remote_bloom::domain::FilterConfigBuilder;
//!
//! let config = FilterConfigBuilder::new()
//!     .key("seen:emails")
//!     .expected_elements(100_000)
//!     .build()
//!     .expect("Valid config");
//! ```

use serde::{Deserialize, Serialize};
use shared_store::MAX_BIT_ARRAY_LEN;

use super::hash_functions::validate_probe_count;
use super::parameters::{recommended_bits, DEFAULT_PROBES};
use crate::error::FilterError;

/// Membership filter configuration
///
/// Shared by every process that uses the same bit array: `bits` and `probes`
/// must agree across callers, or they will probe different offsets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Store key holding the bit array
    pub key: String,
    /// Size of the bit array (m)
    pub bits: u64,
    /// Probes per element (k)
    #[serde(default = "default_probes")]
    pub probes: usize,
}

fn default_probes() -> usize {
    DEFAULT_PROBES
}

impl FilterConfig {
    /// Create a new configuration with validation and the default probe count
    pub fn new(key: impl Into<String>, bits: u64) -> Result<Self, FilterError> {
        let config = Self {
            key: key.into(),
            bits,
            probes: DEFAULT_PROBES,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        if self.key.is_empty() {
            return Err(FilterError::EmptyKey);
        }
        if self.bits == 0 {
            return Err(FilterError::ZeroBits);
        }
        if self.bits > MAX_BIT_ARRAY_LEN {
            return Err(FilterError::TooManyBits {
                bits: self.bits,
                max: MAX_BIT_ARRAY_LEN,
            });
        }
        validate_probe_count(self.probes)
    }

    /// Builder-style method to set the probe count
    pub fn with_probes(mut self, probes: usize) -> Self {
        self.probes = probes;
        self
    }
}

/// Builder for FilterConfig with validation
#[derive(Default)]
pub struct FilterConfigBuilder {
    key: Option<String>,
    bits: Option<u64>,
    expected_elements: Option<u64>,
    probes: Option<usize>,
}

impl FilterConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the bit array size directly. Takes precedence over `expected_elements`.
    pub fn bits(mut self, bits: u64) -> Self {
        self.bits = Some(bits);
        self
    }

    /// Size the bit array for this many distinct elements (20 bits each).
    pub fn expected_elements(mut self, elements: u64) -> Self {
        self.expected_elements = Some(elements);
        self
    }

    pub fn probes(mut self, probes: usize) -> Self {
        self.probes = Some(probes);
        self
    }

    /// Build the FilterConfig, validating all parameters
    pub fn build(self) -> Result<FilterConfig, FilterError> {
        let bits = match (self.bits, self.expected_elements) {
            (Some(bits), _) => bits,
            (None, Some(elements)) => recommended_bits(elements),
            (None, None) => {
                return Err(FilterError::InvalidParameters(
                    "either bits or expected_elements must be set".to_string(),
                ))
            }
        };

        let config = FilterConfig {
            key: self.key.unwrap_or_default(),
            bits,
            probes: self.probes.unwrap_or(DEFAULT_PROBES),
        };

        config.validate()?;
        Ok(config)
    }
}
