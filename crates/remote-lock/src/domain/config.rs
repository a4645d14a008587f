//! Lock configuration and validation

use serde::{Deserialize, Serialize};

use crate::error::LockError;

/// Default hold time in seconds. With the default slack the remote key lives
/// for 1 second.
pub const DEFAULT_TTL_SECONDS: u32 = 0;

/// Seconds added to the hold time when writing the remote key.
///
/// The remote key must outlive local bookkeeping across the gap between a
/// counter decrement and the matching network release.
pub const DEFAULT_SLACK_SECONDS: u32 = 1;

/// Lock configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockConfig {
    /// Store key guarding the resource
    pub key: String,
    /// Hold time used by the next outermost acquire
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u32,
    /// Extra seconds added to `ttl_seconds` on the remote key
    #[serde(default = "default_slack")]
    pub slack_seconds: u32,
}

fn default_ttl() -> u32 {
    DEFAULT_TTL_SECONDS
}

fn default_slack() -> u32 {
    DEFAULT_SLACK_SECONDS
}

impl LockConfig {
    /// Create a configuration with default TTL and slack
    pub fn new(key: impl Into<String>) -> Result<Self, LockError> {
        let config = Self {
            key: key.into(),
            ttl_seconds: DEFAULT_TTL_SECONDS,
            slack_seconds: DEFAULT_SLACK_SECONDS,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LockError> {
        if self.key.is_empty() {
            return Err(LockError::EmptyKey);
        }
        if self.remote_ttl_seconds() == 0 {
            return Err(LockError::InvalidParameters(
                "ttl_seconds + slack_seconds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// TTL written to the store on acquire.
    pub fn remote_ttl_seconds(&self) -> u64 {
        u64::from(self.ttl_seconds) + u64::from(self.slack_seconds)
    }

    pub fn with_ttl_seconds(mut self, seconds: u32) -> Self {
        self.ttl_seconds = seconds;
        self
    }
}

/// Builder for LockConfig with validation
#[derive(Default)]
pub struct LockConfigBuilder {
    key: Option<String>,
    ttl_seconds: Option<u32>,
    slack_seconds: Option<u32>,
}

impl LockConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn ttl_seconds(mut self, seconds: u32) -> Self {
        self.ttl_seconds = Some(seconds);
        self
    }

    /// Override the safety margin added to the remote TTL.
    ///
    /// Pick something above the worst expected round-trip time to the store.
    pub fn slack_seconds(mut self, seconds: u32) -> Self {
        self.slack_seconds = Some(seconds);
        self
    }

    pub fn build(self) -> Result<LockConfig, LockError> {
        let config = LockConfig {
            key: self.key.unwrap_or_default(),
            ttl_seconds: self.ttl_seconds.unwrap_or(DEFAULT_TTL_SECONDS),
            slack_seconds: self.slack_seconds.unwrap_or(DEFAULT_SLACK_SECONDS),
        };
        config.validate()?;
        Ok(config)
    }
}
