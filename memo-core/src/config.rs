//! Cache configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_TTL_MS, ENV_TTL_MS};
use crate::error::{MemoError, Result};

/// Cache configuration.
///
/// # Example
///
/// ```rust
/// use memo_core::CacheConfig;
/// use std::time::Duration;
///
/// let config = CacheConfig::default().with_ttl(Duration::from_secs(5));
/// assert_eq!(config.ttl(), Duration::from_secs(5));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Time-to-live applied to every entry, in milliseconds
    pub ttl_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TTL_MS,
        }
    }
}

impl CacheConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the TTL.
    ///
    /// Sub-millisecond precision is truncated.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Returns the TTL as a `Duration`.
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads the configuration from the environment.
    ///
    /// Reads `MEMO_CACHE_TTL_MS`; when it is unset the default TTL is used.
    pub fn from_env() -> Result<Self> {
        match std::env::var(ENV_TTL_MS) {
            Ok(raw) => Self::parse_ttl_ms(&raw).map(|ttl_ms| Self { ttl_ms }),
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(err) => Err(MemoError::ConfigError(format!("{ENV_TTL_MS}: {err}"))),
        }
    }

    fn parse_ttl_ms(raw: &str) -> Result<u64> {
        raw.trim().parse::<u64>().map_err(|err| {
            MemoError::ConfigError(format!("{ENV_TTL_MS} must be milliseconds, got '{raw}': {err}"))
        })
    }
}
