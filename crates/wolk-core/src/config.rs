//! Shared defaults and environment lookups.
//!
//! Constants used by more than one crate live here so the retry handler,
//! the persistence layer and the CLI agree on them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Outbound retry defaults.
pub mod retry {
    /// Resends after the initial publish before giving up.
    pub const DEFAULT_MAX_RETRIES: u32 = 3;
    /// Delay between resends, in milliseconds.
    pub const DEFAULT_RETRY_INTERVAL_MS: u64 = 5000;
}

/// Outbound message persistence defaults.
pub mod persistence {
    /// Size limit for filesystem persistence in bytes. Zero means unbounded.
    pub const DEFAULT_STORAGE_LIMIT_BYTES: u64 = 0;
    /// File name prefix for persisted messages.
    pub const READING_FILE_PREFIX: &str = "reading_";
}

/// Environment variable names.
pub mod env_vars {
    use super::{persistence, retry};

    pub const RETRY_COUNT: &str = "WOLK_RETRY_COUNT";
    pub const RETRY_INTERVAL_MS: &str = "WOLK_RETRY_INTERVAL_MS";
    pub const STORAGE_LIMIT_BYTES: &str = "WOLK_STORAGE_LIMIT_BYTES";
    /// Any value other than `0`/`false` switches logs to JSON lines.
    pub const LOG_JSON: &str = "WOLK_LOG_JSON";

    pub fn retry_count() -> u32 {
        std::env::var(RETRY_COUNT)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(retry::DEFAULT_MAX_RETRIES)
    }

    pub fn retry_interval_ms() -> u64 {
        std::env::var(RETRY_INTERVAL_MS)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(retry::DEFAULT_RETRY_INTERVAL_MS)
    }

    pub fn storage_limit_bytes() -> u64 {
        std::env::var(STORAGE_LIMIT_BYTES)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(persistence::DEFAULT_STORAGE_LIMIT_BYTES)
    }

    pub fn log_json() -> bool {
        std::env::var(LOG_JSON)
            .map(|v| !matches!(v.as_str(), "" | "0" | "false"))
            .unwrap_or(false)
    }
}

/// Retry parameters for requests that wait on a correlated response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_interval", with = "duration_ms")]
    pub retry_interval: Duration,
}

fn default_max_retries() -> u32 {
    retry::DEFAULT_MAX_RETRIES
}

fn default_retry_interval() -> Duration {
    Duration::from_millis(retry::DEFAULT_RETRY_INTERVAL_MS)
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_interval: default_retry_interval(),
        }
    }
}

impl RetryConfig {
    pub fn new(max_retries: u32, retry_interval: Duration) -> Self {
        Self {
            max_retries,
            retry_interval,
        }
    }

    /// Read overrides from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            max_retries: env_vars::retry_count(),
            retry_interval: Duration::from_millis(env_vars::retry_interval_ms()),
        }
    }
}

// Durations are written as whole milliseconds.
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_defaults() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_interval, Duration::from_secs(5));
    }

    // Environment variables are process-wide, so every override is
    // exercised from this one test.
    #[test]
    fn test_env_overrides_and_fallbacks() {
        std::env::set_var(env_vars::RETRY_COUNT, "7");
        std::env::set_var(env_vars::RETRY_INTERVAL_MS, "250");
        std::env::set_var(env_vars::STORAGE_LIMIT_BYTES, "4096");
        assert_eq!(RetryConfig::from_env(), RetryConfig::new(7, Duration::from_millis(250)));
        assert_eq!(env_vars::storage_limit_bytes(), 4096);

        std::env::set_var(env_vars::RETRY_COUNT, "many");
        std::env::set_var(env_vars::RETRY_INTERVAL_MS, "-5");
        std::env::set_var(env_vars::STORAGE_LIMIT_BYTES, "4k");
        assert_eq!(RetryConfig::from_env(), RetryConfig::default());
        assert_eq!(
            env_vars::storage_limit_bytes(),
            persistence::DEFAULT_STORAGE_LIMIT_BYTES
        );

        std::env::remove_var(env_vars::RETRY_COUNT);
        std::env::remove_var(env_vars::RETRY_INTERVAL_MS);
        std::env::remove_var(env_vars::STORAGE_LIMIT_BYTES);
        assert_eq!(RetryConfig::from_env(), RetryConfig::default());
        assert_eq!(env_vars::storage_limit_bytes(), 0);
    }

    #[test]
    fn test_retry_config_from_json() {
        let config: RetryConfig = serde_json::from_str(r#"{"retry_interval": 50}"#).unwrap();
        assert_eq!(config.max_retries, retry::DEFAULT_MAX_RETRIES);
        assert_eq!(config.retry_interval, Duration::from_millis(50));

        let json = serde_json::to_value(RetryConfig::new(1, Duration::from_millis(300))).unwrap();
        assert_eq!(json["retry_interval"], 300);
    }
}
