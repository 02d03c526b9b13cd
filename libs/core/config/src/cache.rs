use crate::{env_optional, env_or_default, ConfigError, FromEnv};
use std::time::Duration;

/// Cache configuration for the item read-through cache.
///
/// When `redis_url` is unset the application falls back to its in-process
/// cache, so Redis is never a hard requirement for local development.
#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub ttl_seconds: u64,
    pub redis_url: Option<String>,
}

impl CacheConfig {
    pub fn new(ttl_seconds: u64, redis_url: Option<String>) -> Self {
        Self {
            ttl_seconds,
            redis_url,
        }
    }

    /// Entry time-to-live as a Duration
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl FromEnv for CacheConfig {
    /// Reads from environment variables:
    /// - CACHE_TTL_SECONDS: defaults to 300
    /// - REDIS_URL: optional; unset means the in-process cache is used
    fn from_env() -> Result<Self, ConfigError> {
        let ttl_seconds = env_or_default("CACHE_TTL_SECONDS", "300")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "CACHE_TTL_SECONDS".to_string(),
                details: format!("{}", e),
            })?;

        Ok(Self {
            ttl_seconds,
            redis_url: env_optional("REDIS_URL"),
        })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 300,
            redis_url: None,
        }
    }
}
