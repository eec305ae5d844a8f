//! Cache Provider Port
//!
//! Byte-oriented cache backend with optional per-entry TTL. Backends range
//! from in-process (Moka) to distributed (Redis) to a null provider for
//! tests; eviction policy is the provider's own concern.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use vigil_domain::error::Result;
use vigil_domain::Name;

use crate::ports::registry::SelectedProvider;

/// Default TTL for cache entries (5 minutes)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Configuration for the cache component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Selected provider name
    pub provider: Name,
    /// Connection URI for distributed backends
    pub uri: Option<String>,
    /// Maximum number of entries for in-process backends
    pub max_entries: u64,
    /// Default TTL in seconds when an entry does not set one
    pub default_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            provider: Name::must("memory"),
            uri: None,
            max_entries: 100_000,
            default_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl SelectedProvider for CacheConfig {
    fn provider(&self) -> &Name {
        &self.provider
    }
}

/// Cache backend capability
#[async_trait]
pub trait Cache: Send + Sync {
    /// Fetch the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`; `ttl` falls back to the configured default
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<()>;

    /// Remove `key`, returning whether it existed
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Drop every entry
    async fn clear(&self) -> Result<()>;

    /// Name of the provider implementation
    fn provider_name(&self) -> &str;
}
