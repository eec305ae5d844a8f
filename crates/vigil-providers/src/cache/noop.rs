//! Noop cache provider
//!
//! Stores nothing and always misses. Useful for tests and for disabling
//! caching without touching call sites.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use vigil_application::ports::providers::{Cache, CacheConfig};
use vigil_application::{ProviderFactory, ProviderSettings};
use vigil_domain::error::Result;
use vigil_domain::Name;

/// Cache that never stores anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

#[async_trait]
impl Cache for NoopCache {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: Vec<u8>, _ttl: Option<Duration>) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn clear(&self) -> Result<()> {
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "noop"
    }
}

/// Factory for the `noop` cache provider
pub struct NoopCacheFactory {
    name: Name,
}

impl NoopCacheFactory {
    /// Create the factory
    pub fn new() -> Self {
        Self {
            name: Name::must("noop"),
        }
    }
}

impl Default for NoopCacheFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderFactory<dyn Cache, CacheConfig> for NoopCacheFactory {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn create(
        &self,
        _settings: &ProviderSettings,
        _config: &CacheConfig,
    ) -> Result<Arc<dyn Cache>> {
        Ok(Arc::new(NoopCache))
    }
}
