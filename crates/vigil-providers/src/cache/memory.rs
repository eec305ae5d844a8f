//! Moka in-process cache provider
//!
//! High-performance, concurrent in-memory cache. Capacity and the
//! store-wide TTL come from the cache configuration; a per-entry TTL finer
//! than the store-wide default requires the distributed backend.

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use std::sync::Arc;
use std::time::Duration;
use vigil_application::ports::providers::{Cache, CacheConfig};
use vigil_application::{ProviderFactory, ProviderSettings};
use vigil_domain::error::Result;
use vigil_domain::Name;

/// In-process cache backed by Moka
#[derive(Clone)]
pub struct MemoryCache {
    cache: MokaCache<String, Vec<u8>>,
}

impl MemoryCache {
    /// Create a cache with the given capacity and store-wide TTL
    pub fn with_config(max_entries: u64, time_to_live: Duration) -> Self {
        let cache = MokaCache::builder()
            .max_capacity(max_entries)
            .time_to_live(time_to_live)
            .build();
        Self { cache }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.cache.get(key).await)
    }

    async fn set(&self, key: &str, value: Vec<u8>, _ttl: Option<Duration>) -> Result<()> {
        self.cache.insert(key.to_string(), value).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let existed = self.cache.contains_key(key);
        self.cache.invalidate(key).await;
        Ok(existed)
    }

    async fn clear(&self) -> Result<()> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

/// Factory for the `memory` cache provider
pub struct MemoryCacheFactory {
    name: Name,
}

impl MemoryCacheFactory {
    /// Create the factory
    pub fn new() -> Self {
        Self {
            name: Name::must("memory"),
        }
    }
}

impl Default for MemoryCacheFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderFactory<dyn Cache, CacheConfig> for MemoryCacheFactory {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn create(
        &self,
        _settings: &ProviderSettings,
        config: &CacheConfig,
    ) -> Result<Arc<dyn Cache>> {
        Ok(Arc::new(MemoryCache::with_config(
            config.max_entries,
            Duration::from_secs(config.default_ttl_secs),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> MemoryCache {
        MemoryCache::with_config(100, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let cache = cache();
        cache.set("k", b"v".to_vec(), None).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some(b"v".to_vec()));
    }

    #[tokio::test]
    async fn delete_reports_existence() {
        let cache = cache();
        cache.set("k", b"v".to_vec(), None).await.unwrap();
        assert!(cache.delete("k").await.unwrap());
        assert!(!cache.delete("k").await.unwrap());
        assert_eq!(cache.get("k").await.unwrap(), None);
    }
}
