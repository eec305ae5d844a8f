//! Redis distributed cache provider
//!
//! Distributed cache for multi-instance deployments. Uses a multiplexed
//! connection for efficient reuse; per-entry TTLs map onto Redis key
//! expiry.

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use std::sync::Arc;
use std::time::Duration;
use vigil_application::ports::providers::{Cache, CacheConfig};
use vigil_application::{ProviderFactory, ProviderSettings};
use vigil_domain::error::{Error, Result};
use vigil_domain::Name;

/// Redis-backed distributed cache
#[derive(Clone)]
pub struct RedisCache {
    client: Client,
    default_ttl: Duration,
}

impl RedisCache {
    /// Create a cache against the given connection string
    pub fn new(connection_string: &str, default_ttl: Duration) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| {
            Error::infrastructure_with_source("failed to create Redis client", e)
        })?;
        Ok(Self {
            client,
            default_ttl,
        })
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| Error::infrastructure_with_source("failed to get Redis connection", e))
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.connection().await?;
        conn.get(key)
            .await
            .map_err(|e| Error::infrastructure_with_source("Redis GET failed", e))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.connection().await?;
        let ttl = ttl.unwrap_or(self.default_ttl);
        conn.set_ex(key, value, ttl.as_secs())
            .await
            .map_err(|e| Error::infrastructure_with_source("Redis SETEX failed", e))
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        let removed: u64 = conn
            .del(key)
            .await
            .map_err(|e| Error::infrastructure_with_source("Redis DEL failed", e))?;
        Ok(removed > 0)
    }

    async fn clear(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        redis::cmd("FLUSHDB")
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| Error::infrastructure_with_source("Redis FLUSHDB failed", e))
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

/// Factory for the `redis` cache provider
///
/// Validates the connection with a PING before returning, so a bad URI or
/// unreachable server fails the bootstrap instead of the first cache call.
pub struct RedisCacheFactory {
    name: Name,
}

impl RedisCacheFactory {
    /// Create the factory
    pub fn new() -> Self {
        Self {
            name: Name::must("redis"),
        }
    }
}

impl Default for RedisCacheFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderFactory<dyn Cache, CacheConfig> for RedisCacheFactory {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn create(
        &self,
        _settings: &ProviderSettings,
        config: &CacheConfig,
    ) -> Result<Arc<dyn Cache>> {
        let uri = config
            .uri
            .as_deref()
            .ok_or_else(|| Error::configuration("redis cache requires a uri"))?;
        let cache = RedisCache::new(uri, Duration::from_secs(config.default_ttl_secs))?;

        let mut conn = cache.connection().await?;
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| Error::infrastructure_with_source("Redis PING failed", e))?;

        Ok(Arc::new(cache))
    }
}
