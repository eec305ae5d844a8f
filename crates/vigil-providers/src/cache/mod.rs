//! Cache Provider Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`NoopCache`] | Testing | Stores nothing, always misses |
//! | [`MemoryCache`] | Local | In-process cache backed by Moka |
//! | [`RedisCache`] | Distributed | Redis-backed for multi-instance deployments |
//!
//! ## Provider Selection Guide
//!
//! - **Development/Testing**: `noop`
//! - **Single Instance**: `memory`
//! - **Multi Instance**: `redis`

#[cfg(feature = "cache-moka")]
pub mod memory;
pub mod noop;
#[cfg(feature = "cache-redis")]
pub mod redis;

#[cfg(feature = "cache-moka")]
pub use memory::{MemoryCache, MemoryCacheFactory};
pub use noop::{NoopCache, NoopCacheFactory};
#[cfg(feature = "cache-redis")]
pub use redis::{RedisCache, RedisCacheFactory};

use std::sync::Arc;
use vigil_application::ports::providers::{Cache, CacheConfig};
use vigil_application::{NamedFactoryMap, ProviderFactory};
use vigil_domain::error::Result;

/// The standard cache factory map
pub fn factories() -> Result<NamedFactoryMap<dyn Cache, CacheConfig>> {
    let mut list: Vec<Arc<dyn ProviderFactory<dyn Cache, CacheConfig>>> =
        vec![Arc::new(NoopCacheFactory::new())];
    #[cfg(feature = "cache-moka")]
    list.push(Arc::new(MemoryCacheFactory::new()));
    #[cfg(feature = "cache-redis")]
    list.push(Arc::new(RedisCacheFactory::new()));
    NamedFactoryMap::new("cache", list)
}
