//! End-to-end bootstrap tests
//!
//! Run with: `cargo test -p vigil-infrastructure --test bootstrap_tests`

use async_trait::async_trait;
use std::sync::Arc;
use vigil_application::ports::providers::{
    Cache, CacheConfig, Licensing, LicensingConfig, Storage, StorageConfig,
};
use vigil_application::{NamedFactoryMap, ProviderFactory, ProviderSettings};
use vigil_domain::error::{Error, Result};
use vigil_domain::Name;
use vigil_infrastructure::config::AppConfig;
use vigil_infrastructure::{bootstrap, BootstrapArgs};
use vigil_providers::cache::NoopCache;
use vigil_providers::storage::MemoryStorage;

/// Factory that hands out one pre-built cache instance
struct PinnedCacheFactory {
    name: Name,
    instance: Arc<dyn Cache>,
}

#[async_trait]
impl ProviderFactory<dyn Cache, CacheConfig> for PinnedCacheFactory {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn create(
        &self,
        _settings: &ProviderSettings,
        _config: &CacheConfig,
    ) -> Result<Arc<dyn Cache>> {
        Ok(self.instance.clone())
    }
}

/// Factory that hands out one pre-built storage instance
struct PinnedStorageFactory {
    name: Name,
    instance: Arc<dyn Storage>,
}

#[async_trait]
impl ProviderFactory<dyn Storage, StorageConfig> for PinnedStorageFactory {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn create(
        &self,
        _settings: &ProviderSettings,
        _config: &StorageConfig,
    ) -> Result<Arc<dyn Storage>> {
        Ok(self.instance.clone())
    }
}

/// Licensing factory whose construction always fails
struct BrokenLicensingFactory {
    name: Name,
}

#[async_trait]
impl ProviderFactory<dyn Licensing, LicensingConfig> for BrokenLicensingFactory {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn create(
        &self,
        _settings: &ProviderSettings,
        _config: &LicensingConfig,
    ) -> Result<Arc<dyn Licensing>> {
        Err(Error::infrastructure("license authority unreachable"))
    }
}

fn pinned_cache(name: &'static str, instance: Arc<dyn Cache>) -> NamedFactoryMap<dyn Cache, CacheConfig> {
    NamedFactoryMap::new(
        "cache",
        vec![Arc::new(PinnedCacheFactory {
            name: Name::must(name),
            instance,
        }) as _],
    )
    .unwrap()
}

fn pinned_storage(
    name: &'static str,
    instance: Arc<dyn Storage>,
) -> NamedFactoryMap<dyn Storage, StorageConfig> {
    NamedFactoryMap::new(
        "storage",
        vec![Arc::new(PinnedStorageFactory {
            name: Name::must(name),
            instance,
        }) as _],
    )
    .unwrap()
}

#[tokio::test]
async fn bootstrap_wires_exactly_the_selected_instances() {
    let cache_instance: Arc<dyn Cache> = Arc::new(NoopCache);
    let storage_instance: Arc<dyn Storage> = Arc::new(MemoryStorage::new());

    let mut args = BootstrapArgs::community().unwrap();
    args.cache_factories = pinned_cache("memory", cache_instance.clone());
    args.storage_factories = pinned_storage("postgres", storage_instance.clone());

    let mut config = AppConfig::default();
    config.storage.provider = Name::must("postgres");

    let platform = bootstrap(config, args).await.unwrap();

    assert!(Arc::ptr_eq(&platform.cache, &cache_instance));
    assert!(Arc::ptr_eq(&platform.storage, &storage_instance));
    assert_eq!(
        platform.registry.names(),
        vec!["instrumentation", "alerting", "licensing"]
    );

    platform.start().await.unwrap();
    assert_eq!(
        platform.licensing.active_license().await.unwrap().plan,
        "community"
    );
    platform.stop().await.unwrap();
}

#[tokio::test]
async fn unknown_cache_provider_fails_with_not_found() {
    let mut args = BootstrapArgs::community().unwrap();
    args.cache_factories = pinned_cache("memory", Arc::new(NoopCache));

    let mut config = AppConfig::default();
    config.cache.provider = Name::must("redis");

    let err = bootstrap(config, args).await.unwrap_err();

    match err {
        Error::NotFound {
            component,
            name,
            available,
        } => {
            assert_eq!(component, "cache");
            assert_eq!(name, "redis");
            assert_eq!(available, vec!["memory".to_string()]);
        }
        other => panic!("expected NotFound, got {other}"),
    }
}

#[tokio::test]
async fn licensing_failure_aborts_the_whole_bootstrap() {
    let mut args = BootstrapArgs::community().unwrap();
    args.licensing_factory_callback = Box::new(|_storage, _control_plane| {
        Arc::new(BrokenLicensingFactory {
            name: Name::must("enterprise"),
        }) as _
    });

    let err = bootstrap(AppConfig::default(), args).await.unwrap_err();

    match err {
        Error::Construction {
            component,
            provider,
            source,
        } => {
            assert_eq!(component, "licensing");
            assert_eq!(provider, "enterprise");
            assert!(source.to_string().contains("license authority unreachable"));
        }
        other => panic!("expected Construction, got {other}"),
    }
}

#[tokio::test]
async fn rebootstrap_applies_no_additional_migrations() {
    let storage_instance: Arc<dyn Storage> = Arc::new(MemoryStorage::new());

    let mut args = BootstrapArgs::community().unwrap();
    args.storage_factories = pinned_storage("memory", storage_instance.clone());
    bootstrap(AppConfig::default(), args).await.unwrap();

    let applied_once = storage_instance.applied_migrations().await.unwrap();
    assert_eq!(
        applied_once,
        vec!["initial_schema", "alert_rules", "license_journal"]
    );
    let seeded_rules = storage_instance.count("alert_rules").await.unwrap();

    // same storage, fresh bootstrap: every step is already journaled
    let mut args = BootstrapArgs::community().unwrap();
    args.storage_factories = pinned_storage("memory", storage_instance.clone());
    bootstrap(AppConfig::default(), args).await.unwrap();

    assert_eq!(
        storage_instance.applied_migrations().await.unwrap(),
        applied_once
    );
    assert_eq!(
        storage_instance.count("alert_rules").await.unwrap(),
        seeded_rules
    );
}

#[tokio::test]
async fn invitations_flow_through_the_assembled_platform() {
    let platform = bootstrap(AppConfig::default(), BootstrapArgs::community().unwrap())
        .await
        .unwrap();

    let response = platform
        .handlers
        .invites
        .invite("dev@example.com")
        .await
        .unwrap();
    let token: uuid::Uuid =
        serde_json::from_value(response.get("token").cloned().unwrap()).unwrap();

    assert!(platform.modules.invites.is_pending(token).await.unwrap());
}
