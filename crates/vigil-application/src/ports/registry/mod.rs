//! Provider Factory Registry
//!
//! The generic machinery for choosing one of several named implementations
//! of a component interface at runtime:
//!
//! ```text
//! Config (selected Name) → NamedFactoryMap lookup → ProviderFactory::create
//!                                │
//!                                └─ absent name → Error::NotFound
//! ```
//!
//! The set of candidate factories for each component is fixed at build time
//! and only *selected* at run time by name; there is no dynamic discovery.
//! Selection is a plain map lookup, which keeps per-component compile-time
//! type safety while preserving the choose-by-name flexibility.

use async_trait::async_trait;
use std::sync::Arc;
use vigil_domain::error::{Error, Result};
use vigil_domain::{BuildInfo, Name};

use crate::ports::infrastructure::MetricsCollector;

/// Shared, read-only settings handed to every provider factory
///
/// Initialized once by the first bootstrap step (instrumentation) and never
/// mutated afterward. Logging is process-global through `tracing`, so the
/// settings carry only the handles that cannot be global: build metadata
/// and the metrics collector.
#[derive(Clone)]
pub struct ProviderSettings {
    /// Build metadata of the running binary
    pub build: BuildInfo,
    /// Counter sink shared by all components
    pub metrics: Arc<dyn MetricsCollector>,
}

impl ProviderSettings {
    /// Create provider settings
    pub fn new(build: BuildInfo, metrics: Arc<dyn MetricsCollector>) -> Self {
        Self { build, metrics }
    }
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("build", &self.build)
            .finish_non_exhaustive()
    }
}

/// Configuration that selects a provider by name
///
/// Every per-component config section exposes at minimum the name of the
/// provider to construct. The selected name must exist in the component's
/// factory map, otherwise construction fails.
pub trait SelectedProvider {
    /// The name of the provider to construct
    fn provider(&self) -> &Name;
}

/// Constructor capability for one named provider implementation
///
/// A factory is pure apart from what it closes over: given the shared
/// settings and the component's typed configuration it produces a live
/// instance of the component interface `T`, or fails. Factories may perform
/// I/O (opening connections, validating credentials) synchronously during
/// `create`; the work completes or fails before `create` returns. No lazy
/// initialization happens at this layer. A factory is invoked at most once
/// per bootstrap.
#[async_trait]
pub trait ProviderFactory<T, C>: Send + Sync
where
    T: ?Sized + Send + Sync,
    C: Send + Sync,
{
    /// The unique name this factory is registered under
    fn name(&self) -> &Name;

    /// Construct the provider instance
    async fn create(&self, settings: &ProviderSettings, config: &C) -> Result<Arc<T>>;
}

/// All factories available for one component type, keyed by provider name
///
/// Built once at process start and immutable thereafter. Name uniqueness is
/// enforced at construction; a collision is a build-time wiring bug surfaced
/// as [`Error::DuplicateName`].
pub struct NamedFactoryMap<T, C>
where
    T: ?Sized + Send + Sync,
    C: Send + Sync,
{
    component: &'static str,
    entries: Vec<Arc<dyn ProviderFactory<T, C>>>,
}

impl<T, C> NamedFactoryMap<T, C>
where
    T: ?Sized + Send + Sync,
    C: Send + Sync,
{
    /// Build a factory map for a component from its candidate factories
    pub fn new(
        component: &'static str,
        factories: Vec<Arc<dyn ProviderFactory<T, C>>>,
    ) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        for factory in &factories {
            if !seen.insert(factory.name().clone()) {
                return Err(Error::duplicate_name(
                    format!("{component} factory map"),
                    factory.name().as_str(),
                ));
            }
        }
        Ok(Self {
            component,
            entries: factories,
        })
    }

    /// The component this map holds factories for
    pub fn component(&self) -> &'static str {
        self.component
    }

    /// Look up a factory by name
    pub fn get(&self, name: &Name) -> Option<&Arc<dyn ProviderFactory<T, C>>> {
        self.entries.iter().find(|f| f.name() == name)
    }

    /// Names of all registered factories, sorted for stable diagnostics
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .iter()
            .map(|f| f.name().as_str().to_string())
            .collect();
        names.sort();
        names
    }

    /// Number of registered factories
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no factories
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T, C> std::fmt::Debug for NamedFactoryMap<T, C>
where
    T: ?Sized + Send + Sync,
    C: Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamedFactoryMap")
            .field("component", &self.component)
            .field("names", &self.names())
            .finish()
    }
}

/// Select and invoke the factory registered under `selected`
///
/// An absent name fails with [`Error::NotFound`] identifying the component
/// and the unknown name without attempting any construction. A present
/// name's factory error is wrapped with component and provider identity.
/// Construction failures are terminal: no alternate provider is tried.
pub async fn resolve_provider<T, C>(
    settings: &ProviderSettings,
    config: &C,
    factories: &NamedFactoryMap<T, C>,
    selected: &Name,
) -> Result<Arc<T>>
where
    T: ?Sized + Send + Sync,
    C: Send + Sync,
{
    let factory = factories.get(selected).ok_or_else(|| {
        Error::not_found(factories.component(), selected.as_str(), factories.names())
    })?;

    factory
        .create(settings, config)
        .await
        .map_err(|err| Error::construction(factories.component(), selected.as_str(), err))
}

/// Resolve using the provider name carried by the config itself
pub async fn resolve_selected<T, C>(
    settings: &ProviderSettings,
    config: &C,
    factories: &NamedFactoryMap<T, C>,
) -> Result<Arc<T>>
where
    T: ?Sized + Send + Sync,
    C: SelectedProvider + Send + Sync,
{
    resolve_provider(settings, config, factories, config.provider()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::infrastructure::NullMetricsCollector;
    use std::sync::atomic::{AtomicUsize, Ordering};

    trait Widget: Send + Sync {
        fn label(&self) -> &str;
    }

    struct StubWidget(String);

    impl Widget for StubWidget {
        fn label(&self) -> &str {
            &self.0
        }
    }

    #[derive(Clone)]
    struct WidgetConfig {
        provider: Name,
        label: String,
    }

    impl SelectedProvider for WidgetConfig {
        fn provider(&self) -> &Name {
            &self.provider
        }
    }

    struct StubFactory {
        name: Name,
        calls: AtomicUsize,
    }

    impl StubFactory {
        fn new(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name: Name::must(name),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ProviderFactory<dyn Widget, WidgetConfig> for StubFactory {
        fn name(&self) -> &Name {
            &self.name
        }

        async fn create(
            &self,
            _settings: &ProviderSettings,
            config: &WidgetConfig,
        ) -> Result<Arc<dyn Widget>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(StubWidget(config.label.clone())))
        }
    }

    struct FailingFactory(Name);

    #[async_trait]
    impl ProviderFactory<dyn Widget, WidgetConfig> for FailingFactory {
        fn name(&self) -> &Name {
            &self.0
        }

        async fn create(
            &self,
            _settings: &ProviderSettings,
            _config: &WidgetConfig,
        ) -> Result<Arc<dyn Widget>> {
            Err(Error::infrastructure("credentials rejected"))
        }
    }

    fn settings() -> ProviderSettings {
        ProviderSettings::new(BuildInfo::default(), Arc::new(NullMetricsCollector))
    }

    #[tokio::test]
    async fn resolves_the_matching_factory() {
        let memory = StubFactory::new("memory");
        let redis = StubFactory::new("redis");
        let map: NamedFactoryMap<dyn Widget, WidgetConfig> =
            NamedFactoryMap::new("widget", vec![memory.clone() as _, redis.clone() as _]).unwrap();
        let config = WidgetConfig {
            provider: Name::must("redis"),
            label: "from-redis".to_string(),
        };

        let widget = resolve_selected(&settings(), &config, &map).await.unwrap();

        assert_eq!(widget.label(), "from-redis");
        assert_eq!(redis.calls.load(Ordering::SeqCst), 1);
        assert_eq!(memory.calls.load(Ordering::SeqCst), 0);
        // selector must not touch the config
        assert_eq!(config.label, "from-redis");
    }

    #[tokio::test]
    async fn unknown_name_fails_without_constructing() {
        let memory = StubFactory::new("memory");
        let map: NamedFactoryMap<dyn Widget, WidgetConfig> =
            NamedFactoryMap::new("cache", vec![memory.clone() as _]).unwrap();
        let config = WidgetConfig {
            provider: Name::must("redis"),
            label: String::new(),
        };

        let err = resolve_selected(&settings(), &config, &map).await.err().unwrap();

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
        assert_eq!(memory.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn factory_failure_is_wrapped_with_identity() {
        let map: NamedFactoryMap<dyn Widget, WidgetConfig> = NamedFactoryMap::new(
            "storage",
            vec![Arc::new(FailingFactory(Name::must("postgres")))],
        )
        .unwrap();
        let config = WidgetConfig {
            provider: Name::must("postgres"),
            label: String::new(),
        };

        let err = resolve_selected(&settings(), &config, &map).await.err().unwrap();

        match err {
            Error::Construction {
                component,
                provider,
                source,
            } => {
                assert_eq!(component, "storage");
                assert_eq!(provider, "postgres");
                assert!(source.to_string().contains("credentials rejected"));
            }
            other => panic!("expected Construction, got {other}"),
        }
    }

    #[test]
    fn duplicate_factory_names_are_rejected() {
        let err = NamedFactoryMap::<dyn Widget, WidgetConfig>::new(
            "widget",
            vec![StubFactory::new("memory") as _, StubFactory::new("memory") as _],
        )
        .unwrap_err();

        assert!(matches!(err, Error::DuplicateName { .. }));
    }

    #[test]
    fn names_are_sorted() {
        let map: NamedFactoryMap<dyn Widget, WidgetConfig> = NamedFactoryMap::new(
            "widget",
            vec![StubFactory::new("zeta") as _, StubFactory::new("alpha") as _],
        )
        .unwrap();

        assert_eq!(map.names(), vec!["alpha".to_string(), "zeta".to_string()]);
    }
}
