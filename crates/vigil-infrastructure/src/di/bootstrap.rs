//! Platform bootstrap
//!
//! Constructs the whole platform in one fixed, strictly sequential pass:
//!
//! 1. Instrumentation (logging, metrics, build info): yields the shared
//!    settings every later factory receives.
//! 2. Control plane client, from the variant-chosen single factory.
//! 3. Email, cache, web, storage, telemetry store: independent, selected
//!    by name from their factory maps.
//! 4. Query engine, whose factory map is built over the telemetry store.
//! 5. Schema migrations against the storage handle.
//! 6. Alert engine (factory map over storage) and licensing (factory
//!    callback over storage + control plane).
//! 7. Business modules and handlers, pure composition.
//! 8. The service registry over the lifecycle-bearing subset.
//!
//! Ordering is a design-time decision encoded as straight-line code, not a
//! runtime dependency graph. Any step's error aborts the bootstrap and
//! carries the failing component's identity; no partial platform is ever
//! returned. Dropping the returned future cancels an in-flight factory at
//! its next await point.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use vigil_domain::error::Result;
use vigil_domain::{BuildInfo, Name};

use vigil_application::ports::providers::{
    AlertEngine, AlertingConfig, Cache, CacheConfig, ControlPlaneClient, ControlPlaneConfig,
    EmailConfig, EmailSender, Licensing, LicensingFactoryCallback, QueryEngine, QueryEngineConfig,
    Storage, StorageConfig, TelemetryConfig, TelemetryStore, WebConfig, WebTransport,
};
use vigil_application::ports::{Migration, NamedService, Service};
use vigil_application::use_cases::{Handlers, Modules};
use vigil_application::{resolve_selected, NamedFactoryMap, ProviderFactory};

use crate::config::AppConfig;
use crate::instrumentation::Instrumentation;
use crate::lifecycle::ServiceRegistry;
use crate::migrate::Migrator;

/// Builder for the query engine's factory map, evaluated once the
/// telemetry store exists
pub type QueryEngineFactoriesBuilder = Box<
    dyn FnOnce(
            Arc<dyn TelemetryStore>,
        ) -> Result<NamedFactoryMap<dyn QueryEngine, QueryEngineConfig>>
        + Send,
>;

/// Builder for the alert engine's factory map, evaluated once the storage
/// handle exists
pub type AlertEngineFactoriesBuilder = Box<
    dyn FnOnce(Arc<dyn Storage>) -> Result<NamedFactoryMap<dyn AlertEngine, AlertingConfig>>
        + Send,
>;

/// The injected factory surface of one bootstrap run
///
/// Everything variant- or deployment-specific enters here; the bootstrap
/// itself stays variant-agnostic.
pub struct BootstrapArgs {
    /// Build metadata stamped into the shared settings
    pub build: BuildInfo,
    /// Variant-chosen control plane factory (not config-selected)
    pub control_plane_factory:
        Arc<dyn ProviderFactory<dyn ControlPlaneClient, ControlPlaneConfig>>,
    /// Variant-chosen licensing construction strategy
    pub licensing_factory_callback: LicensingFactoryCallback,
    /// Email factories
    pub email_factories: NamedFactoryMap<dyn EmailSender, EmailConfig>,
    /// Cache factories
    pub cache_factories: NamedFactoryMap<dyn Cache, CacheConfig>,
    /// Web transport factories
    pub web_factories: NamedFactoryMap<dyn WebTransport, WebConfig>,
    /// Storage factories
    pub storage_factories: NamedFactoryMap<dyn Storage, StorageConfig>,
    /// Telemetry store factories
    pub telemetry_factories: NamedFactoryMap<dyn TelemetryStore, TelemetryConfig>,
    /// Query engine factory map builder
    pub query_engine_factories: QueryEngineFactoriesBuilder,
    /// Alert engine factory map builder
    pub alert_engine_factories: AlertEngineFactoriesBuilder,
    /// Ordered schema migration sequence
    pub migrations: Vec<Arc<dyn Migration>>,
}

impl BootstrapArgs {
    /// The standard community wiring: every stock factory map, a local
    /// control plane, and community licensing
    pub fn community() -> Result<Self> {
        Ok(Self {
            build: BuildInfo::current(vigil_domain::Variant::Community),
            control_plane_factory: Arc::new(
                vigil_providers::control_plane::NoopControlPlaneClientFactory::new(),
            ),
            licensing_factory_callback: vigil_providers::licensing::community_factory_callback(),
            email_factories: vigil_providers::email::factories()?,
            cache_factories: vigil_providers::cache::factories()?,
            web_factories: vigil_providers::web::factories()?,
            storage_factories: vigil_providers::storage::factories()?,
            telemetry_factories: vigil_providers::telemetry::factories()?,
            query_engine_factories: Box::new(vigil_providers::query::factories),
            alert_engine_factories: Box::new(vigil_providers::alerting::factories),
            migrations: vigil_providers::migrations::default_migrations(),
        })
    }

    /// The standard enterprise wiring: hosted control plane and
    /// control-plane backed licensing
    pub fn enterprise() -> Result<Self> {
        Ok(Self {
            build: BuildInfo::current(vigil_domain::Variant::Enterprise),
            control_plane_factory: Arc::new(
                vigil_providers::control_plane::HttpControlPlaneClientFactory::new(),
            ),
            licensing_factory_callback: vigil_providers::licensing::enterprise_factory_callback(),
            ..Self::community()?
        })
    }
}

/// The assembled platform
///
/// Fields are set once at construction and never reassigned. The registry
/// owns lifecycle coordination; the provider handles are shared between
/// the registry (lifecycle only) and consumers of this object (business
/// logic only).
pub struct Platform {
    /// Lifecycle registry over the start/stop-bearing components
    pub registry: ServiceRegistry,
    /// Instrumentation handle
    pub instrumentation: Arc<Instrumentation>,
    /// Cache provider
    pub cache: Arc<dyn Cache>,
    /// Storage provider
    pub storage: Arc<dyn Storage>,
    /// Telemetry store provider
    pub telemetry: Arc<dyn TelemetryStore>,
    /// Web transport provider
    pub web: Arc<dyn WebTransport>,
    /// Metrics query engine
    pub query_engine: Arc<dyn QueryEngine>,
    /// Alert evaluation engine
    pub alerting: Arc<dyn AlertEngine>,
    /// Licensing engine
    pub licensing: Arc<dyn Licensing>,
    /// Control plane client
    pub control_plane: Arc<dyn ControlPlaneClient>,
    /// Email sender
    pub email: Arc<dyn EmailSender>,
    /// Business modules
    pub modules: Modules,
    /// Request handlers
    pub handlers: Handlers,
}

impl Platform {
    /// Start every registered service in order
    pub async fn start(&self) -> Result<()> {
        self.registry.start_all().await
    }

    /// Stop every registered service in reverse order
    pub async fn stop(&self) -> Result<()> {
        self.registry.stop_all().await
    }
}

impl std::fmt::Debug for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platform")
            .field("cache", &self.cache.provider_name())
            .field("storage", &self.storage.provider_name())
            .field("telemetry", &self.telemetry.provider_name())
            .field("licensing", &self.licensing.provider_name())
            .finish_non_exhaustive()
    }
}

/// Select, construct, and wire every provider into a [`Platform`]
pub async fn bootstrap(config: AppConfig, args: BootstrapArgs) -> Result<Platform> {
    // 1. Instrumentation first: everything downstream logs and counts
    let instrumentation = Arc::new(Instrumentation::new(
        &config.instrumentation,
        args.build.clone(),
    )?);
    let build = instrumentation.build();
    info!(
        version = %build.version,
        variant = %build.variant,
        commit = %build.commit,
        branch = %build.branch,
        time = %build.build_time,
        "starting vigil"
    );
    debug!(?config, "loaded vigil config");

    let settings = instrumentation.to_provider_settings();

    // 2. Control plane client; variant-chosen, not config-selected
    let control_plane = args
        .control_plane_factory
        .create(&settings, &config.control_plane)
        .await
        .map_err(|e| {
            vigil_domain::Error::construction(
                "control_plane",
                args.control_plane_factory.name().as_str(),
                e,
            )
        })?;

    // 3. Independent config-selected components
    let email = resolve_selected(&settings, &config.email, &args.email_factories).await?;
    let cache = resolve_selected(&settings, &config.cache, &args.cache_factories).await?;
    let web = resolve_selected(&settings, &config.web, &args.web_factories).await?;
    let storage = resolve_selected(&settings, &config.storage, &args.storage_factories).await?;
    let telemetry =
        resolve_selected(&settings, &config.telemetry, &args.telemetry_factories).await?;

    // 4. Query engine over the telemetry store it depends on
    let query_factories = (args.query_engine_factories)(telemetry.clone())?;
    let query_engine = resolve_selected(&settings, &config.query, &query_factories).await?;

    // 5. Schema migrations before anything touches the storage schema
    Migrator::new(storage.clone(), args.migrations)?.migrate().await?;

    // 6. Storage-dependent engines
    let alert_factories = (args.alert_engine_factories)(storage.clone())?;
    let alerting = resolve_selected(&settings, &config.alerting, &alert_factories).await?;

    let licensing_factory =
        (args.licensing_factory_callback)(storage.clone(), control_plane.clone());
    let licensing = licensing_factory
        .create(&settings, &config.licensing)
        .await
        .map_err(|e| {
            vigil_domain::Error::construction("licensing", licensing_factory.name().as_str(), e)
        })?;

    // 7. Pure composition over the constructed providers
    let modules = Modules::new(
        storage.clone(),
        cache.clone(),
        email.clone(),
        control_plane.clone(),
        &settings,
    );
    let handlers = Handlers::new(&modules);

    // 8. Lifecycle registry over the start/stop-bearing subset; the
    //    remaining providers manage their own resources internally
    let registry = ServiceRegistry::new(vec![
        NamedService::new(
            Name::must("instrumentation"),
            instrumentation.clone() as Arc<dyn Service>,
        ),
        NamedService::new(Name::must("alerting"), alerting.clone() as Arc<dyn Service>),
        NamedService::new(Name::must("licensing"), licensing.clone() as Arc<dyn Service>),
    ])?
    .with_stop_grace(Duration::from_secs(config.shutdown.grace_period_secs));

    info!("vigil bootstrap complete");

    Ok(Platform {
        registry,
        instrumentation,
        cache,
        storage,
        telemetry,
        web,
        query_engine,
        alerting,
        licensing,
        control_plane,
        email,
        modules,
        handlers,
    })
}
