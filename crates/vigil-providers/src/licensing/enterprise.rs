//! Enterprise licensing provider
//!
//! Validates the configured key against the control plane at startup,
//! journals the result in storage, and refreshes the license on an
//! interval until stopped.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify, RwLock};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use vigil_application::ports::providers::{
    ControlPlaneClient, License, Licensing, LicensingConfig, Storage,
};
use vigil_application::ports::Service;
use vigil_application::{ProviderFactory, ProviderSettings};
use vigil_domain::error::{Error, Result};
use vigil_domain::Name;

/// Control-plane backed licensing with a storage journal
pub struct EnterpriseLicensing {
    storage: Arc<dyn Storage>,
    control_plane: Arc<dyn ControlPlaneClient>,
    license_key: String,
    refresh_interval: Duration,
    active: Arc<RwLock<Option<License>>>,
    shutdown: Arc<Notify>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl EnterpriseLicensing {
    /// Create the engine; no I/O happens until `start`
    pub fn new(
        storage: Arc<dyn Storage>,
        control_plane: Arc<dyn ControlPlaneClient>,
        license_key: String,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            storage,
            control_plane,
            license_key,
            refresh_interval,
            active: Arc::new(RwLock::new(None)),
            shutdown: Arc::new(Notify::new()),
            worker: Mutex::new(None),
        }
    }

    async fn refresh(
        storage: &dyn Storage,
        control_plane: &dyn ControlPlaneClient,
        key: &str,
        active: &RwLock<Option<License>>,
    ) -> Result<()> {
        let license = control_plane.validate_license(key).await?;
        storage
            .put(
                "license_journal",
                &license.id,
                serde_json::to_value(&license)
                    .map_err(|e| Error::infrastructure_with_source("failed to encode license", e))?,
            )
            .await?;
        *active.write().await = Some(license);
        Ok(())
    }
}

#[async_trait]
impl Service for EnterpriseLicensing {
    async fn start(&self) -> Result<()> {
        let mut worker = self.worker.lock().await;
        if worker.is_some() {
            return Ok(());
        }

        // the initial validation decides whether startup succeeds
        Self::refresh(
            self.storage.as_ref(),
            self.control_plane.as_ref(),
            &self.license_key,
            &self.active,
        )
        .await?;

        let storage = self.storage.clone();
        let control_plane = self.control_plane.clone();
        let key = self.license_key.clone();
        let active = self.active.clone();
        let shutdown = self.shutdown.clone();
        let interval = self.refresh_interval;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // the first tick fires immediately and the license is fresh
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(err) = Self::refresh(
                            storage.as_ref(),
                            control_plane.as_ref(),
                            &key,
                            &active,
                        )
                        .await
                        {
                            warn!(%err, "license refresh failed, keeping last known license");
                        }
                    }
                    _ = shutdown.notified() => break,
                }
            }
        });
        *worker = Some(handle);

        info!("licensing engine started");
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        let Some(handle) = self.worker.lock().await.take() else {
            return Ok(());
        };
        self.shutdown.notify_one();
        let _ = handle.await;
        info!("licensing engine stopped");
        Ok(())
    }
}

#[async_trait]
impl Licensing for EnterpriseLicensing {
    async fn active_license(&self) -> Result<License> {
        self.active
            .read()
            .await
            .clone()
            .ok_or_else(|| Error::internal("licensing engine not started"))
    }

    fn provider_name(&self) -> &str {
        "enterprise"
    }
}

/// Factory for the `enterprise` licensing provider
///
/// Produced by the enterprise factory callback once storage and the
/// control plane client exist.
pub struct EnterpriseLicensingFactory {
    name: Name,
    storage: Arc<dyn Storage>,
    control_plane: Arc<dyn ControlPlaneClient>,
}

impl EnterpriseLicensingFactory {
    /// Create the factory over its dependencies
    pub fn new(storage: Arc<dyn Storage>, control_plane: Arc<dyn ControlPlaneClient>) -> Self {
        Self {
            name: Name::must("enterprise"),
            storage,
            control_plane,
        }
    }
}

#[async_trait]
impl ProviderFactory<dyn Licensing, LicensingConfig> for EnterpriseLicensingFactory {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn create(
        &self,
        _settings: &ProviderSettings,
        config: &LicensingConfig,
    ) -> Result<Arc<dyn Licensing>> {
        let key = config
            .license_key
            .clone()
            .ok_or_else(|| Error::configuration("enterprise licensing requires a license_key"))?;
        Ok(Arc::new(EnterpriseLicensing::new(
            self.storage.clone(),
            self.control_plane.clone(),
            key,
            Duration::from_secs(config.refresh_interval_secs),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control_plane::NoopControlPlaneClient;
    use crate::storage::MemoryStorage;

    #[tokio::test]
    async fn start_validates_and_journals_the_license() {
        let storage = Arc::new(MemoryStorage::new());
        storage.ensure_table("license_journal").await.unwrap();

        let licensing = EnterpriseLicensing::new(
            storage.clone(),
            Arc::new(NoopControlPlaneClient),
            "key-123".to_string(),
            Duration::from_secs(3600),
        );

        licensing.start().await.unwrap();
        let license = licensing.active_license().await.unwrap();
        assert_eq!(storage.count("license_journal").await.unwrap(), 1);
        assert_eq!(license.plan, "community");
        licensing.stop().await.unwrap();
    }

    #[tokio::test]
    async fn start_fails_when_journal_table_is_missing() {
        let storage = Arc::new(MemoryStorage::new());
        let licensing = EnterpriseLicensing::new(
            storage,
            Arc::new(NoopControlPlaneClient),
            "key-123".to_string(),
            Duration::from_secs(3600),
        );
        assert!(licensing.start().await.is_err());
    }
}
