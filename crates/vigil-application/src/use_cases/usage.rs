//! Anonymous usage reporting module
//!
//! Builds a usage snapshot from storage counts and ships it to the control
//! plane. The install identifier is minted on first use and persisted in
//! the `install` table created by the initial schema migration.

use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use vigil_domain::error::{Error, Result};

use crate::ports::providers::{ControlPlaneClient, Storage, UsageSnapshot};

/// Collects and reports anonymous usage totals
pub struct UsageModule {
    storage: Arc<dyn Storage>,
    control_plane: Arc<dyn ControlPlaneClient>,
    version: String,
}

impl UsageModule {
    /// Compose the module over its providers
    pub fn new(
        storage: Arc<dyn Storage>,
        control_plane: Arc<dyn ControlPlaneClient>,
        version: String,
    ) -> Self {
        Self {
            storage,
            control_plane,
            version,
        }
    }

    /// Build the current usage snapshot
    pub async fn snapshot(&self) -> Result<UsageSnapshot> {
        Ok(UsageSnapshot {
            install_id: self.install_id().await?,
            host: hostname::get()
                .map(|h| h.to_string_lossy().into_owned())
                .unwrap_or_else(|_| "unknown".to_string()),
            version: self.version.clone(),
            dashboards: self.storage.count("dashboards").await?,
            alert_rules: self.storage.count("alert_rules").await?,
        })
    }

    /// Build a snapshot and report it to the control plane
    pub async fn report(&self) -> Result<()> {
        let snapshot = self.snapshot().await?;
        debug!(install = %snapshot.install_id, "reporting usage snapshot");
        self.control_plane.report_usage(&snapshot).await
    }

    /// Stable identifier for this install, minted on first use
    async fn install_id(&self) -> Result<String> {
        if let Some(value) = self.storage.get("install", "install_id").await? {
            return value
                .as_str()
                .map(ToString::to_string)
                .ok_or_else(|| Error::internal("install_id record is not a string"));
        }

        let id = Uuid::new_v4().to_string();
        self.storage
            .put("install", "install_id", serde_json::Value::String(id.clone()))
            .await?;
        Ok(id)
    }
}
