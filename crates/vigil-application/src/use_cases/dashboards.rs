//! Dashboard management module
//!
//! Reads go through the cache; writes invalidate it. Dashboards live in the
//! `dashboards` table created by the initial schema migration.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use vigil_domain::error::{Error, Result};

use crate::ports::providers::{Cache, Storage};

/// One saved dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Dashboard identifier
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// Panel layout and queries, stored verbatim
    pub data: serde_json::Value,
}

/// Dashboard reads and writes over storage with a cache in front
pub struct DashboardModule {
    storage: Arc<dyn Storage>,
    cache: Arc<dyn Cache>,
}

impl DashboardModule {
    /// Compose the module over its providers
    pub fn new(storage: Arc<dyn Storage>, cache: Arc<dyn Cache>) -> Self {
        Self { storage, cache }
    }

    /// Fetch a dashboard by id, serving from cache when possible
    pub async fn get(&self, id: Uuid) -> Result<Option<Dashboard>> {
        let cache_key = cache_key(id);
        if let Some(bytes) = self.cache.get(&cache_key).await? {
            debug!(dashboard = %id, "dashboard served from cache");
            let dashboard = serde_json::from_slice(&bytes)
                .map_err(|e| Error::infrastructure_with_source("corrupt cached dashboard", e))?;
            return Ok(Some(dashboard));
        }

        let Some(value) = self.storage.get("dashboards", &id.to_string()).await? else {
            return Ok(None);
        };
        let dashboard: Dashboard = serde_json::from_value(value)
            .map_err(|e| Error::infrastructure_with_source("corrupt stored dashboard", e))?;

        let bytes = serde_json::to_vec(&dashboard)
            .map_err(|e| Error::infrastructure_with_source("failed to encode dashboard", e))?;
        self.cache.set(&cache_key, bytes, None).await?;

        Ok(Some(dashboard))
    }

    /// Insert or replace a dashboard
    pub async fn save(&self, dashboard: &Dashboard) -> Result<()> {
        let value = serde_json::to_value(dashboard)
            .map_err(|e| Error::infrastructure_with_source("failed to encode dashboard", e))?;
        self.storage
            .put("dashboards", &dashboard.id.to_string(), value)
            .await?;
        self.cache.delete(&cache_key(dashboard.id)).await?;
        Ok(())
    }

    /// Number of saved dashboards
    pub async fn count(&self) -> Result<u64> {
        self.storage.count("dashboards").await
    }
}

/// Thin request handler over [`DashboardModule`]
pub struct DashboardHandler {
    module: Arc<DashboardModule>,
}

impl DashboardHandler {
    /// Compose the handler
    pub fn new(module: Arc<DashboardModule>) -> Self {
        Self { module }
    }

    /// Fetch a dashboard as a wire-shaped JSON value
    pub async fn get(&self, id: Uuid) -> Result<Option<serde_json::Value>> {
        let dashboard = self.module.get(id).await?;
        dashboard
            .map(|d| {
                serde_json::to_value(&d)
                    .map_err(|e| Error::infrastructure_with_source("failed to encode dashboard", e))
            })
            .transpose()
    }

    /// Save a dashboard from a wire-shaped JSON value
    pub async fn save(&self, payload: serde_json::Value) -> Result<Uuid> {
        let dashboard: Dashboard = serde_json::from_value(payload)
            .map_err(|e| Error::configuration_with_source("invalid dashboard payload", e))?;
        self.module.save(&dashboard).await?;
        Ok(dashboard.id)
    }
}

fn cache_key(id: Uuid) -> String {
    format!("dashboard:{id}")
}
