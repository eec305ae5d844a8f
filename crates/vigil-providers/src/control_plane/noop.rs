//! Noop control plane client

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use vigil_application::ports::providers::{
    ControlPlaneClient, ControlPlaneConfig, License, UsageSnapshot,
};
use vigil_application::{ProviderFactory, ProviderSettings};
use vigil_domain::error::Result;
use vigil_domain::Name;

/// Control plane client that accepts everything locally
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopControlPlaneClient;

#[async_trait]
impl ControlPlaneClient for NoopControlPlaneClient {
    async fn validate_license(&self, key: &str) -> Result<License> {
        debug!(key, "accepting license without remote validation");
        Ok(License {
            id: key.to_string(),
            ..License::community()
        })
    }

    async fn report_usage(&self, snapshot: &UsageSnapshot) -> Result<()> {
        debug!(install = %snapshot.install_id, "dropping usage snapshot (noop client)");
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "noop"
    }
}

/// Factory for the `noop` control plane client
pub struct NoopControlPlaneClientFactory {
    name: Name,
}

impl NoopControlPlaneClientFactory {
    /// Create the factory
    pub fn new() -> Self {
        Self {
            name: Name::must("noop"),
        }
    }
}

impl Default for NoopControlPlaneClientFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderFactory<dyn ControlPlaneClient, ControlPlaneConfig> for NoopControlPlaneClientFactory {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn create(
        &self,
        _settings: &ProviderSettings,
        _config: &ControlPlaneConfig,
    ) -> Result<Arc<dyn ControlPlaneClient>> {
        Ok(Arc::new(NoopControlPlaneClient))
    }
}
