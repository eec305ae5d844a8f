//! Noop telemetry store

use async_trait::async_trait;
use std::sync::Arc;
use vigil_application::ports::providers::{
    MetricPoint, RangeSelector, TelemetryConfig, TelemetryStore,
};
use vigil_application::{ProviderFactory, ProviderSettings};
use vigil_domain::error::Result;
use vigil_domain::Name;

/// Telemetry store that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetryStore;

#[async_trait]
impl TelemetryStore for NoopTelemetryStore {
    async fn write_points(&self, _points: Vec<MetricPoint>) -> Result<()> {
        Ok(())
    }

    async fn query_range(&self, _selector: &RangeSelector) -> Result<Vec<MetricPoint>> {
        Ok(Vec::new())
    }

    fn provider_name(&self) -> &str {
        "noop"
    }
}

/// Factory for the `noop` telemetry store provider
pub struct NoopTelemetryStoreFactory {
    name: Name,
}

impl NoopTelemetryStoreFactory {
    /// Create the factory
    pub fn new() -> Self {
        Self {
            name: Name::must("noop"),
        }
    }
}

impl Default for NoopTelemetryStoreFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderFactory<dyn TelemetryStore, TelemetryConfig> for NoopTelemetryStoreFactory {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn create(
        &self,
        _settings: &ProviderSettings,
        _config: &TelemetryConfig,
    ) -> Result<Arc<dyn TelemetryStore>> {
        Ok(Arc::new(NoopTelemetryStore))
    }
}
