//! Noop web transport

use async_trait::async_trait;
use std::sync::Arc;
use vigil_application::ports::providers::{WebConfig, WebTransport};
use vigil_application::{ProviderFactory, ProviderSettings};
use vigil_domain::error::Result;
use vigil_domain::Name;

/// Transport for headless deployments; every asset is absent
#[derive(Debug, Clone, Default)]
pub struct NoopWebTransport {
    prefix: String,
}

impl NoopWebTransport {
    /// Create a transport mounted under `prefix`
    pub fn new(prefix: String) -> Self {
        Self { prefix }
    }
}

#[async_trait]
impl WebTransport for NoopWebTransport {
    fn prefix(&self) -> &str {
        &self.prefix
    }

    async fn asset(&self, _path: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    fn provider_name(&self) -> &str {
        "noop"
    }
}

/// Factory for the `noop` web transport provider
pub struct NoopWebTransportFactory {
    name: Name,
}

impl NoopWebTransportFactory {
    /// Create the factory
    pub fn new() -> Self {
        Self {
            name: Name::must("noop"),
        }
    }
}

impl Default for NoopWebTransportFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderFactory<dyn WebTransport, WebConfig> for NoopWebTransportFactory {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn create(
        &self,
        _settings: &ProviderSettings,
        config: &WebConfig,
    ) -> Result<Arc<dyn WebTransport>> {
        Ok(Arc::new(NoopWebTransport::new(config.prefix.clone())))
    }
}
