//! Community licensing provider
//!
//! Open builds run unlicensed; start and stop are trivial.

use async_trait::async_trait;
use std::sync::Arc;
use vigil_application::ports::providers::{License, Licensing, LicensingConfig};
use vigil_application::ports::Service;
use vigil_application::{ProviderFactory, ProviderSettings};
use vigil_domain::error::Result;
use vigil_domain::Name;

/// Licensing for open builds
#[derive(Debug, Clone, Copy, Default)]
pub struct CommunityLicensing;

#[async_trait]
impl Service for CommunityLicensing {
    async fn start(&self) -> Result<()> {
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl Licensing for CommunityLicensing {
    async fn active_license(&self) -> Result<License> {
        Ok(License::community())
    }

    fn provider_name(&self) -> &str {
        "community"
    }
}

/// Factory for the `community` licensing provider
pub struct CommunityLicensingFactory {
    name: Name,
}

impl CommunityLicensingFactory {
    /// Create the factory
    pub fn new() -> Self {
        Self {
            name: Name::must("community"),
        }
    }
}

impl Default for CommunityLicensingFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderFactory<dyn Licensing, LicensingConfig> for CommunityLicensingFactory {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn create(
        &self,
        _settings: &ProviderSettings,
        _config: &LicensingConfig,
    ) -> Result<Arc<dyn Licensing>> {
        Ok(Arc::new(CommunityLicensing))
    }
}
