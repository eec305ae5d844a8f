//! Licensing Engine Provider Port
//!
//! Tracks the active license between `start` and `stop`. Its construction
//! strategy varies by build variant, so the bootstrap receives a factory
//! *callback* `(Storage, ControlPlaneClient) → ProviderFactory` instead of
//! a static factory map.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use vigil_domain::error::Result;
use vigil_domain::Name;

use crate::ports::lifecycle::Service;
use crate::ports::providers::control_plane::ControlPlaneClient;
use crate::ports::providers::storage::Storage;
use crate::ports::registry::{ProviderFactory, SelectedProvider};

/// Configuration for the licensing component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicensingConfig {
    /// Selected provider name
    pub provider: Name,
    /// License key to validate against the control plane, if any
    pub license_key: Option<String>,
    /// Seconds between background refresh passes
    pub refresh_interval_secs: u64,
}

impl Default for LicensingConfig {
    fn default() -> Self {
        Self {
            provider: Name::must("community"),
            license_key: None,
            refresh_interval_secs: 3600,
        }
    }
}

impl SelectedProvider for LicensingConfig {
    fn provider(&self) -> &Name {
        &self.provider
    }
}

/// Validity of the active license
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseStatus {
    /// License accepted by the issuing authority
    Valid,
    /// License past its validity window
    Expired,
    /// Open build without a license requirement
    Unlicensed,
}

/// The license the platform currently operates under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    /// License identifier
    pub id: String,
    /// Commercial plan name ("community", "teams", ...)
    pub plan: String,
    /// Validity state
    pub status: LicenseStatus,
    /// End of the validity window, if bounded
    pub valid_until: Option<DateTime<Utc>>,
}

impl License {
    /// The implicit license of a community build
    pub fn community() -> Self {
        Self {
            id: "community".to_string(),
            plan: "community".to_string(),
            status: LicenseStatus::Unlicensed,
            valid_until: None,
        }
    }
}

/// Licensing capability with an explicit lifecycle
#[async_trait]
pub trait Licensing: Service {
    /// The license currently in force
    async fn active_license(&self) -> Result<License>;

    /// Name of the provider implementation
    fn provider_name(&self) -> &str;
}

/// Factory-of-factories for the licensing component
///
/// The bootstrap invokes the callback once, after storage and the control
/// plane client exist, to obtain the variant-specific licensing factory.
pub type LicensingFactoryCallback = Box<
    dyn FnOnce(
            Arc<dyn Storage>,
            Arc<dyn ControlPlaneClient>,
        ) -> Arc<dyn ProviderFactory<dyn Licensing, LicensingConfig>>
        + Send,
>;
