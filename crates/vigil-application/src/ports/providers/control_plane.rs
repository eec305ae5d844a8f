//! Control Plane Client Provider Port
//!
//! Client for the external licensing/telemetry authority. The client is not
//! config-selected: the caller injects a single factory whose concrete
//! implementation depends on the build variant.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vigil_domain::error::Result;

use crate::ports::providers::licensing::License;

/// Configuration for the control plane client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlPlaneConfig {
    /// Base URL of the control plane API
    pub url: String,
    /// API key presented on every request
    pub api_key: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ControlPlaneConfig {
    fn default() -> Self {
        Self {
            url: "https://controlplane.vigil.example".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Anonymous usage totals reported to the control plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSnapshot {
    /// Reporting install identifier
    pub install_id: String,
    /// Host the platform runs on
    pub host: String,
    /// Platform version
    pub version: String,
    /// Number of dashboards defined
    pub dashboards: u64,
    /// Number of alert rules defined
    pub alert_rules: u64,
}

/// External licensing/telemetry authority capability
#[async_trait]
pub trait ControlPlaneClient: Send + Sync {
    /// Validate a license key with the issuing authority
    async fn validate_license(&self, key: &str) -> Result<License>;

    /// Report anonymous usage totals
    async fn report_usage(&self, snapshot: &UsageSnapshot) -> Result<()>;

    /// Name of the provider implementation
    fn provider_name(&self) -> &str;
}
