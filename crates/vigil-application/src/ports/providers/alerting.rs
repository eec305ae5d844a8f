//! Alert Evaluation Engine Provider Port
//!
//! Evaluates alert rules stored in the platform's storage between `start`
//! and `stop`. Rule semantics are a collaborator concern; the bootstrap
//! core only constructs the engine (its factory set is parameterized by
//! the storage handle) and registers it for lifecycle management.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vigil_domain::error::Result;
use vigil_domain::Name;

use crate::ports::lifecycle::Service;
use crate::ports::registry::SelectedProvider;

/// Configuration for the alert engine component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertingConfig {
    /// Selected provider name
    pub provider: Name,
    /// Seconds between background evaluation passes
    pub evaluation_interval_secs: u64,
}

impl Default for AlertingConfig {
    fn default() -> Self {
        Self {
            provider: Name::must("builtin"),
            evaluation_interval_secs: 60,
        }
    }
}

impl SelectedProvider for AlertingConfig {
    fn provider(&self) -> &Name {
        &self.provider
    }
}

/// Alert evaluation capability with an explicit lifecycle
#[async_trait]
pub trait AlertEngine: Service {
    /// Run one evaluation pass immediately, returning the rule count seen
    async fn evaluate_now(&self) -> Result<u64>;

    /// Name of the provider implementation
    fn provider_name(&self) -> &str;
}
