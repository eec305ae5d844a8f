//! Web Transport Provider Port
//!
//! Serves the packaged UI assets. The HTTP server itself is a collaborator;
//! this port only resolves asset bytes under a mount prefix so any server
//! can front it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vigil_domain::error::Result;
use vigil_domain::Name;

use crate::ports::registry::SelectedProvider;

/// Configuration for the web transport component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// Selected provider name
    pub provider: Name,
    /// Mount prefix the assets are served under
    pub prefix: String,
    /// Directory holding the packaged assets (filesystem provider)
    pub asset_dir: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            provider: Name::must("noop"),
            prefix: "/".to_string(),
            asset_dir: None,
        }
    }
}

impl SelectedProvider for WebConfig {
    fn provider(&self) -> &Name {
        &self.provider
    }
}

/// UI asset transport capability
#[async_trait]
pub trait WebTransport: Send + Sync {
    /// Mount prefix the assets are served under
    fn prefix(&self) -> &str;

    /// Bytes of the asset at `path`, or `None` if it does not exist
    async fn asset(&self, path: &str) -> Result<Option<Vec<u8>>>;

    /// Name of the provider implementation
    fn provider_name(&self) -> &str;
}
