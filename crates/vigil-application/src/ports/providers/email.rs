//! Email Sender Provider Port

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vigil_domain::error::Result;
use vigil_domain::Name;

use crate::ports::registry::SelectedProvider;

/// Configuration for the email component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Selected provider name
    pub provider: Name,
    /// Delivery endpoint for gateway-backed providers
    pub endpoint: Option<String>,
    /// Sender address stamped on outgoing mail
    pub sender: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: Name::must("noop"),
            endpoint: None,
            sender: "noreply@vigil.example".to_string(),
        }
    }
}

impl SelectedProvider for EmailConfig {
    fn provider(&self) -> &Name {
        &self.provider
    }
}

/// One outgoing message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

/// Email delivery capability
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver one message
    async fn send(&self, message: &EmailMessage) -> Result<()>;

    /// Name of the provider implementation
    fn provider_name(&self) -> &str;
}
