//! Noop email sender

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use vigil_application::ports::providers::{EmailConfig, EmailMessage, EmailSender};
use vigil_application::{ProviderFactory, ProviderSettings};
use vigil_domain::error::Result;
use vigil_domain::Name;

/// Email sender that drops every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEmailSender;

#[async_trait]
impl EmailSender for NoopEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        debug!(to = %message.to, subject = %message.subject, "dropping email (noop sender)");
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "noop"
    }
}

/// Factory for the `noop` email provider
pub struct NoopEmailSenderFactory {
    name: Name,
}

impl NoopEmailSenderFactory {
    /// Create the factory
    pub fn new() -> Self {
        Self {
            name: Name::must("noop"),
        }
    }
}

impl Default for NoopEmailSenderFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderFactory<dyn EmailSender, EmailConfig> for NoopEmailSenderFactory {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn create(
        &self,
        _settings: &ProviderSettings,
        _config: &EmailConfig,
    ) -> Result<Arc<dyn EmailSender>> {
        Ok(Arc::new(NoopEmailSender))
    }
}
