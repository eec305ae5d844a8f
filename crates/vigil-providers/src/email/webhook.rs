//! Webhook email sender
//!
//! Delivers messages by posting them as JSON to an HTTP gateway (the
//! pattern most transactional mail services expose).

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use vigil_application::ports::providers::{EmailConfig, EmailMessage, EmailSender};
use vigil_application::{ProviderFactory, ProviderSettings};
use vigil_domain::error::{Error, Result};
use vigil_domain::Name;

/// Email sender backed by an HTTP delivery gateway
pub struct WebhookEmailSender {
    client: reqwest::Client,
    endpoint: reqwest::Url,
    sender: String,
}

impl WebhookEmailSender {
    /// Create a sender posting to `endpoint`
    pub fn new(endpoint: reqwest::Url, sender: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::infrastructure_with_source("failed to build HTTP client", e))?;
        Ok(Self {
            client,
            endpoint,
            sender,
        })
    }
}

#[async_trait]
impl EmailSender for WebhookEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&serde_json::json!({
                "from": self.sender,
                "to": message.to,
                "subject": message.subject,
                "body": message.body,
            }))
            .send()
            .await
            .map_err(|e| Error::infrastructure_with_source("email gateway unreachable", e))?;

        if !response.status().is_success() {
            return Err(Error::infrastructure(format!(
                "email gateway rejected message: HTTP {}",
                response.status()
            )));
        }
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "webhook"
    }
}

/// Factory for the `webhook` email provider
pub struct WebhookEmailSenderFactory {
    name: Name,
}

impl WebhookEmailSenderFactory {
    /// Create the factory
    pub fn new() -> Self {
        Self {
            name: Name::must("webhook"),
        }
    }
}

impl Default for WebhookEmailSenderFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderFactory<dyn EmailSender, EmailConfig> for WebhookEmailSenderFactory {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn create(
        &self,
        _settings: &ProviderSettings,
        config: &EmailConfig,
    ) -> Result<Arc<dyn EmailSender>> {
        let raw = config
            .endpoint
            .as_deref()
            .ok_or_else(|| Error::configuration("webhook email requires an endpoint"))?;
        let endpoint = raw
            .parse()
            .map_err(|e| Error::configuration_with_source("invalid email endpoint", e))?;
        Ok(Arc::new(WebhookEmailSender::new(
            endpoint,
            config.sender.clone(),
        )?))
    }
}
