//! HTTP control plane client
//!
//! Talks to the hosted licensing/telemetry authority over its JSON API.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use vigil_application::ports::providers::{
    ControlPlaneClient, ControlPlaneConfig, License, UsageSnapshot,
};
use vigil_application::{ProviderFactory, ProviderSettings};
use vigil_domain::error::{Error, Result};
use vigil_domain::Name;

/// Client for the hosted control plane API
pub struct HttpControlPlaneClient {
    client: reqwest::Client,
    base_url: reqwest::Url,
    api_key: Option<String>,
}

impl HttpControlPlaneClient {
    /// Create a client against `base_url`
    pub fn new(
        base_url: reqwest::Url,
        api_key: Option<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::infrastructure_with_source("failed to build HTTP client", e))?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::configuration_with_source("invalid control plane url", e))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl ControlPlaneClient for HttpControlPlaneClient {
    async fn validate_license(&self, key: &str) -> Result<License> {
        let request = self
            .client
            .post(self.endpoint("v1/licenses/validate")?)
            .json(&serde_json::json!({ "key": key }));
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| Error::infrastructure_with_source("control plane unreachable", e))?;

        if !response.status().is_success() {
            return Err(Error::infrastructure(format!(
                "control plane rejected license validation: HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::infrastructure_with_source("malformed license response", e))
    }

    async fn report_usage(&self, snapshot: &UsageSnapshot) -> Result<()> {
        let request = self.client.post(self.endpoint("v1/usage")?).json(snapshot);
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| Error::infrastructure_with_source("control plane unreachable", e))?;

        if !response.status().is_success() {
            return Err(Error::infrastructure(format!(
                "control plane rejected usage report: HTTP {}",
                response.status()
            )));
        }
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "http"
    }
}

/// Factory for the `http` control plane client
pub struct HttpControlPlaneClientFactory {
    name: Name,
}

impl HttpControlPlaneClientFactory {
    /// Create the factory
    pub fn new() -> Self {
        Self {
            name: Name::must("http"),
        }
    }
}

impl Default for HttpControlPlaneClientFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderFactory<dyn ControlPlaneClient, ControlPlaneConfig> for HttpControlPlaneClientFactory {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn create(
        &self,
        settings: &ProviderSettings,
        config: &ControlPlaneConfig,
    ) -> Result<Arc<dyn ControlPlaneClient>> {
        let base_url = config
            .url
            .parse()
            .map_err(|e| Error::configuration_with_source("invalid control plane url", e))?;
        let user_agent = format!("vigil/{}", settings.build.version);
        Ok(Arc::new(HttpControlPlaneClient::new(
            base_url,
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
            &user_agent,
        )?))
    }
}
