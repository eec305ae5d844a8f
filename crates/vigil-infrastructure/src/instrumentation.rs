//! Instrumentation component
//!
//! The first bootstrap step. Installs logging, creates the process-wide
//! metrics collector, and carries the build metadata. Every later factory
//! receives the resulting [`ProviderSettings`]; the component itself joins
//! the lifecycle registry.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use vigil_application::ports::Service;
use vigil_application::ProviderSettings;
use vigil_domain::error::Result;
use vigil_domain::BuildInfo;

use crate::config::InstrumentationConfig;
use crate::logging::init_logging;
use crate::metrics::AtomicMetricsCollector;

/// Logging, metrics, and build metadata in one handle
pub struct Instrumentation {
    build: BuildInfo,
    metrics: Arc<AtomicMetricsCollector>,
}

impl Instrumentation {
    /// Install logging and create the shared metrics collector
    pub fn new(config: &InstrumentationConfig, build: BuildInfo) -> Result<Self> {
        init_logging(&config.logging)?;
        Ok(Self {
            build,
            metrics: Arc::new(AtomicMetricsCollector::new()),
        })
    }

    /// The shared settings handed to every provider factory
    pub fn to_provider_settings(&self) -> ProviderSettings {
        ProviderSettings::new(self.build.clone(), self.metrics.clone())
    }

    /// Build metadata of the running binary
    pub fn build(&self) -> &BuildInfo {
        &self.build
    }

    /// The process-wide metrics collector
    pub fn metrics(&self) -> Arc<AtomicMetricsCollector> {
        self.metrics.clone()
    }
}

#[async_trait]
impl Service for Instrumentation {
    async fn start(&self) -> Result<()> {
        info!(version = %self.build.version, "instrumentation running");
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        // file appenders flush on drop; nothing to release here
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_application::ports::infrastructure::MetricsCollector;

    #[test]
    fn settings_share_the_collector() {
        let instrumentation =
            Instrumentation::new(&InstrumentationConfig::default(), BuildInfo::default()).unwrap();
        let settings = instrumentation.to_provider_settings();

        settings.metrics.increment("seen");
        assert_eq!(instrumentation.metrics().get("seen"), 1);
        assert_eq!(settings.build.version, instrumentation.build().version);
    }
}
