//! Metrics Query Engine Provider Port
//!
//! Evaluates metric expressions against an already-constructed telemetry
//! store. Because the engine cannot exist without the store, its factory
//! set is generated dynamically at the appropriate bootstrap step rather
//! than being a static map.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vigil_domain::error::Result;
use vigil_domain::Name;

use crate::ports::providers::telemetry::MetricPoint;
use crate::ports::registry::SelectedProvider;

/// Configuration for the query engine component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryEngineConfig {
    /// Selected provider name
    pub provider: Name,
    /// Hard ceiling on a single query's range
    pub max_range_hours: u32,
}

impl Default for QueryEngineConfig {
    fn default() -> Self {
        Self {
            provider: Name::must("basic"),
            max_range_hours: 24,
        }
    }
}

impl SelectedProvider for QueryEngineConfig {
    fn provider(&self) -> &Name {
        &self.provider
    }
}

/// Metrics query capability
#[async_trait]
pub trait QueryEngine: Send + Sync {
    /// Evaluate `expr` over `[start, end)` against the telemetry store
    async fn query(
        &self,
        expr: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MetricPoint>>;

    /// Name of the provider implementation
    fn provider_name(&self) -> &str;
}
