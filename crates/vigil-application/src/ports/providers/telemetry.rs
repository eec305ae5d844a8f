//! Telemetry Store Provider Port
//!
//! Write/query surface over the time-series backend holding the platform's
//! ingested telemetry. Protocol parsing and ingestion pipelines are
//! collaborator concerns; this core only constructs the store and hands it
//! to the query engine.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use vigil_domain::error::Result;
use vigil_domain::Name;

use crate::ports::registry::SelectedProvider;

/// Configuration for the telemetry store component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Selected provider name
    pub provider: Name,
    /// Backend address for server-backed providers
    pub address: Option<String>,
    /// How long points are retained
    pub retention_hours: u32,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            provider: Name::must("memory"),
            address: None,
            retention_hours: 72,
        }
    }
}

impl SelectedProvider for TelemetryConfig {
    fn provider(&self) -> &Name {
        &self.provider
    }
}

/// One measured sample of a named metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    /// Metric name
    pub name: String,
    /// Sample value
    pub value: f64,
    /// Sample timestamp
    pub timestamp: DateTime<Utc>,
    /// Dimension labels
    pub labels: HashMap<String, String>,
}

/// Time-bounded selection of one metric's points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeSelector {
    /// Metric name to select
    pub metric: String,
    /// Inclusive range start
    pub start: DateTime<Utc>,
    /// Exclusive range end
    pub end: DateTime<Utc>,
}

/// Telemetry backend capability
#[async_trait]
pub trait TelemetryStore: Send + Sync {
    /// Append a batch of points
    async fn write_points(&self, points: Vec<MetricPoint>) -> Result<()>;

    /// Points matching the selector, ordered by timestamp
    async fn query_range(&self, selector: &RangeSelector) -> Result<Vec<MetricPoint>>;

    /// Name of the provider implementation
    fn provider_name(&self) -> &str;
}
