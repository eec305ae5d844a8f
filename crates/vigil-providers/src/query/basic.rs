//! Basic query engine
//!
//! Treats the expression as a bare metric selector and delegates to the
//! telemetry store's range query. Aggregation functions and arithmetic are
//! collaborator territory.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use vigil_application::ports::providers::{
    MetricPoint, QueryEngine, QueryEngineConfig, RangeSelector, TelemetryStore,
};
use vigil_application::{ProviderFactory, ProviderSettings};
use vigil_domain::error::{Error, Result};
use vigil_domain::Name;

/// Metric-selector query engine over the telemetry store
pub struct BasicQueryEngine {
    telemetry: Arc<dyn TelemetryStore>,
    max_range: Duration,
}

impl BasicQueryEngine {
    /// Create an engine bounded to `max_range_hours` per query
    pub fn new(telemetry: Arc<dyn TelemetryStore>, max_range_hours: u32) -> Self {
        Self {
            telemetry,
            max_range: Duration::hours(i64::from(max_range_hours)),
        }
    }
}

#[async_trait]
impl QueryEngine for BasicQueryEngine {
    async fn query(
        &self,
        expr: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MetricPoint>> {
        let metric = expr.trim();
        if metric.is_empty() {
            return Err(Error::configuration("empty query expression"));
        }
        if end <= start {
            return Err(Error::configuration("query range is empty"));
        }
        if end - start > self.max_range {
            return Err(Error::configuration(format!(
                "query range exceeds the configured maximum of {}h",
                self.max_range.num_hours()
            )));
        }

        self.telemetry
            .query_range(&RangeSelector {
                metric: metric.to_string(),
                start,
                end,
            })
            .await
    }

    fn provider_name(&self) -> &str {
        "basic"
    }
}

/// Factory for the `basic` query engine provider
pub struct BasicQueryEngineFactory {
    name: Name,
    telemetry: Arc<dyn TelemetryStore>,
}

impl BasicQueryEngineFactory {
    /// Create the factory over the telemetry store
    pub fn new(telemetry: Arc<dyn TelemetryStore>) -> Self {
        Self {
            name: Name::must("basic"),
            telemetry,
        }
    }
}

#[async_trait]
impl ProviderFactory<dyn QueryEngine, QueryEngineConfig> for BasicQueryEngineFactory {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn create(
        &self,
        _settings: &ProviderSettings,
        config: &QueryEngineConfig,
    ) -> Result<Arc<dyn QueryEngine>> {
        Ok(Arc::new(BasicQueryEngine::new(
            self.telemetry.clone(),
            config.max_range_hours,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::MemoryTelemetryStore;
    use std::collections::HashMap;

    #[tokio::test]
    async fn rejects_oversized_ranges() {
        let engine = BasicQueryEngine::new(Arc::new(MemoryTelemetryStore::new(24)), 1);
        let now = Utc::now();
        let err = engine
            .query("cpu", now - Duration::hours(2), now)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("query range"));
    }

    #[tokio::test]
    async fn delegates_to_the_store() {
        let store = Arc::new(MemoryTelemetryStore::new(24));
        store
            .write_points(vec![MetricPoint {
                name: "cpu".to_string(),
                value: 0.5,
                timestamp: Utc::now(),
                labels: HashMap::new(),
            }])
            .await
            .unwrap();

        let engine = BasicQueryEngine::new(store, 24);
        let now = Utc::now();
        let points = engine
            .query(" cpu ", now - Duration::minutes(5), now + Duration::minutes(1))
            .await
            .unwrap();
        assert_eq!(points.len(), 1);
    }
}
