//! In-process telemetry store
//!
//! Holds recent points per metric in memory, pruning anything older than
//! the configured retention window on write.

use async_trait::async_trait;
use chrono::Duration;
use dashmap::DashMap;
use std::sync::Arc;
use vigil_application::ports::providers::{
    MetricPoint, RangeSelector, TelemetryConfig, TelemetryStore,
};
use vigil_application::{ProviderFactory, ProviderSettings};
use vigil_domain::error::Result;
use vigil_domain::Name;

/// In-process telemetry store with bounded retention
pub struct MemoryTelemetryStore {
    series: DashMap<String, Vec<MetricPoint>>,
    retention: Duration,
}

impl MemoryTelemetryStore {
    /// Create a store retaining `retention_hours` of points
    pub fn new(retention_hours: u32) -> Self {
        Self {
            series: DashMap::new(),
            retention: Duration::hours(i64::from(retention_hours)),
        }
    }
}

#[async_trait]
impl TelemetryStore for MemoryTelemetryStore {
    async fn write_points(&self, points: Vec<MetricPoint>) -> Result<()> {
        for point in points {
            let mut series = self.series.entry(point.name.clone()).or_default();
            series.push(point);
        }

        // prune expired points per touched series
        let horizon = chrono::Utc::now() - self.retention;
        for mut entry in self.series.iter_mut() {
            entry.retain(|p| p.timestamp >= horizon);
        }
        Ok(())
    }

    async fn query_range(&self, selector: &RangeSelector) -> Result<Vec<MetricPoint>> {
        let Some(series) = self.series.get(&selector.metric) else {
            return Ok(Vec::new());
        };
        let mut points: Vec<MetricPoint> = series
            .iter()
            .filter(|p| p.timestamp >= selector.start && p.timestamp < selector.end)
            .cloned()
            .collect();
        points.sort_by_key(|p| p.timestamp);
        Ok(points)
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

/// Factory for the `memory` telemetry store provider
pub struct MemoryTelemetryStoreFactory {
    name: Name,
}

impl MemoryTelemetryStoreFactory {
    /// Create the factory
    pub fn new() -> Self {
        Self {
            name: Name::must("memory"),
        }
    }
}

impl Default for MemoryTelemetryStoreFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderFactory<dyn TelemetryStore, TelemetryConfig> for MemoryTelemetryStoreFactory {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn create(
        &self,
        _settings: &ProviderSettings,
        config: &TelemetryConfig,
    ) -> Result<Arc<dyn TelemetryStore>> {
        Ok(Arc::new(MemoryTelemetryStore::new(config.retention_hours)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;

    fn point(name: &str, value: f64, offset_secs: i64) -> MetricPoint {
        MetricPoint {
            name: name.to_string(),
            value,
            timestamp: Utc::now() - Duration::seconds(offset_secs),
            labels: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn range_query_is_time_bounded_and_ordered() {
        let store = MemoryTelemetryStore::new(24);
        store
            .write_points(vec![
                point("cpu", 3.0, 30),
                point("cpu", 1.0, 90),
                point("cpu", 2.0, 60),
                point("mem", 9.0, 30),
            ])
            .await
            .unwrap();

        let now = Utc::now();
        let points = store
            .query_range(&RangeSelector {
                metric: "cpu".to_string(),
                start: now - Duration::seconds(75),
                end: now,
            })
            .await
            .unwrap();

        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![2.0, 3.0]);
    }
}
