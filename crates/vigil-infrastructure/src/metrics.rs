//! In-process metrics collector
//!
//! Counter sink handed to every provider through the shared settings.
//! Exposition (scrape endpoints, push gateways) is a collaborator concern.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use vigil_application::ports::infrastructure::MetricsCollector;

/// Lock-free counter collector
#[derive(Debug, Default)]
pub struct AtomicMetricsCollector {
    counters: DashMap<String, AtomicU64>,
}

impl AtomicMetricsCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every counter, sorted by name
    pub fn snapshot(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .counters
            .iter()
            .map(|e| (e.key().clone(), e.value().load(Ordering::Relaxed)))
            .collect();
        entries.sort();
        entries
    }
}

impl MetricsCollector for AtomicMetricsCollector {
    fn increment(&self, name: &str) {
        self.counters
            .entry(name.to_string())
            .or_default()
            .fetch_add(1, Ordering::Relaxed);
    }

    fn get(&self, name: &str) -> u64 {
        self.counters
            .get(name)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increments_are_visible() {
        let collector = AtomicMetricsCollector::new();
        collector.increment("bootstrap.steps");
        collector.increment("bootstrap.steps");
        assert_eq!(collector.get("bootstrap.steps"), 2);
        assert_eq!(collector.get("unknown"), 0);
    }
}
