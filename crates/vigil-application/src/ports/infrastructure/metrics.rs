//! Metrics Collector Port
//!
//! Minimal counter sink shared with every provider through the provider
//! settings. Providers count what they like ("cache.hit", "alert.fired");
//! exposition is a collaborator concern.

/// Process-wide counter sink
pub trait MetricsCollector: Send + Sync {
    /// Increment the named counter by one
    fn increment(&self, name: &str);

    /// Current value of the named counter (zero if never incremented)
    fn get(&self, name: &str) -> u64;
}

/// Metrics collector that discards everything
///
/// Useful for tests and for components constructed before instrumentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMetricsCollector;

impl MetricsCollector for NullMetricsCollector {
    fn increment(&self, _name: &str) {}

    fn get(&self, _name: &str) -> u64 {
        0
    }
}
