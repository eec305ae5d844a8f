//! Infrastructure Ports
//!
//! Cross-cutting services that are part of the shared settings rather than
//! pluggable, config-selected components.

pub mod metrics;

pub use metrics::{MetricsCollector, NullMetricsCollector};
