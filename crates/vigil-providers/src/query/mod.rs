//! Metrics Query Engine Provider Implementations
//!
//! The engine wraps an already-constructed telemetry store, so its factory
//! map is built dynamically by [`factories`] at the appropriate bootstrap
//! step instead of being a static global.

pub mod basic;

pub use basic::{BasicQueryEngine, BasicQueryEngineFactory};

use std::sync::Arc;
use vigil_application::ports::providers::{QueryEngine, QueryEngineConfig, TelemetryStore};
use vigil_application::{NamedFactoryMap, ProviderFactory};
use vigil_domain::error::Result;

/// Query engine factories over an already-constructed telemetry store
pub fn factories(
    telemetry: Arc<dyn TelemetryStore>,
) -> Result<NamedFactoryMap<dyn QueryEngine, QueryEngineConfig>> {
    let list: Vec<Arc<dyn ProviderFactory<dyn QueryEngine, QueryEngineConfig>>> =
        vec![Arc::new(BasicQueryEngineFactory::new(telemetry))];
    NamedFactoryMap::new("query", list)
}
