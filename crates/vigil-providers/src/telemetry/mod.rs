//! Telemetry Store Provider Implementations
//!
//! | Provider | Description |
//! |----------|-------------|
//! | [`MemoryTelemetryStore`] | In-process ring of recent points |
//! | [`NoopTelemetryStore`] | Discards writes, answers empty |

pub mod memory;
pub mod noop;

pub use memory::{MemoryTelemetryStore, MemoryTelemetryStoreFactory};
pub use noop::{NoopTelemetryStore, NoopTelemetryStoreFactory};

use std::sync::Arc;
use vigil_application::ports::providers::{TelemetryConfig, TelemetryStore};
use vigil_application::{NamedFactoryMap, ProviderFactory};
use vigil_domain::error::Result;

/// The standard telemetry store factory map
pub fn factories() -> Result<NamedFactoryMap<dyn TelemetryStore, TelemetryConfig>> {
    let list: Vec<Arc<dyn ProviderFactory<dyn TelemetryStore, TelemetryConfig>>> = vec![
        Arc::new(MemoryTelemetryStoreFactory::new()),
        Arc::new(NoopTelemetryStoreFactory::new()),
    ];
    NamedFactoryMap::new("telemetry", list)
}
