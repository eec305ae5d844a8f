//! Alert Engine Provider Implementations
//!
//! The engine evaluates rules stored in the platform's storage, so its
//! factory map is built dynamically by [`factories`] once the storage
//! handle exists.

pub mod builtin;

pub use builtin::{BuiltinAlertEngine, BuiltinAlertEngineFactory};

use std::sync::Arc;
use vigil_application::ports::providers::{AlertEngine, AlertingConfig, Storage};
use vigil_application::{NamedFactoryMap, ProviderFactory};
use vigil_domain::error::Result;

/// Alert engine factories over an already-constructed storage handle
pub fn factories(
    storage: Arc<dyn Storage>,
) -> Result<NamedFactoryMap<dyn AlertEngine, AlertingConfig>> {
    let list: Vec<Arc<dyn ProviderFactory<dyn AlertEngine, AlertingConfig>>> =
        vec![Arc::new(BuiltinAlertEngineFactory::new(storage))];
    NamedFactoryMap::new("alerting", list)
}
