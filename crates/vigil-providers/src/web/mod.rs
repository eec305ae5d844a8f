//! Web Transport Provider Implementations
//!
//! | Provider | Description |
//! |----------|-------------|
//! | [`FilesystemWebTransport`] | Serves packaged UI assets from a directory |
//! | [`NoopWebTransport`] | Headless deployments without a UI |

pub mod filesystem;
pub mod noop;

pub use filesystem::{FilesystemWebTransport, FilesystemWebTransportFactory};
pub use noop::{NoopWebTransport, NoopWebTransportFactory};

use std::sync::Arc;
use vigil_application::ports::providers::{WebConfig, WebTransport};
use vigil_application::{NamedFactoryMap, ProviderFactory};
use vigil_domain::error::Result;

/// The standard web transport factory map
pub fn factories() -> Result<NamedFactoryMap<dyn WebTransport, WebConfig>> {
    let list: Vec<Arc<dyn ProviderFactory<dyn WebTransport, WebConfig>>> = vec![
        Arc::new(FilesystemWebTransportFactory::new()),
        Arc::new(NoopWebTransportFactory::new()),
    ];
    NamedFactoryMap::new("web", list)
}
