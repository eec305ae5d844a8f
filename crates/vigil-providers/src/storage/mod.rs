//! Storage Provider Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`MemoryStorage`] | Local | In-process record store for tests and demos |
//! | [`PostgresStorage`] | Server | PostgreSQL-backed store with pooling |

pub mod memory;
#[cfg(feature = "storage-postgres")]
pub mod postgres;

pub use memory::{MemoryStorage, MemoryStorageFactory};
#[cfg(feature = "storage-postgres")]
pub use postgres::{PostgresStorage, PostgresStorageFactory};

use std::sync::Arc;
use vigil_application::ports::providers::{Storage, StorageConfig};
use vigil_application::{NamedFactoryMap, ProviderFactory};
use vigil_domain::error::{Error, Result};

/// The standard storage factory map
pub fn factories() -> Result<NamedFactoryMap<dyn Storage, StorageConfig>> {
    let mut list: Vec<Arc<dyn ProviderFactory<dyn Storage, StorageConfig>>> =
        vec![Arc::new(MemoryStorageFactory::new())];
    #[cfg(feature = "storage-postgres")]
    list.push(Arc::new(PostgresStorageFactory::new()));
    NamedFactoryMap::new("storage", list)
}

/// Reject table names that cannot be safely interpolated into statements
pub(crate) fn check_table_name(table: &str) -> Result<()> {
    let valid = !table.is_empty()
        && table
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::configuration(format!(
            "invalid table name: {table:?}"
        )))
    }
}
