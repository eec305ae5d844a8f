//! Storage Provider Port
//!
//! Record store handle used by the business modules and by the schema
//! migrator. The port deliberately stays dialect-agnostic: records are JSON
//! values keyed by (table, key), and the migration journal is part of the
//! contract so the migrator can detect already applied steps regardless of
//! backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vigil_domain::error::Result;
use vigil_domain::Name;

use crate::ports::registry::SelectedProvider;

/// Configuration for the storage component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Selected provider name
    pub provider: Name,
    /// Connection string for server-backed providers
    pub dsn: Option<String>,
    /// Connection pool size
    pub pool_size: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: Name::must("memory"),
            dsn: None,
            pool_size: 8,
        }
    }
}

impl SelectedProvider for StorageConfig {
    fn provider(&self) -> &Name {
        &self.provider
    }
}

/// Record storage capability
///
/// Tables must exist before records are written to them; the schema
/// migrations create every table the modules touch. Writing to a missing
/// table is an error, which is what makes the migration ordering
/// observable.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Create `table` if it does not exist yet
    async fn ensure_table(&self, table: &str) -> Result<()>;

    /// Insert or replace the record at (`table`, `key`)
    async fn put(&self, table: &str, key: &str, value: serde_json::Value) -> Result<()>;

    /// Fetch the record at (`table`, `key`), if any
    async fn get(&self, table: &str, key: &str) -> Result<Option<serde_json::Value>>;

    /// Remove the record at (`table`, `key`), returning whether it existed
    async fn delete(&self, table: &str, key: &str) -> Result<bool>;

    /// All records in `table` as (key, value) pairs, ordered by key
    async fn list(&self, table: &str) -> Result<Vec<(String, serde_json::Value)>>;

    /// Number of records in `table`
    async fn count(&self, table: &str) -> Result<u64>;

    /// Names of migration steps already applied, in application order
    async fn applied_migrations(&self) -> Result<Vec<String>>;

    /// Record a migration step as applied
    async fn record_migration(&self, name: &str, applied_at: DateTime<Utc>) -> Result<()>;

    /// Name of the provider implementation
    fn provider_name(&self) -> &str;
}
