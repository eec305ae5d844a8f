//! In-process storage provider
//!
//! Record store over concurrent maps. Tables must be created through
//! `ensure_table` before use, exactly like the server-backed providers, so
//! migration ordering bugs surface in tests too.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use vigil_application::ports::providers::{Storage, StorageConfig};
use vigil_application::{ProviderFactory, ProviderSettings};
use vigil_domain::error::{Error, Result};
use vigil_domain::Name;

use super::check_table_name;

/// In-process record store
#[derive(Default)]
pub struct MemoryStorage {
    tables: DashMap<String, BTreeMap<String, serde_json::Value>>,
    journal: Mutex<Vec<(String, DateTime<Utc>)>>,
}

impl MemoryStorage {
    /// Create an empty store with no tables
    pub fn new() -> Self {
        Self::default()
    }

    fn missing_table(table: &str) -> Error {
        Error::infrastructure(format!("table \"{table}\" does not exist"))
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn ensure_table(&self, table: &str) -> Result<()> {
        check_table_name(table)?;
        self.tables.entry(table.to_string()).or_default();
        Ok(())
    }

    async fn put(&self, table: &str, key: &str, value: serde_json::Value) -> Result<()> {
        let mut entry = self
            .tables
            .get_mut(table)
            .ok_or_else(|| Self::missing_table(table))?;
        entry.insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, table: &str, key: &str) -> Result<Option<serde_json::Value>> {
        let entry = self
            .tables
            .get(table)
            .ok_or_else(|| Self::missing_table(table))?;
        Ok(entry.get(key).cloned())
    }

    async fn delete(&self, table: &str, key: &str) -> Result<bool> {
        let mut entry = self
            .tables
            .get_mut(table)
            .ok_or_else(|| Self::missing_table(table))?;
        Ok(entry.remove(key).is_some())
    }

    async fn list(&self, table: &str) -> Result<Vec<(String, serde_json::Value)>> {
        let entry = self
            .tables
            .get(table)
            .ok_or_else(|| Self::missing_table(table))?;
        Ok(entry.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }

    async fn count(&self, table: &str) -> Result<u64> {
        let entry = self
            .tables
            .get(table)
            .ok_or_else(|| Self::missing_table(table))?;
        Ok(entry.len() as u64)
    }

    async fn applied_migrations(&self) -> Result<Vec<String>> {
        let journal = self.journal.lock().await;
        Ok(journal.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn record_migration(&self, name: &str, applied_at: DateTime<Utc>) -> Result<()> {
        let mut journal = self.journal.lock().await;
        if journal.iter().all(|(n, _)| n != name) {
            journal.push((name.to_string(), applied_at));
        }
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

/// Factory for the `memory` storage provider
pub struct MemoryStorageFactory {
    name: Name,
}

impl MemoryStorageFactory {
    /// Create the factory
    pub fn new() -> Self {
        Self {
            name: Name::must("memory"),
        }
    }
}

impl Default for MemoryStorageFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderFactory<dyn Storage, StorageConfig> for MemoryStorageFactory {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn create(
        &self,
        _settings: &ProviderSettings,
        _config: &StorageConfig,
    ) -> Result<Arc<dyn Storage>> {
        Ok(Arc::new(MemoryStorage::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_require_an_existing_table() {
        let storage = MemoryStorage::new();
        let err = storage
            .put("dashboards", "d1", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("dashboards"));

        storage.ensure_table("dashboards").await.unwrap();
        storage
            .put("dashboards", "d1", serde_json::json!({"title": "cpu"}))
            .await
            .unwrap();
        assert_eq!(storage.count("dashboards").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn list_is_ordered_by_key() {
        let storage = MemoryStorage::new();
        storage.ensure_table("t").await.unwrap();
        storage.put("t", "b", serde_json::json!(2)).await.unwrap();
        storage.put("t", "a", serde_json::json!(1)).await.unwrap();

        let keys: Vec<String> = storage
            .list("t")
            .await
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn journal_preserves_order_and_dedupes() {
        let storage = MemoryStorage::new();
        storage.record_migration("one", Utc::now()).await.unwrap();
        storage.record_migration("two", Utc::now()).await.unwrap();
        storage.record_migration("one", Utc::now()).await.unwrap();

        assert_eq!(
            storage.applied_migrations().await.unwrap(),
            vec!["one".to_string(), "two".to_string()]
        );
    }
}
