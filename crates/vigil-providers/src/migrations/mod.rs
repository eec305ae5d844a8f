//! Default Schema Migrations
//!
//! The ordered steps that bring a fresh storage backend up to the schema
//! the platform expects. Order matters: later steps may rely on tables
//! created by earlier ones. The migrator in `vigil-infrastructure` applies
//! these and journals each completed step.

use async_trait::async_trait;
use std::sync::Arc;
use vigil_application::ports::providers::Storage;
use vigil_application::ports::Migration;
use vigil_domain::error::Result;
use vigil_domain::Name;

/// The ordered default migration sequence
pub fn default_migrations() -> Vec<Arc<dyn Migration>> {
    vec![
        Arc::new(InitialSchema::new()),
        Arc::new(AlertRules::new()),
        Arc::new(LicenseJournal::new()),
    ]
}

/// Creates the core tables: dashboards, invites, install
pub struct InitialSchema {
    name: Name,
}

impl InitialSchema {
    /// Create the step
    pub fn new() -> Self {
        Self {
            name: Name::must("initial_schema"),
        }
    }
}

impl Default for InitialSchema {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Migration for InitialSchema {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn up(&self, storage: &dyn Storage) -> Result<()> {
        storage.ensure_table("dashboards").await?;
        storage.ensure_table("invites").await?;
        storage.ensure_table("install").await?;
        Ok(())
    }
}

/// Creates the alert rules table and seeds the self-monitoring rule
pub struct AlertRules {
    name: Name,
}

impl AlertRules {
    /// Create the step
    pub fn new() -> Self {
        Self {
            name: Name::must("alert_rules"),
        }
    }
}

impl Default for AlertRules {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Migration for AlertRules {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn up(&self, storage: &dyn Storage) -> Result<()> {
        storage.ensure_table("alert_rules").await?;
        // every install watches its own ingestion path out of the box
        storage
            .put(
                "alert_rules",
                "telemetry_ingest_stalled",
                serde_json::json!({
                    "expr": "vigil_ingest_points_total",
                    "condition": "absent_for",
                    "window_secs": 600,
                    "severity": "warning",
                }),
            )
            .await?;
        Ok(())
    }
}

/// Creates the license journal table
pub struct LicenseJournal {
    name: Name,
}

impl LicenseJournal {
    /// Create the step
    pub fn new() -> Self {
        Self {
            name: Name::must("license_journal"),
        }
    }
}

impl Default for LicenseJournal {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Migration for LicenseJournal {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn up(&self, storage: &dyn Storage) -> Result<()> {
        storage.ensure_table("license_journal").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[tokio::test]
    async fn default_sequence_has_unique_ordered_names() {
        let names: Vec<String> = default_migrations()
            .iter()
            .map(|m| m.name().as_str().to_string())
            .collect();
        assert_eq!(names, vec!["initial_schema", "alert_rules", "license_journal"]);
    }

    #[tokio::test]
    async fn steps_create_their_tables() {
        let storage = MemoryStorage::new();
        for step in default_migrations() {
            step.up(&storage).await.unwrap();
        }
        for table in ["dashboards", "invites", "install", "alert_rules", "license_journal"] {
            assert!(storage.count(table).await.is_ok(), "{table} should exist");
        }
        assert_eq!(storage.count("alert_rules").await.unwrap(), 1);
    }
}
