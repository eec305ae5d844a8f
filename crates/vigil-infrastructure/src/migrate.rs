//! Schema migration engine
//!
//! Applies an ordered migration sequence against the storage handle with
//! per-step commit: each step is recorded in the journal immediately after
//! it succeeds, so a failure leaves the schema at the last fully applied
//! step and a re-run skips everything already journaled.

use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};
use vigil_domain::error::{Error, Result};

use vigil_application::ports::providers::Storage;
use vigil_application::ports::Migration;

/// Idempotent migration runner over one storage handle
pub struct Migrator {
    storage: Arc<dyn Storage>,
    migrations: Vec<Arc<dyn Migration>>,
}

impl std::fmt::Debug for Migrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Migrator")
            .field("migrations", &self.migrations.len())
            .finish_non_exhaustive()
    }
}

impl Migrator {
    /// Build a migrator, validating step-name uniqueness
    pub fn new(storage: Arc<dyn Storage>, migrations: Vec<Arc<dyn Migration>>) -> Result<Self> {
        let mut seen = HashSet::new();
        for migration in &migrations {
            if !seen.insert(migration.name().clone()) {
                return Err(Error::duplicate_name(
                    "migration sequence",
                    migration.name().as_str(),
                ));
            }
        }
        Ok(Self {
            storage,
            migrations,
        })
    }

    /// Apply every pending step in order, returning how many were applied
    ///
    /// Aborts on the first failing step with that step's identity; steps
    /// already present in the journal are skipped.
    pub async fn migrate(&self) -> Result<u64> {
        let applied: HashSet<String> = self
            .storage
            .applied_migrations()
            .await?
            .into_iter()
            .collect();

        let mut newly_applied = 0;
        for migration in &self.migrations {
            let step = migration.name();
            if applied.contains(step.as_str()) {
                debug!(%step, "migration already applied, skipping");
                continue;
            }

            info!(%step, "applying migration");
            migration
                .up(self.storage.as_ref())
                .await
                .map_err(|e| Error::migration(step.as_str(), e))?;
            self.storage
                .record_migration(step.as_str(), Utc::now())
                .await
                .map_err(|e| Error::migration(step.as_str(), e))?;
            newly_applied += 1;
        }

        info!(applied = newly_applied, total = self.migrations.len(), "migrations complete");
        Ok(newly_applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use vigil_domain::Name;
    use vigil_providers::storage::MemoryStorage;

    struct TableStep {
        name: Name,
        table: &'static str,
        fail: bool,
    }

    impl TableStep {
        fn new(name: &'static str, table: &'static str) -> Arc<dyn Migration> {
            Arc::new(Self {
                name: Name::must(name),
                table,
                fail: false,
            })
        }

        fn failing(name: &'static str, table: &'static str) -> Arc<dyn Migration> {
            Arc::new(Self {
                name: Name::must(name),
                table,
                fail: true,
            })
        }
    }

    #[async_trait]
    impl Migration for TableStep {
        fn name(&self) -> &Name {
            &self.name
        }

        async fn up(&self, storage: &dyn Storage) -> Result<()> {
            if self.fail {
                return Err(Error::infrastructure("step exploded"));
            }
            storage.ensure_table(self.table).await
        }
    }

    #[tokio::test]
    async fn second_run_applies_nothing() {
        let storage = Arc::new(MemoryStorage::new());
        let steps = vec![TableStep::new("one", "t_one"), TableStep::new("two", "t_two")];

        let migrator = Migrator::new(storage.clone(), steps.clone()).unwrap();
        assert_eq!(migrator.migrate().await.unwrap(), 2);

        let rerun = Migrator::new(storage, steps).unwrap();
        assert_eq!(rerun.migrate().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn failure_preserves_the_journal_at_the_last_applied_step() {
        let storage = Arc::new(MemoryStorage::new());
        let migrator = Migrator::new(
            storage.clone(),
            vec![
                TableStep::new("one", "t_one"),
                TableStep::failing("two", "t_two"),
                TableStep::new("three", "t_three"),
            ],
        )
        .unwrap();

        let err = migrator.migrate().await.unwrap_err();
        match err {
            Error::Migration { step, .. } => assert_eq!(step, "two"),
            other => panic!("expected Migration, got {other}"),
        }

        assert_eq!(
            storage.applied_migrations().await.unwrap(),
            vec!["one".to_string()]
        );
        // resuming applies only the remaining steps
        let resume = Migrator::new(
            storage.clone(),
            vec![
                TableStep::new("one", "t_one"),
                TableStep::new("two", "t_two"),
                TableStep::new("three", "t_three"),
            ],
        )
        .unwrap();
        assert_eq!(resume.migrate().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn duplicate_step_names_are_rejected() {
        let storage = Arc::new(MemoryStorage::new());
        let err = Migrator::new(
            storage,
            vec![TableStep::new("same", "a"), TableStep::new("same", "b")],
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateName { .. }));
    }
}
