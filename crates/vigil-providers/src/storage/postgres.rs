//! PostgreSQL storage provider
//!
//! Record store over a pooled PostgreSQL connection. The driver is
//! blocking, so every call hops onto the blocking thread pool. Records are
//! JSON text in per-table (key, value) relations; the migration journal
//! lives in `schema_migrations`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_postgres::{postgres::NoTls, PostgresConnectionManager};
use std::sync::Arc;
use vigil_application::ports::providers::{Storage, StorageConfig};
use vigil_application::{ProviderFactory, ProviderSettings};
use vigil_domain::error::{Error, Result};
use vigil_domain::Name;

use super::check_table_name;

type PgPool = Pool<PostgresConnectionManager<NoTls>>;
type PgConn = PooledConnection<PostgresConnectionManager<NoTls>>;

const JOURNAL_TABLE_DDL: &str = "CREATE TABLE IF NOT EXISTS schema_migrations (\
     name TEXT PRIMARY KEY, applied_at TEXT NOT NULL)";

/// PostgreSQL-backed record store
#[derive(Clone)]
pub struct PostgresStorage {
    pool: PgPool,
}

impl PostgresStorage {
    /// Wrap an established pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run `op` with a pooled connection on the blocking thread pool
    async fn with_conn<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConn) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| Error::infrastructure_with_source("connection pool exhausted", e))?;
            op(&mut conn)
        })
        .await
        .map_err(|e| Error::internal(format!("storage task panicked: {e}")))?
    }
}

#[async_trait]
impl Storage for PostgresStorage {
    async fn ensure_table(&self, table: &str) -> Result<()> {
        check_table_name(table)?;
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {table} (key TEXT PRIMARY KEY, value TEXT NOT NULL)"
        );
        self.with_conn(move |conn| {
            conn.execute(ddl.as_str(), &[])
                .map(|_| ())
                .map_err(|e| Error::infrastructure_with_source("CREATE TABLE failed", e))
        })
        .await
    }

    async fn put(&self, table: &str, key: &str, value: serde_json::Value) -> Result<()> {
        check_table_name(table)?;
        let statement = format!(
            "INSERT INTO {table} (key, value) VALUES ($1, $2) \
             ON CONFLICT (key) DO UPDATE SET value = excluded.value"
        );
        let key = key.to_string();
        let encoded = value.to_string();
        self.with_conn(move |conn| {
            conn.execute(statement.as_str(), &[&key, &encoded])
                .map(|_| ())
                .map_err(|e| Error::infrastructure_with_source("INSERT failed", e))
        })
        .await
    }

    async fn get(&self, table: &str, key: &str) -> Result<Option<serde_json::Value>> {
        check_table_name(table)?;
        let statement = format!("SELECT value FROM {table} WHERE key = $1");
        let key = key.to_string();
        let raw: Option<String> = self
            .with_conn(move |conn| {
                conn.query_opt(statement.as_str(), &[&key])
                    .map(|row| row.map(|r| r.get(0)))
                    .map_err(|e| Error::infrastructure_with_source("SELECT failed", e))
            })
            .await?;
        raw.map(|text| {
            serde_json::from_str(&text)
                .map_err(|e| Error::infrastructure_with_source("corrupt stored record", e))
        })
        .transpose()
    }

    async fn delete(&self, table: &str, key: &str) -> Result<bool> {
        check_table_name(table)?;
        let statement = format!("DELETE FROM {table} WHERE key = $1");
        let key = key.to_string();
        self.with_conn(move |conn| {
            conn.execute(statement.as_str(), &[&key])
                .map(|removed| removed > 0)
                .map_err(|e| Error::infrastructure_with_source("DELETE failed", e))
        })
        .await
    }

    async fn list(&self, table: &str) -> Result<Vec<(String, serde_json::Value)>> {
        check_table_name(table)?;
        let statement = format!("SELECT key, value FROM {table} ORDER BY key");
        let rows: Vec<(String, String)> = self
            .with_conn(move |conn| {
                conn.query(statement.as_str(), &[])
                    .map(|rows| rows.iter().map(|r| (r.get(0), r.get(1))).collect())
                    .map_err(|e| Error::infrastructure_with_source("SELECT failed", e))
            })
            .await?;
        rows.into_iter()
            .map(|(key, text)| {
                serde_json::from_str(&text)
                    .map(|value| (key, value))
                    .map_err(|e| Error::infrastructure_with_source("corrupt stored record", e))
            })
            .collect()
    }

    async fn count(&self, table: &str) -> Result<u64> {
        check_table_name(table)?;
        let statement = format!("SELECT COUNT(*) FROM {table}");
        self.with_conn(move |conn| {
            conn.query_one(statement.as_str(), &[])
                .map(|row| row.get::<_, i64>(0) as u64)
                .map_err(|e| Error::infrastructure_with_source("COUNT failed", e))
        })
        .await
    }

    async fn applied_migrations(&self) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            conn.execute(JOURNAL_TABLE_DDL, &[])
                .map_err(|e| Error::infrastructure_with_source("journal DDL failed", e))?;
            conn.query(
                "SELECT name FROM schema_migrations ORDER BY applied_at, name",
                &[],
            )
            .map(|rows| rows.iter().map(|r| r.get(0)).collect())
            .map_err(|e| Error::infrastructure_with_source("journal SELECT failed", e))
        })
        .await
    }

    async fn record_migration(&self, name: &str, applied_at: DateTime<Utc>) -> Result<()> {
        let name = name.to_string();
        let stamp = applied_at.to_rfc3339();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO schema_migrations (name, applied_at) VALUES ($1, $2) \
                 ON CONFLICT (name) DO NOTHING",
                &[&name, &stamp],
            )
            .map(|_| ())
            .map_err(|e| Error::infrastructure_with_source("journal INSERT failed", e))
        })
        .await
    }

    fn provider_name(&self) -> &str {
        "postgres"
    }
}

/// Factory for the `postgres` storage provider
///
/// Establishes the connection pool before returning, so bad credentials or
/// an unreachable server fail the bootstrap rather than the first query.
pub struct PostgresStorageFactory {
    name: Name,
}

impl PostgresStorageFactory {
    /// Create the factory
    pub fn new() -> Self {
        Self {
            name: Name::must("postgres"),
        }
    }
}

impl Default for PostgresStorageFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderFactory<dyn Storage, StorageConfig> for PostgresStorageFactory {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn create(
        &self,
        _settings: &ProviderSettings,
        config: &StorageConfig,
    ) -> Result<Arc<dyn Storage>> {
        let dsn = config
            .dsn
            .as_deref()
            .ok_or_else(|| Error::configuration("postgres storage requires a dsn"))?
            .to_string();
        let pool_size = config.pool_size;

        let pool = tokio::task::spawn_blocking(move || {
            let manager = PostgresConnectionManager::new(
                dsn.parse()
                    .map_err(|e| Error::configuration_with_source("invalid postgres dsn", e))?,
                NoTls,
            );
            Pool::builder()
                .max_size(pool_size)
                .build(manager)
                .map_err(|e| Error::infrastructure_with_source("failed to connect to postgres", e))
        })
        .await
        .map_err(|e| Error::internal(format!("storage task panicked: {e}")))??;

        Ok(Arc::new(PostgresStorage::new(pool)))
    }
}
