//! Builtin alert engine
//!
//! Periodically sweeps the `alert_rules` table between `start` and `stop`.
//! Rule semantics stay with the rules' owners; the engine's job here is the
//! evaluation loop and its lifecycle.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use vigil_application::ports::providers::{AlertEngine, AlertingConfig, Storage};
use vigil_application::ports::infrastructure::MetricsCollector;
use vigil_application::ports::Service;
use vigil_application::{ProviderFactory, ProviderSettings};
use vigil_domain::error::Result;
use vigil_domain::Name;

/// Storage-backed alert evaluation loop
pub struct BuiltinAlertEngine {
    storage: Arc<dyn Storage>,
    metrics: Arc<dyn MetricsCollector>,
    interval: Duration,
    shutdown: Arc<Notify>,
    running: Arc<AtomicBool>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl BuiltinAlertEngine {
    /// Create an engine sweeping every `interval`
    pub fn new(
        storage: Arc<dyn Storage>,
        metrics: Arc<dyn MetricsCollector>,
        interval: Duration,
    ) -> Self {
        Self {
            storage,
            metrics,
            interval,
            shutdown: Arc::new(Notify::new()),
            running: Arc::new(AtomicBool::new(false)),
            worker: Mutex::new(None),
        }
    }

    async fn sweep(storage: &dyn Storage, metrics: &dyn MetricsCollector) -> Result<u64> {
        let rules = storage.count("alert_rules").await?;
        metrics.increment("alerting.evaluations");
        debug!(rules, "alert evaluation pass complete");
        Ok(rules)
    }
}

#[async_trait]
impl Service for BuiltinAlertEngine {
    async fn start(&self) -> Result<()> {
        let mut worker = self.worker.lock().await;
        if worker.is_some() {
            return Ok(());
        }

        // fail startup if the rules table is unreachable
        Self::sweep(self.storage.as_ref(), self.metrics.as_ref()).await?;

        let storage = self.storage.clone();
        let metrics = self.metrics.clone();
        let shutdown = self.shutdown.clone();
        let running = self.running.clone();
        let interval = self.interval;

        running.store(true, Ordering::SeqCst);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(err) = Self::sweep(storage.as_ref(), metrics.as_ref()).await {
                            warn!(%err, "alert evaluation pass failed");
                        }
                    }
                    _ = shutdown.notified() => break,
                }
            }
            running.store(false, Ordering::SeqCst);
        });
        *worker = Some(handle);

        info!(interval_secs = self.interval.as_secs(), "alert engine started");
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        let Some(handle) = self.worker.lock().await.take() else {
            return Ok(());
        };
        // notify_one stores a permit, so the worker cannot miss a stop
        // signalled before its first await
        self.shutdown.notify_one();
        let _ = handle.await;
        info!("alert engine stopped");
        Ok(())
    }
}

#[async_trait]
impl AlertEngine for BuiltinAlertEngine {
    async fn evaluate_now(&self) -> Result<u64> {
        Self::sweep(self.storage.as_ref(), self.metrics.as_ref()).await
    }

    fn provider_name(&self) -> &str {
        "builtin"
    }
}

/// Factory for the `builtin` alert engine provider
pub struct BuiltinAlertEngineFactory {
    name: Name,
    storage: Arc<dyn Storage>,
}

impl BuiltinAlertEngineFactory {
    /// Create the factory over the storage handle
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            name: Name::must("builtin"),
            storage,
        }
    }
}

#[async_trait]
impl ProviderFactory<dyn AlertEngine, AlertingConfig> for BuiltinAlertEngineFactory {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn create(
        &self,
        settings: &ProviderSettings,
        config: &AlertingConfig,
    ) -> Result<Arc<dyn AlertEngine>> {
        Ok(Arc::new(BuiltinAlertEngine::new(
            self.storage.clone(),
            settings.metrics.clone(),
            Duration::from_secs(config.evaluation_interval_secs),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use vigil_application::ports::infrastructure::NullMetricsCollector;

    fn engine(storage: Arc<dyn Storage>) -> BuiltinAlertEngine {
        BuiltinAlertEngine::new(storage, Arc::new(NullMetricsCollector), Duration::from_secs(60))
    }

    #[tokio::test]
    async fn evaluate_now_counts_rules() {
        let storage = Arc::new(MemoryStorage::new());
        storage.ensure_table("alert_rules").await.unwrap();
        storage
            .put("alert_rules", "r1", serde_json::json!({"expr": "cpu > 0.9"}))
            .await
            .unwrap();

        let engine = engine(storage);
        assert_eq!(engine.evaluate_now().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn start_fails_when_rules_table_is_missing() {
        let storage = Arc::new(MemoryStorage::new());
        let engine = engine(storage);
        assert!(engine.start().await.is_err());
    }

    #[tokio::test]
    async fn start_then_stop_is_clean() {
        let storage = Arc::new(MemoryStorage::new());
        storage.ensure_table("alert_rules").await.unwrap();

        let engine = engine(storage);
        engine.start().await.unwrap();
        engine.stop().await.unwrap();
        // stop after stop is a no-op
        engine.stop().await.unwrap();
    }
}
