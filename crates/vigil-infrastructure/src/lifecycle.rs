//! Service Lifecycle Registry
//!
//! Ordered start/stop coordination for the platform's long-lived services.
//! Registration order is the start order; stop order is the exact reverse,
//! so dependents are released before their dependencies.
//!
//! ```text
//! start:  instrumentation → alerting → licensing
//! stop:   licensing → alerting → instrumentation
//! ```
//!
//! The registry is created once, after every provider factory has already
//! succeeded, and stopped once at process shutdown.

use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use vigil_domain::error::{Error, Result};

use vigil_application::ports::NamedService;

use crate::constants::DEFAULT_STOP_GRACE_SECS;

/// Registry lifecycle state; `Stopped` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegistryState {
    Unstarted,
    Running,
    Stopped,
}

/// Ordered lifecycle manager for the registered services
pub struct ServiceRegistry {
    services: Vec<NamedService>,
    state: Mutex<RegistryState>,
    stop_grace: Duration,
}

impl ServiceRegistry {
    /// Build a registry over `services`, validating name uniqueness
    ///
    /// A duplicate name is a wiring bug and fails before anything starts.
    pub fn new(services: Vec<NamedService>) -> Result<Self> {
        let mut seen = HashSet::new();
        for service in &services {
            if !seen.insert(service.name().clone()) {
                return Err(Error::duplicate_name(
                    "service registry",
                    service.name().as_str(),
                ));
            }
        }
        Ok(Self {
            services,
            state: Mutex::new(RegistryState::Unstarted),
            stop_grace: Duration::from_secs(DEFAULT_STOP_GRACE_SECS),
        })
    }

    /// Override the per-service stop grace period
    pub fn with_stop_grace(mut self, grace: Duration) -> Self {
        self.stop_grace = grace;
        self
    }

    /// Names of the registered services, in start order
    pub fn names(&self) -> Vec<String> {
        self.services
            .iter()
            .map(|s| s.name().as_str().to_string())
            .collect()
    }

    /// Start every service in registration order, sequentially
    ///
    /// Fails fast on the first start error. Already-started services are
    /// left running: every registered service passed factory construction,
    /// so a start failure is a fatal startup condition and the caller's
    /// shutdown path calls [`Self::stop_all`], which is safe after a
    /// partial start.
    pub async fn start_all(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        match *state {
            RegistryState::Unstarted => {}
            RegistryState::Running => {
                return Err(Error::internal("service registry already started"));
            }
            RegistryState::Stopped => {
                return Err(Error::internal("service registry already stopped"));
            }
        }

        for service in &self.services {
            info!(service = %service.name(), "starting service");
            service
                .service()
                .start()
                .await
                .map_err(|e| Error::start_failed(service.name().as_str(), e.to_string()))?;
        }

        *state = RegistryState::Running;
        info!(services = self.services.len(), "all services started");
        Ok(())
    }

    /// Stop every service in reverse registration order, sequentially
    ///
    /// Individual failures are collected, not short-circuited: every
    /// service gets its stop attempt, bounded by the grace period, and an
    /// aggregate error is returned at the end if anything failed. Safe
    /// after a failed or partial start, and idempotent: a second call is a
    /// no-op.
    pub async fn stop_all(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        if *state == RegistryState::Stopped {
            debug!("service registry already stopped");
            return Ok(());
        }
        *state = RegistryState::Stopped;

        let mut failures = Vec::new();
        for service in self.services.iter().rev() {
            info!(service = %service.name(), "stopping service");
            match tokio::time::timeout(self.stop_grace, service.service().stop()).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    warn!(service = %service.name(), error = %e, "service failed to stop");
                    failures.push(format!("{}: {e}", service.name()));
                }
                Err(_) => {
                    warn!(
                        service = %service.name(),
                        grace_secs = self.stop_grace.as_secs(),
                        "service stop timed out, abandoning it"
                    );
                    failures.push(format!(
                        "{}: stop timed out after {}s (forced)",
                        service.name(),
                        self.stop_grace.as_secs()
                    ));
                }
            }
        }

        if failures.is_empty() {
            info!("all services stopped");
            Ok(())
        } else {
            Err(Error::Shutdown { failures })
        }
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("services", &self.names())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex as StdMutex};
    use vigil_application::ports::Service;
    use vigil_domain::Name;

    /// Records start/stop invocations into a shared trace
    struct TracedService {
        label: &'static str,
        trace: Arc<StdMutex<Vec<String>>>,
        fail_start: bool,
        fail_stop: bool,
        hang_stop: bool,
    }

    impl TracedService {
        fn entry(
            label: &'static str,
            trace: &Arc<StdMutex<Vec<String>>>,
        ) -> NamedService {
            Self::entry_with(label, trace, false, false, false)
        }

        fn entry_with(
            label: &'static str,
            trace: &Arc<StdMutex<Vec<String>>>,
            fail_start: bool,
            fail_stop: bool,
            hang_stop: bool,
        ) -> NamedService {
            NamedService::new(
                Name::must(label),
                Arc::new(Self {
                    label,
                    trace: trace.clone(),
                    fail_start,
                    fail_stop,
                    hang_stop,
                }),
            )
        }
    }

    #[async_trait]
    impl Service for TracedService {
        async fn start(&self) -> Result<()> {
            self.trace.lock().unwrap().push(format!("start:{}", self.label));
            if self.fail_start {
                return Err(Error::internal("boom"));
            }
            Ok(())
        }

        async fn stop(&self) -> Result<()> {
            if self.hang_stop {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            self.trace.lock().unwrap().push(format!("stop:{}", self.label));
            if self.fail_stop {
                return Err(Error::internal("stuck"));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn starts_in_order_and_stops_in_reverse() {
        let trace = Arc::new(StdMutex::new(Vec::new()));
        let registry = ServiceRegistry::new(vec![
            TracedService::entry("a", &trace),
            TracedService::entry("b", &trace),
            TracedService::entry("c", &trace),
        ])
        .unwrap();

        registry.start_all().await.unwrap();
        registry.stop_all().await.unwrap();

        assert_eq!(
            *trace.lock().unwrap(),
            vec!["start:a", "start:b", "start:c", "stop:c", "stop:b", "stop:a"]
        );
    }

    #[tokio::test]
    async fn duplicate_names_fail_before_any_start() {
        let trace = Arc::new(StdMutex::new(Vec::new()));
        let err = ServiceRegistry::new(vec![
            TracedService::entry("same", &trace),
            TracedService::entry("same", &trace),
        ])
        .unwrap_err();

        assert!(matches!(err, Error::DuplicateName { .. }));
        assert!(trace.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn start_fails_fast_and_names_the_service() {
        let trace = Arc::new(StdMutex::new(Vec::new()));
        let registry = ServiceRegistry::new(vec![
            TracedService::entry("a", &trace),
            TracedService::entry_with("b", &trace, true, false, false),
            TracedService::entry("c", &trace),
        ])
        .unwrap();

        let err = registry.start_all().await.unwrap_err();

        assert!(err.to_string().contains("\"b\""));
        // c was never reached
        assert_eq!(*trace.lock().unwrap(), vec!["start:a", "start:b"]);

        // stop after the failed start is safe and sweeps everything
        registry.stop_all().await.unwrap();
        assert_eq!(
            *trace.lock().unwrap(),
            vec!["start:a", "start:b", "stop:c", "stop:b", "stop:a"]
        );
    }

    #[tokio::test]
    async fn second_stop_is_a_noop() {
        let trace = Arc::new(StdMutex::new(Vec::new()));
        let registry =
            ServiceRegistry::new(vec![TracedService::entry("only", &trace)]).unwrap();

        registry.start_all().await.unwrap();
        registry.stop_all().await.unwrap();
        registry.stop_all().await.unwrap();

        let stops = trace
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.starts_with("stop:"))
            .count();
        assert_eq!(stops, 1);
    }

    #[tokio::test]
    async fn stop_failures_are_aggregated_not_short_circuited() {
        let trace = Arc::new(StdMutex::new(Vec::new()));
        let registry = ServiceRegistry::new(vec![
            TracedService::entry("a", &trace),
            TracedService::entry_with("b", &trace, false, true, false),
            TracedService::entry("c", &trace),
        ])
        .unwrap();

        registry.start_all().await.unwrap();
        let err = registry.stop_all().await.unwrap_err();

        match err {
            Error::Shutdown { failures } => {
                assert_eq!(failures.len(), 1);
                assert!(failures[0].contains("b"));
            }
            other => panic!("expected Shutdown, got {other}"),
        }
        // a was still stopped despite b's failure
        assert!(trace.lock().unwrap().contains(&"stop:a".to_string()));
    }

    #[tokio::test]
    async fn hanging_stop_is_forced_after_the_grace_period() {
        let trace = Arc::new(StdMutex::new(Vec::new()));
        let registry = ServiceRegistry::new(vec![
            TracedService::entry("a", &trace),
            TracedService::entry_with("hung", &trace, false, false, true),
        ])
        .unwrap()
        .with_stop_grace(Duration::from_millis(50));

        registry.start_all().await.unwrap();
        let err = registry.stop_all().await.unwrap_err();

        match err {
            Error::Shutdown { failures } => {
                assert!(failures[0].contains("timed out"));
            }
            other => panic!("expected Shutdown, got {other}"),
        }
        // the service behind the hung one was still released
        assert!(trace.lock().unwrap().contains(&"stop:a".to_string()));
    }

    #[tokio::test]
    async fn start_after_stop_is_rejected() {
        let trace = Arc::new(StdMutex::new(Vec::new()));
        let registry =
            ServiceRegistry::new(vec![TracedService::entry("only", &trace)]).unwrap();

        registry.start_all().await.unwrap();
        registry.stop_all().await.unwrap();
        assert!(registry.start_all().await.is_err());
    }
}
