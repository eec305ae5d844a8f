//! Service Lifecycle Port
//!
//! Capability for components that must be explicitly started and stopped.
//! Only a subset of constructed providers carries this capability; the rest
//! manage their own resources internally and are never registered for
//! lifecycle management. A port declares the capability by supertrait
//! (e.g. `AlertEngine: Service`), so registration follows from the
//! interface rather than from a hand-picked list.

use async_trait::async_trait;
use std::sync::Arc;
use vigil_domain::error::Result;
use vigil_domain::Name;

/// Long-lived service with explicit start/stop hooks
///
/// `start` runs the service's background work; `stop` releases it.
/// Both are invoked sequentially by the registry, never concurrently
/// for the same service.
#[async_trait]
pub trait Service: Send + Sync {
    /// Start the service
    async fn start(&self) -> Result<()>;

    /// Stop the service gracefully
    async fn stop(&self) -> Result<()>;
}

/// A service paired with the name it is registered under
///
/// The registry exclusively owns the ordered sequence of named services;
/// the concrete instances stay shared by reference with the assembled
/// platform object, which uses them for business logic only.
#[derive(Clone)]
pub struct NamedService {
    name: Name,
    service: Arc<dyn Service>,
}

impl NamedService {
    /// Pair a service with its registry name
    pub fn new(name: Name, service: Arc<dyn Service>) -> Self {
        Self { name, service }
    }

    /// The registry name
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The underlying service
    pub fn service(&self) -> &Arc<dyn Service> {
        &self.service
    }
}

impl std::fmt::Debug for NamedService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamedService")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
