//! Schema Migration Port
//!
//! An ordered sequence of named, independently identifiable migration steps
//! applied against the storage handle before storage-dependent components
//! are constructed. The storage journal supports "already applied"
//! detection, so re-running a sequence skips completed steps.

use async_trait::async_trait;
use vigil_domain::error::Result;
use vigil_domain::Name;

use crate::ports::providers::storage::Storage;

/// One named schema migration step
///
/// Steps are applied in sequence order by the migrator. A step must be
/// safe to skip once recorded in the journal; it is never re-applied.
#[async_trait]
pub trait Migration: Send + Sync {
    /// Unique name identifying the step in the journal
    fn name(&self) -> &Name;

    /// Apply the step against the storage handle
    async fn up(&self, storage: &dyn Storage) -> Result<()>;
}
