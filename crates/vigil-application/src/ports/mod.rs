//! Application Ports
//!
//! Contracts between the bootstrap core and its collaborators, grouped by
//! concern:
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`providers`] | Capability traits for each pluggable component |
//! | [`registry`] | Generic provider factory, named map, and selection |
//! | [`lifecycle`] | Start/stop capability for long-lived services |
//! | [`migration`] | Ordered, idempotent schema migration steps |
//! | [`infrastructure`] | Cross-cutting services (metrics) |

pub mod infrastructure;
pub mod lifecycle;
pub mod migration;
pub mod providers;
pub mod registry;

pub use lifecycle::{NamedService, Service};
pub use migration::Migration;
