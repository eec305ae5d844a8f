//! Component Provider Ports
//!
//! One opaque capability trait per pluggable component, plus the typed
//! configuration value its factories consume. The bootstrap core only needs
//! "can be constructed from a name + config" from each of these and, for a
//! subset, "can be started and stopped".
//!
//! | Port | Lifecycle | Selected via |
//! |------|-----------|--------------|
//! | [`Cache`] | self-managed | factory map |
//! | [`Storage`] | self-managed | factory map |
//! | [`TelemetryStore`] | self-managed | factory map |
//! | [`WebTransport`] | self-managed | factory map |
//! | [`EmailSender`] | self-managed | factory map |
//! | [`QueryEngine`] | self-managed | dynamic factory map (telemetry store) |
//! | [`AlertEngine`] | start/stop | dynamic factory map (storage) |
//! | [`Licensing`] | start/stop | factory callback (storage, control plane) |
//! | [`ControlPlaneClient`] | self-managed | single variant-chosen factory |

pub mod alerting;
pub mod cache;
pub mod control_plane;
pub mod email;
pub mod licensing;
pub mod query;
pub mod storage;
pub mod telemetry;
pub mod web;

pub use alerting::{AlertEngine, AlertingConfig};
pub use cache::{Cache, CacheConfig};
pub use control_plane::{ControlPlaneClient, ControlPlaneConfig, UsageSnapshot};
pub use email::{EmailConfig, EmailMessage, EmailSender};
pub use licensing::{License, LicenseStatus, Licensing, LicensingConfig, LicensingFactoryCallback};
pub use query::{QueryEngine, QueryEngineConfig};
pub use storage::{Storage, StorageConfig};
pub use telemetry::{MetricPoint, RangeSelector, TelemetryConfig, TelemetryStore};
pub use web::{WebConfig, WebTransport};
