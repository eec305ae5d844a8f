//! Application configuration
//!
//! One section per pluggable component, each carrying at minimum the
//! selected provider name, plus the instrumentation and shutdown sections
//! consumed by the bootstrap itself. Loading and precedence live in
//! [`loader`].

pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vigil_application::ports::providers::{
    AlertingConfig, CacheConfig, ControlPlaneConfig, EmailConfig, LicensingConfig,
    QueryEngineConfig, StorageConfig, TelemetryConfig, WebConfig,
};

pub use loader::ConfigLoader;

use crate::constants::DEFAULT_STOP_GRACE_SECS;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Emit JSON instead of human-readable lines
    pub json_format: bool,
    /// Optional log file; rotated daily when set
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            file_output: None,
        }
    }
}

/// Instrumentation configuration (first bootstrap step)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstrumentationConfig {
    /// Logging setup
    pub logging: LoggingConfig,
}

/// Shutdown behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShutdownConfig {
    /// Per-service grace period while stopping, in seconds
    pub grace_period_secs: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            grace_period_secs: DEFAULT_STOP_GRACE_SECS,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Instrumentation (logging) section
    pub instrumentation: InstrumentationConfig,
    /// Control plane client section
    pub control_plane: ControlPlaneConfig,
    /// Email component section
    pub email: EmailConfig,
    /// Cache component section
    pub cache: CacheConfig,
    /// Web transport component section
    pub web: WebConfig,
    /// Storage component section
    pub storage: StorageConfig,
    /// Telemetry store component section
    pub telemetry: TelemetryConfig,
    /// Query engine component section
    pub query: QueryEngineConfig,
    /// Alerting component section
    pub alerting: AlertingConfig,
    /// Licensing component section
    pub licensing: LicensingConfig,
    /// Shutdown behavior section
    pub shutdown: ShutdownConfig,
}
