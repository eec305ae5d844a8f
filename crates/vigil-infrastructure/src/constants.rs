//! Infrastructure constants

/// Default configuration file name searched in the working directory
pub const DEFAULT_CONFIG_FILENAME: &str = "vigil.toml";

/// Directory checked for the configuration file after the working directory
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Prefix for configuration environment variables (e.g. `VIGIL_CACHE_PROVIDER`)
pub const CONFIG_ENV_PREFIX: &str = "VIGIL";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "VIGIL_LOG";

/// Default per-service grace period while stopping, in seconds
pub const DEFAULT_STOP_GRACE_SECS: u64 = 30;
