//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables,
//! and default values, merged with Figment.

use crate::config::AppConfig;
use crate::constants::{CONFIG_ENV_PREFIX, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use vigil_domain::error::{Error, Result};

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if it exists)
    /// 3. Environment variables with prefix (e.g. `VIGIL_CACHE_PROVIDER`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                info!("configuration loaded from {}", config_path.display());
            } else {
                warn!("configuration file not found: {}", config_path.display());
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            info!("configuration loaded from {}", default_path.display());
        }

        // Underscore-separated nested keys, e.g. VIGIL_STORAGE_PROVIDER
        figment = figment.merge(Env::prefixed(&format!("{}_", self.env_prefix)).split("_"));

        let app_config: AppConfig = figment
            .extract()
            .map_err(|e| Error::configuration_with_source("failed to extract configuration", e))?;

        self.validate(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string = toml::to_string_pretty(config)
            .map_err(|e| Error::configuration_with_source("failed to serialize config", e))?;
        std::fs::write(path.as_ref(), toml_string)?;
        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the default configuration file, if any exists
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;
        [
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME),
        ]
        .into_iter()
        .find(|candidate| candidate.exists())
    }

    /// Reject configurations that cannot work at runtime
    fn validate(&self, config: &AppConfig) -> Result<()> {
        if config.shutdown.grace_period_secs == 0 {
            return Err(Error::configuration(
                "shutdown.grace_period_secs must be greater than zero",
            ));
        }
        if config.alerting.evaluation_interval_secs == 0 {
            return Err(Error::configuration(
                "alerting.evaluation_interval_secs must be greater than zero",
            ));
        }
        if config.licensing.refresh_interval_secs == 0 {
            return Err(Error::configuration(
                "licensing.refresh_interval_secs must be greater than zero",
            ));
        }
        crate::logging::parse_log_level(&config.instrumentation.logging.level)?;
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_domain::Name;

    #[test]
    fn defaults_select_the_standard_providers() {
        let config = ConfigLoader::new()
            .with_config_path("/nonexistent/vigil.toml")
            .load()
            .unwrap();

        assert_eq!(config.cache.provider, Name::must("memory"));
        assert_eq!(config.storage.provider, Name::must("memory"));
        assert_eq!(config.licensing.provider, Name::must("community"));
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vigil.toml");
        std::fs::write(
            &path,
            "[cache]\nprovider = \"redis\"\nuri = \"redis://localhost:6379\"\n\
             [alerting]\nevaluation_interval_secs = 15\n",
        )
        .unwrap();

        let config = ConfigLoader::new().with_config_path(&path).load().unwrap();

        assert_eq!(config.cache.provider, Name::must("redis"));
        assert_eq!(config.cache.uri.as_deref(), Some("redis://localhost:6379"));
        assert_eq!(config.alerting.evaluation_interval_secs, 15);
        // untouched sections keep their defaults
        assert_eq!(config.storage.provider, Name::must("memory"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vigil.toml");
        std::fs::write(&path, "[shutdown]\ngrace_period_secs = 0\n").unwrap();

        let err = ConfigLoader::new().with_config_path(&path).load().unwrap_err();
        assert!(err.to_string().contains("grace_period_secs"));
    }

    #[test]
    fn save_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        let loader = ConfigLoader::new();

        loader.save_to_file(&AppConfig::default(), &path).unwrap();
        let reloaded = ConfigLoader::new().with_config_path(&path).load().unwrap();

        assert_eq!(reloaded.cache.provider, Name::must("memory"));
    }
}
