//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Vigil platform
///
/// Bootstrap failures always carry enough identity (component, provider
/// name, migration step, service name) to diagnose without inspecting
/// provider internals.
#[derive(Error, Debug)]
pub enum Error {
    /// Selected provider name absent from the available factory map
    #[error(
        "no \"{name}\" provider registered for component \"{component}\" (available: {})",
        .available.join(", ")
    )]
    NotFound {
        /// Component the selection was made for (e.g. "cache")
        component: String,
        /// The unknown provider name
        name: String,
        /// Providers that are registered for the component
        available: Vec<String>,
    },

    /// Two factory-map entries or two registry entries share a name
    #[error("duplicate name \"{name}\" in {scope}")]
    DuplicateName {
        /// Where the collision happened (factory map or service registry)
        scope: String,
        /// The colliding name
        name: String,
    },

    /// A provider factory's own construction logic failed
    #[error("failed to construct \"{provider}\" provider for component \"{component}\": {source}")]
    Construction {
        /// Component being constructed
        component: String,
        /// Provider name whose factory failed
        provider: String,
        /// The factory's error
        source: Box<Error>,
    },

    /// A schema migration step failed partway through the sequence
    #[error("migration \"{step}\" failed: {source}")]
    Migration {
        /// Name of the failing migration step
        step: String,
        /// The step's error
        source: Box<Error>,
    },

    /// A registered service failed to start or stop
    #[error("service \"{service}\" failed to {phase}: {message}")]
    Lifecycle {
        /// Name of the failing service
        service: String,
        /// "start" or "stop"
        phase: String,
        /// Description of the failure
        message: String,
    },

    /// One or more services failed while stopping; all were attempted
    #[error("shutdown completed with {} failure(s): {}", .failures.len(), .failures.join("; "))]
    Shutdown {
        /// Per-service stop failures, in stop order
        failures: Vec<String>,
    },

    /// Identifier failed validation
    #[error("invalid name: {message}")]
    InvalidName {
        /// Why the candidate was rejected
        message: String,
    },

    /// Configuration-related error
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Infrastructure operation error (connections, external services)
    #[error("infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// Internal system error
    #[error("internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Factory and registry error creation methods
impl Error {
    /// Create a not-found error for a provider selection
    pub fn not_found<C, N>(component: C, name: N, available: Vec<String>) -> Self
    where
        C: Into<String>,
        N: Into<String>,
    {
        Self::NotFound {
            component: component.into(),
            name: name.into(),
            available,
        }
    }

    /// Create a duplicate-name error
    pub fn duplicate_name<S: Into<String>, N: Into<String>>(scope: S, name: N) -> Self {
        Self::DuplicateName {
            scope: scope.into(),
            name: name.into(),
        }
    }

    /// Wrap a factory failure with component and provider identity
    pub fn construction<C, P>(component: C, provider: P, source: Error) -> Self
    where
        C: Into<String>,
        P: Into<String>,
    {
        Self::Construction {
            component: component.into(),
            provider: provider.into(),
            source: Box::new(source),
        }
    }

    /// Wrap a migration step failure with the step's identity
    pub fn migration<S: Into<String>>(step: S, source: Error) -> Self {
        Self::Migration {
            step: step.into(),
            source: Box::new(source),
        }
    }

    /// Create a lifecycle error for a service start failure
    pub fn start_failed<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::Lifecycle {
            service: service.into(),
            phase: "start".to_string(),
            message: message.into(),
        }
    }

    /// Create a lifecycle error for a service stop failure
    pub fn stop_failed<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::Lifecycle {
            service: service.into(),
            phase: "stop".to_string(),
            message: message.into(),
        }
    }
}

// Ambient error creation methods
impl Error {
    /// Create an invalid-name error
    pub fn invalid_name<S: Into<String>>(message: S) -> Self {
        Self::InvalidName {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error with source
    pub fn infrastructure_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_component_and_provider() {
        let err = Error::not_found("cache", "redis", vec!["memory".to_string()]);
        let display = err.to_string();
        assert!(display.contains("cache"));
        assert!(display.contains("redis"));
        assert!(display.contains("memory"));
    }

    #[test]
    fn construction_wraps_source_identity() {
        let inner = Error::infrastructure("connection refused");
        let err = Error::construction("storage", "postgres", inner);
        let display = err.to_string();
        assert!(display.contains("storage"));
        assert!(display.contains("postgres"));
        assert!(display.contains("connection refused"));
    }

    #[test]
    fn shutdown_aggregates_failures() {
        let err = Error::Shutdown {
            failures: vec!["alerting: timed out".to_string(), "licensing: broken".to_string()],
        };
        let display = err.to_string();
        assert!(display.contains("2 failure(s)"));
        assert!(display.contains("alerting"));
        assert!(display.contains("licensing"));
    }
}
