//! Build metadata value objects
//!
//! Read-only, process-wide facts about the running binary. Initialized once
//! at the first bootstrap step and handed to every provider factory as part
//! of the shared settings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Build variant of the running binary
///
/// The variant decides which licensing construction strategy the caller
/// injects into the bootstrap; nothing inside the platform branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Open build without control-plane backed licensing
    #[default]
    Community,
    /// Commercial build with control-plane backed licensing
    Enterprise,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Community => f.write_str("community"),
            Self::Enterprise => f.write_str("enterprise"),
        }
    }
}

/// Process-wide build metadata
///
/// Fields are set at construction and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    /// Semantic version of the binary
    pub version: String,
    /// Build variant
    pub variant: Variant,
    /// Commit hash the binary was built from
    pub commit: String,
    /// Branch the binary was built from
    pub branch: String,
    /// Build timestamp (RFC 3339)
    pub build_time: String,
}

impl BuildInfo {
    /// Build metadata for the current binary
    ///
    /// Commit, branch, and build time come from `VIGIL_BUILD_*` variables
    /// stamped at compile time; absent values fall back to "unknown".
    pub fn current(variant: Variant) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            variant,
            commit: option_env!("VIGIL_BUILD_COMMIT").unwrap_or("unknown").to_string(),
            branch: option_env!("VIGIL_BUILD_BRANCH").unwrap_or("unknown").to_string(),
            build_time: option_env!("VIGIL_BUILD_TIME").unwrap_or("unknown").to_string(),
        }
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::current(Variant::Community)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_populates_version() {
        let info = BuildInfo::current(Variant::Community);
        assert!(!info.version.is_empty());
        assert_eq!(info.variant, Variant::Community);
    }

    #[test]
    fn variant_display() {
        assert_eq!(Variant::Community.to_string(), "community");
        assert_eq!(Variant::Enterprise.to_string(), "enterprise");
    }
}
