//! Filesystem web transport
//!
//! Resolves UI assets from a directory on disk. Paths are normalized so a
//! request cannot escape the asset root.

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use vigil_application::ports::providers::{WebConfig, WebTransport};
use vigil_application::{ProviderFactory, ProviderSettings};
use vigil_domain::error::{Error, Result};
use vigil_domain::Name;

/// Serves assets from a directory
pub struct FilesystemWebTransport {
    prefix: String,
    asset_dir: PathBuf,
}

impl FilesystemWebTransport {
    /// Create a transport over `asset_dir`, mounted under `prefix`
    pub fn new(prefix: String, asset_dir: PathBuf) -> Self {
        Self { prefix, asset_dir }
    }

    fn sanitize(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let mut resolved = self.asset_dir.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                // anything that could walk out of the root
                _ => return None,
            }
        }
        Some(resolved)
    }
}

#[async_trait]
impl WebTransport for FilesystemWebTransport {
    fn prefix(&self) -> &str {
        &self.prefix
    }

    async fn asset(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let Some(resolved) = self.sanitize(path) else {
            return Ok(None);
        };
        match tokio::fs::read(&resolved).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::infrastructure_with_source(
                format!("failed to read asset {}", resolved.display()),
                e,
            )),
        }
    }

    fn provider_name(&self) -> &str {
        "filesystem"
    }
}

/// Factory for the `filesystem` web transport provider
///
/// Verifies the asset directory exists before returning.
pub struct FilesystemWebTransportFactory {
    name: Name,
}

impl FilesystemWebTransportFactory {
    /// Create the factory
    pub fn new() -> Self {
        Self {
            name: Name::must("filesystem"),
        }
    }
}

impl Default for FilesystemWebTransportFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderFactory<dyn WebTransport, WebConfig> for FilesystemWebTransportFactory {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn create(
        &self,
        _settings: &ProviderSettings,
        config: &WebConfig,
    ) -> Result<Arc<dyn WebTransport>> {
        let asset_dir = config
            .asset_dir
            .clone()
            .ok_or_else(|| Error::configuration("filesystem web transport requires asset_dir"))?;
        let metadata = tokio::fs::metadata(&asset_dir).await.map_err(|e| {
            Error::configuration_with_source(
                format!("asset_dir {} is not readable", asset_dir.display()),
                e,
            )
        })?;
        if !metadata.is_dir() {
            return Err(Error::configuration(format!(
                "asset_dir {} is not a directory",
                asset_dir.display()
            )));
        }
        Ok(Arc::new(FilesystemWebTransport::new(
            config.prefix.clone(),
            asset_dir,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_assets_and_blocks_traversal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), b"<html/>").unwrap();

        let transport =
            FilesystemWebTransport::new("/".to_string(), dir.path().to_path_buf());

        assert_eq!(
            transport.asset("/index.html").await.unwrap(),
            Some(b"<html/>".to_vec())
        );
        assert_eq!(transport.asset("/missing.js").await.unwrap(), None);
        assert_eq!(transport.asset("/../escape").await.unwrap(), None);
    }
}
