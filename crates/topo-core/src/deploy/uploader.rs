use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use topo_model::TopologySpec;
use tracing::debug;

use super::DeployError;

/// Where a staged topology package can be fetched from by executors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageLocation(String);

impl PackageLocation {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Package distribution backend.
///
/// An uploader is ready to use once constructed.
#[async_trait]
pub trait PackageUploader: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Stage the topology package and return its location.
    async fn upload_package(&self, topology: &TopologySpec) -> Result<PackageLocation, DeployError>;

    /// Remove a package staged by [`PackageUploader::upload_package`].
    ///
    /// Returns `false` if the package could not be removed.
    async fn undo(&self, package: &PackageLocation) -> bool;

    /// Release backend resources.
    async fn close(&self);
}

/// Uploader for packages staged out of band.
///
/// Returns a fixed location and performs no I/O.
#[derive(Debug, Clone)]
pub struct StaticUploader {
    location: PackageLocation,
}

impl StaticUploader {
    pub fn new(location: PackageLocation) -> Self {
        Self { location }
    }
}

#[async_trait]
impl PackageUploader for StaticUploader {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn upload_package(
        &self,
        topology: &TopologySpec,
    ) -> Result<PackageLocation, DeployError> {
        if self.location.as_str().trim().is_empty() {
            return Err(DeployError::Upload(format!(
                "no package location configured for topology '{}'",
                topology.name
            )));
        }
        Ok(self.location.clone())
    }

    async fn undo(&self, package: &PackageLocation) -> bool {
        debug!(%package, "static package left in place");
        true
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_uploader_returns_configured_location() {
        let up = StaticUploader::new(PackageLocation::new("file:///pkgs/wc.tar.gz"));
        let topology = TopologySpec::new("wc", "img");

        let loc = up.upload_package(&topology).await.unwrap();
        assert_eq!(loc.as_str(), "file:///pkgs/wc.tar.gz");
        assert!(up.undo(&loc).await);
    }

    #[tokio::test]
    async fn static_uploader_rejects_blank_location() {
        let up = StaticUploader::new(PackageLocation::new(" "));
        let err = up
            .upload_package(&TopologySpec::new("wc", "img"))
            .await
            .unwrap_err();
        assert!(matches!(err, DeployError::Upload(msg) if msg.contains("'wc'")));
    }
}
