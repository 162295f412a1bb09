use async_trait::async_trait;
use topo_model::{Descriptor, TopologySpec};

use super::{DeployError, PackageLocation};

/// Hands an assembled descriptor to the cluster.
#[async_trait]
pub trait DescriptorSubmitter: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Submit `descriptor` for `topology`; executors fetch `package` at startup.
    async fn submit(
        &self,
        topology: &TopologySpec,
        descriptor: &Descriptor,
        package: &PackageLocation,
    ) -> Result<(), DeployError>;
}
