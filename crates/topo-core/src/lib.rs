pub mod assembler;
pub mod baseline;
pub mod category;
pub mod deploy;
pub mod error;
pub mod merge;
pub mod metrics;

pub mod prelude {
    pub use crate::assembler::DescriptorAssembler;
    pub use crate::baseline::{Baseline, BaselineConfig, BaselineProvider, ExecutorBaseline};
    pub use crate::category::{Category, Precedence, policy_table};
    pub use crate::deploy::{
        DeployError, DeployReceipt, Deployer, DescriptorSubmitter, PackageLocation,
        PackageUploader, StaticUploader,
    };
    pub use crate::error::CoreError;
    pub use crate::merge::{MergeError, MergeKey, merge_lists_dedupe};
    pub use crate::metrics::{AssemblyMetrics, MetricsHandle, noop_metrics};
}
