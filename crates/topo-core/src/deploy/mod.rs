//! Staged deployment: upload package, assemble descriptor, submit.
//!
//! Package storage and the cluster API are external; they are reached only
//! through [`PackageUploader`] and [`DescriptorSubmitter`].
mod error;
pub use error::DeployError;

mod uploader;
pub use uploader::{PackageLocation, PackageUploader, StaticUploader};

mod submitter;
pub use submitter::DescriptorSubmitter;

mod pipeline;
pub use pipeline::{DeployReceipt, Deployer};
