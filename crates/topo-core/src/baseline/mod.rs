//! Platform-mandated executor configuration.
//!
//! A [`BaselineProvider`] is the scheduler-versioned answer to "what does every
//! executor pod need". It returns a fresh [`Baseline`] on every call so that
//! concurrent deployments never share mutable state.
mod config;
pub use config::BaselineConfig;

mod executor;
pub use executor::ExecutorBaseline;

use k8s_openapi::api::core::v1::{
    Container, ContainerPort, EnvVar, Toleration, TopologySpreadConstraint, Volume, VolumeMount,
};
use topo_model::{Labels, TopologySpec};

use crate::error::CoreError;

/// Mandatory items per category for one topology.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Baseline {
    /// Executor container skeleton: name, image, command, args and resources.
    ///
    /// Env, ports and mounts are carried separately and merged per category.
    pub executor: Container,
    pub env: Vec<EnvVar>,
    pub ports: Vec<ContainerPort>,
    pub volume_mounts: Vec<VolumeMount>,
    pub volumes: Vec<Volume>,
    pub init_containers: Vec<Container>,
    pub tolerations: Vec<Toleration>,
    pub topology_spread_constraints: Vec<TopologySpreadConstraint>,
    pub labels: Labels,
}

/// Source of the baseline used by [`crate::assembler::DescriptorAssembler`].
pub trait BaselineProvider: Send + Sync {
    /// Provider name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Build the baseline for `topology`.
    fn baseline(&self, topology: &TopologySpec) -> Result<Baseline, CoreError>;
}
