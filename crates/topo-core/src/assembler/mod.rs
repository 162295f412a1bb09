//! Descriptor assembly.
//!
//! [`DescriptorAssembler`] folds a user [`PodTemplate`] over the platform
//! [`Baseline`](crate::baseline::Baseline), one category at a time, and returns
//! an immutable [`Descriptor`]. Any failure aborts the whole build.
use std::sync::Arc;

use k8s_openapi::api::core::v1::Container;
use topo_model::{Descriptor, PodTemplate, TopologySpec};
use tracing::{debug, instrument, warn};

use crate::baseline::{Baseline, BaselineProvider};
use crate::category::{
    CONTAINER_PORTS, CONTAINERS, Category, ENV_VARS, INIT_CONTAINERS, TOLERATIONS,
    TOPOLOGY_SPREAD, VOLUME_MOUNTS, VOLUMES,
};
use crate::error::CoreError;
use crate::merge::{MergeError, MergeKey};
use crate::metrics::{BuildOutcome, MergeOutcome, MetricsHandle, noop_metrics};

/// Builds executor pod descriptors.
///
/// Holds only shared handles, so one assembler can serve concurrent deployments.
#[derive(Clone)]
pub struct DescriptorAssembler {
    provider: Arc<dyn BaselineProvider>,
    metrics: MetricsHandle,
}

impl DescriptorAssembler {
    pub fn new(provider: Arc<dyn BaselineProvider>) -> Self {
        Self {
            provider,
            metrics: noop_metrics(),
        }
    }

    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn provider(&self) -> &Arc<dyn BaselineProvider> {
        &self.provider
    }

    pub fn metrics(&self) -> &MetricsHandle {
        &self.metrics
    }

    /// Assemble the descriptor for `topology`, customised by `template`.
    ///
    /// Without a template the descriptor is the baseline alone.
    #[instrument(
        level = "debug",
        skip_all,
        fields(topology = %topology.name, provider = self.provider.name())
    )]
    pub fn assemble(
        &self,
        topology: &TopologySpec,
        template: Option<&PodTemplate>,
    ) -> Result<Descriptor, CoreError> {
        let result = self.build(topology, template);
        match &result {
            Ok(descriptor) => {
                self.metrics.record_descriptor_build(BuildOutcome::Success);
                debug!(
                    containers = descriptor.containers().len(),
                    "descriptor assembled"
                );
            }
            Err(e) => {
                self.metrics.record_descriptor_build(BuildOutcome::Failure);
                warn!(error = %e, "descriptor assembly failed");
            }
        }
        result
    }

    fn build(
        &self,
        topology: &TopologySpec,
        template: Option<&PodTemplate>,
    ) -> Result<Descriptor, CoreError> {
        let Baseline {
            executor,
            env,
            ports,
            volume_mounts,
            volumes,
            init_containers,
            tolerations,
            topology_spread_constraints,
            labels,
        } = self.provider.baseline(topology)?;

        let mut exec = template
            .and_then(PodTemplate::executor_container)
            .cloned()
            .unwrap_or_default();
        let mut pod = template
            .cloned()
            .map(PodTemplate::into_inner)
            .unwrap_or_default();
        let mut spec = pod.spec.take().unwrap_or_default();

        exec.env = self.merge(&ENV_VARS, non_empty(env), exec.env.take())?;
        exec.ports = self.merge(&CONTAINER_PORTS, non_empty(ports), exec.ports.take())?;
        exec.volume_mounts = self.merge(
            &VOLUME_MOUNTS,
            non_empty(volume_mounts),
            exec.volume_mounts.take(),
        )?;
        let exec = materialize(exec, executor);

        let containers = std::mem::take(&mut spec.containers);
        spec.containers = self
            .merge(&CONTAINERS, Some(vec![exec]), Some(containers))?
            .unwrap_or_default();
        spec.init_containers = self.merge(
            &INIT_CONTAINERS,
            non_empty(init_containers),
            spec.init_containers.take(),
        )?;
        spec.volumes = self.merge(&VOLUMES, non_empty(volumes), spec.volumes.take())?;
        spec.tolerations = self.merge(
            &TOLERATIONS,
            non_empty(tolerations),
            spec.tolerations.take(),
        )?;
        spec.topology_spread_constraints = self.merge(
            &TOPOLOGY_SPREAD,
            non_empty(topology_spread_constraints),
            spec.topology_spread_constraints.take(),
        )?;

        let mut metadata = pod.metadata.take().unwrap_or_default();
        metadata.labels = Some(labels.layered_over(metadata.labels.as_ref()));

        pod.metadata = Some(metadata);
        pod.spec = Some(spec);
        Ok(Descriptor::new(pod))
    }

    fn merge<T, K: MergeKey>(
        &self,
        category: &Category<T, K>,
        baseline: Option<Vec<T>>,
        template: Option<Vec<T>>,
    ) -> Result<Option<Vec<T>>, MergeError> {
        let outcome = MergeOutcome::classify(&baseline, &template);
        let merged = category.merge(baseline, template);
        let outcome = if merged.is_err() {
            MergeOutcome::Rejected
        } else {
            outcome
        };
        self.metrics.record_category_merge(category.slug, outcome);
        merged
    }
}

/// Overlay the baseline executor fields that are set onto the template's executor.
fn materialize(mut exec: Container, baseline: Container) -> Container {
    exec.name = baseline.name;
    exec.image = baseline.image.or(exec.image);
    exec.command = baseline.command.or(exec.command);
    exec.args = baseline.args.or(exec.args);
    exec.resources = baseline.resources.or(exec.resources);
    exec
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}
