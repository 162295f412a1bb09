use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{
    Container, ContainerPort, EnvVar, PodSpec, PodTemplateSpec, Toleration,
    TopologySpreadConstraint, Volume, VolumeMount,
};
use serde::Serialize;

use crate::EXECUTOR_CONTAINER_NAME;

/// Fully assembled executor pod, ready to hand to the submission path.
///
/// A descriptor is immutable: it exposes read accessors per merged category and
/// can only be consumed as a whole. Every deployment attempt builds a new one.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Descriptor(PodTemplateSpec);

impl Descriptor {
    pub fn new(template: PodTemplateSpec) -> Self {
        Self(template)
    }

    pub fn pod_template(&self) -> &PodTemplateSpec {
        &self.0
    }

    pub fn into_pod_template(self) -> PodTemplateSpec {
        self.0
    }

    pub fn labels(&self) -> Option<&BTreeMap<String, String>> {
        self.0.metadata.as_ref()?.labels.as_ref()
    }

    fn pod_spec(&self) -> Option<&PodSpec> {
        self.0.spec.as_ref()
    }

    /// The executor container.
    pub fn executor(&self) -> Option<&Container> {
        self.containers()
            .iter()
            .find(|c| c.name == EXECUTOR_CONTAINER_NAME)
    }

    /// Executor environment.
    pub fn env(&self) -> Option<&[EnvVar]> {
        self.executor()?.env.as_deref()
    }

    /// Executor ports.
    pub fn ports(&self) -> Option<&[ContainerPort]> {
        self.executor()?.ports.as_deref()
    }

    /// Executor volume mounts.
    pub fn volume_mounts(&self) -> Option<&[VolumeMount]> {
        self.executor()?.volume_mounts.as_deref()
    }

    pub fn containers(&self) -> &[Container] {
        self.pod_spec()
            .map(|s| s.containers.as_slice())
            .unwrap_or(&[])
    }

    pub fn init_containers(&self) -> Option<&[Container]> {
        self.pod_spec()?.init_containers.as_deref()
    }

    pub fn volumes(&self) -> Option<&[Volume]> {
        self.pod_spec()?.volumes.as_deref()
    }

    pub fn tolerations(&self) -> Option<&[Toleration]> {
        self.pod_spec()?.tolerations.as_deref()
    }

    pub fn topology_spread_constraints(&self) -> Option<&[TopologySpreadConstraint]> {
        self.pod_spec()?.topology_spread_constraints.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use k8s_openapi::api::core::v1::{Container, EnvVar, PodSpec, PodTemplateSpec};

    use super::Descriptor;

    fn container(name: &str) -> Container {
        Container {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn executor_accessors_read_executor_container() {
        let mut exec = container("executor");
        exec.env = Some(vec![EnvVar {
            name: "HOST".into(),
            ..Default::default()
        }]);

        let d = Descriptor::new(PodTemplateSpec {
            spec: Some(PodSpec {
                containers: vec![container("sidecar"), exec],
                ..Default::default()
            }),
            ..Default::default()
        });

        assert_eq!(d.containers().len(), 2);
        assert_eq!(d.executor().map(|c| c.name.as_str()), Some("executor"));
        assert_eq!(d.env().map(|e| e.len()), Some(1));
        assert!(d.ports().is_none());
        assert!(d.volumes().is_none());
    }

    #[test]
    fn empty_descriptor_has_no_categories() {
        let d = Descriptor::new(PodTemplateSpec::default());
        assert!(d.containers().is_empty());
        assert!(d.executor().is_none());
        assert!(d.labels().is_none());
        assert!(d.tolerations().is_none());
    }

    #[test]
    fn serializes_as_pod_template_spec() {
        let d = Descriptor::new(PodTemplateSpec {
            spec: Some(PodSpec {
                containers: vec![container("executor")],
                ..Default::default()
            }),
            ..Default::default()
        });
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["spec"]["containers"][0]["name"], "executor");
    }
}
