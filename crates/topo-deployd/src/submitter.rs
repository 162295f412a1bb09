use async_trait::async_trait;
use k8s_openapi::api::core::v1::PodTemplate;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use tracing::debug;

use topo_core::deploy::{DeployError, DescriptorSubmitter, PackageLocation};
use topo_model::{Descriptor, TopologySpec};

/// Annotation carrying the package location on the rendered template.
const PACKAGE_ANNOTATION: &str = "topology.io/package";

/// Dry-run submitter: prints the rendered `PodTemplate` as YAML on stdout.
pub struct StdoutSubmitter;

impl StdoutSubmitter {
    fn render(
        topology: &TopologySpec,
        descriptor: &Descriptor,
        package: &PackageLocation,
    ) -> Result<String, DeployError> {
        let object = PodTemplate {
            metadata: ObjectMeta {
                name: Some(topology.name.clone()),
                annotations: Some(
                    [(PACKAGE_ANNOTATION.to_string(), package.to_string())]
                        .into_iter()
                        .collect(),
                ),
                ..Default::default()
            },
            template: Some(descriptor.pod_template().clone()),
        };
        serde_yaml::to_string(&object).map_err(|e| DeployError::Submit(e.to_string()))
    }
}

#[async_trait]
impl DescriptorSubmitter for StdoutSubmitter {
    fn name(&self) -> &'static str {
        "stdout"
    }

    async fn submit(
        &self,
        topology: &TopologySpec,
        descriptor: &Descriptor,
        package: &PackageLocation,
    ) -> Result<(), DeployError> {
        let rendered = Self::render(topology, descriptor, package)?;
        debug!(bytes = rendered.len(), "descriptor rendered");
        println!("{rendered}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use topo_core::assembler::DescriptorAssembler;
    use topo_core::baseline::ExecutorBaseline;

    use super::*;

    #[test]
    fn renders_pod_template_object() {
        let topology = TopologySpec::new("word-count", "registry/executor:1.0");
        let descriptor = DescriptorAssembler::new(Arc::new(ExecutorBaseline::default()))
            .assemble(&topology, None)
            .unwrap();

        let yaml = StdoutSubmitter::render(
            &topology,
            &descriptor,
            &PackageLocation::new("file:///pkgs/wc.tar.gz"),
        )
        .unwrap();

        assert!(yaml.contains("kind: PodTemplate"));
        assert!(yaml.contains("name: word-count"));
        assert!(yaml.contains("file:///pkgs/wc.tar.gz"));
        assert!(yaml.contains("name: executor"));
    }
}
