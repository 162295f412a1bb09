use std::sync::Arc;

use topo_model::{Descriptor, PodTemplate, TopologySpec};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::{DeployError, DescriptorSubmitter, PackageLocation, PackageUploader};
use crate::assembler::DescriptorAssembler;
use crate::error::CoreError;

/// Outcome of a successful deployment.
#[derive(Debug, Clone)]
pub struct DeployReceipt {
    /// Identifier of this attempt, present in every log line it produced.
    pub attempt: Uuid,
    pub package: PackageLocation,
    pub descriptor: Descriptor,
}

/// Drives one topology through upload, assembly and submission.
///
/// A failure after the package was staged undoes the upload. The uploader is
/// closed at the end of every attempt, successful or not.
#[derive(Clone)]
pub struct Deployer {
    assembler: DescriptorAssembler,
    uploader: Arc<dyn PackageUploader>,
    submitter: Arc<dyn DescriptorSubmitter>,
}

impl Deployer {
    pub fn new(
        assembler: DescriptorAssembler,
        uploader: Arc<dyn PackageUploader>,
        submitter: Arc<dyn DescriptorSubmitter>,
    ) -> Self {
        Self {
            assembler,
            uploader,
            submitter,
        }
    }

    pub fn assembler(&self) -> &DescriptorAssembler {
        &self.assembler
    }

    pub async fn deploy(
        &self,
        topology: &TopologySpec,
        template: Option<&PodTemplate>,
    ) -> Result<DeployReceipt, DeployError> {
        self.run(Uuid::new_v4(), topology, template).await
    }

    #[instrument(
        level = "info",
        skip_all,
        fields(
            attempt = %attempt,
            topology = %topology.name,
            uploader = self.uploader.name(),
            submitter = self.submitter.name(),
        )
    )]
    async fn run(
        &self,
        attempt: Uuid,
        topology: &TopologySpec,
        template: Option<&PodTemplate>,
    ) -> Result<DeployReceipt, DeployError> {
        let result = self.stage_and_submit(topology, template).await;
        self.uploader.close().await;

        match result {
            Ok((package, descriptor)) => {
                info!(%package, "topology submitted");
                Ok(DeployReceipt {
                    attempt,
                    package,
                    descriptor,
                })
            }
            Err(e) => {
                warn!(error = %e, "deployment failed");
                Err(e)
            }
        }
    }

    async fn stage_and_submit(
        &self,
        topology: &TopologySpec,
        template: Option<&PodTemplate>,
    ) -> Result<(PackageLocation, Descriptor), DeployError> {
        topology.validate().map_err(CoreError::from)?;

        let package = self.uploader.upload_package(topology).await?;
        debug!(%package, "package staged");

        match self.assemble_and_submit(topology, template, &package).await {
            Ok(descriptor) => Ok((package, descriptor)),
            Err(e) => {
                self.rollback(&package).await;
                Err(e)
            }
        }
    }

    async fn assemble_and_submit(
        &self,
        topology: &TopologySpec,
        template: Option<&PodTemplate>,
        package: &PackageLocation,
    ) -> Result<Descriptor, DeployError> {
        let descriptor = self.assembler.assemble(topology, template)?;
        self.submitter.submit(topology, &descriptor, package).await?;
        Ok(descriptor)
    }

    async fn rollback(&self, package: &PackageLocation) {
        let undone = self.uploader.undo(package).await;
        self.assembler.metrics().record_package_rollback(undone);
        if undone {
            debug!(%package, "staged package removed");
        } else {
            warn!(%package, "failed to remove staged package");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::baseline::ExecutorBaseline;
    use crate::metrics::{AssemblyMetrics, BuildOutcome, MergeOutcome};

    type CallLog = Arc<Mutex<Vec<&'static str>>>;

    struct FakeUploader {
        log: CallLog,
        fail_upload: bool,
        undo_ok: bool,
    }

    #[async_trait]
    impl PackageUploader for FakeUploader {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn upload_package(&self, _: &TopologySpec) -> Result<PackageLocation, DeployError> {
            self.log.lock().unwrap().push("upload");
            if self.fail_upload {
                return Err(DeployError::Upload("bucket unavailable".into()));
            }
            Ok(PackageLocation::new("mem://wc"))
        }

        async fn undo(&self, _: &PackageLocation) -> bool {
            self.log.lock().unwrap().push("undo");
            self.undo_ok
        }

        async fn close(&self) {
            self.log.lock().unwrap().push("close");
        }
    }

    struct FakeSubmitter {
        log: CallLog,
        fail: bool,
    }

    #[async_trait]
    impl DescriptorSubmitter for FakeSubmitter {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn submit(
            &self,
            _: &TopologySpec,
            _: &Descriptor,
            _: &PackageLocation,
        ) -> Result<(), DeployError> {
            self.log.lock().unwrap().push("submit");
            if self.fail {
                return Err(DeployError::Submit("api server rejected pod".into()));
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct RollbackRecorder(Mutex<Vec<bool>>);

    impl AssemblyMetrics for RollbackRecorder {
        fn record_category_merge(&self, _: &str, _: MergeOutcome) {}
        fn record_descriptor_build(&self, _: BuildOutcome) {}
        fn record_package_rollback(&self, succeeded: bool) {
            self.0.lock().unwrap().push(succeeded);
        }
    }

    struct Fixture {
        log: CallLog,
        rollbacks: Arc<RollbackRecorder>,
        deployer: Deployer,
    }

    fn fixture(fail_upload: bool, fail_submit: bool, undo_ok: bool) -> Fixture {
        let log = CallLog::default();
        let rollbacks = Arc::new(RollbackRecorder::default());
        let assembler = DescriptorAssembler::new(Arc::new(ExecutorBaseline::default()))
            .with_metrics(rollbacks.clone());
        let deployer = Deployer::new(
            assembler,
            Arc::new(FakeUploader {
                log: log.clone(),
                fail_upload,
                undo_ok,
            }),
            Arc::new(FakeSubmitter {
                log: log.clone(),
                fail: fail_submit,
            }),
        );
        Fixture {
            log,
            rollbacks,
            deployer,
        }
    }

    fn topology() -> TopologySpec {
        TopologySpec::new("word-count", "registry/executor:1.0")
    }

    #[tokio::test]
    async fn successful_deploy_uploads_submits_and_closes() {
        let f = fixture(false, false, true);
        let receipt = f.deployer.deploy(&topology(), None).await.unwrap();

        assert_eq!(*f.log.lock().unwrap(), ["upload", "submit", "close"]);
        assert_eq!(receipt.package.as_str(), "mem://wc");
        assert!(receipt.descriptor.executor().is_some());
        assert!(f.rollbacks.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn submit_failure_undoes_upload() {
        let f = fixture(false, true, true);
        let err = f.deployer.deploy(&topology(), None).await.unwrap_err();

        assert!(matches!(err, DeployError::Submit(_)));
        assert_eq!(
            *f.log.lock().unwrap(),
            ["upload", "submit", "undo", "close"]
        );
        assert_eq!(*f.rollbacks.0.lock().unwrap(), [true]);
    }

    #[tokio::test]
    async fn assembly_failure_undoes_upload_without_submitting() {
        let f = fixture(false, false, true);
        let tpl = PodTemplate::from_yaml(
            "spec:\n  containers: []\n  volumes:\n    - name: \"\"\n      emptyDir: {}\n",
        )
        .unwrap();
        let err = f
            .deployer
            .deploy(&topology(), Some(&tpl))
            .await
            .unwrap_err();

        assert!(matches!(err, DeployError::Assembly(CoreError::Merge(_))));
        assert!(err.to_string().contains("Pod Template Volumes"));
        assert_eq!(*f.log.lock().unwrap(), ["upload", "undo", "close"]);
    }

    #[tokio::test]
    async fn failed_undo_does_not_mask_original_error() {
        let f = fixture(false, true, false);
        let err = f.deployer.deploy(&topology(), None).await.unwrap_err();

        assert!(matches!(err, DeployError::Submit(msg) if msg.contains("rejected")));
        assert_eq!(*f.rollbacks.0.lock().unwrap(), [false]);
    }

    #[tokio::test]
    async fn upload_failure_skips_undo() {
        let f = fixture(true, false, true);
        let err = f.deployer.deploy(&topology(), None).await.unwrap_err();

        assert!(matches!(err, DeployError::Upload(_)));
        assert_eq!(*f.log.lock().unwrap(), ["upload", "close"]);
    }

    #[tokio::test]
    async fn invalid_topology_never_uploads() {
        let f = fixture(false, false, true);
        let err = f
            .deployer
            .deploy(&TopologySpec::new("Word_Count", "img"), None)
            .await
            .unwrap_err();

        assert!(matches!(err, DeployError::Assembly(CoreError::Model(_))));
        assert_eq!(*f.log.lock().unwrap(), ["close"]);
    }

    #[tokio::test]
    async fn attempts_get_distinct_ids() {
        let f = fixture(false, false, true);
        let a = f.deployer.deploy(&topology(), None).await.unwrap();
        let b = f.deployer.deploy(&topology(), None).await.unwrap();
        assert_ne!(a.attempt, b.attempt);
    }
}
