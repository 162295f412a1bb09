use std::collections::{BTreeMap, BTreeSet};

use k8s_openapi::api::core::v1::{
    Container, EmptyDirVolumeSource, EnvVar, EnvVarSource, ObjectFieldSelector, Toleration,
    TopologySpreadConstraint, Volume, VolumeMount,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use topo_model::{
    ENV_HOST, ENV_POD_NAME, EXECUTOR_CONTAINER_NAME, EXECUTOR_PORTS, FIELD_POD_IP, FIELD_POD_NAME,
    LABEL_APP, LABEL_TOPOLOGY, Labels, SHARED_VOLUME_NAME, TAINT_NOT_READY, TAINT_UNREACHABLE,
    TopologySpec,
};
use tracing::{trace, warn};

use super::{Baseline, BaselineConfig, BaselineProvider};
use crate::error::CoreError;

const HOSTNAME_TOPOLOGY_KEY: &str = "kubernetes.io/hostname";

/// Default baseline for topology executor pods.
#[derive(Debug, Clone, Default)]
pub struct ExecutorBaseline {
    config: BaselineConfig,
}

impl ExecutorBaseline {
    pub fn new(config: BaselineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BaselineConfig {
        &self.config
    }

    fn executor(&self, topology: &TopologySpec) -> Container {
        Container {
            name: EXECUTOR_CONTAINER_NAME.to_string(),
            image: Some(topology.image.clone()),
            command: non_empty(&topology.command),
            args: non_empty(&topology.args),
            resources: topology.resources.to_requirements(),
            ..Default::default()
        }
    }

    /// Pod identity first, then the topology's own variables.
    ///
    /// Topology variables that reuse a reserved or earlier name are dropped.
    fn env(&self, topology: &TopologySpec) -> Vec<EnvVar> {
        let mut env = vec![
            field_env(ENV_HOST, FIELD_POD_IP),
            field_env(ENV_POD_NAME, FIELD_POD_NAME),
        ];
        let mut names: BTreeSet<String> = env.iter().map(|e| e.name.clone()).collect();

        for kv in &topology.env {
            if names.insert(kv.key().to_string()) {
                env.push(kv.to_env_var());
            } else {
                warn!(
                    topology = %topology.name,
                    name = kv.key(),
                    "ignoring duplicate topology environment variable"
                );
            }
        }
        env
    }

    fn labels(&self, topology: &TopologySpec) -> Labels {
        let mut labels = topology.labels.clone();
        labels
            .insert(LABEL_APP, self.config.app_label.as_str())
            .insert(LABEL_TOPOLOGY, topology.name.as_str());
        labels
    }

    fn tolerations(&self) -> Vec<Toleration> {
        [TAINT_NOT_READY, TAINT_UNREACHABLE]
            .into_iter()
            .map(|taint| Toleration {
                key: Some(taint.to_string()),
                operator: Some("Exists".to_string()),
                effect: Some("NoExecute".to_string()),
                toleration_seconds: Some(self.config.toleration_seconds),
                ..Default::default()
            })
            .collect()
    }

    fn spread(&self, topology: &TopologySpec) -> Vec<TopologySpreadConstraint> {
        if !self.config.spread_by_hostname {
            return Vec::new();
        }
        let selector = BTreeMap::from([
            (LABEL_APP.to_string(), self.config.app_label.clone()),
            (LABEL_TOPOLOGY.to_string(), topology.name.clone()),
        ]);
        vec![TopologySpreadConstraint {
            max_skew: 1,
            topology_key: HOSTNAME_TOPOLOGY_KEY.to_string(),
            when_unsatisfiable: "ScheduleAnyway".to_string(),
            label_selector: Some(LabelSelector {
                match_labels: Some(selector),
                ..Default::default()
            }),
            ..Default::default()
        }]
    }
}

impl BaselineProvider for ExecutorBaseline {
    fn name(&self) -> &'static str {
        "executor"
    }

    fn baseline(&self, topology: &TopologySpec) -> Result<Baseline, CoreError> {
        topology.validate()?;
        if self.config.toleration_seconds < 0 {
            return Err(CoreError::Baseline {
                provider: self.name(),
                reason: format!(
                    "toleration seconds must not be negative, got {}",
                    self.config.toleration_seconds
                ),
            });
        }

        let baseline = Baseline {
            executor: self.executor(topology),
            env: self.env(topology),
            ports: EXECUTOR_PORTS
                .iter()
                .map(|p| p.to_container_port())
                .collect(),
            volume_mounts: vec![VolumeMount {
                name: SHARED_VOLUME_NAME.to_string(),
                mount_path: self.config.shared_volume_path.clone(),
                ..Default::default()
            }],
            volumes: vec![Volume {
                name: SHARED_VOLUME_NAME.to_string(),
                empty_dir: Some(EmptyDirVolumeSource::default()),
                ..Default::default()
            }],
            init_containers: self.config.init_containers.clone(),
            tolerations: self.tolerations(),
            topology_spread_constraints: self.spread(topology),
            labels: self.labels(topology),
        };
        trace!(topology = %topology.name, env = baseline.env.len(), "baseline built");
        Ok(baseline)
    }
}

fn field_env(name: &str, field_path: &str) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value_from: Some(EnvVarSource {
            field_ref: Some(ObjectFieldSelector {
                field_path: field_path.to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn non_empty(v: &[String]) -> Option<Vec<String>> {
    (!v.is_empty()).then(|| v.to_vec())
}
