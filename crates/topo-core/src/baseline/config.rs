use k8s_openapi::api::core::v1::Container;
use serde::{Deserialize, Serialize};
use topo_model::{DEFAULT_APP_LABEL, DEFAULT_SHARED_VOLUME_PATH};

/// Tunables of the executor baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BaselineConfig {
    /// Value of the `app` label on every executor pod.
    pub app_label: String,
    /// Mount path of the shared scratch volume inside the executor.
    pub shared_volume_path: String,
    /// How long executors stay bound to a not-ready or unreachable node.
    pub toleration_seconds: i64,
    /// Spread executors of one topology across nodes.
    pub spread_by_hostname: bool,
    /// Init containers every executor pod must run.
    pub init_containers: Vec<Container>,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            app_label: DEFAULT_APP_LABEL.to_string(),
            shared_volume_path: DEFAULT_SHARED_VOLUME_PATH.to_string(),
            toleration_seconds: 10,
            spread_by_hostname: false,
            init_containers: Vec::new(),
        }
    }
}
