use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use k8s_openapi::api::core::v1::ConfigMap;
use serde::Deserialize;
use topo_core::baseline::BaselineConfig;
use topo_model::{PodTemplate, TopologySpec};
use topo_observe::LoggerConfig;

/// Daemon configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeployConfig {
    pub logger: LoggerConfig,
    pub baseline: BaselineConfig,
    pub topology: Option<TopologySpec>,
    /// Pod template file: a bare spec, a `PodTemplate` object, or a ConfigMap.
    pub template_path: Option<PathBuf>,
    /// Data key to read when `template_path` holds a ConfigMap.
    pub template_key: Option<String>,
    /// Location of the pre-staged topology package.
    pub package_uri: String,
    /// Dump prometheus metrics to stderr when done.
    pub print_metrics: bool,
}

impl DeployConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let cfg: Self = serde_yaml::from_str(raw)?;
        if cfg.topology.is_none() {
            bail!("'topology' section is required");
        }
        Ok(cfg)
    }

    pub fn topology(&self) -> anyhow::Result<&TopologySpec> {
        self.topology
            .as_ref()
            .context("'topology' section is required")
    }

    /// Load the configured pod template, if any.
    pub fn template(&self) -> anyhow::Result<Option<PodTemplate>> {
        let Some(path) = &self.template_path else {
            return Ok(None);
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading pod template {}", path.display()))?;
        self.parse_template(&raw, path).map(Some)
    }

    fn parse_template(&self, raw: &str, path: &Path) -> anyhow::Result<PodTemplate> {
        let template = match &self.template_key {
            Some(key) => {
                let cm: ConfigMap = serde_yaml::from_str(raw)
                    .with_context(|| format!("{} is not a ConfigMap", path.display()))?;
                PodTemplate::from_config_map(&cm, key)?
            }
            None if path.extension().is_some_and(|e| e == "json") => PodTemplate::from_json(raw)?,
            None => PodTemplate::from_yaml(raw)?,
        };
        Ok(template)
    }
}
