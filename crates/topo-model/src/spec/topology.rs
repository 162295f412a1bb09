use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::ResourceRequirements;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use serde::{Deserialize, Serialize};

use crate::{
    KeyValue, Labels,
    domain::TopologyName,
    error::{ModelError, ModelResult},
};

/// Maximum length of a DNS-1123 label.
const MAX_NAME_LEN: usize = 63;

/// Declarative description of a topology to deploy.
///
/// `TopologySpec` carries everything the baseline provider needs to build the
/// platform-mandated part of an executor pod:
/// - identity (`name`), used for labels and resource names
/// - the executor process (`image`, `command`, `args`)
/// - the executor's resource envelope (`resources`)
/// - mandatory extras the operator wants on every pod (`labels`, `env`)
///
/// User customisation does not live here; it comes from a [`crate::PodTemplate`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologySpec {
    /// Topology name, a DNS-1123 label.
    pub name: TopologyName,
    /// Executor container image.
    pub image: String,
    /// Executor entrypoint. Empty means the image default.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default)]
    pub resources: ExecutorResources,
    /// Extra labels set on every executor pod.
    #[serde(default, skip_serializing_if = "Labels::is_empty")]
    pub labels: Labels,
    /// Extra environment every executor must see.
    ///
    /// These become part of the baseline and therefore win over template values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<KeyValue>,
}

/// CPU and memory envelope of one executor.
///
/// Values are Kubernetes quantities (`"500m"`, `"2Gi"`). Requests equal limits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutorResources {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
}

impl ExecutorResources {
    pub fn is_empty(&self) -> bool {
        self.cpu.is_none() && self.memory.is_none()
    }

    /// Render as Kubernetes resource requirements, or `None` when nothing is set.
    pub fn to_requirements(&self) -> Option<ResourceRequirements> {
        if self.is_empty() {
            return None;
        }
        let mut quantities = BTreeMap::new();
        if let Some(cpu) = &self.cpu {
            quantities.insert("cpu".to_string(), Quantity(cpu.clone()));
        }
        if let Some(memory) = &self.memory {
            quantities.insert("memory".to_string(), Quantity(memory.clone()));
        }
        Some(ResourceRequirements {
            limits: Some(quantities.clone()),
            requests: Some(quantities),
            ..Default::default()
        })
    }
}

impl TopologySpec {
    /// Minimal spec with a name and an executor image.
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            command: Vec::new(),
            args: Vec::new(),
            resources: ExecutorResources::default(),
            labels: Labels::new(),
            env: Vec::new(),
        }
    }

    pub fn with_command<I, S>(mut self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command = command.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_resources(mut self, cpu: impl Into<String>, memory: impl Into<String>) -> Self {
        self.resources = ExecutorResources {
            cpu: Some(cpu.into()),
            memory: Some(memory.into()),
        };
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key, value);
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push(KeyValue::new(key, value));
        self
    }

    /// Check the fields the scheduler depends on.
    ///
    /// Rules:
    /// - `name` is a DNS-1123 label: lowercase alphanumerics and `-`, starting and
    ///   ending with an alphanumeric, at most 63 characters;
    /// - `image` is not blank;
    /// - every `env` entry has a non-blank key.
    pub fn validate(&self) -> ModelResult<()> {
        validate_name(&self.name)?;
        if self.image.trim().is_empty() {
            return Err(ModelError::InvalidTopology(format!(
                "topology '{}' has no executor image",
                self.name
            )));
        }
        if let Some(index) = self.env.iter().position(|kv| kv.key().trim().is_empty()) {
            return Err(ModelError::InvalidTopology(format!(
                "topology '{}' env entry at index {index} has a blank key",
                self.name
            )));
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> ModelResult<()> {
    if name.is_empty() {
        return Err(ModelError::InvalidTopology("name cannot be empty".into()));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ModelError::InvalidTopology(format!(
            "name '{name}' is longer than {MAX_NAME_LEN} characters"
        )));
    }
    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    let valid_edges = !name.starts_with('-') && !name.ends_with('-');
    if !valid_chars || !valid_edges {
        return Err(ModelError::InvalidTopology(format!(
            "name '{name}' is not a valid DNS-1123 label"
        )));
    }
    Ok(())
}
