//! User-authored pod templates.
//!
//! A template is untrusted input: it is parsed here, but its items are only
//! validated when the assembler merges them against the baseline.
use k8s_openapi::api::core::v1::{
    ConfigMap, Container, PodSpec, PodTemplate as K8sPodTemplate, PodTemplateSpec,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};

use crate::{
    EXECUTOR_CONTAINER_NAME,
    error::{ModelError, ModelResult},
};

/// `kind` value marking a full `PodTemplate` object rather than a bare spec.
const POD_TEMPLATE_KIND: &str = "PodTemplate";

/// Customisations a user layers over the executor baseline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PodTemplate(PodTemplateSpec);

impl PodTemplate {
    pub fn new(spec: PodTemplateSpec) -> Self {
        Self(spec)
    }

    /// Parse a YAML document.
    ///
    /// Accepts either a `kind: PodTemplate` object (its `template` is used) or a
    /// bare `PodTemplateSpec` (`metadata` + `spec`).
    pub fn from_yaml(src: &str) -> ModelResult<Self> {
        if src.trim().is_empty() {
            return Err(ModelError::InvalidTemplate("template document is empty".into()));
        }
        let doc: serde_yaml::Value = serde_yaml::from_str(src).map_err(invalid)?;
        let is_object = doc.get("kind").and_then(|k| k.as_str()) == Some(POD_TEMPLATE_KIND);

        if is_object {
            let obj: K8sPodTemplate = serde_yaml::from_value(doc).map_err(invalid)?;
            Self::from_object(obj)
        } else {
            serde_yaml::from_value(doc).map(Self).map_err(invalid)
        }
    }

    /// Parse a JSON document. Same shapes as [`PodTemplate::from_yaml`].
    pub fn from_json(src: &str) -> ModelResult<Self> {
        let doc: serde_json::Value = serde_json::from_str(src).map_err(invalid)?;
        let is_object = doc.get("kind").and_then(|k| k.as_str()) == Some(POD_TEMPLATE_KIND);

        if is_object {
            let obj: K8sPodTemplate = serde_json::from_value(doc).map_err(invalid)?;
            Self::from_object(obj)
        } else {
            serde_json::from_value(doc).map(Self).map_err(invalid)
        }
    }

    /// Read the template stored under `key` of a ConfigMap.
    pub fn from_config_map(config_map: &ConfigMap, key: &str) -> ModelResult<Self> {
        let raw = config_map
            .data
            .as_ref()
            .and_then(|data| data.get(key))
            .ok_or_else(|| ModelError::TemplateNotFound {
                config_map: config_map.metadata.name.clone().unwrap_or_default(),
                key: key.to_string(),
            })?;
        Self::from_yaml(raw)
    }

    fn from_object(obj: K8sPodTemplate) -> ModelResult<Self> {
        obj.template.map(Self).ok_or_else(|| {
            ModelError::InvalidTemplate("PodTemplate has no 'template' field".into())
        })
    }

    pub fn metadata(&self) -> Option<&ObjectMeta> {
        self.0.metadata.as_ref()
    }

    pub fn pod_spec(&self) -> Option<&PodSpec> {
        self.0.spec.as_ref()
    }

    /// The template's executor container, if it customises one.
    pub fn executor_container(&self) -> Option<&Container> {
        self.pod_spec()?
            .containers
            .iter()
            .find(|c| c.name == EXECUTOR_CONTAINER_NAME)
    }

    pub fn into_inner(self) -> PodTemplateSpec {
        self.0
    }
}

impl From<PodTemplateSpec> for PodTemplate {
    fn from(spec: PodTemplateSpec) -> Self {
        Self(spec)
    }
}

fn invalid(e: impl std::fmt::Display) -> ModelError {
    ModelError::InvalidTemplate(e.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use k8s_openapi::api::core::v1::ConfigMap;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    use super::*;

    const BARE_SPEC: &str = r#"
metadata:
  labels:
    team: data
spec:
  serviceAccountName: topology-runner
  containers:
    - name: executor
      env:
        - name: EXTRA
          value: kept
    - name: log-shipper
      image: fluent-bit:2
"#;

    const OBJECT: &str = r#"
apiVersion: v1
kind: PodTemplate
metadata:
  name: wc-template
template:
  spec:
    containers:
      - name: sidecar
        image: busybox
"#;

    #[test]
    fn parses_bare_spec() {
        let t = PodTemplate::from_yaml(BARE_SPEC).unwrap();

        let spec = t.pod_spec().expect("spec");
        assert_eq!(
            spec.service_account_name.as_deref(),
            Some("topology-runner")
        );
        assert_eq!(spec.containers.len(), 2);

        let labels = t
            .metadata()
            .and_then(|m| m.labels.as_ref())
            .expect("labels");
        assert_eq!(labels.get("team").map(String::as_str), Some("data"));
    }

    #[test]
    fn parses_pod_template_object() {
        let t = PodTemplate::from_yaml(OBJECT).unwrap();
        let spec = t.pod_spec().expect("spec");
        assert_eq!(spec.containers[0].name, "sidecar");
    }

    #[test]
    fn pod_template_object_without_template_is_rejected() {
        let src = "apiVersion: v1\nkind: PodTemplate\nmetadata:\n  name: x\n";
        let err = PodTemplate::from_yaml(src).unwrap_err();
        assert!(matches!(err, ModelError::InvalidTemplate(_)));
    }

    #[test]
    fn finds_executor_container() {
        let t = PodTemplate::from_yaml(BARE_SPEC).unwrap();
        let exec = t.executor_container().expect("executor container");
        assert_eq!(exec.env.as_ref().map(Vec::len), Some(1));

        let t = PodTemplate::from_yaml(OBJECT).unwrap();
        assert!(t.executor_container().is_none());
    }

    #[test]
    fn parses_json_with_same_shapes() {
        let json = r#"{"spec":{"containers":[{"name":"executor"}]}}"#;
        let t = PodTemplate::from_json(json).unwrap();
        assert!(t.executor_container().is_some());
    }

    #[test]
    fn rejects_empty_and_malformed_documents() {
        assert!(matches!(
            PodTemplate::from_yaml("   \n"),
            Err(ModelError::InvalidTemplate(_))
        ));
        assert!(matches!(
            PodTemplate::from_yaml("spec: [1, 2"),
            Err(ModelError::InvalidTemplate(_))
        ));
        assert!(matches!(
            PodTemplate::from_json("{"),
            Err(ModelError::InvalidTemplate(_))
        ));
    }

    #[test]
    fn reads_template_from_config_map() {
        let cm = ConfigMap {
            metadata: ObjectMeta {
                name: Some("templates".into()),
                ..Default::default()
            },
            data: Some(BTreeMap::from([("pod.yaml".to_string(), BARE_SPEC.to_string())])),
            ..Default::default()
        };

        let t = PodTemplate::from_config_map(&cm, "pod.yaml").unwrap();
        assert!(t.executor_container().is_some());

        match PodTemplate::from_config_map(&cm, "missing.yaml") {
            Err(ModelError::TemplateNotFound { config_map, key }) => {
                assert_eq!(config_map, "templates");
                assert_eq!(key, "missing.yaml");
            }
            other => panic!("expected TemplateNotFound, got {other:?}"),
        }
    }
}
