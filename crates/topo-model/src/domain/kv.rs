use k8s_openapi::api::core::v1::EnvVar;
use serde::{Deserialize, Serialize};

/// Static environment entry declared in topology configuration.
///
/// Rendered into an [`EnvVar`] with a literal value. Blank keys are rejected by
/// [`crate::TopologySpec::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyValue {
    key: String,
    value: String,
}

impl KeyValue {
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Render as a Kubernetes environment variable with a literal value.
    pub fn to_env_var(&self) -> EnvVar {
        EnvVar {
            name: self.key.clone(),
            value: Some(self.value.clone()),
            ..Default::default()
        }
    }
}

impl From<(&str, &str)> for KeyValue {
    fn from((key, value): (&str, &str)) -> Self {
        Self::new(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::KeyValue;

    #[test]
    fn to_env_var_uses_literal_value() {
        let env = KeyValue::new("JAVA_OPTS", "-Xmx1g").to_env_var();
        assert_eq!(env.name, "JAVA_OPTS");
        assert_eq!(env.value.as_deref(), Some("-Xmx1g"));
        assert!(env.value_from.is_none());
    }

    #[test]
    fn deserializes_from_key_value_object() {
        let kv: KeyValue = serde_json::from_str(r#"{"key":"REGION","value":"eu-1"}"#).unwrap();
        assert_eq!(kv, ("REGION", "eu-1").into());
    }
}
