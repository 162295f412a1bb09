use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Pod labels, ordered by key so rendered descriptors diff cleanly.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(pub BTreeMap<String, String>);

impl Labels {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Insert or overwrite a label.
    ///
    /// Returns `self` for chaining.
    pub fn insert<K, V>(&mut self, key: K, val: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.insert(key.into(), val.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Layer `self` on top of `base`: keys present in both keep `self`'s value.
    pub fn layered_over(
        &self,
        base: Option<&BTreeMap<String, String>>,
    ) -> BTreeMap<String, String> {
        let mut out = base.cloned().unwrap_or_default();
        out.extend(self.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        out
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}
