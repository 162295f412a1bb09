use std::fmt;

use thiserror::Error;

/// Which input of a merge an item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Primary,
    Secondary,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Side::Primary => "primary",
            Side::Secondary => "secondary",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// An item has no usable identity key, so it cannot be deduplicated.
    #[error("error merging {label}: {side} item at index {index} has no identity key")]
    InvalidKey {
        label: String,
        side: Side,
        index: usize,
    },
}

impl MergeError {
    /// Label of the category whose merge failed.
    pub fn label(&self) -> &str {
        match self {
            MergeError::InvalidKey { label, .. } => label,
        }
    }
}
