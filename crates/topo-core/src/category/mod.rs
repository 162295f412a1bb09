//! Per-category merge policy.
//!
//! Each sub-resource category of an executor pod is described by one
//! [`Category`] row: a human label used in errors, a metrics slug, the identity
//! key and which side wins collisions. The assembler folds every category
//! through the same [`Category::merge`] routine.
mod table;
pub use table::{
    CONTAINER_PORTS, CONTAINERS, ENV_VARS, INIT_CONTAINERS, TOLERATIONS, TOPOLOGY_SPREAD,
    VOLUME_MOUNTS, VOLUMES, policy_table,
};

use crate::merge::{MergeError, MergeKey, merge_lists_dedupe};

/// Which side of a category merge is primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// Platform baseline wins; the template only adds new keys.
    Baseline,
    /// Template wins; the baseline only fills keys the template lacks.
    Template,
}

/// Merge policy of one sub-resource category.
pub struct Category<T, K> {
    /// Human-readable name, carried into merge errors.
    pub label: &'static str,
    /// Bounded identifier for logs and metrics.
    pub slug: &'static str,
    pub precedence: Precedence,
    /// Identity key of an item; `None` marks an unkeyable item.
    pub key: fn(&T) -> Option<K>,
}

/// Type-erased view of a [`Category`] row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyRow {
    pub label: &'static str,
    pub slug: &'static str,
    pub precedence: Precedence,
}

impl<T, K: MergeKey> Category<T, K> {
    /// Merge baseline and template items according to this row's precedence.
    pub fn merge(
        &self,
        baseline: Option<Vec<T>>,
        template: Option<Vec<T>>,
    ) -> Result<Option<Vec<T>>, MergeError> {
        let (primary, secondary) = match self.precedence {
            Precedence::Baseline => (baseline, template),
            Precedence::Template => (template, baseline),
        };
        merge_lists_dedupe(primary, secondary, self.key, self.label)
    }

    pub fn row(&self) -> PolicyRow {
        PolicyRow {
            label: self.label,
            slug: self.slug,
            precedence: self.precedence,
        }
    }
}
