use std::sync::Arc;

/// How a single category merge resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Both sides had items and were deduplicated.
    Merged,
    /// One side was absent or empty; the other was taken as-is.
    Passthrough,
    /// Neither side had anything for this category.
    Absent,
    /// An unkeyable item aborted the merge.
    Rejected,
}

impl MergeOutcome {
    /// Classify a merge from its inputs, before it runs.
    pub fn classify<T>(a: &Option<Vec<T>>, b: &Option<Vec<T>>) -> Self {
        match (a, b) {
            (None, None) => MergeOutcome::Absent,
            (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => MergeOutcome::Merged,
            _ => MergeOutcome::Passthrough,
        }
    }

    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            MergeOutcome::Merged => "merged",
            MergeOutcome::Passthrough => "passthrough",
            MergeOutcome::Absent => "absent",
            MergeOutcome::Rejected => "rejected",
        }
    }
}

/// Result of one descriptor build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Success,
    Failure,
}

impl BuildOutcome {
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            BuildOutcome::Success => "success",
            BuildOutcome::Failure => "failure",
        }
    }
}

/// Backend metrics collection interface.
pub trait AssemblyMetrics: Send + Sync + 'static {
    /// Record how one category merge resolved.
    ///
    /// # Arguments
    /// - `category`: category slug (bounded set, see [`crate::category::policy_table`])
    /// - `outcome`: merge resolution
    fn record_category_merge(&self, category: &str, outcome: MergeOutcome);
    /// Record a finished descriptor build.
    fn record_descriptor_build(&self, outcome: BuildOutcome);
    /// Record a compensating rollback of a staged package.
    fn record_package_rollback(&self, succeeded: bool);
}

/// Shared handle to metrics backend.
pub type MetricsHandle = Arc<dyn AssemblyMetrics>;
