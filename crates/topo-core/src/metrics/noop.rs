use crate::metrics::backend::{AssemblyMetrics, BuildOutcome, MergeOutcome};

/// No-op metrics backend that compiles to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl AssemblyMetrics for NoOpMetrics {
    #[inline(always)]
    fn record_category_merge(&self, _: &str, _: MergeOutcome) {}

    #[inline(always)]
    fn record_descriptor_build(&self, _: BuildOutcome) {}

    #[inline(always)]
    fn record_package_rollback(&self, _: bool) {}
}
