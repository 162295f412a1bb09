//! Metrics collection abstraction for descriptor assembly.
//!
//! Backends (prometheus, statsd, ...) implement [`AssemblyMetrics`] and are
//! injected into [`crate::assembler::DescriptorAssembler`].
mod backend;
pub use backend::{AssemblyMetrics, BuildOutcome, MergeOutcome, MetricsHandle};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
