//! Prometheus backend for descriptor assembly metrics.
//!
//! [`PrometheusMetrics`] implements [`topo_core::metrics::AssemblyMetrics`].
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use topo_core::assembler::DescriptorAssembler;
//! use topo_core::baseline::ExecutorBaseline;
//! use topo_model::TopologySpec;
//! use topo_prometheus::PrometheusMetrics;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = PrometheusMetrics::new()?;
//! let assembler = DescriptorAssembler::new(Arc::new(ExecutorBaseline::default()))
//!     .with_metrics(Arc::new(metrics.clone()));
//!
//! assembler.assemble(&TopologySpec::new("word-count", "executor:1.0"), None)?;
//! assert!(metrics.encode_text()?.contains("topo_descriptor_builds_total"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `topo_category_merges_total{category, outcome}` - Counter
//! - `topo_descriptor_builds_total{outcome}` - Counter
//! - `topo_package_rollbacks_total{result}` - Counter
//!
//! No HTTP endpoint is provided; expose [`PrometheusMetrics::gather`] through
//! whatever server the application already runs.
mod backend;
pub use backend::PrometheusMetrics;
