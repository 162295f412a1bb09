use std::sync::Arc;

use prometheus::{CounterVec, Opts, Registry, TextEncoder, proto::MetricFamily};

use topo_core::metrics::{AssemblyMetrics, BuildOutcome, MergeOutcome};

const NAMESPACE: &str = "topo";

/// Prometheus metrics backend.
///
/// ## Label cardinality
/// All labels are bounded:
/// - `category`: one slug per row of the category policy table
/// - `outcome`: `merged`, `passthrough`, `absent`, `rejected` for merges;
///   `success`, `failure` for builds
/// - `result`: `removed`, `failed`
#[derive(Clone)]
pub struct PrometheusMetrics {
    category_merges: CounterVec,
    descriptor_builds: CounterVec,
    package_rollbacks: CounterVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Create a backend registering into `registry`.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let category_merges = CounterVec::new(
            Opts::new("category_merges_total", "Category merges by outcome").namespace(NAMESPACE),
            &["category", "outcome"],
        )?;
        registry.register(Box::new(category_merges.clone()))?;

        let descriptor_builds = CounterVec::new(
            Opts::new("descriptor_builds_total", "Descriptor builds by outcome")
                .namespace(NAMESPACE),
            &["outcome"],
        )?;
        registry.register(Box::new(descriptor_builds.clone()))?;

        let package_rollbacks = CounterVec::new(
            Opts::new(
                "package_rollbacks_total",
                "Staged packages rolled back after a failed deployment",
            )
            .namespace(NAMESPACE),
            &["result"],
        )?;
        registry.register(Box::new(package_rollbacks.clone()))?;

        Ok(Self {
            category_merges,
            descriptor_builds,
            package_rollbacks,
            registry,
        })
    }

    /// Create a backend with a private registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Render all metrics in the text exposition format.
    pub fn encode_text(&self) -> Result<String, prometheus::Error> {
        TextEncoder::new().encode_to_string(&self.gather())
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl AssemblyMetrics for PrometheusMetrics {
    fn record_category_merge(&self, category: &str, outcome: MergeOutcome) {
        self.category_merges
            .with_label_values(&[category, outcome.as_label()])
            .inc();
    }

    fn record_descriptor_build(&self, outcome: BuildOutcome) {
        self.descriptor_builds
            .with_label_values(&[outcome.as_label()])
            .inc();
    }

    fn record_package_rollback(&self, succeeded: bool) {
        let result = if succeeded { "removed" } else { "failed" };
        self.package_rollbacks.with_label_values(&[result]).inc();
    }
}

#[cfg(test)]
mod tests {
    use topo_core::assembler::DescriptorAssembler;
    use topo_core::baseline::ExecutorBaseline;
    use topo_core::category::policy_table;
    use topo_model::TopologySpec;

    use super::*;

    fn family<'a>(families: &'a [MetricFamily], name: &str) -> &'a MetricFamily {
        families
            .iter()
            .find(|f| f.name() == name)
            .unwrap_or_else(|| panic!("metric {name} not found"))
    }

    #[test]
    fn category_merges_are_labelled_per_outcome() {
        let metrics = PrometheusMetrics::new().unwrap();

        metrics.record_category_merge("env_vars", MergeOutcome::Merged);
        metrics.record_category_merge("env_vars", MergeOutcome::Merged);
        metrics.record_category_merge("volumes", MergeOutcome::Rejected);

        let families = metrics.gather();
        let merges = family(&families, "topo_category_merges_total");
        assert_eq!(merges.get_metric().len(), 2);
    }

    #[test]
    fn rollbacks_are_split_by_result() {
        let metrics = PrometheusMetrics::new().unwrap();

        metrics.record_package_rollback(true);
        metrics.record_package_rollback(false);
        metrics.record_package_rollback(false);

        let text = metrics.encode_text().unwrap();
        assert!(text.contains(r#"topo_package_rollbacks_total{result="removed"} 1"#));
        assert!(text.contains(r#"topo_package_rollbacks_total{result="failed"} 2"#));
    }

    #[test]
    fn assembler_reports_every_category() {
        let metrics = PrometheusMetrics::new().unwrap();
        let assembler = DescriptorAssembler::new(Arc::new(ExecutorBaseline::default()))
            .with_metrics(Arc::new(metrics.clone()));

        assembler
            .assemble(&TopologySpec::new("word-count", "executor:1.0"), None)
            .unwrap();

        let families = metrics.gather();
        let builds = family(&families, "topo_descriptor_builds_total");
        assert_eq!(builds.get_metric().len(), 1);

        let text = metrics.encode_text().unwrap();
        for row in policy_table() {
            assert!(
                text.contains(&format!("category=\"{}\"", row.slug)),
                "no merge recorded for {}",
                row.slug
            );
        }
    }

    #[test]
    fn registering_twice_in_one_registry_fails() {
        let registry = Arc::new(Registry::new());
        PrometheusMetrics::new_with_registry(registry.clone()).unwrap();
        assert!(PrometheusMetrics::new_with_registry(registry).is_err());
    }
}
