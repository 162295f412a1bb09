use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use tracing::{debug, info};

use topo_core::assembler::DescriptorAssembler;
use topo_core::baseline::ExecutorBaseline;
use topo_core::category::policy_table;
use topo_core::deploy::{Deployer, PackageLocation, StaticUploader};
use topo_observe::init_logger;
use topo_prometheus::PrometheusMetrics;

mod config;
mod submitter;

use config::DeployConfig;
use submitter::StdoutSubmitter;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // 1) config
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: topo-deployd <config.yaml>")?;
    let cfg = DeployConfig::load(&path)?;

    // 2) logger
    init_logger(&cfg.logger)?;
    info!(config = %path.display(), "logger initialized");
    for row in policy_table() {
        debug!(
            category = row.slug,
            label = row.label,
            precedence = ?row.precedence,
            "merge policy"
        );
    }

    // 3) inputs
    let topology = cfg.topology()?;
    let template = cfg.template()?;

    // 4) pipeline
    let metrics = PrometheusMetrics::new()?;
    let baseline = Arc::new(ExecutorBaseline::new(cfg.baseline.clone()));
    let sink = Arc::new(metrics.clone());
    let assembler = DescriptorAssembler::new(baseline).with_metrics(sink);
    let deployer = Deployer::new(
        assembler,
        Arc::new(StaticUploader::new(PackageLocation::new(cfg.package_uri.clone()))),
        Arc::new(StdoutSubmitter),
    );

    // 5) deploy
    let result = deployer.deploy(topology, template.as_ref()).await;

    if cfg.print_metrics {
        eprintln!("{}", metrics.encode_text()?);
    }

    let receipt = result?;
    info!(
        attempt = %receipt.attempt,
        package = %receipt.package,
        containers = receipt.descriptor.containers().len(),
        "dry run complete"
    );
    Ok(())
}
