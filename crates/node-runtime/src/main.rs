//! # Coinflip Node Runtime
//!
//! Launches N consensus nodes in one process, node `i` listening on
//! `base_port + i`.
//!
//! ## Startup Sequence
//!
//! 1. Parse flags (`CF_*` environment fallbacks) and install logging
//! 2. Bind every node; each signals readiness once listening
//! 3. Wait until the whole cluster is ready
//! 4. With `--start`: run consensus on every node, print the states, exit.
//!    Otherwise serve until Ctrl+C.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use cf_telemetry::{init_telemetry, TelemetryConfig};
use node_runtime::{Cli, Cluster, RuntimeConfig};

/// Upper bound on cluster startup
const READY_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _telemetry =
        init_telemetry(TelemetryConfig::from_env()).context("failed to initialize telemetry")?;

    let config = RuntimeConfig::try_from(cli)?;

    info!("===========================================");
    info!("  Coinflip Node Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!(
        nodes = config.cluster.nodes,
        fault_tolerance = config.cluster.fault_tolerance,
        faulty = ?config.cluster.faulty,
        base_port = config.api.base_port,
        "  Randomized binary consensus"
    );
    info!("===========================================");

    let cluster = Cluster::launch(&config).await?;
    cluster.wait_ready(READY_TIMEOUT).await?;
    info!(nodes = cluster.size(), "Cluster ready");

    if config.start {
        for (id, outcome) in cluster.start_all().await {
            match outcome {
                Ok(state) => println!("node {id}: {}", serde_json::to_string(&state)?),
                Err(e) => warn!(node_id = id, error = %e, "Consensus run failed"),
            }
        }
        return cluster.shutdown().await;
    }

    info!("Serving; press Ctrl+C to stop");
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    info!("Received shutdown signal");
    cluster.stop_all();
    cluster.shutdown().await
}
