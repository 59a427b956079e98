//! # Runtime Configuration
//!
//! Command-line flags (with `CF_*` environment fallbacks) and the validated
//! cluster layout derived from them.

use std::collections::BTreeSet;
use std::time::Duration;

use anyhow::{bail, ensure, Context, Result};
use clap::Parser;
use tracing::warn;

use cf_consensus::domain::DEFAULT_COLLECT_WINDOW_MS;
use cf_consensus::{ConsensusConfig, ConsensusResult, NodeId, NodeIdentity, Value};
use cf_node_api::{NodeApiConfig, DEFAULT_BASE_PORT};

/// Launch a cluster of randomized binary-consensus nodes
#[derive(Parser, Debug, Clone)]
#[command(name = "node-runtime")]
#[command(about = "Launch a cluster of randomized binary-consensus nodes")]
pub struct Cli {
    /// Number of nodes in the cluster (N)
    #[arg(short, long, env = "CF_NODES", default_value_t = 3)]
    pub nodes: usize,

    /// Fault tolerance F; every node runs at most F + 1 rounds
    #[arg(short, long, env = "CF_FAULTY_COUNT", default_value_t = 0)]
    pub faulty_count: usize,

    /// Ids of the faulty nodes, comma separated
    #[arg(long, env = "CF_FAULTY", value_delimiter = ',')]
    pub faulty: Vec<NodeId>,

    /// Initial values, comma separated: one per node, or a single value for all
    #[arg(long, env = "CF_VALUES", value_delimiter = ',', value_parser = parse_value)]
    pub values: Vec<Value>,

    /// Port of node 0; node i listens on base-port + i
    #[arg(long, env = "CF_BASE_PORT", default_value_t = DEFAULT_BASE_PORT)]
    pub base_port: u16,

    /// Collect window per round, in milliseconds
    #[arg(long, env = "CF_COLLECT_WINDOW_MS", default_value_t = DEFAULT_COLLECT_WINDOW_MS)]
    pub collect_window_ms: u64,

    /// Start consensus on every node once the cluster is ready, print the states and exit
    #[arg(long, env = "CF_START")]
    pub start: bool,

    /// Seed for reproducible coin flips (node i uses seed + i)
    #[arg(long, env = "CF_COIN_SEED")]
    pub coin_seed: Option<u64>,
}

fn parse_value(raw: &str) -> Result<Value, String> {
    let bit: u8 = raw
        .trim()
        .parse()
        .map_err(|_| format!("expected 0 or 1, got {raw:?}"))?;
    Value::try_from(bit).map_err(|e| e.to_string())
}

/// Who is in the cluster and what each node proposes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterSpec {
    pub nodes: usize,
    pub fault_tolerance: usize,
    pub faulty: BTreeSet<NodeId>,
    pub initial_values: Vec<Value>,
}

impl ClusterSpec {
    /// Resolve the per-node initial values.
    ///
    /// No values alternates 0, 1, 0, ...; a single value applies to every node.
    pub fn new(
        nodes: usize,
        fault_tolerance: usize,
        faulty: impl IntoIterator<Item = NodeId>,
        values: Vec<Value>,
    ) -> Result<Self> {
        ensure!(nodes > 0, "cluster needs at least one node");

        let faulty: BTreeSet<NodeId> = faulty.into_iter().collect();
        if let Some(&id) = faulty.iter().find(|&&id| id >= nodes) {
            bail!("faulty node {id} is outside a cluster of {nodes}");
        }
        if faulty.len() > fault_tolerance {
            warn!(
                faulty = faulty.len(),
                fault_tolerance, "More faulty nodes than the configured fault tolerance"
            );
        }

        NodeIdentity::new(0, nodes, fault_tolerance, false)
            .context("invalid fault tolerance")?;

        let initial_values = match values.len() {
            0 => (0..nodes).map(|id| Value::from_bool(id % 2 == 1)).collect(),
            1 => vec![values[0]; nodes],
            n if n == nodes => values,
            n => bail!("got {n} initial values for {nodes} nodes"),
        };

        Ok(Self {
            nodes,
            fault_tolerance,
            faulty,
            initial_values,
        })
    }

    pub fn identity(&self, id: NodeId) -> ConsensusResult<NodeIdentity> {
        NodeIdentity::new(id, self.nodes, self.fault_tolerance, self.faulty.contains(&id))
    }

    pub fn initial_value(&self, id: NodeId) -> Option<Value> {
        self.initial_values.get(id).copied()
    }
}

/// Fully validated runtime configuration
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub cluster: ClusterSpec,
    pub consensus: ConsensusConfig,
    pub api: NodeApiConfig,
    pub start: bool,
    pub coin_seed: Option<u64>,
}

impl TryFrom<Cli> for RuntimeConfig {
    type Error = anyhow::Error;

    fn try_from(cli: Cli) -> Result<Self> {
        let cluster = ClusterSpec::new(cli.nodes, cli.faulty_count, cli.faulty, cli.values)
            .context("invalid cluster layout")?;

        let consensus =
            ConsensusConfig::with_collect_window(Duration::from_millis(cli.collect_window_ms));
        consensus.validate().context("invalid consensus configuration")?;

        let api = NodeApiConfig::default().with_base_port(cli.base_port);
        api.validate(cluster.nodes)
            .context("invalid node API configuration")?;

        Ok(Self {
            cluster,
            consensus,
            api,
            start: cli.start,
            coin_seed: cli.coin_seed,
        })
    }
}
