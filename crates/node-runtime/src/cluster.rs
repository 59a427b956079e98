//! # Cluster Launcher
//!
//! Runs every node of a cluster in one process. Each node gets its own HTTP
//! server on `base_port + id`; all nodes share one readiness coordinator and
//! one HTTP broadcaster.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::future::join_all;
use tracing::{info, warn, Instrument};

use cf_consensus::{
    ClusterReadiness, ConsensusResult, NodeActor, NodeApi, NodeId, ReadinessGate,
    ReadinessSignal, SeededCoin, StateSnapshot,
};
use cf_node_api::{HttpBroadcaster, NodeServer, NodeServerHandle};
use cf_telemetry::node_span;

use crate::config::RuntimeConfig;

/// Poll interval while waiting for every node to come up
const READY_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// A running in-process cluster
pub struct Cluster {
    nodes: Vec<Arc<dyn NodeApi>>,
    servers: Vec<NodeServerHandle>,
    readiness: Arc<ClusterReadiness>,
}

impl Cluster {
    /// Bind and serve every node described by `config`
    pub async fn launch(config: &RuntimeConfig) -> Result<Self> {
        let spec = &config.cluster;
        let readiness = Arc::new(ClusterReadiness::new(spec.nodes));
        let broadcaster = Arc::new(
            HttpBroadcaster::new(config.api.clone()).context("failed to build HTTP client")?,
        );

        let mut nodes = Vec::with_capacity(spec.nodes);
        let mut servers = Vec::with_capacity(spec.nodes);

        for id in 0..spec.nodes {
            let identity = spec.identity(id)?;
            let initial_value = spec
                .initial_value(id)
                .with_context(|| format!("no initial value for node {id}"))?;
            let port = config.api.port_for(id)?;

            let mut actor = NodeActor::new(
                identity,
                initial_value,
                config.consensus.clone(),
                Arc::clone(&broadcaster),
                Arc::clone(&readiness),
            );
            if let Some(seed) = config.coin_seed {
                actor = actor.with_coin_source(Box::new(SeededCoin::new(
                    seed.wrapping_add(id as u64),
                )));
            }
            let node: Arc<dyn NodeApi> = Arc::new(actor);

            let server = NodeServer::bind(&config.api, Arc::clone(&node))
                .instrument(node_span!(node_id = id, port))
                .await
                .with_context(|| format!("failed to start node {id}"))?;

            info!(
                node_id = id,
                port,
                value = %initial_value,
                faulty = spec.faulty.contains(&id),
                "Node launched"
            );

            servers.push(server.spawn(Arc::clone(&readiness) as Arc<dyn ReadinessSignal>));
            nodes.push(node);
        }

        Ok(Self {
            nodes,
            servers,
            readiness,
        })
    }

    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Arc<dyn NodeApi>> {
        self.nodes.get(id)
    }

    pub fn is_ready(&self) -> bool {
        self.readiness.nodes_are_ready()
    }

    /// Wait until every node has signalled readiness
    pub async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        tokio::time::timeout(timeout, async {
            while !self.is_ready() {
                tokio::time::sleep(READY_POLL_INTERVAL).await;
            }
        })
        .await
        .with_context(|| {
            format!(
                "only {}/{} nodes ready after {:?}",
                self.readiness.ready_count(),
                self.size(),
                timeout
            )
        })
    }

    /// Start consensus on every node concurrently and collect the outcomes
    pub async fn start_all(&self) -> Vec<(NodeId, ConsensusResult<StateSnapshot>)> {
        let runs = self.nodes.iter().enumerate().map(|(id, node)| async move {
            (id, node.start().await)
        });
        join_all(runs).await
    }

    pub fn states(&self) -> Vec<(NodeId, StateSnapshot)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(id, node)| (id, node.get_state()))
            .collect()
    }

    pub fn stop_all(&self) {
        for node in &self.nodes {
            node.stop();
        }
    }

    /// Gracefully shut down every node server
    pub async fn shutdown(self) -> Result<()> {
        info!(nodes = self.nodes.len(), "Shutting down cluster");
        let results = join_all(self.servers.into_iter().map(|server| server.shutdown())).await;
        for result in results {
            if let Err(e) = result {
                warn!(error = %e, "Node server did not shut down cleanly");
            }
        }
        Ok(())
    }
}
