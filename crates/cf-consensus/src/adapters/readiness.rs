//! Cluster readiness tracking

use crate::domain::NodeId;
use crate::ports::{ReadinessGate, ReadinessSignal};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Readiness flags for an N-node cluster, flipped as each node starts listening
pub struct ClusterReadiness {
    ready: Vec<AtomicBool>,
}

impl ClusterReadiness {
    /// No node ready yet
    pub fn new(cluster_size: usize) -> Self {
        Self {
            ready: (0..cluster_size).map(|_| AtomicBool::new(false)).collect(),
        }
    }

    /// Every node already ready
    pub fn all_ready(cluster_size: usize) -> Self {
        Self {
            ready: (0..cluster_size).map(|_| AtomicBool::new(true)).collect(),
        }
    }

    pub fn ready_count(&self) -> usize {
        self.ready
            .iter()
            .filter(|flag| flag.load(Ordering::SeqCst))
            .count()
    }
}

impl ReadinessGate for ClusterReadiness {
    fn nodes_are_ready(&self) -> bool {
        self.ready.iter().all(|flag| flag.load(Ordering::SeqCst))
    }
}

impl ReadinessSignal for ClusterReadiness {
    fn set_node_ready(&self, node: NodeId) {
        match self.ready.get(node) {
            Some(flag) => {
                flag.store(true, Ordering::SeqCst);
                debug!(node_id = node, ready = self.ready_count(), "Node ready");
                if self.nodes_are_ready() {
                    info!(nodes = self.ready.len(), "All nodes ready");
                }
            }
            None => debug!(node_id = node, "Ignoring readiness for unknown node"),
        }
    }
}
