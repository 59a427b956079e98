//! Driven ports (Outbound dependencies)

use crate::domain::{DeliveryFailure, Message, NodeId, Value};
use async_trait::async_trait;
use futures::future::join_all;
use tracing::warn;

/// Result of fanning one proposal out to every peer
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: Vec<NodeId>,
    pub failed: Vec<NodeId>,
}

/// Transport used to push this node's proposal to its peers.
///
/// Fire-and-forget: no retries, and one failed peer never affects the others.
#[async_trait]
pub trait PeerBroadcaster: Send + Sync {
    /// Deliver one message to one peer
    async fn send_to(&self, peer: NodeId, message: Message) -> Result<(), DeliveryFailure>;

    /// Send `message` to every peer concurrently, logging each failure
    async fn broadcast(&self, message: Message, peers: Vec<NodeId>) -> BroadcastReport {
        let sends = peers.into_iter().map(|peer| async move {
            let outcome = self.send_to(peer, message).await;
            (peer, outcome)
        });

        let mut report = BroadcastReport::default();
        for (peer, outcome) in join_all(sends).await {
            match outcome {
                Ok(()) => report.delivered.push(peer),
                Err(failure) => {
                    warn!(
                        sender = message.sender,
                        peer,
                        error = %failure,
                        "Failed to deliver proposal"
                    );
                    report.failed.push(peer);
                }
            }
        }
        report
    }
}

/// Cluster readiness predicate, owned by the external coordinator.
pub trait ReadinessGate: Send + Sync {
    /// True once every node in the cluster is accepting requests
    fn nodes_are_ready(&self) -> bool;
}

/// Hook a node calls once it is listening.
pub trait ReadinessSignal: Send + Sync {
    fn set_node_ready(&self, node: NodeId);
}

/// Source of the unbiased coin used on odd rounds without a majority
pub trait CoinSource: Send + Sync {
    fn flip(&self) -> Value;
}

/// Default coin backed by the thread-local RNG
pub struct RandomCoin;

impl CoinSource for RandomCoin {
    fn flip(&self) -> Value {
        Value::from_bool(rand::random::<bool>())
    }
}
