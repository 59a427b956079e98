//! Driving ports (Inbound API)

use crate::domain::{ConsensusResult, Delivery, Message, NodeIdentity, StateSnapshot};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Liveness marker reported by a node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Live,
    Faulty,
}

/// The network-addressable surface of one node.
#[async_trait]
pub trait NodeApi: Send + Sync {
    fn identity(&self) -> &NodeIdentity;

    fn status(&self) -> NodeStatus;

    /// Accept a peer's proposal. Faulty nodes acknowledge and drop it.
    fn deliver(&self, message: Message) -> Delivery;

    /// Run consensus from the node's configured initial value
    ///
    /// # Errors
    /// - `NotReady` when the cluster readiness predicate does not hold
    /// - `RunInProgress` when another run is active on this node
    async fn start(&self) -> ConsensusResult<StateSnapshot>;

    /// Request that the active run stop at its next round boundary
    fn stop(&self);

    fn get_state(&self) -> StateSnapshot;
}
