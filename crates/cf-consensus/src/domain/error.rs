//! Error types for the consensus node

use super::NodeId;

/// Consensus error types
#[derive(Debug, thiserror::Error)]
pub enum ConsensusError {
    #[error("Nodes are not ready yet")]
    NotReady,

    #[error("A consensus run is already in progress on node {0}")]
    RunInProgress(NodeId),

    #[error("Invalid binary value: {0} (expected 0 or 1)")]
    InvalidValue(u8),

    #[error("Invalid node identity: {reason}")]
    InvalidIdentity { reason: String },

    #[error("Invalid consensus configuration: {reason}")]
    InvalidConfig { reason: String },
}

/// Result type for consensus operations
pub type ConsensusResult<T> = Result<T, ConsensusError>;

/// A single failed send during a broadcast.
///
/// Never propagated out of a run: the engine logs it and moves on.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DeliveryFailure {
    #[error("Peer {peer} unreachable: {reason}")]
    Unreachable { peer: NodeId, reason: String },

    #[error("Peer {peer} rejected message with status {status}")]
    Rejected { peer: NodeId, status: u16 },

    #[error("Timed out delivering to peer {peer}")]
    Timeout { peer: NodeId },
}

impl DeliveryFailure {
    /// The peer the failed send was addressed to
    pub fn peer(&self) -> NodeId {
        match self {
            DeliveryFailure::Unreachable { peer, .. }
            | DeliveryFailure::Rejected { peer, .. }
            | DeliveryFailure::Timeout { peer } => *peer,
        }
    }
}
