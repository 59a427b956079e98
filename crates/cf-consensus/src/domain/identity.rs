//! Node identity and cluster shape

use super::{ConsensusError, ConsensusResult, Round};
use serde::Serialize;
use tracing::warn;

/// Node identifier, an index in `0..N`
pub type NodeId = usize;

/// Immutable identity of one node in an N-node cluster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NodeIdentity {
    pub id: NodeId,
    /// Cluster size (N)
    pub cluster_size: usize,
    /// Fault tolerance bound (F)
    pub fault_tolerance: usize,
    pub is_faulty: bool,
    max_rounds: Round,
}

impl NodeIdentity {
    /// Create an identity, rejecting ids outside `0..N` and an F whose round
    /// budget does not fit in a [`Round`].
    ///
    /// `F >= N/2` is tolerated but logged: the protocol gives no agreement
    /// guarantee in that regime.
    pub fn new(
        id: NodeId,
        cluster_size: usize,
        fault_tolerance: usize,
        is_faulty: bool,
    ) -> ConsensusResult<Self> {
        if cluster_size == 0 {
            return Err(ConsensusError::InvalidIdentity {
                reason: "cluster size must be at least 1".into(),
            });
        }
        if id >= cluster_size {
            return Err(ConsensusError::InvalidIdentity {
                reason: format!("node id {id} outside cluster of {cluster_size}"),
            });
        }
        let max_rounds = fault_tolerance
            .checked_add(1)
            .and_then(|rounds| Round::try_from(rounds).ok())
            .ok_or_else(|| ConsensusError::InvalidIdentity {
                reason: format!("fault tolerance {fault_tolerance} exceeds the round limit"),
            })?;
        if fault_tolerance
            .checked_mul(2)
            .map_or(true, |double| double >= cluster_size)
        {
            warn!(
                node_id = id,
                n = cluster_size,
                f = fault_tolerance,
                "Fault tolerance bound is not below N/2"
            );
        }

        Ok(Self {
            id,
            cluster_size,
            fault_tolerance,
            is_faulty,
            max_rounds,
        })
    }

    /// Every other node in the cluster
    pub fn peers(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.cluster_size).filter(move |&peer| peer != self.id)
    }

    /// Round budget for a single run (F+1)
    pub fn max_rounds(&self) -> Round {
        self.max_rounds
    }

    /// Whether `count` votes form a strict majority of N
    pub fn is_majority(&self, count: usize) -> bool {
        count * 2 > self.cluster_size
    }
}
