//! # cf-consensus
//!
//! Randomized binary consensus for a single node.
//!
//! ## Architecture
//!
//! Each node proposes 0 or 1 and runs at most F+1 rounds:
//!
//! ```text
//!   ┌─────────────┐    ┌────────────────┐    ┌──────────┐
//!   │ BROADCASTING│ →  │ COLLECTING     │ →  │ TALLYING │
//!   │ (all peers) │    │ (fixed window) │    │          │
//!   └─────────────┘    └────────────────┘    └────┬─────┘
//!          ↑                                      │
//!          │        count > N/2 ──→ DECIDED ←─────┤
//!          │                                      │
//!          └──── PERTURBING (coin on odd k) ←─────┘
//! ```
//!
//! Votes are counted as delivered: no round tags, no per-sender deduplication
//! and no authentication. A faulty node drops every inbound message and
//! reports the undefined triple for its state.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cf_consensus::{ClusterReadiness, ConsensusConfig, InMemoryNetwork, NodeActor, NodeApi};
//!
//! let network = Arc::new(InMemoryNetwork::new());
//! let readiness = Arc::new(ClusterReadiness::all_ready(3));
//! let identity = NodeIdentity::new(0, 3, 0, false)?;
//! let node = NodeActor::new(identity, Value::One, ConsensusConfig::default(), network.clone(), readiness);
//! network.attach(0, node.inbox());
//!
//! let state = node.start().await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod metrics;
pub mod node;
pub mod ports;
pub mod service;

// Re-export main types
pub use adapters::{ClusterReadiness, InMemoryNetwork, SeededCoin};
pub use domain::{
    ConsensusConfig, ConsensusError, ConsensusResult, ConsensusState, Delivery, DeliveryFailure,
    Message, MessageInbox, NodeId, NodeIdentity, Round, StateSnapshot, Tally, Value,
};
pub use node::NodeActor;
pub use ports::{
    BroadcastReport, CoinSource, NodeApi, NodeStatus, PeerBroadcaster, RandomCoin,
    ReadinessGate, ReadinessSignal,
};
pub use service::ConsensusEngine;
