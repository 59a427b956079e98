//! In-memory network adapter
//!
//! Implements the PeerBroadcaster port by delivering into the inboxes of
//! nodes living in the same process. Every send yields to the scheduler once
//! before it lands, so nodes started together all open their round before
//! any proposal arrives.

use crate::domain::{DeliveryFailure, Message, MessageInbox, NodeId};
use crate::ports::PeerBroadcaster;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Shared in-process network for a cluster of nodes
pub struct InMemoryNetwork {
    inboxes: RwLock<HashMap<NodeId, Arc<MessageInbox>>>,
    unreachable: RwLock<HashSet<NodeId>>,
}

impl InMemoryNetwork {
    pub fn new() -> Self {
        Self {
            inboxes: RwLock::new(HashMap::new()),
            unreachable: RwLock::new(HashSet::new()),
        }
    }

    /// Register the inbox that messages for `node` go to
    pub fn attach(&self, node: NodeId, inbox: Arc<MessageInbox>) {
        self.inboxes.write().insert(node, inbox);
    }

    /// Make every send to `node` fail until [`Self::reconnect`]
    pub fn disconnect(&self, node: NodeId) {
        self.unreachable.write().insert(node);
    }

    pub fn reconnect(&self, node: NodeId) {
        self.unreachable.write().remove(&node);
    }

    pub fn node_count(&self) -> usize {
        self.inboxes.read().len()
    }
}

impl Default for InMemoryNetwork {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PeerBroadcaster for InMemoryNetwork {
    async fn send_to(&self, peer: NodeId, message: Message) -> Result<(), DeliveryFailure> {
        tokio::task::yield_now().await;

        if self.unreachable.read().contains(&peer) {
            return Err(DeliveryFailure::Unreachable {
                peer,
                reason: "peer disconnected".into(),
            });
        }

        let inbox = self.inboxes.read().get(&peer).cloned();
        match inbox {
            Some(inbox) => {
                inbox.deliver(message);
                Ok(())
            }
            None => Err(DeliveryFailure::Unreachable {
                peer,
                reason: "no such peer".into(),
            }),
        }
    }
}
