//! Node actor: identity, initial value and the single engine instance

use crate::domain::{
    ConsensusConfig, ConsensusResult, Delivery, Message, MessageInbox, NodeIdentity,
    StateSnapshot, Value,
};
use crate::ports::{CoinSource, NodeApi, NodeStatus, PeerBroadcaster, ReadinessGate};
use crate::service::ConsensusEngine;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// One addressable consensus participant.
///
/// All per-node state lives here, so any number of nodes can share a process.
pub struct NodeActor<B, G>
where
    B: PeerBroadcaster,
    G: ReadinessGate,
{
    initial_value: Value,
    engine: ConsensusEngine<B, G>,
}

impl<B, G> NodeActor<B, G>
where
    B: PeerBroadcaster,
    G: ReadinessGate,
{
    pub fn new(
        identity: NodeIdentity,
        initial_value: Value,
        config: ConsensusConfig,
        broadcaster: Arc<B>,
        readiness: Arc<G>,
    ) -> Self {
        Self {
            initial_value,
            engine: ConsensusEngine::new(identity, config, broadcaster, readiness),
        }
    }

    pub fn with_coin_source(mut self, coin: Box<dyn CoinSource>) -> Self {
        self.engine = self.engine.with_coin_source(coin);
        self
    }

    pub fn initial_value(&self) -> Value {
        self.initial_value
    }

    pub fn inbox(&self) -> Arc<MessageInbox> {
        self.engine.inbox()
    }

    pub fn engine(&self) -> &ConsensusEngine<B, G> {
        &self.engine
    }
}

#[async_trait]
impl<B, G> NodeApi for NodeActor<B, G>
where
    B: PeerBroadcaster + 'static,
    G: ReadinessGate + 'static,
{
    fn identity(&self) -> &NodeIdentity {
        self.engine.identity()
    }

    fn status(&self) -> NodeStatus {
        if self.identity().is_faulty {
            NodeStatus::Faulty
        } else {
            NodeStatus::Live
        }
    }

    fn deliver(&self, message: Message) -> Delivery {
        let delivery = self.engine.inbox().deliver(message);
        debug!(
            node_id = self.identity().id,
            sender = message.sender,
            value = %message.value,
            ?delivery,
            "Message received"
        );
        delivery
    }

    async fn start(&self) -> ConsensusResult<StateSnapshot> {
        if self.identity().is_faulty {
            return Ok(StateSnapshot::UNDEFINED);
        }
        let state = self.engine.run(self.initial_value).await?;
        Ok(state.into())
    }

    fn stop(&self) {
        info!(node_id = self.identity().id, "Stop requested");
        self.engine.request_stop();
    }

    fn get_state(&self) -> StateSnapshot {
        if self.identity().is_faulty {
            StateSnapshot::UNDEFINED
        } else {
            self.engine.state().into()
        }
    }
}
