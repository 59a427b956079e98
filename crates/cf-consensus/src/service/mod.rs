//! Consensus Engine - round state machine
//!
//! # Round
//! `BROADCASTING → COLLECTING → TALLYING → {DECIDED | PERTURBING → BROADCASTING}`
//!
//! A run executes at most F+1 rounds. The collect window is the only
//! suspension point; deliveries from peers land in the shared inbox while the
//! engine sleeps.

use crate::domain::{
    ConsensusConfig, ConsensusError, ConsensusResult, ConsensusState, Message, MessageInbox,
    NodeIdentity, RoundContext, Tally, Value,
};
use crate::metrics;
use crate::ports::{CoinSource, PeerBroadcaster, RandomCoin, ReadinessGate};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};


/// Result of tallying one round
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RoundOutcome {
    Decided(Value),
    NoMajority,
}

/// Single-node consensus engine.
///
/// Owns the node's inbox and consensus state. `run` is single-flight: a second
/// concurrent call is rejected instead of racing the active run's resets.
pub struct ConsensusEngine<B, G>
where
    B: PeerBroadcaster,
    G: ReadinessGate,
{
    identity: NodeIdentity,
    config: ConsensusConfig,
    broadcaster: Arc<B>,
    readiness: Arc<G>,
    coin: Box<dyn CoinSource>,
    inbox: Arc<MessageInbox>,
    state: RwLock<ConsensusState>,
    run_lock: tokio::sync::Mutex<()>,
    stop_requested: AtomicBool,
}

impl<B, G> ConsensusEngine<B, G>
where
    B: PeerBroadcaster,
    G: ReadinessGate,
{
    /// Create an engine for `identity`
    pub fn new(
        identity: NodeIdentity,
        config: ConsensusConfig,
        broadcaster: Arc<B>,
        readiness: Arc<G>,
    ) -> Self {
        let inbox = Arc::new(MessageInbox::for_identity(&identity));
        Self {
            identity,
            config,
            broadcaster,
            readiness,
            coin: Box::new(RandomCoin),
            inbox,
            state: RwLock::new(ConsensusState::idle()),
            run_lock: tokio::sync::Mutex::new(()),
            stop_requested: AtomicBool::new(false),
        }
    }

    /// Set custom coin source (for testing or reproducible runs)
    pub fn with_coin_source(mut self, coin: Box<dyn CoinSource>) -> Self {
        self.coin = coin;
        self
    }

    pub fn identity(&self) -> &NodeIdentity {
        &self.identity
    }

    /// Inbox handle for the transport to deliver into
    pub fn inbox(&self) -> Arc<MessageInbox> {
        Arc::clone(&self.inbox)
    }

    /// Last fully-set consensus state
    pub fn state(&self) -> ConsensusState {
        *self.state.read()
    }

    pub fn is_running(&self) -> bool {
        self.run_lock.try_lock().is_err()
    }

    /// Ask the active run to stop at the top of its next round.
    ///
    /// The collect window in progress is not interrupted. A later `run` clears
    /// the request.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::SeqCst);
    }

    /// Run consensus from `initial_value`.
    ///
    /// Returns the final state, which stays visible through [`Self::state`]
    /// until the next run.
    pub async fn run(&self, initial_value: Value) -> ConsensusResult<ConsensusState> {
        let _running = self
            .run_lock
            .try_lock()
            .map_err(|_| ConsensusError::RunInProgress(self.identity.id))?;

        if !self.readiness.nodes_are_ready() {
            warn!(node_id = self.identity.id, "Start rejected: nodes are not ready");
            return Err(ConsensusError::NotReady);
        }

        let span = info_span!("consensus_run", node_id = self.identity.id);
        self.execute(initial_value).instrument(span).await
    }

    async fn execute(&self, initial_value: Value) -> ConsensusResult<ConsensusState> {
        self.inbox.clear();
        self.stop_requested.store(false, Ordering::SeqCst);
        self.publish(ConsensusState::started(initial_value));

        info!(
            value = %initial_value,
            max_rounds = self.identity.max_rounds(),
            "Starting consensus"
        );

        let mut round = RoundContext::new(initial_value);
        while round.k < self.identity.max_rounds() {
            if self.stop_requested.load(Ordering::SeqCst) {
                info!(round = round.k, "Stop requested, ending run");
                break;
            }

            if let RoundOutcome::Decided(value) = self.execute_round(&mut round).await {
                round.current_value = value;
                let decided = ConsensusState::decided(value, round.k);
                self.publish(decided);
                metrics::record_decision();
                info!(value = %value, round = round.k, "Consensus reached");
                return Ok(decided);
            }

            if round.is_coin_round() {
                round.current_value = self.coin.flip();
                metrics::record_coin_flip();
                debug!(round = round.k, value = %round.current_value, "Randomized estimate");
            }

            round.advance();
            self.publish(ConsensusState::undecided(round.current_value, round.k));
        }

        let outcome = ConsensusState::undecided(round.current_value, round.k);
        self.publish(outcome);
        info!(value = %round.current_value, round = round.k, "Run ended without decision");
        Ok(outcome)
    }

    /// Broadcast, wait out the collect window, then tally
    async fn execute_round(&self, round: &mut RoundContext) -> RoundOutcome {
        metrics::record_round();

        let stale = self.inbox.clear();
        if stale > 0 {
            debug!(round = round.k, dropped = stale, "Discarded late messages");
        }

        let proposal = Message::new(self.identity.id, round.current_value);
        debug!(round = round.k, value = %round.current_value, "Broadcasting proposal");
        let report = self
            .broadcaster
            .broadcast(proposal, self.identity.peers().collect())
            .await;
        if !report.failed.is_empty() {
            metrics::record_delivery_failures(report.failed.len());
        }

        tokio::time::sleep(self.config.collect_window).await;

        round.received = self.inbox.drain_all();
        let tally = Tally::from_round(round.current_value, &round.received);
        debug!(round = round.k, counts = %tally, "Tallied votes");

        match tally.leader() {
            Some((value, count)) if self.identity.is_majority(count) => {
                RoundOutcome::Decided(value)
            }
            _ => RoundOutcome::NoMajority,
        }
    }

    fn publish(&self, state: ConsensusState) {
        *self.state.write() = state;
    }
}
