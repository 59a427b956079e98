//! Per-round working state

use super::{Message, Round, Value};

/// Created at the start of a run and advanced once per round.
#[derive(Clone, Debug)]
pub struct RoundContext {
    pub k: Round,
    pub current_value: Value,
    /// Messages drained for the round being tallied
    pub received: Vec<Message>,
}

impl RoundContext {
    pub fn new(initial_value: Value) -> Self {
        Self {
            k: 0,
            current_value: initial_value,
            received: Vec::new(),
        }
    }

    /// Perturbation only happens on odd rounds
    pub fn is_coin_round(&self) -> bool {
        self.k % 2 == 1
    }

    /// Move to the next round, discarding this round's messages
    pub fn advance(&mut self) {
        self.k += 1;
        self.received.clear();
    }
}
