//! Proposal messages exchanged between nodes

use super::{NodeId, Value};
use serde::{Deserialize, Serialize};

/// A peer's proposal for the round it was sent in.
///
/// Messages carry no round tag and no authentication: the receiving node
/// counts whatever lands in its inbox during the collect window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: NodeId,
    pub value: Value,
}

impl Message {
    pub fn new(sender: NodeId, value: Value) -> Self {
        Self { sender, value }
    }
}
