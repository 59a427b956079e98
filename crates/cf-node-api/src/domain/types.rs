//! Wire types and fixed response bodies.

use cf_consensus::{Message, NodeId, Value};
use serde::{Deserialize, Serialize};

/// Deliver acknowledgement
pub const MESSAGE_RECEIVED: &str = "message received";
/// Status body of a live node
pub const LIVE: &str = "live";
/// Status body of a faulty node
pub const FAULTY: &str = "faulty";
/// Stop acknowledgement
pub const STOPPED: &str = "Consensus stopped.";
/// Start rejection while the cluster is still coming up
pub const NOT_READY: &str = "Nodes are not ready yet.";

/// Body of `POST /message`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub sender: NodeId,
    pub message: Value,
}

impl From<MessageBody> for Message {
    fn from(body: MessageBody) -> Self {
        Message::new(body.sender, body.message)
    }
}

impl From<Message> for MessageBody {
    fn from(message: Message) -> Self {
        Self {
            sender: message.sender,
            message: message.value,
        }
    }
}
