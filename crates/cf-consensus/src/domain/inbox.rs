//! Per-node buffer of inbound proposals
//!
//! Deliveries arrive from the transport concurrently with the engine's round
//! loop. A single mutex orders every `deliver` against `drain_all`, so the
//! drain's cut point is the moment it takes the lock.

use super::{Message, NodeIdentity};
use parking_lot::Mutex;

/// Outcome of a delivery. Both variants are acknowledged to the sender.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    Accepted,
    /// The inbox belongs to a faulty node and drops everything
    Discarded,
}

/// Inbound proposals for the current round
pub struct MessageInbox {
    buffer: Mutex<Vec<Message>>,
    sealed: bool,
}

impl MessageInbox {
    /// An inbox that buffers deliveries
    pub fn new() -> Self {
        Self {
            buffer: Mutex::new(Vec::new()),
            sealed: false,
        }
    }

    /// An inbox that silently discards every delivery
    pub fn sealed() -> Self {
        Self {
            buffer: Mutex::new(Vec::new()),
            sealed: true,
        }
    }

    /// Faulty nodes never accumulate state from peers
    pub fn for_identity(identity: &NodeIdentity) -> Self {
        if identity.is_faulty {
            Self::sealed()
        } else {
            Self::new()
        }
    }

    pub fn deliver(&self, message: Message) -> Delivery {
        if self.sealed {
            return Delivery::Discarded;
        }
        self.buffer.lock().push(message);
        Delivery::Accepted
    }

    /// Take every buffered message, leaving the inbox empty
    pub fn drain_all(&self) -> Vec<Message> {
        std::mem::take(&mut *self.buffer.lock())
    }

    /// Drop buffered messages, returning how many were dropped
    pub fn clear(&self) -> usize {
        let mut buffer = self.buffer.lock();
        let dropped = buffer.len();
        buffer.clear();
        dropped
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }
}

impl Default for MessageInbox {
    fn default() -> Self {
        Self::new()
    }
}
