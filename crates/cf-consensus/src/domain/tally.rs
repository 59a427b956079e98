//! Vote tally and the majority rule

use super::{Message, Value};
use std::fmt;

/// Frequency count of one round's votes, indexed by value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    counts: [usize; 2],
}

impl Tally {
    /// Start a tally with the node's own estimate counted once
    pub fn new(own: Value) -> Self {
        let mut tally = Self::default();
        tally.record(own);
        tally
    }

    /// Own estimate plus every received message, duplicates included
    pub fn from_round(own: Value, messages: &[Message]) -> Self {
        let mut tally = Self::new(own);
        for message in messages {
            tally.record(message.value);
        }
        tally
    }

    pub fn record(&mut self, value: Value) {
        self.counts[value.as_u8() as usize] += 1;
    }

    pub fn count(&self, value: Value) -> usize {
        self.counts[value.as_u8() as usize]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Value with the strictly highest count.
    ///
    /// Ties go to the lower value, independent of delivery order. Duplicate
    /// votes can push a tie past N/2, so this decides real outcomes.
    pub fn leader(&self) -> Option<(Value, usize)> {
        let mut leader: Option<(Value, usize)> = None;
        for value in Value::ALL {
            let count = self.count(value);
            if count > 0 && leader.map_or(true, |(_, max)| count > max) {
                leader = Some((value, count));
            }
        }
        leader
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let seen = Value::ALL.into_iter().filter(|&value| self.count(value) > 0);
        for (i, value) in seen.enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}: {}", self.count(value))?;
        }
        write!(f, "}}")
    }
}
