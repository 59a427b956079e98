//! Consensus outcome as seen from outside the node

use super::Value;
use serde::{Deserialize, Serialize};

/// Round counter
pub type Round = u32;

/// Latest known outcome of a node's consensus run.
///
/// INVARIANT: `decided == true` implies `x` and `k` are both present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusState {
    pub decided: bool,
    pub x: Option<Value>,
    pub k: Option<Round>,
}

impl ConsensusState {
    /// State before any run
    pub fn idle() -> Self {
        Self {
            decided: false,
            x: None,
            k: Some(0),
        }
    }

    /// State at the beginning of a run
    pub fn started(initial_value: Value) -> Self {
        Self::undecided(initial_value, 0)
    }

    pub fn decided(value: Value, round: Round) -> Self {
        Self {
            decided: true,
            x: Some(value),
            k: Some(round),
        }
    }

    pub fn undecided(value: Value, round: Round) -> Self {
        Self {
            decided: false,
            x: Some(value),
            k: Some(round),
        }
    }
}

impl Default for ConsensusState {
    fn default() -> Self {
        Self::idle()
    }
}

/// Externally observable state.
///
/// Identical to [`ConsensusState`] for live nodes; faulty nodes always report
/// [`StateSnapshot::UNDEFINED`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub decided: Option<bool>,
    pub x: Option<Value>,
    pub k: Option<Round>,
}

impl StateSnapshot {
    pub const UNDEFINED: StateSnapshot = StateSnapshot {
        decided: None,
        x: None,
        k: None,
    };

    pub fn is_undefined(&self) -> bool {
        *self == Self::UNDEFINED
    }
}

impl From<ConsensusState> for StateSnapshot {
    fn from(state: ConsensusState) -> Self {
        Self {
            decided: Some(state.decided),
            x: state.x,
            k: state.k,
        }
    }
}
