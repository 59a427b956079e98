//! Binary proposal value

use super::ConsensusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A binary proposal. Serialized on the wire as the integer `0` or `1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Value {
    Zero,
    One,
}

impl Value {
    /// Both symbols, in wire order
    pub const ALL: [Value; 2] = [Value::Zero, Value::One];

    pub fn as_u8(self) -> u8 {
        match self {
            Value::Zero => 0,
            Value::One => 1,
        }
    }

    /// Map a fair coin outcome onto a value
    pub fn from_bool(bit: bool) -> Self {
        if bit {
            Value::One
        } else {
            Value::Zero
        }
    }
}

impl TryFrom<u8> for Value {
    type Error = ConsensusError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Value::Zero),
            1 => Ok(Value::One),
            other => Err(ConsensusError::InvalidValue(other)),
        }
    }
}

impl From<Value> for u8 {
    fn from(value: Value) -> Self {
        value.as_u8()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}
