//! Engine configuration

use super::{ConsensusError, ConsensusResult};
use std::time::Duration;

/// Default length of the collect window (milliseconds)
pub const DEFAULT_COLLECT_WINDOW_MS: u64 = 100;

/// Configuration for the consensus engine
#[derive(Clone, Debug)]
pub struct ConsensusConfig {
    /// How long each round waits for peer proposals before tallying
    pub collect_window: Duration,
}

impl ConsensusConfig {
    pub fn with_collect_window(collect_window: Duration) -> Self {
        Self { collect_window }
    }

    pub fn validate(&self) -> ConsensusResult<()> {
        if self.collect_window.is_zero() {
            return Err(ConsensusError::InvalidConfig {
                reason: "collect window cannot be 0".into(),
            });
        }
        Ok(())
    }
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            collect_window: Duration::from_millis(DEFAULT_COLLECT_WINDOW_MS),
        }
    }
}
