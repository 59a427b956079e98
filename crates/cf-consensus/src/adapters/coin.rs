//! Reproducible coin

use crate::domain::Value;
use crate::ports::CoinSource;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Coin driven by a seeded RNG, for replayable runs
pub struct SeededCoin {
    rng: Mutex<StdRng>,
}

impl SeededCoin {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl CoinSource for SeededCoin {
    fn flip(&self) -> Value {
        Value::from_bool(self.rng.lock().gen_bool(0.5))
    }
}
