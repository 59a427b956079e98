//! # Consensus Metrics
//!
//! Prometheus metrics for monitoring consensus runs.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! cf-consensus = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `consensus_rounds_total` - Counter of rounds executed
//! - `consensus_decisions_total` - Counter of runs that reached a decision
//! - `consensus_coin_flips_total` - Counter of estimate perturbations
//! - `consensus_delivery_failures_total` - Counter of failed peer sends

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, IntCounter};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total rounds executed across all runs
    pub static ref ROUNDS_EXECUTED: IntCounter = register_int_counter!(
        "consensus_rounds_total",
        "Total number of consensus rounds executed"
    )
    .expect("Failed to create ROUNDS_EXECUTED metric");

    /// Total runs that decided a value
    pub static ref DECISIONS: IntCounter = register_int_counter!(
        "consensus_decisions_total",
        "Total number of runs that reached a decision"
    )
    .expect("Failed to create DECISIONS metric");

    /// Total coin flips on odd rounds
    pub static ref COIN_FLIPS: IntCounter = register_int_counter!(
        "consensus_coin_flips_total",
        "Total number of randomized estimate perturbations"
    )
    .expect("Failed to create COIN_FLIPS metric");

    /// Total peer sends that failed during broadcast
    pub static ref DELIVERY_FAILURES: IntCounter = register_int_counter!(
        "consensus_delivery_failures_total",
        "Total number of failed proposal deliveries"
    )
    .expect("Failed to create DELIVERY_FAILURES metric");
}

#[cfg(feature = "metrics")]
pub fn record_round() {
    ROUNDS_EXECUTED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_decision() {
    DECISIONS.inc();
}

#[cfg(feature = "metrics")]
pub fn record_coin_flip() {
    COIN_FLIPS.inc();
}

#[cfg(feature = "metrics")]
pub fn record_delivery_failures(count: usize) {
    DELIVERY_FAILURES.inc_by(count as u64);
}

// No-op implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub fn record_round() {}

#[cfg(not(feature = "metrics"))]
pub fn record_decision() {}

#[cfg(not(feature = "metrics"))]
pub fn record_coin_flip() {}

#[cfg(not(feature = "metrics"))]
pub fn record_delivery_failures(_count: usize) {}
