//! # Coinflip Telemetry
//!
//! Structured logging for consensus nodes, built on `tracing`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cf_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CF_SERVICE_NAME` | `coinflip` | Service name on the root span |
//! | `CF_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `CF_LOG_JSON` | `false` | Emit JSON lines |
//! | `CF_LOG_TARGET` | `true` | Include event targets |

mod config;
mod logging;

pub use config::TelemetryConfig;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install logging for the process.
///
/// Returns a guard that must be held for the lifetime of the application; it
/// logs shutdown when dropped.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    logging::init_logging(&config)?;

    tracing::info!(
        service = %config.service_name,
        json = config.json_logs,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    service_name: String,
}

impl TelemetryGuard {
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry...");
    }
}

/// Span scoping everything a single node does.
///
/// # Example
///
/// ```rust,ignore
/// let span = cf_telemetry::node_span!(node_id = 2, port = 3002);
/// async { /* ... */ }.instrument(span).await;
/// ```
#[macro_export]
macro_rules! node_span {
    ($($field:tt)*) => {
        tracing::info_span!("node", $($field)*)
    };
}
