//! Domain layer for the node HTTP surface

pub mod config;
pub mod error;
pub mod types;

pub use config::{ConfigError, NodeApiConfig, DEFAULT_BASE_PORT};
pub use error::{ApiError, NodeApiError};
pub use types::MessageBody;
