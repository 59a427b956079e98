//! Node API error types.
//!
//! `NodeApiError` covers server lifecycle failures; `ApiError` is what a
//! handler turns into a plain-text HTTP response.

use super::config::ConfigError;
use super::types::NOT_READY;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cf_consensus::ConsensusError;
use std::net::SocketAddr;

/// Server lifecycle errors
#[derive(Debug, thiserror::Error)]
pub enum NodeApiError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Server task failed: {0}")]
    Task(String),
}

/// Request-level failure returned by a handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<ConsensusError> for ApiError {
    fn from(err: ConsensusError) -> Self {
        match err {
            ConsensusError::NotReady => Self::new(StatusCode::BAD_REQUEST, NOT_READY),
            ConsensusError::RunInProgress(_) => Self::new(StatusCode::CONFLICT, err.to_string()),
            other => Self::internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}
