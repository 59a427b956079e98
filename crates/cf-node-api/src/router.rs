//! Route table and handlers for one node.
//!
//! | Route | Method | Response |
//! |-------|--------|----------|
//! | `/status` | GET | `200 live` / `500 faulty` |
//! | `/message` | POST | `200 message received` |
//! | `/start` | GET | `200` state JSON, `400` not ready, `409` run in progress |
//! | `/stop` | GET | `200 Consensus stopped.` |
//! | `/getState` | GET | `200` state JSON |

use crate::domain::error::ApiError;
use crate::domain::types::{MessageBody, FAULTY, LIVE, MESSAGE_RECEIVED, STOPPED};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use cf_consensus::{NodeApi, NodeStatus, StateSnapshot};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub node: Arc<dyn NodeApi>,
}

/// Build the HTTP router for `node`
pub fn build_router(node: Arc<dyn NodeApi>) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/message", post(message))
        .route("/start", get(start))
        .route("/stop", get(stop))
        .route("/getState", get(get_state))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { node })
}

async fn status(State(state): State<AppState>) -> impl IntoResponse {
    match state.node.status() {
        NodeStatus::Live => (StatusCode::OK, LIVE),
        NodeStatus::Faulty => (StatusCode::INTERNAL_SERVER_ERROR, FAULTY),
    }
}

async fn message(
    State(state): State<AppState>,
    Json(body): Json<MessageBody>,
) -> impl IntoResponse {
    state.node.deliver(body.into());
    (StatusCode::OK, MESSAGE_RECEIVED)
}

/// Runs on its own task so a dropped connection cannot cancel a run midway.
async fn start(State(state): State<AppState>) -> Result<Json<StateSnapshot>, ApiError> {
    let node = Arc::clone(&state.node);
    let node_id = node.identity().id;

    match tokio::spawn(async move { node.start().await }).await {
        Ok(outcome) => Ok(Json(outcome?)),
        Err(join_error) => {
            error!(node_id, error = %join_error, "Consensus task failed");
            Err(ApiError::internal("consensus task failed"))
        }
    }
}

async fn stop(State(state): State<AppState>) -> impl IntoResponse {
    state.node.stop();
    (StatusCode::OK, STOPPED)
}

async fn get_state(State(state): State<AppState>) -> Json<StateSnapshot> {
    Json(state.node.get_state())
}
