//! Matchmaking queue handlers.

use super::{AppState, NicknameRequest, errors::ApiResult};
use crate::metrics;
use arena::entities::MatchId;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct QueueResponse {
    pub waiting: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub matches: Vec<MatchId>,
    pub still_waiting: usize,
}

pub async fn view_queue(State(state): State<AppState>) -> Json<QueueResponse> {
    Json(QueueResponse {
        waiting: state.registry.view_queue().await,
    })
}

/// Join the queue; joining twice is a no-op.
///
/// # Errors
///
/// - `403 Forbidden`: Player banned or inactive
/// - `404 Not Found`: Unknown nickname
pub async fn join_queue(
    State(state): State<AppState>,
    Json(request): Json<NicknameRequest>,
) -> ApiResult<StatusCode> {
    state.registry.join_queue(&request.nickname).await?;
    metrics::matchmaking_queue_length(state.registry.view_queue().await.len());
    Ok(StatusCode::NO_CONTENT)
}

pub async fn leave_queue(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
) -> ApiResult<StatusCode> {
    state.registry.leave_queue(&nickname).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_queue(State(state): State<AppState>) -> StatusCode {
    state.registry.clear_queue().await;
    metrics::matchmaking_queue_length(0);
    StatusCode::NO_CONTENT
}

/// Run one pairing pass over the queue.
pub async fn process_queue(State(state): State<AppState>) -> ApiResult<Json<ProcessResponse>> {
    let matches = state.registry.process_queue().await?;
    let still_waiting = state.registry.view_queue().await.len();
    metrics::matchmaking_pairs_total(matches.len());
    metrics::matchmaking_queue_length(still_waiting);
    Ok(Json(ProcessResponse {
        matches,
        still_waiting,
    }))
}
