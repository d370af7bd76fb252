//! Penalty handlers.

use super::{AppState, CreatedResponse, errors::ApiResult};
use crate::metrics;
use arena::{
    ArenaError,
    entities::{PenaltyId, PenaltyKind},
    registry::PenaltySummary,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct IssuePenaltyRequest {
    pub nickname: String,
    pub kind: PenaltyKind,
    pub description: String,
}

/// Issue a penalty.
///
/// A `403 Forbidden` with kind `escalation` means the penalty was recorded
/// and was the player's third active one, so the player is now banned.
pub async fn issue_penalty(
    State(state): State<AppState>,
    Json(request): Json<IssuePenaltyRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let result = state
        .registry
        .issue_penalty(&request.nickname, request.kind, &request.description)
        .await;
    if matches!(
        result,
        Ok(_) | Err(ArenaError::MaxPenaltiesReached { .. })
    ) {
        metrics::penalties_issued_total(&request.kind.to_string());
    }
    let id = result?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn list_penalties(State(state): State<AppState>) -> Json<Vec<PenaltySummary>> {
    Json(state.registry.penalties().await)
}

pub async fn get_penalty(
    State(state): State<AppState>,
    Path(id): Path<PenaltyId>,
) -> ApiResult<Json<PenaltySummary>> {
    let penalty = state
        .registry
        .find_penalty(id)
        .await
        .ok_or(ArenaError::PenaltyNotFound(id))?;
    Ok(Json(penalty))
}

pub async fn serve_penalty(
    State(state): State<AppState>,
    Path(id): Path<PenaltyId>,
) -> ApiResult<StatusCode> {
    state.registry.serve_penalty(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn revoke_penalty(
    State(state): State<AppState>,
    Path(id): Path<PenaltyId>,
) -> ApiResult<StatusCode> {
    state.registry.revoke_penalty(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
