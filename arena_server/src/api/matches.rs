//! Match result handlers.

use super::{AppState, errors::ApiResult};
use crate::metrics;
use arena::{
    ArenaError,
    entities::MatchId,
    registry::{MatchSummary, ParticipantRef},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct MatchResultRequest {
    pub first_score: i32,
    pub second_score: i32,
}

#[derive(Debug, Deserialize)]
pub struct WalkoverRequest {
    pub absent: ParticipantRef,
}

#[derive(Debug, Serialize)]
pub struct WalkoverResponse {
    pub penalty_id: i64,
}

pub async fn list_matches(State(state): State<AppState>) -> Json<Vec<MatchSummary>> {
    Json(state.registry.matches().await)
}

pub async fn get_match(
    State(state): State<AppState>,
    Path(id): Path<MatchId>,
) -> ApiResult<Json<MatchSummary>> {
    let summary = state
        .registry
        .find_match(id)
        .await
        .ok_or(ArenaError::MatchNotFound(id))?;
    Ok(Json(summary))
}

pub async fn start_match(
    State(state): State<AppState>,
    Path(id): Path<MatchId>,
) -> ApiResult<StatusCode> {
    state.registry.start_match(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Record the final score and update ratings.
///
/// # Errors
///
/// - `400 Bad Request`: Negative score
/// - `409 Conflict`: Match already finished or walked over
pub async fn record_result(
    State(state): State<AppState>,
    Path(id): Path<MatchId>,
    Json(request): Json<MatchResultRequest>,
) -> ApiResult<Json<MatchSummary>> {
    let summary = state
        .registry
        .finalize_match(id, request.first_score, request.second_score)
        .await?;
    metrics::matches_finished_total(summary.winner.is_none());
    Ok(Json(summary))
}

/// Resolve a match as a walkover.
///
/// A `403 Forbidden` with kind `escalation` means the walkover was recorded
/// and the penalized player is now banned.
pub async fn record_walkover(
    State(state): State<AppState>,
    Path(id): Path<MatchId>,
    Json(request): Json<WalkoverRequest>,
) -> ApiResult<(StatusCode, Json<WalkoverResponse>)> {
    let result = state.registry.record_walkover(id, &request.absent).await;
    if matches!(
        result,
        Ok(_) | Err(ArenaError::MaxPenaltiesReached { .. })
    ) {
        metrics::walkovers_total();
        metrics::penalties_issued_total("WALKOVER");
    }
    let penalty_id = result?;
    Ok((StatusCode::CREATED, Json(WalkoverResponse { penalty_id })))
}
