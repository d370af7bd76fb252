//! Tournament lifecycle handlers.
//!
//! # Examples
//!
//! Enroll a team:
//! ```bash
//! curl -X POST http://localhost:8080/api/v1/tournaments/Masters/participants \
//!   -H "Content-Type: application/json" \
//!   -d '{"kind": "team", "name": "LOUD"}'
//! ```

use super::{AppState, CreatedResponse, errors::ApiResult};
use crate::metrics;
use arena::{
    ArenaError,
    registry::{ParticipantRef, PrizeSummary, TournamentConfig, TournamentSummary},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ScheduleMatchRequest {
    pub first: ParticipantRef,
    pub second: ParticipantRef,
    pub round: u32,
}

/// Create a tournament open for registration.
///
/// # Errors
///
/// - `400 Bad Request`: Empty name, end before start, or negative prize pool
/// - `404 Not Found`: Unknown game
/// - `409 Conflict`: Tournament name already taken
pub async fn create_tournament(
    State(state): State<AppState>,
    Json(config): Json<TournamentConfig>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let id = state.registry.create_tournament(config).await?;
    metrics::registrations_total("tournament");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn list_tournaments(State(state): State<AppState>) -> Json<Vec<TournamentSummary>> {
    Json(state.registry.tournaments().await)
}

pub async fn list_active_tournaments(
    State(state): State<AppState>,
) -> Json<Vec<TournamentSummary>> {
    Json(state.registry.active_tournaments().await)
}

pub async fn get_tournament(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<TournamentSummary>> {
    let tournament = state
        .registry
        .find_tournament(&name)
        .await
        .ok_or(ArenaError::TournamentNotFound(name))?;
    Ok(Json(tournament))
}

/// Enroll a player or team.
///
/// # Errors
///
/// - `403 Forbidden`: A constituent player is banned or inactive
/// - `409 Conflict`: Registration closed or participant already enrolled
/// - `422 Unprocessable Entity`: Tournament full or team not eligible
pub async fn enroll(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(participant): Json<ParticipantRef>,
) -> ApiResult<StatusCode> {
    state.registry.enroll(&name, &participant).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn start_tournament(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<StatusCode> {
    state.registry.start_tournament(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Finish a tournament, returning the prizes awarded.
pub async fn finish_tournament(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Vec<PrizeSummary>>> {
    Ok(Json(state.registry.finish_tournament(&name).await?))
}

pub async fn cancel_tournament(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<StatusCode> {
    state.registry.cancel_tournament(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn schedule_match(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<ScheduleMatchRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let id = state
        .registry
        .schedule_match(&name, &request.first, &request.second, request.round)
        .await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn list_prizes(State(state): State<AppState>) -> Json<Vec<PrizeSummary>> {
    Json(state.registry.prizes().await)
}
