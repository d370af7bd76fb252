//! Team and roster handlers.

use super::{AppState, CreatedResponse, NicknameRequest, errors::ApiResult};
use crate::metrics;
use arena::{
    ArenaError,
    registry::{TeamConfig, TeamSummary},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// Register a team with its captain as sole member.
///
/// # Errors
///
/// - `400 Bad Request`: Empty name or a tag outside 3 to 5 characters
/// - `404 Not Found`: Unknown captain or game
/// - `409 Conflict`: Team name or tag already taken
pub async fn register_team(
    State(state): State<AppState>,
    Json(config): Json<TeamConfig>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let id = state.registry.register_team(config).await?;
    metrics::registrations_total("team");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn list_teams(State(state): State<AppState>) -> Json<Vec<TeamSummary>> {
    Json(state.registry.teams().await)
}

pub async fn get_team(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<TeamSummary>> {
    let team = state
        .registry
        .find_team(&name)
        .await
        .ok_or(ArenaError::TeamNotFound(name))?;
    Ok(Json(team))
}

pub async fn get_team_by_tag(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> ApiResult<Json<TeamSummary>> {
    let team = state
        .registry
        .find_team_by_tag(&tag)
        .await
        .ok_or(ArenaError::TeamNotFound(tag))?;
    Ok(Json(team))
}

pub async fn add_member(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<NicknameRequest>,
) -> ApiResult<StatusCode> {
    state
        .registry
        .add_team_member(&name, &request.nickname)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Remove a member; the captain must be reassigned first.
pub async fn remove_member(
    State(state): State<AppState>,
    Path((name, nickname)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    state.registry.remove_team_member(&name, &nickname).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reassign_captain(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<NicknameRequest>,
) -> ApiResult<StatusCode> {
    state
        .registry
        .reassign_captain(&name, &request.nickname)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
