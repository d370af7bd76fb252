//! Player registration and status handlers.
//!
//! # Examples
//!
//! Register a player:
//! ```bash
//! curl -X POST http://localhost:8080/api/v1/players \
//!   -H "Content-Type: application/json" \
//!   -d '{"nickname": "aspas", "real_name": "Erick Santos", "email": "aspas@example.com", "birth_date": "2003-06-15"}'
//! ```

use super::{AppState, CreatedResponse, errors::ApiResult};
use crate::metrics;
use arena::{
    ArenaError,
    entities::Player,
    rating::Tier,
    registry::{MatchSummary, RatingAdjustment},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterPlayerRequest {
    pub nickname: String,
    pub real_name: String,
    pub email: String,
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct AdjustRatingRequest {
    pub points: i32,
    pub adjustment: RatingAdjustment,
}

#[derive(Debug, Serialize)]
pub struct WinRateResponse {
    pub nickname: String,
    pub win_rate: f64,
}

/// Register a new player at the starting rating.
///
/// # Errors
///
/// - `400 Bad Request`: Invalid nickname, name, email or birth date
/// - `409 Conflict`: Nickname already taken (ignoring case)
pub async fn register_player(
    State(state): State<AppState>,
    Json(request): Json<RegisterPlayerRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let player = Player::new(
        request.nickname,
        request.real_name,
        request.email,
        request.birth_date,
    )?;
    let id = state.registry.register_player(player).await?;
    metrics::registrations_total("player");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn list_players(State(state): State<AppState>) -> Json<Vec<Player>> {
    Json(state.registry.players().await)
}

pub async fn get_player(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
) -> ApiResult<Json<Player>> {
    let player = state
        .registry
        .find_player(&nickname)
        .await
        .ok_or(ArenaError::PlayerNotFound(nickname))?;
    Ok(Json(player))
}

/// Players in one tier, e.g. `GET /api/v1/players/by-tier/GOLD`.
pub async fn list_players_in_tier(
    State(state): State<AppState>,
    Path(tier): Path<Tier>,
) -> Json<Vec<Player>> {
    Json(state.registry.players_in_tier(tier).await)
}

/// Adjust a player's rating outside of any match.
///
/// ```bash
/// curl -X PATCH http://localhost:8080/api/v1/players/aspas/rating \
///   -H "Content-Type: application/json" \
///   -d '{"points": 50, "adjustment": "GAIN"}'
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Negative points
/// - `404 Not Found`: Unknown nickname
pub async fn adjust_rating(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
    Json(request): Json<AdjustRatingRequest>,
) -> ApiResult<Json<Player>> {
    let player = state
        .registry
        .adjust_rating(&nickname, request.points, request.adjustment)
        .await?;
    Ok(Json(player))
}

pub async fn deactivate_player(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
) -> ApiResult<StatusCode> {
    state.registry.deactivate_player(&nickname).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reactivate_player(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
) -> ApiResult<StatusCode> {
    state.registry.reactivate_player(&nickname).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Matches the player took part in, newest first.
pub async fn player_history(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
) -> ApiResult<Json<Vec<MatchSummary>>> {
    Ok(Json(state.reports.player_history(&nickname).await?))
}

pub async fn player_win_rate(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
) -> ApiResult<Json<WinRateResponse>> {
    let win_rate = state.reports.player_win_rate(&nickname).await?;
    Ok(Json(WinRateResponse { nickname, win_rate }))
}
