//! Game catalogue handlers.

use super::{AppState, errors::ApiResult};
use crate::metrics;
use arena::{ArenaError, entities::Game, registry::GameConfig};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// Register a game.
///
/// # Errors
///
/// - `400 Bad Request`: Empty name or zero players per team
/// - `409 Conflict`: Game name already registered
pub async fn register_game(
    State(state): State<AppState>,
    Json(config): Json<GameConfig>,
) -> ApiResult<(StatusCode, Json<Game>)> {
    let game = config.into_game()?;
    state.registry.register_game(game.clone()).await?;
    metrics::registrations_total("game");
    Ok((StatusCode::CREATED, Json(game)))
}

pub async fn list_games(State(state): State<AppState>) -> Json<Vec<Game>> {
    Json(state.registry.games().await)
}

pub async fn get_game(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Game>> {
    let game = state
        .registry
        .find_game(&name)
        .await
        .ok_or(ArenaError::GameNotFound(name))?;
    Ok(Json(game))
}
