//! HTTP API for the arena server.
//!
//! A thin JSON adapter over [`arena::Registry`] and [`arena::ReportingEngine`].
//! Handlers translate requests into registry calls and map every
//! [`arena::ArenaError`] to a status code through [`errors::ApiError`].
//!
//! # Modules
//!
//! - [`players`], [`games`], [`teams`]: registration and roster management
//! - [`tournaments`]: tournament lifecycle, enrollment and match scheduling
//! - [`matches`]: match results and walkovers
//! - [`penalties`]: penalty issue, serve and revoke
//! - [`matchmaking`]: the standalone matchmaking queue
//! - [`reports`]: read-only rankings and statistics
//! - [`request_id`]: request correlation, access logging and HTTP metrics
//!
//! # Status codes
//!
//! | Error kind       | Status                                      |
//! |------------------|---------------------------------------------|
//! | `validation`     | 400                                         |
//! | `not_found`      | 404                                         |
//! | `conflict`       | 409                                         |
//! | `state_conflict` | 409                                         |
//! | `business_rule`  | 403 for banned/inactive players, else 422   |
//! | `escalation`     | 403 (the operation itself was recorded)     |

pub mod errors;
pub mod games;
pub mod matches;
pub mod matchmaking;
pub mod penalties;
pub mod players;
pub mod reports;
pub mod request_id;
pub mod teams;
pub mod tournaments;

use arena::{Registry, ReportingEngine};
use axum::{
    Router,
    response::Json,
    routing::{delete, get, patch, post, put},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Both fields are cheap handles over the same registry lock.
#[derive(Clone)]
pub struct AppState {
    pub registry: Registry,
    pub reports: ReportingEngine,
}

impl AppState {
    pub fn new(registry: Registry) -> Self {
        Self {
            reports: ReportingEngine::new(registry.clone()),
            registry,
        }
    }
}

/// Body returned when an entity is created
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// Body naming a single player
#[derive(Debug, Deserialize)]
pub struct NicknameRequest {
    pub nickname: String,
}

/// Create the complete API router.
///
/// # Endpoint Summary
///
/// ```text
/// GET    /health
/// POST   /api/v1/players                       GET /api/v1/players
/// GET    /api/v1/players/{nickname}
/// GET    /api/v1/players/by-tier/{tier}
/// PATCH  /api/v1/players/{nickname}/rating
/// POST   /api/v1/players/{nickname}/deactivate
/// POST   /api/v1/players/{nickname}/reactivate
/// GET    /api/v1/players/{nickname}/history
/// GET    /api/v1/players/{nickname}/win-rate
/// POST   /api/v1/games                         GET /api/v1/games
/// GET    /api/v1/games/{name}
/// POST   /api/v1/teams                         GET /api/v1/teams
/// GET    /api/v1/teams/{name}
/// GET    /api/v1/teams/by-tag/{tag}
/// POST   /api/v1/teams/{name}/members
/// DELETE /api/v1/teams/{name}/members/{nickname}
/// PUT    /api/v1/teams/{name}/captain
/// POST   /api/v1/tournaments                   GET /api/v1/tournaments
/// GET    /api/v1/tournaments/active
/// GET    /api/v1/tournaments/{name}
/// POST   /api/v1/tournaments/{name}/participants
/// POST   /api/v1/tournaments/{name}/start|finish|cancel
/// POST   /api/v1/tournaments/{name}/matches
/// GET    /api/v1/matches                       GET /api/v1/matches/{id}
/// POST   /api/v1/matches/{id}/start|result|walkover
/// POST   /api/v1/penalties                     GET /api/v1/penalties
/// GET    /api/v1/penalties/{id}
/// POST   /api/v1/penalties/{id}/serve|revoke
/// GET    /api/v1/matchmaking/queue             POST/DELETE likewise
/// DELETE /api/v1/matchmaking/queue/{nickname}
/// POST   /api/v1/matchmaking/process
/// GET    /api/v1/prizes
/// GET    /api/v1/reports/{ranking,top-wins,team-win-rates,tiers,stats,
///                         most-penalized,active-tournaments}
/// ```
///
/// # Example
///
/// ```rust,no_run
/// # use arena_server::api::{create_router, AppState};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let app = create_router(AppState::new(arena::Registry::new()), true);
/// let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
pub fn create_router(state: AppState, cors_permissive: bool) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", create_v1_router())
        .layer(axum::middleware::from_fn(request_id::request_id_middleware));

    let router = if cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

fn create_v1_router() -> Router<AppState> {
    let players = Router::new()
        .route(
            "/players",
            post(players::register_player).get(players::list_players),
        )
        .route("/players/{nickname}", get(players::get_player))
        .route(
            "/players/by-tier/{tier}",
            get(players::list_players_in_tier),
        )
        .route("/players/{nickname}/rating", patch(players::adjust_rating))
        .route(
            "/players/{nickname}/deactivate",
            post(players::deactivate_player),
        )
        .route(
            "/players/{nickname}/reactivate",
            post(players::reactivate_player),
        )
        .route("/players/{nickname}/history", get(players::player_history))
        .route("/players/{nickname}/win-rate", get(players::player_win_rate));

    let games = Router::new()
        .route("/games", post(games::register_game).get(games::list_games))
        .route("/games/{name}", get(games::get_game));

    let teams = Router::new()
        .route("/teams", post(teams::register_team).get(teams::list_teams))
        .route("/teams/{name}", get(teams::get_team))
        .route("/teams/by-tag/{tag}", get(teams::get_team_by_tag))
        .route("/teams/{name}/members", post(teams::add_member))
        .route(
            "/teams/{name}/members/{nickname}",
            delete(teams::remove_member),
        )
        .route("/teams/{name}/captain", put(teams::reassign_captain));

    let tournaments = Router::new()
        .route(
            "/tournaments",
            post(tournaments::create_tournament).get(tournaments::list_tournaments),
        )
        .route(
            "/tournaments/active",
            get(tournaments::list_active_tournaments),
        )
        .route("/tournaments/{name}", get(tournaments::get_tournament))
        .route(
            "/tournaments/{name}/participants",
            post(tournaments::enroll),
        )
        .route(
            "/tournaments/{name}/start",
            post(tournaments::start_tournament),
        )
        .route(
            "/tournaments/{name}/finish",
            post(tournaments::finish_tournament),
        )
        .route(
            "/tournaments/{name}/cancel",
            post(tournaments::cancel_tournament),
        )
        .route(
            "/tournaments/{name}/matches",
            post(tournaments::schedule_match),
        )
        .route("/prizes", get(tournaments::list_prizes));

    let matches = Router::new()
        .route("/matches", get(matches::list_matches))
        .route("/matches/{id}", get(matches::get_match))
        .route("/matches/{id}/start", post(matches::start_match))
        .route("/matches/{id}/result", post(matches::record_result))
        .route("/matches/{id}/walkover", post(matches::record_walkover));

    let penalties = Router::new()
        .route(
            "/penalties",
            post(penalties::issue_penalty).get(penalties::list_penalties),
        )
        .route("/penalties/{id}", get(penalties::get_penalty))
        .route("/penalties/{id}/serve", post(penalties::serve_penalty))
        .route("/penalties/{id}/revoke", post(penalties::revoke_penalty));

    let queue = Router::new()
        .route(
            "/matchmaking/queue",
            get(matchmaking::view_queue)
                .post(matchmaking::join_queue)
                .delete(matchmaking::clear_queue),
        )
        .route(
            "/matchmaking/queue/{nickname}",
            delete(matchmaking::leave_queue),
        )
        .route("/matchmaking/process", post(matchmaking::process_queue));

    let reports = Router::new()
        .route("/reports/ranking", get(reports::ranking))
        .route("/reports/top-wins", get(reports::top_wins))
        .route("/reports/team-win-rates", get(reports::team_win_rates))
        .route("/reports/tiers", get(reports::tier_distribution))
        .route("/reports/stats", get(reports::general_stats))
        .route("/reports/most-penalized", get(reports::most_penalized))
        .route(
            "/reports/active-tournaments",
            get(reports::active_tournaments),
        );

    Router::new()
        .merge(players)
        .merge(games)
        .merge(teams)
        .merge(tournaments)
        .merge(matches)
        .merge(penalties)
        .merge(queue)
        .merge(reports)
}

/// Liveness probe.
///
/// ```bash
/// curl http://localhost:8080/health
/// # {"status":"healthy","version":"0.1.0"}
/// ```
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
