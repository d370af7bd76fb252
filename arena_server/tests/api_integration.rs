//! End-to-end tests of the HTTP API, driven in-process with `oneshot`.

use arena::Registry;
use arena_server::api::{AppState, create_router};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For `oneshot` method

fn app() -> Router {
    create_router(AppState::new(Registry::new()), false)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register_player(app: &Router, nickname: &str) {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/v1/players",
        Some(json!({
            "nickname": nickname,
            "real_name": format!("{nickname} Real"),
            "email": format!("{nickname}@example.com"),
            "birth_date": "2000-01-01",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-me")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "trace-me");
}

#[tokio::test]
async fn test_rejections_keep_request_id() {
    let request = Request::builder()
        .uri("/api/v1/players/ghost")
        .header("x-request-id", "lost-player")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()["x-request-id"], "lost-player");
    assert!(
        response
            .extensions()
            .get::<arena_server::api::errors::Rejection>()
            .is_some()
    );
}

#[tokio::test]
async fn test_register_and_fetch_player() {
    let app = app();
    register_player(&app, "aspas").await;

    let (status, body) = send(&app, Method::GET, "/api/v1/players/ASPAS", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nickname"], "aspas");
    assert_eq!(body["rating"], 1000);
    assert_eq!(body["tier"], "SILVER");
    assert_eq!(body["status"], "ACTIVE");
}

#[tokio::test]
async fn test_error_mapping() {
    let app = app();
    register_player(&app, "aspas").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/players",
        Some(json!({
            "nickname": "Aspas",
            "real_name": "Someone",
            "email": "x@example.com",
            "birth_date": "2000-01-01",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "conflict");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/players",
        Some(json!({
            "nickname": "nobody",
            "real_name": "Someone",
            "email": "no-at-sign",
            "birth_date": "2000-01-01",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");

    let (status, body) = send(&app, Method::GET, "/api/v1/teams/ghosts", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Team not found: ghosts");
}

#[tokio::test]
async fn test_inactive_player_cannot_queue() {
    let app = app();
    register_player(&app, "tenz").await;

    let (status, _) = send(&app, Method::POST, "/api/v1/players/tenz/deactivate", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/matchmaking/queue",
        Some(json!({ "nickname": "tenz" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["kind"], "business_rule");
}

#[tokio::test]
async fn test_matchmaking_flow() {
    let app = app();
    for nickname in ["a", "b", "c"] {
        register_player(&app, nickname).await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/matchmaking/queue",
            Some(json!({ "nickname": nickname })),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    let (status, body) = send(&app, Method::POST, "/api/v1/matchmaking/process", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matches"].as_array().unwrap().len(), 1);
    assert_eq!(body["still_waiting"], 1);

    let (_, body) = send(&app, Method::GET, "/api/v1/matchmaking/queue", None).await;
    assert_eq!(body["waiting"], json!(["c"]));

    let match_id = body_id(&send(&app, Method::GET, "/api/v1/matches", None).await.1);
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/matches/{match_id}/result"),
        Some(json!({ "first_score": 13, "second_score": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "FINISHED");
    assert_eq!(body["winner"], "a");

    let (_, body) = send(&app, Method::GET, "/api/v1/players/a", None).await;
    assert_eq!(body["rating"], 1025);
    let (_, body) = send(&app, Method::GET, "/api/v1/players/b", None).await;
    assert_eq!(body["rating"], 985);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/matches/{match_id}/result"),
        Some(json!({ "first_score": 1, "second_score": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "state_conflict");

    let (_, body) = send(&app, Method::GET, "/api/v1/reports/ranking", None).await;
    assert_eq!(body[0]["nickname"], "a");
    assert_eq!(body[0]["position"], 1);
}

fn body_id(matches: &Value) -> i64 {
    matches[0]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_third_penalty_bans_player() {
    let app = app();
    register_player(&app, "cheater").await;

    for expected in [StatusCode::CREATED, StatusCode::CREATED] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/penalties",
            Some(json!({ "nickname": "cheater", "kind": "BEHAVIOR", "description": "Toxic chat" })),
        )
        .await;
        assert_eq!(status, expected);
    }

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/penalties",
        Some(json!({ "nickname": "cheater", "kind": "CHEATING", "description": "Aim assist" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["kind"], "escalation");

    let (_, penalties) = send(&app, Method::GET, "/api/v1/penalties", None).await;
    assert_eq!(penalties.as_array().unwrap().len(), 3);
    let (_, player) = send(&app, Method::GET, "/api/v1/players/cheater", None).await;
    assert_eq!(player["status"], "BANNED");

    let (_, report) = send(&app, Method::GET, "/api/v1/reports/most-penalized", None).await;
    assert_eq!(report[0]["nickname"], "cheater");
    assert_eq!(report[0]["active_penalties"], 3);
}

#[tokio::test]
async fn test_tournament_lifecycle() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/games",
        Some(json!({
            "name": "Street Fighter 6",
            "genre": "FIGHTING",
            "max_players_per_team": 1,
            "platform": "PLAYSTATION",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/tournaments",
        Some(json!({
            "name": "Evo",
            "game": "Street Fighter 6",
            "format": "SINGLE_ELIMINATION",
            "start_date": "2026-08-01",
            "end_date": "2026-08-03",
            "prize_pool": 10000.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/api/v1/tournaments/Evo/start", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "state_conflict");

    for nickname in ["daigo", "tokido", "punk", "menard"] {
        register_player(&app, nickname).await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/tournaments/Evo/participants",
            Some(json!({ "kind": "player", "name": nickname })),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    let (status, _) = send(&app, Method::POST, "/api/v1/tournaments/Evo/start", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, "/api/v1/tournaments/active", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["status"], "IN_PROGRESS");

    let schedule = json!({
        "first": { "kind": "player", "name": "daigo" },
        "second": { "kind": "player", "name": "tokido" },
        "round": 1,
    });
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/tournaments/Evo/matches",
        Some(schedule.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/tournaments/Evo/matches",
        Some(schedule),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "conflict");

    let (status, prizes) = send(&app, Method::POST, "/api/v1/tournaments/Evo/finish", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(prizes, json!([]));

    let (_, body) = send(&app, Method::GET, "/api/v1/tournaments/Evo", None).await;
    assert_eq!(body["status"], "FINISHED");

    let (status, _) = send(&app, Method::POST, "/api/v1/tournaments/Evo/cancel", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_team_roster_endpoints() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/api/v1/games",
        Some(json!({
            "name": "Valorant",
            "genre": "FPS",
            "max_players_per_team": 2,
            "platform": "PC",
        })),
    )
    .await;
    for nickname in ["saadhak", "aspas", "less"] {
        register_player(&app, nickname).await;
    }

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/teams",
        Some(json!({ "name": "LOUD", "tag": "loud", "captain": "saadhak", "game": "Valorant" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/teams/LOUD/members",
        Some(json!({ "nickname": "aspas" })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/teams/LOUD/members",
        Some(json!({ "nickname": "less" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "business_rule");

    let (status, _) = send(
        &app,
        Method::DELETE,
        "/api/v1/teams/LOUD/members/saadhak",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/teams/LOUD/captain",
        Some(json!({ "nickname": "aspas" })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, team) = send(&app, Method::GET, "/api/v1/teams/loud", None).await;
    assert_eq!(team["tag"], "LOUD");
    assert_eq!(team["captain"], "aspas");
    assert_eq!(team["members"], json!(["saadhak", "aspas"]));
}

#[tokio::test]
async fn test_rating_adjustment_and_tier_listing() {
    let app = app();
    for nickname in ["aspas", "less"] {
        register_player(&app, nickname).await;
    }

    let (status, player) = send(
        &app,
        Method::PATCH,
        "/api/v1/players/aspas/rating",
        Some(json!({ "points": 500, "adjustment": "GAIN" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(player["rating"], 1500);
    assert_eq!(player["tier"], "GOLD");

    let (status, gold) = send(&app, Method::GET, "/api/v1/players/by-tier/GOLD", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(gold.as_array().unwrap().len(), 1);
    assert_eq!(gold[0]["nickname"], "aspas");

    let (_, silver) = send(&app, Method::GET, "/api/v1/players/by-tier/SILVER", None).await;
    assert_eq!(silver[0]["nickname"], "less");

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/v1/players/aspas/rating",
        Some(json!({ "points": -1, "adjustment": "LOSE" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/v1/players/ghost/rating",
        Some(json!({ "points": 10, "adjustment": "LOSE" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_team_lookup_by_tag() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/api/v1/games",
        Some(json!({
            "name": "Valorant",
            "genre": "FPS",
            "max_players_per_team": 5,
            "platform": "PC",
        })),
    )
    .await;
    register_player(&app, "keznit").await;
    send(
        &app,
        Method::POST,
        "/api/v1/teams",
        Some(json!({ "name": "Leviatan", "tag": "lev", "captain": "keznit", "game": "Valorant" })),
    )
    .await;

    let (status, team) = send(&app, Method::GET, "/api/v1/teams/by-tag/Lev", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(team["name"], "Leviatan");

    let (status, body) = send(&app, Method::GET, "/api/v1/teams/by-tag/XYZ", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
}
