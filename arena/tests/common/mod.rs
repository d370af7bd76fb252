//! Shared setup for registry integration tests.

#![allow(dead_code)]

use arena::{
    Registry,
    entities::{Game, Genre, Platform, Player, TournamentFormat},
    registry::{ParticipantRef, TeamConfig, TournamentConfig},
};
use chrono::NaiveDate;

pub fn player(nickname: &str) -> Player {
    Player::new(
        nickname,
        format!("{nickname} Real"),
        format!("{nickname}@example.com"),
        NaiveDate::from_ymd_opt(2000, 1, 1),
    )
    .unwrap()
}

/// Registry with `nicknames` registered in order
pub async fn registry_with_players(nicknames: &[&str]) -> Registry {
    let registry = Registry::new();
    for nickname in nicknames {
        registry.register_player(player(nickname)).await.unwrap();
    }
    registry
}

pub async fn register_game(registry: &Registry, name: &str, max_players_per_team: usize) {
    registry
        .register_game(Game::new(name, Genre::Fps, max_players_per_team, Platform::Pc).unwrap())
        .await
        .unwrap();
}

/// Register a team captained by `members[0]` and add the rest
pub async fn register_team(registry: &Registry, name: &str, game: &str, members: &[&str]) {
    registry
        .register_team(TeamConfig {
            name: name.to_string(),
            tag: name.chars().take(3).collect(),
            captain: members[0].to_string(),
            game: game.to_string(),
        })
        .await
        .unwrap();
    for member in &members[1..] {
        registry.add_team_member(name, member).await.unwrap();
    }
}

pub async fn create_tournament(registry: &Registry, name: &str, game: &str) {
    registry
        .create_tournament(TournamentConfig {
            name: name.to_string(),
            game: game.to_string(),
            format: TournamentFormat::RoundRobin,
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            prize_pool: 50_000.0,
        })
        .await
        .unwrap();
}

pub async fn rating_of(registry: &Registry, nickname: &str) -> u32 {
    registry.find_player(nickname).await.unwrap().rating()
}

pub fn solo(nickname: &str) -> ParticipantRef {
    ParticipantRef::player(nickname)
}
