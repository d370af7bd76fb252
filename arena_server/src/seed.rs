//! Demo data for local runs.

use arena::{
    ArenaResult, Registry,
    entities::{Game, Genre, Platform, Player},
    registry::TeamConfig,
};
use chrono::NaiveDate;
use log::info;

const GAMES: [(&str, Genre, usize, Platform); 3] = [
    ("Valorant", Genre::Fps, 5, Platform::Pc),
    ("League of Legends", Genre::Moba, 5, Platform::Pc),
    ("Street Fighter 6", Genre::Fighting, 1, Platform::PlayStation),
];

const PLAYERS: [(&str, &str, (i32, u32, u32)); 6] = [
    ("aspas", "Erick Santos", (2003, 6, 15)),
    ("Less", "Felipe Basso", (2005, 1, 10)),
    ("tuyz", "Arthur Vieira", (2004, 2, 20)),
    ("cauanzin", "Cauan Pereira", (2004, 8, 4)),
    ("saadhak", "Matias Delipetro", (1997, 3, 9)),
    ("Faker", "Lee Sang-hyeok", (1996, 5, 7)),
];

/// Register a handful of games, players and one full team
///
/// Fails on the first conflict, so seeding a non-empty registry twice is an
/// error rather than a silent merge.
pub async fn seed_demo_data(registry: &Registry) -> ArenaResult<()> {
    for (name, genre, max_players, platform) in GAMES {
        registry
            .register_game(Game::new(name, genre, max_players, platform)?)
            .await?;
    }

    for (nickname, real_name, (year, month, day)) in PLAYERS {
        let email = format!("{}@arena.gg", nickname.to_lowercase());
        let player = Player::new(
            nickname,
            real_name,
            email,
            NaiveDate::from_ymd_opt(year, month, day),
        )?;
        registry.register_player(player).await?;
    }

    registry
        .register_team(TeamConfig {
            name: "LOUD".to_string(),
            tag: "LOUD".to_string(),
            captain: "saadhak".to_string(),
            game: "Valorant".to_string(),
        })
        .await?;
    for member in ["aspas", "Less", "tuyz", "cauanzin"] {
        registry.add_team_member("LOUD", member).await?;
    }

    info!(
        "Seeded {} games and {} players",
        GAMES.len(),
        PLAYERS.len()
    );
    Ok(())
}
