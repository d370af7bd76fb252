//! Registry inputs and owned views handed back to callers.

use crate::entities::{
    Game, Genre, MatchId, MatchStatus, PenaltyId, PenaltyKind, PenaltyStatus, Platform, PlayerId,
    TeamId, TournamentFormat, TournamentId, TournamentStatus,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A participant named the way callers know it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ParticipantRef {
    /// Solo player by nickname
    Player(String),
    /// Team by name
    Team(String),
}

impl ParticipantRef {
    pub fn player(nickname: impl Into<String>) -> Self {
        ParticipantRef::Player(nickname.into())
    }

    pub fn team(name: impl Into<String>) -> Self {
        ParticipantRef::Team(name.into())
    }
}

/// Direction of a manual rating adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RatingAdjustment {
    Gain,
    Lose,
}

/// Team registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamConfig {
    pub name: String,
    pub tag: String,
    /// Captain nickname
    pub captain: String,
    /// Primary game name
    pub game: String,
}

/// Game registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub name: String,
    pub genre: Genre,
    pub max_players_per_team: usize,
    pub platform: Platform,
}

impl GameConfig {
    /// Validate and build the game
    pub fn into_game(self) -> crate::ArenaResult<Game> {
        Game::new(
            self.name,
            self.genre,
            self.max_players_per_team,
            self.platform,
        )
    }
}

/// Tournament creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub name: String,
    /// Game name
    pub game: String,
    pub format: TournamentFormat,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub prize_pool: f64,
}

/// Team as seen from outside the registry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    pub id: TeamId,
    pub name: String,
    pub tag: String,
    pub captain: String,
    pub game: String,
    /// Member nicknames in roster order
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TournamentSummary {
    pub id: TournamentId,
    pub name: String,
    pub game: String,
    pub format: TournamentFormat,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub prize_pool: f64,
    pub status: TournamentStatus,
    /// Participant names in enrollment order
    pub participants: Vec<String>,
    pub matches: Vec<MatchId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub id: MatchId,
    /// Tournament name, `None` for matchmaking matches
    pub tournament: Option<String>,
    pub first: String,
    pub second: String,
    pub first_score: u32,
    pub second_score: u32,
    pub played_at: DateTime<Utc>,
    pub status: MatchStatus,
    pub round: u32,
    pub winner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PenaltySummary {
    pub id: PenaltyId,
    pub player: PlayerId,
    pub nickname: String,
    pub kind: PenaltyKind,
    pub description: String,
    pub issued_on: NaiveDate,
    pub status: PenaltyStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrizeSummary {
    pub tournament: String,
    pub participant: String,
    pub placement: u32,
    pub medal: &'static str,
    pub amount: f64,
    pub per_member_amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_participant_ref_wire_shape() {
        let value = serde_json::to_value(ParticipantRef::team("LOUD")).unwrap();
        assert_eq!(value, json!({"kind": "team", "name": "LOUD"}));

        let parsed: ParticipantRef =
            serde_json::from_value(json!({"kind": "player", "name": "aspas"})).unwrap();
        assert_eq!(parsed, ParticipantRef::player("aspas"));
    }

    #[test]
    fn test_tournament_config_from_json() {
        let config: TournamentConfig = serde_json::from_value(json!({
            "name": "Champions",
            "game": "Valorant",
            "format": "DOUBLE_ELIMINATION",
            "start_date": "2026-08-01",
            "end_date": "2026-08-24",
            "prize_pool": 2250000.0
        }))
        .unwrap();
        assert_eq!(config.format, TournamentFormat::DoubleElimination);
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
    }
}
