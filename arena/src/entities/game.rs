//! Game entity.

use super::require_text;
use crate::{ArenaError, ArenaResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Game genre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Genre {
    Fps,
    Moba,
    BattleRoyale,
    Fighting,
    Racing,
    Sports,
    Rts,
    CardGame,
}

impl Genre {
    /// Human readable description
    pub fn description(self) -> &'static str {
        match self {
            Genre::Fps => "First Person Shooter",
            Genre::Moba => "Multiplayer Online Battle Arena",
            Genre::BattleRoyale => "Battle Royale",
            Genre::Fighting => "Fighting Game",
            Genre::Racing => "Racing Game",
            Genre::Sports => "Sports Game",
            Genre::Rts => "Real-Time Strategy",
            Genre::CardGame => "Card Game",
        }
    }
}

/// Platform a game runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Platform {
    Pc,
    PlayStation,
    Xbox,
    Switch,
    Mobile,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Pc => write!(f, "PC"),
            Platform::PlayStation => write!(f, "PlayStation"),
            Platform::Xbox => write!(f, "Xbox"),
            Platform::Switch => write!(f, "Switch"),
            Platform::Mobile => write!(f, "Mobile"),
        }
    }
}

/// A competitive title. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    name: String,
    genre: Genre,
    max_players_per_team: usize,
    platform: Platform,
}

impl Game {
    /// Create a new game
    pub fn new(
        name: impl Into<String>,
        genre: Genre,
        max_players_per_team: usize,
        platform: Platform,
    ) -> ArenaResult<Self> {
        let name = name.into();
        require_text(&name, "Game name")?;
        if max_players_per_team == 0 {
            return Err(ArenaError::InvalidArgument(
                "Max players per team must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            name,
            genre,
            max_players_per_team,
            platform,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    pub fn max_players_per_team(&self) -> usize {
        self.max_players_per_team
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} - {}) - max {} players/team",
            self.name,
            self.genre.description(),
            self.platform,
            self.max_players_per_team
        )
    }
}
