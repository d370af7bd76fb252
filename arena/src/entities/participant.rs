//! Participant abstraction over solo players and teams.

use super::{Player, PlayerId, Team, TeamId};
use crate::{ArenaError, ArenaResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read-only access to players by id
pub trait PlayerDirectory {
    fn player(&self, id: PlayerId) -> Option<&Player>;

    /// Like [`player`](Self::player) but a missing id is an error
    fn require_player(&self, id: PlayerId) -> ArenaResult<&Player> {
        self.player(id).ok_or(ArenaError::UnknownPlayer(id))
    }
}

/// Read-only access to players and teams by id
pub trait ParticipantDirectory: PlayerDirectory {
    fn team(&self, id: TeamId) -> Option<&Team>;

    /// Like [`team`](Self::team) but a missing id is an error
    fn require_team(&self, id: TeamId) -> ArenaResult<&Team> {
        self.team(id).ok_or(ArenaError::UnknownTeam(id))
    }
}

impl PlayerDirectory for BTreeMap<PlayerId, Player> {
    fn player(&self, id: PlayerId) -> Option<&Player> {
        self.get(&id)
    }
}

/// Whoever fills a match or tournament slot
///
/// A solo player is the sole member of their own roster; a team's roster
/// is its member list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Participant {
    Player(PlayerId),
    Team(TeamId),
}

impl Participant {
    /// Display name: the nickname or the team name
    pub fn name<'a, D>(&self, directory: &'a D) -> ArenaResult<&'a str>
    where
        D: ParticipantDirectory + ?Sized,
    {
        match *self {
            Participant::Player(id) => Ok(directory.require_player(id)?.nickname()),
            Participant::Team(id) => Ok(directory.require_team(id)?.name()),
        }
    }

    /// Constituent players, in roster order
    pub fn members<D>(&self, directory: &D) -> ArenaResult<Vec<PlayerId>>
    where
        D: ParticipantDirectory + ?Sized,
    {
        match *self {
            Participant::Player(id) => {
                directory.require_player(id)?;
                Ok(vec![id])
            }
            Participant::Team(id) => Ok(directory.require_team(id)?.members().to_vec()),
        }
    }

    /// Whether `player` is one of the constituent players
    pub fn includes<D>(&self, player: PlayerId, directory: &D) -> bool
    where
        D: ParticipantDirectory + ?Sized,
    {
        match *self {
            Participant::Player(id) => id == player,
            Participant::Team(id) => directory
                .team(id)
                .is_some_and(|team| team.members().contains(&player)),
        }
    }

    pub fn is_team(&self) -> bool {
        matches!(self, Participant::Team(_))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Small in-memory directory for entity tests.

    use super::*;
    use crate::entities::{Game, Genre, Platform};
    use chrono::NaiveDate;
    use std::sync::Arc;

    #[derive(Default)]
    pub struct TestDirectory {
        pub players: BTreeMap<PlayerId, Player>,
        pub teams: BTreeMap<TeamId, Team>,
    }

    impl PlayerDirectory for TestDirectory {
        fn player(&self, id: PlayerId) -> Option<&Player> {
            self.players.get(&id)
        }
    }

    impl ParticipantDirectory for TestDirectory {
        fn team(&self, id: TeamId) -> Option<&Team> {
            self.teams.get(&id)
        }
    }

    impl TestDirectory {
        pub fn add_player(&mut self, id: PlayerId, nickname: &str) -> Participant {
            let player = Player::new(
                nickname,
                "Test Player",
                format!("{nickname}@example.com"),
                NaiveDate::from_ymd_opt(2000, 1, 1),
            )
            .unwrap();
            self.players.insert(id, player);
            Participant::Player(id)
        }

        pub fn add_team(&mut self, id: TeamId, name: &str, members: &[PlayerId]) -> Participant {
            let game = Arc::new(Game::new("Valorant", Genre::Fps, 5, Platform::Pc).unwrap());
            let tag: String = name.chars().filter(|c| c.is_alphanumeric()).take(4).collect();
            let mut team = Team::new(name, format!("{tag:X<3}"), members[0], game).unwrap();
            for member in &members[1..] {
                team.add_member(*member, &self.players).unwrap();
            }
            self.teams.insert(id, team);
            Participant::Team(id)
        }
    }
}
