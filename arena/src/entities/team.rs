//! Team entity.

use super::{Game, PlayerDirectory, PlayerId, require_text};
use crate::{ArenaError, ArenaResult};
use std::{fmt, sync::Arc};

/// Shortest accepted team tag
pub const MIN_TAG_LEN: usize = 3;

/// Longest accepted team tag
pub const MAX_TAG_LEN: usize = 5;

/// A roster of players competing in one primary game
///
/// The captain is always a member. Members are shared with the registry's
/// player book, the team only keeps their ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    name: String,
    tag: String,
    captain: PlayerId,
    game: Arc<Game>,
    members: Vec<PlayerId>,
}

impl Team {
    /// Create a team whose only member is its captain
    ///
    /// The tag is stored upper-cased.
    pub fn new(
        name: impl Into<String>,
        tag: impl AsRef<str>,
        captain: PlayerId,
        game: Arc<Game>,
    ) -> ArenaResult<Self> {
        let name = name.into();
        require_text(&name, "Team name")?;

        // Length is checked on the upper-cased form ("ß" becomes "SS")
        let tag = tag.as_ref().to_uppercase();
        let tag_len = tag.chars().count();
        if !(MIN_TAG_LEN..=MAX_TAG_LEN).contains(&tag_len) {
            return Err(ArenaError::InvalidArgument(format!(
                "Tag must be between {MIN_TAG_LEN} and {MAX_TAG_LEN} characters, got '{tag}'"
            )));
        }

        Ok(Self {
            name,
            tag,
            captain,
            game,
            members: vec![captain],
        })
    }

    /// Add a player to the roster
    ///
    /// # Errors
    ///
    /// `AlreadyMember` if the player is on the roster, `TeamCapacity` if the
    /// roster is already at the game's per-team limit.
    pub fn add_member<D>(&mut self, player: PlayerId, players: &D) -> ArenaResult<()>
    where
        D: PlayerDirectory + ?Sized,
    {
        let nickname = players.require_player(player)?.nickname();

        if self.members.contains(&player) {
            return Err(ArenaError::AlreadyMember {
                team: self.name.clone(),
                nickname: nickname.to_string(),
            });
        }

        let max = self.game.max_players_per_team();
        if self.members.len() >= max {
            return Err(ArenaError::TeamCapacity {
                team: self.name.clone(),
                game: self.game.name().to_string(),
                max,
            });
        }

        self.members.push(player);
        Ok(())
    }

    /// Remove a non-captain player from the roster
    pub fn remove_member<D>(&mut self, player: PlayerId, players: &D) -> ArenaResult<()>
    where
        D: PlayerDirectory + ?Sized,
    {
        let nickname = players.require_player(player)?.nickname();

        if player == self.captain {
            return Err(ArenaError::CaptainRemoval {
                team: self.name.clone(),
                nickname: nickname.to_string(),
            });
        }

        let Some(index) = self.members.iter().position(|id| *id == player) else {
            return Err(ArenaError::NotAMember {
                team: self.name.clone(),
                nickname: nickname.to_string(),
            });
        };
        self.members.remove(index);
        Ok(())
    }

    /// Hand the captaincy to a current member
    pub fn reassign_captain<D>(&mut self, player: PlayerId, players: &D) -> ArenaResult<()>
    where
        D: PlayerDirectory + ?Sized,
    {
        let nickname = players.require_player(player)?.nickname();

        if !self.members.contains(&player) {
            return Err(ArenaError::NotAMember {
                team: self.name.clone(),
                nickname: nickname.to_string(),
            });
        }

        self.captain = player;
        Ok(())
    }

    /// Whether every roster member is active; unknown ids count as inactive
    pub fn all_members_active<D>(&self, players: &D) -> bool
    where
        D: PlayerDirectory + ?Sized,
    {
        self.members
            .iter()
            .all(|id| players.player(*id).is_some_and(|p| p.is_active()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn captain(&self) -> PlayerId {
        self.captain
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn members(&self) -> &[PlayerId] {
        &self.members
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} - {} members - {}",
            self.tag,
            self.name,
            self.members.len(),
            self.game.name()
        )
    }
}
