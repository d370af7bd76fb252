//! Domain entities.
//!
//! Each entity validates its own construction invariants and guards its own
//! mutations. Entities never hold a reference back to the registry; where an
//! operation needs to see other entities (a team checking its members, a
//! match naming its participants) the caller passes a read-only
//! [`ParticipantDirectory`] or [`PlayerDirectory`].

pub mod game;
pub mod matches;
pub mod participant;
pub mod penalty;
pub mod player;
pub mod prize;
pub mod team;
pub mod tournament;

pub use game::{Game, Genre, Platform};
pub use matches::{Match, MatchStatus, WalkoverResult};
pub use participant::{Participant, ParticipantDirectory, PlayerDirectory};
pub use penalty::{Penalty, PenaltyKind, PenaltyStatus};
pub use player::{INITIAL_RATING, Player, PlayerStatus};
pub use prize::{PRIZE_SPLIT, Prize, distribute};
pub use team::Team;
pub use tournament::{
    MAX_PARTICIPANTS, MIN_PARTICIPANTS, Tournament, TournamentFormat, TournamentStatus,
};

/// Player ID type
pub type PlayerId = i64;

/// Team ID type
pub type TeamId = i64;

/// Tournament ID type
pub type TournamentId = i64;

/// Match ID type
pub type MatchId = i64;

/// Penalty ID type
pub type PenaltyId = i64;

/// Reject empty or whitespace-only text
pub(crate) fn require_text(value: &str, field: &str) -> crate::ArenaResult<()> {
    if value.trim().is_empty() {
        return Err(crate::ArenaError::InvalidArgument(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}
