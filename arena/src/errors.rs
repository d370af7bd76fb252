//! Error types for the arena core.

use crate::entities::{
    MatchId, MatchStatus, PenaltyId, PenaltyStatus, PlayerId, TeamId, TournamentStatus,
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Coarse classification of an [`ArenaError`].
///
/// Adapters map kinds to their own response codes; the core never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or missing input
    Validation,
    /// The referenced entity does not exist
    NotFound,
    /// A uniqueness rule was violated
    Conflict,
    /// The operation is not valid in the entity's current lifecycle state
    StateConflict,
    /// A domain policy forbids the operation
    BusinessRule,
    /// The operation succeeded but crossed the ban threshold
    Escalation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::NotFound => write!(f, "not_found"),
            ErrorKind::Conflict => write!(f, "conflict"),
            ErrorKind::StateConflict => write!(f, "state_conflict"),
            ErrorKind::BusinessRule => write!(f, "business_rule"),
            ErrorKind::Escalation => write!(f, "escalation"),
        }
    }
}

/// Arena errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArenaError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Nickname already registered: {0}")]
    DuplicateNickname(String),

    #[error("A team named '{0}' already exists")]
    DuplicateTeamName(String),

    #[error("A team tagged '{0}' already exists")]
    DuplicateTeamTag(String),

    #[error("A game named '{0}' already exists")]
    DuplicateGame(String),

    #[error("A tournament named '{0}' already exists")]
    DuplicateTournament(String),

    #[error("'{participant}' is already enrolled in {tournament}")]
    DuplicateParticipant {
        tournament: String,
        participant: String,
    },

    #[error("An identical match already exists in round {round}")]
    DuplicateMatch { round: u32 },

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Team not found: {0}")]
    TeamNotFound(String),

    #[error("Game not found: {0}")]
    GameNotFound(String),

    #[error("Tournament not found: {0}")]
    TournamentNotFound(String),

    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("Penalty not found: {0}")]
    PenaltyNotFound(PenaltyId),

    #[error("Unknown player id {0}")]
    UnknownPlayer(PlayerId),

    #[error("Unknown team id {0}")]
    UnknownTeam(TeamId),

    #[error("Registration for {tournament} is closed ({status})")]
    RegistrationClosed {
        tournament: String,
        status: TournamentStatus,
    },

    #[error("{tournament} is full ({capacity} participants)")]
    TournamentFull { tournament: String, capacity: usize },

    #[error("Insufficient participants: need {needed}, have {current}")]
    InsufficientParticipants { needed: usize, current: usize },

    #[error("Cannot {action} a tournament that is {status}")]
    InvalidTournamentState {
        action: &'static str,
        status: TournamentStatus,
    },

    #[error("Cannot {action} a match that is {status}")]
    InvalidMatchState {
        action: &'static str,
        status: MatchStatus,
    },

    #[error("Penalty is {status}; only active penalties can be served or revoked")]
    InvalidPenaltyState { status: PenaltyStatus },

    #[error("Player {nickname} is banned and cannot {action}")]
    PlayerBanned {
        nickname: String,
        action: &'static str,
    },

    #[error("Player {0} is inactive")]
    PlayerInactive(String),

    #[error("Team {team} is not eligible: {reason}")]
    IncompleteTeam { team: String, reason: String },

    #[error("Team {team} reached the limit of {max} players for {game}")]
    TeamCapacity {
        team: String,
        game: String,
        max: usize,
    },

    #[error("{nickname} is already a member of {team}")]
    AlreadyMember { team: String, nickname: String },

    #[error("{nickname} is not a member of {team}")]
    NotAMember { team: String, nickname: String },

    #[error("Cannot remove captain {nickname} from {team}; reassign the captain first")]
    CaptainRemoval { team: String, nickname: String },

    #[error("'{participant}' is not enrolled in {tournament}")]
    NotEnrolled {
        tournament: String,
        participant: String,
    },

    #[error("'{0}' is not part of this match")]
    NotInMatch(String),

    /// `newly_banned` is false when the player was already banned before
    /// this penalty.
    #[error("Player {nickname} reached {active} active penalties and is now banned")]
    MaxPenaltiesReached {
        nickname: String,
        active: usize,
        newly_banned: bool,
    },
}

impl ArenaError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ArenaError::InvalidArgument(_)
            | ArenaError::UnknownPlayer(_)
            | ArenaError::UnknownTeam(_)
            | ArenaError::NotInMatch(_) => ErrorKind::Validation,

            ArenaError::PlayerNotFound(_)
            | ArenaError::TeamNotFound(_)
            | ArenaError::GameNotFound(_)
            | ArenaError::TournamentNotFound(_)
            | ArenaError::MatchNotFound(_)
            | ArenaError::PenaltyNotFound(_) => ErrorKind::NotFound,

            ArenaError::DuplicateNickname(_)
            | ArenaError::DuplicateTeamName(_)
            | ArenaError::DuplicateTeamTag(_)
            | ArenaError::DuplicateGame(_)
            | ArenaError::DuplicateTournament(_)
            | ArenaError::DuplicateParticipant { .. }
            | ArenaError::DuplicateMatch { .. } => ErrorKind::Conflict,

            ArenaError::RegistrationClosed { .. }
            | ArenaError::InsufficientParticipants { .. }
            | ArenaError::InvalidTournamentState { .. }
            | ArenaError::InvalidMatchState { .. }
            | ArenaError::InvalidPenaltyState { .. } => ErrorKind::StateConflict,

            ArenaError::TournamentFull { .. }
            | ArenaError::PlayerBanned { .. }
            | ArenaError::PlayerInactive(_)
            | ArenaError::IncompleteTeam { .. }
            | ArenaError::TeamCapacity { .. }
            | ArenaError::AlreadyMember { .. }
            | ArenaError::NotAMember { .. }
            | ArenaError::CaptainRemoval { .. }
            | ArenaError::NotEnrolled { .. } => ErrorKind::BusinessRule,

            ArenaError::MaxPenaltiesReached { .. } => ErrorKind::Escalation,
        }
    }

    /// Whether the error concerns a banned or inactive player
    pub fn is_player_restriction(&self) -> bool {
        matches!(
            self,
            ArenaError::PlayerBanned { .. }
                | ArenaError::PlayerInactive(_)
                | ArenaError::MaxPenaltiesReached { .. }
        )
    }

    /// Get a message that is safe to show to an end user
    ///
    /// Internal ids are not meaningful outside the process, so errors that
    /// only carry an id are reduced to a generic message.
    pub fn client_message(&self) -> String {
        match self {
            ArenaError::UnknownPlayer(_) => "Unknown player".to_string(),
            ArenaError::UnknownTeam(_) => "Unknown team".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for arena operations
pub type ArenaResult<T> = Result<T, ArenaError>;
