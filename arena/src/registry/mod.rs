//! Tournament registry: the orchestrator that owns every entity.
//!
//! The registry enforces registry-wide uniqueness (nicknames, team names and
//! tags, game and tournament names, all ignoring case), coordinates
//! operations that touch several entities, and runs the matchmaking queue.
//! Entities are addressed by their unique name, except matches and
//! penalties, which are addressed by id.

pub mod manager;
pub mod matchmaking;
pub mod models;
pub(crate) mod state;

pub use manager::Registry;
pub use matchmaking::{MatchmakingQueue, pair_first_fit};
pub use models::{
    GameConfig, MatchSummary, ParticipantRef, PenaltySummary, PrizeSummary, RatingAdjustment,
    TeamConfig, TeamSummary, TournamentConfig, TournamentSummary,
};
pub use state::MAX_ACTIVE_PENALTIES;
