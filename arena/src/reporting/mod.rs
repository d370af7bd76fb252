//! Read-only reports over the registry.
//!
//! Nothing here is cached; every call aggregates the current state.

pub mod engine;
pub mod models;

pub use engine::{ReportingEngine, TOP_N};
pub use models::{
    ActiveTournament, GeneralStats, PenaltyCount, RankingEntry, TeamWinRate, TierCount, WinCount,
};
