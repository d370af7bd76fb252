//! Report rows.

use crate::{entities::TournamentStatus, rating::Tier};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    /// 1-based
    pub position: usize,
    pub nickname: String,
    pub rating: u32,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinCount {
    pub nickname: String,
    pub wins: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamWinRate {
    pub team: String,
    pub wins: usize,
    pub matches: usize,
    /// `wins / matches`
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierCount {
    pub tier: Tier,
    pub players: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PenaltyCount {
    pub nickname: String,
    pub active_penalties: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveTournament {
    pub name: String,
    pub status: TournamentStatus,
    pub participants: Vec<String>,
}

/// Registry-wide counters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneralStats {
    pub players: usize,
    pub teams: usize,
    pub games: usize,
    pub tournaments: usize,
    pub active_tournaments: usize,
    pub matches: usize,
    pub finished_matches: usize,
    pub queued_players: usize,
    pub penalties: usize,
    pub active_penalties: usize,
    /// `None` with no players registered
    pub average_rating: Option<f64>,
}
