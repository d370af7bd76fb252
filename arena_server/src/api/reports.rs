//! Read-only report handlers.

use super::AppState;
use arena::reporting::{
    ActiveTournament, GeneralStats, PenaltyCount, RankingEntry, TeamWinRate, TierCount, WinCount,
};
use axum::{Json, extract::State};

pub async fn ranking(State(state): State<AppState>) -> Json<Vec<RankingEntry>> {
    Json(state.reports.ranking().await)
}

pub async fn top_wins(State(state): State<AppState>) -> Json<Vec<WinCount>> {
    Json(state.reports.top_wins().await)
}

pub async fn team_win_rates(State(state): State<AppState>) -> Json<Vec<TeamWinRate>> {
    Json(state.reports.team_win_rates().await)
}

pub async fn tier_distribution(State(state): State<AppState>) -> Json<Vec<TierCount>> {
    Json(state.reports.tier_distribution().await)
}

pub async fn general_stats(State(state): State<AppState>) -> Json<GeneralStats> {
    Json(state.reports.general_stats().await)
}

pub async fn most_penalized(State(state): State<AppState>) -> Json<Vec<PenaltyCount>> {
    Json(state.reports.most_penalized().await)
}

pub async fn active_tournaments(State(state): State<AppState>) -> Json<Vec<ActiveTournament>> {
    Json(state.reports.active_tournaments().await)
}
