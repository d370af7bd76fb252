//! Read-only aggregation over the registry.

use super::models::{
    ActiveTournament, GeneralStats, PenaltyCount, RankingEntry, TeamWinRate, TierCount, WinCount,
};
use crate::{
    ArenaResult,
    entities::{Match, MatchStatus, Participant, PlayerId, TeamId},
    rating::Tier,
    registry::{MatchSummary, Registry},
};
use std::collections::BTreeMap;

/// Number of rows in ranked reports
pub const TOP_N: usize = 10;

fn counts_toward_record(m: &Match) -> bool {
    matches!(m.status(), MatchStatus::Finished | MatchStatus::Walkover)
}

/// Sort `(id, count)` rows by count, most first, keeping id order on ties
fn rank_by_count<K: Ord + Copy>(counts: BTreeMap<K, usize>) -> Vec<(K, usize)> {
    let mut rows: Vec<_> = counts.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows
}

/// Reports computed fresh from the registry on every call
///
/// Each report takes the registry read lock once, so it always reflects a
/// single consistent state. Ranked reports break ties by registration order,
/// oldest first.
#[derive(Clone)]
pub struct ReportingEngine {
    registry: Registry,
}

impl ReportingEngine {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Top ten players by rating
    pub async fn ranking(&self) -> Vec<RankingEntry> {
        let state = self.registry.read().await;
        let mut players: Vec<_> = state.roster.players.values().collect();
        players.sort_by(|a, b| b.rating().cmp(&a.rating()));

        players
            .into_iter()
            .take(TOP_N)
            .enumerate()
            .map(|(index, player)| RankingEntry {
                position: index + 1,
                nickname: player.nickname().to_string(),
                rating: player.rating(),
                tier: player.tier(),
            })
            .collect()
    }

    /// Top ten players by wins
    ///
    /// Every member of a winning team is credited with the win.
    pub async fn top_wins(&self) -> Vec<WinCount> {
        let state = self.registry.read().await;
        let mut wins: BTreeMap<PlayerId, usize> = BTreeMap::new();

        for winner in state
            .matches
            .values()
            .filter(|m| counts_toward_record(m))
            .filter_map(Match::winner)
        {
            for member in winner.members(&state.roster).unwrap_or_default() {
                *wins.entry(member).or_default() += 1;
            }
        }

        rank_by_count(wins)
            .into_iter()
            .take(TOP_N)
            .map(|(id, wins)| WinCount {
                nickname: state.nickname(id),
                wins,
            })
            .collect()
    }

    /// Win rate of every team that played a finished match, best first
    pub async fn team_win_rates(&self) -> Vec<TeamWinRate> {
        let state = self.registry.read().await;
        let mut records: BTreeMap<TeamId, (usize, usize)> = BTreeMap::new();

        for m in state.matches.values().filter(|m| counts_toward_record(m)) {
            for side in [m.first(), m.second()] {
                if let Participant::Team(id) = side {
                    let (wins, played) = records.entry(id).or_default();
                    *played += 1;
                    if m.winner() == Some(side) {
                        *wins += 1;
                    }
                }
            }
        }

        let mut rows: Vec<_> = records
            .into_iter()
            .map(|(id, (wins, matches))| TeamWinRate {
                team: state.display_name(Participant::Team(id)),
                wins,
                matches,
                win_rate: wins as f64 / matches as f64,
            })
            .collect();
        rows.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate));
        rows
    }

    /// Players per tier, every tier listed in tier order
    pub async fn tier_distribution(&self) -> Vec<TierCount> {
        let state = self.registry.read().await;
        Tier::ALL
            .iter()
            .map(|tier| TierCount {
                tier: *tier,
                players: state
                    .roster
                    .players
                    .values()
                    .filter(|p| p.tier() == *tier)
                    .count(),
            })
            .collect()
    }

    pub async fn general_stats(&self) -> GeneralStats {
        let state = self.registry.read().await;
        let players = &state.roster.players;
        let average_rating = (!players.is_empty()).then(|| {
            players.values().map(|p| f64::from(p.rating())).sum::<f64>() / players.len() as f64
        });

        GeneralStats {
            players: players.len(),
            teams: state.roster.teams.len(),
            games: state.games.len(),
            tournaments: state.tournaments.len(),
            active_tournaments: state.tournaments.values().filter(|t| t.is_active()).count(),
            matches: state.matches.len(),
            finished_matches: state
                .matches
                .values()
                .filter(|m| m.status() == MatchStatus::Finished)
                .count(),
            queued_players: state.queue.len(),
            penalties: state.penalties.len(),
            active_penalties: state.penalties.values().filter(|p| p.is_active()).count(),
            average_rating,
        }
    }

    /// Top ten players by active penalties
    pub async fn most_penalized(&self) -> Vec<PenaltyCount> {
        let state = self.registry.read().await;
        let mut counts: BTreeMap<PlayerId, usize> = BTreeMap::new();
        for penalty in state.penalties.values().filter(|p| p.is_active()) {
            *counts.entry(penalty.player()).or_default() += 1;
        }

        rank_by_count(counts)
            .into_iter()
            .take(TOP_N)
            .map(|(id, active_penalties)| PenaltyCount {
                nickname: state.nickname(id),
                active_penalties,
            })
            .collect()
    }

    /// Open or running tournaments with their participants
    pub async fn active_tournaments(&self) -> Vec<ActiveTournament> {
        let state = self.registry.read().await;
        state
            .tournaments
            .values()
            .filter(|t| t.is_active())
            .map(|t| ActiveTournament {
                name: t.name().to_string(),
                status: t.status(),
                participants: t
                    .participants()
                    .iter()
                    .map(|p| state.display_name(*p))
                    .collect(),
            })
            .collect()
    }

    /// Every match the player took part in, alone or with a team, newest first
    pub async fn player_history(&self, nickname: &str) -> ArenaResult<Vec<MatchSummary>> {
        let state = self.registry.read().await;
        let player = state.require_player_id(nickname)?;

        let mut history: Vec<_> = state
            .matches
            .iter()
            .filter(|(_, m)| m.involves_player(player, &state.roster))
            .collect();
        history.sort_by(|(a_id, a), (b_id, b)| {
            b.played_at().cmp(&a.played_at()).then(b_id.cmp(a_id))
        });

        history
            .into_iter()
            .map(|(id, _)| state.match_summary(*id))
            .collect()
    }

    /// Share of the player's matches they won; 0.0 without any match
    pub async fn player_win_rate(&self, nickname: &str) -> ArenaResult<f64> {
        let state = self.registry.read().await;
        let player = state.require_player_id(nickname)?;

        let history: Vec<_> = state
            .matches
            .values()
            .filter(|m| m.involves_player(player, &state.roster))
            .collect();
        if history.is_empty() {
            return Ok(0.0);
        }

        let wins = history
            .iter()
            .filter(|m| counts_toward_record(m))
            .filter(|m| {
                m.winner()
                    .is_some_and(|w| w.includes(player, &state.roster))
            })
            .count();
        Ok(wins as f64 / history.len() as f64)
    }
}
