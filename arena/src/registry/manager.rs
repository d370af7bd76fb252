//! Shared, lock-protected registry.

use super::{
    models::{
        MatchSummary, ParticipantRef, PenaltySummary, PrizeSummary, RatingAdjustment,
        TeamConfig, TeamSummary, TournamentConfig, TournamentSummary,
    },
    state::RegistryState,
};
use crate::{
    ArenaResult,
    entities::{
        Game, MatchId, PenaltyId, PenaltyKind, Player, PlayerId, TeamId, TournamentId,
    },
    rating::Tier,
};
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard};

/// The authoritative in-memory registry
///
/// Cloning is cheap and every clone shares the same state. Each mutating
/// operation holds the write lock from its first check to its last change,
/// so concurrent callers never observe or interleave with a half-applied
/// operation. Lookups, listings and reports take the read lock.
#[derive(Clone, Default)]
pub struct Registry {
    state: Arc<RwLock<RegistryState>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().await
    }

    // --- registration ---

    /// Register a player
    ///
    /// # Arguments
    ///
    /// * `player` - Validated player; nicknames are unique ignoring case
    ///
    /// # Returns
    ///
    /// * `ArenaResult<PlayerId>` - Id of the new player, or `DuplicateNickname`
    pub async fn register_player(&self, player: Player) -> ArenaResult<PlayerId> {
        self.state.write().await.register_player(player)
    }

    pub async fn register_game(&self, game: Game) -> ArenaResult<()> {
        self.state.write().await.register_game(game)
    }

    /// Register a team with its captain as the only member
    ///
    /// # Returns
    ///
    /// * `ArenaResult<TeamId>` - Id of the new team, or a duplicate name or
    ///   tag error
    pub async fn register_team(&self, config: TeamConfig) -> ArenaResult<TeamId> {
        self.state.write().await.register_team(config)
    }

    pub async fn create_tournament(&self, config: TournamentConfig) -> ArenaResult<TournamentId> {
        self.state.write().await.create_tournament(config)
    }

    // --- players and teams ---

    pub async fn deactivate_player(&self, nickname: &str) -> ArenaResult<()> {
        self.state.write().await.deactivate_player(nickname)
    }

    pub async fn reactivate_player(&self, nickname: &str) -> ArenaResult<()> {
        self.state.write().await.reactivate_player(nickname)
    }

    /// Adjust a player's rating by hand
    ///
    /// # Arguments
    ///
    /// * `points` - Non-negative amount; losses stop at zero
    ///
    /// # Returns
    ///
    /// * `ArenaResult<Player>` - The player with the new rating and tier
    pub async fn adjust_rating(
        &self,
        nickname: &str,
        points: i32,
        adjustment: RatingAdjustment,
    ) -> ArenaResult<Player> {
        self.state
            .write()
            .await
            .adjust_rating(nickname, points, adjustment)
    }

    pub async fn add_team_member(&self, team: &str, nickname: &str) -> ArenaResult<()> {
        self.state.write().await.add_team_member(team, nickname)
    }

    pub async fn remove_team_member(&self, team: &str, nickname: &str) -> ArenaResult<()> {
        self.state.write().await.remove_team_member(team, nickname)
    }

    pub async fn reassign_captain(&self, team: &str, nickname: &str) -> ArenaResult<()> {
        self.state.write().await.reassign_captain(team, nickname)
    }

    // --- tournament lifecycle ---

    pub async fn enroll(&self, tournament: &str, participant: &ParticipantRef) -> ArenaResult<()> {
        self.state.write().await.enroll(tournament, participant)
    }

    pub async fn start_tournament(&self, name: &str) -> ArenaResult<()> {
        self.state.write().await.start_tournament(name)
    }

    /// Finish a tournament and distribute its prize pool
    ///
    /// Standings are not computed yet, so the returned list is empty and no
    /// prize is recorded.
    pub async fn finish_tournament(&self, name: &str) -> ArenaResult<Vec<PrizeSummary>> {
        self.state.write().await.finish_tournament(name)
    }

    pub async fn cancel_tournament(&self, name: &str) -> ArenaResult<()> {
        self.state.write().await.cancel_tournament(name)
    }

    // --- matches ---

    /// Schedule a match inside an in-progress tournament
    ///
    /// Both participants must be enrolled, and the same ordered pair cannot
    /// meet twice in one round.
    pub async fn schedule_match(
        &self,
        tournament: &str,
        first: &ParticipantRef,
        second: &ParticipantRef,
        round: u32,
    ) -> ArenaResult<MatchId> {
        self.state
            .write()
            .await
            .schedule_match(tournament, first, second, round)
    }

    pub async fn start_match(&self, id: MatchId) -> ArenaResult<()> {
        self.state.write().await.start_match(id)
    }

    /// Record a final score; ratings of every constituent player move
    pub async fn finalize_match(
        &self,
        id: MatchId,
        first_score: i32,
        second_score: i32,
    ) -> ArenaResult<MatchSummary> {
        self.state
            .write()
            .await
            .finalize_match(id, first_score, second_score)
    }

    /// Resolve a match as a walkover against `absent`
    ///
    /// # Returns
    ///
    /// * `ArenaResult<PenaltyId>` - The walkover penalty. `MaxPenaltiesReached`
    ///   means the walkover and penalty were recorded and the penalized player
    ///   is now banned.
    pub async fn record_walkover(
        &self,
        id: MatchId,
        absent: &ParticipantRef,
    ) -> ArenaResult<PenaltyId> {
        self.state.write().await.record_walkover(id, absent)
    }

    // --- penalties ---

    /// Issue a penalty; the third active one bans the player
    pub async fn issue_penalty(
        &self,
        nickname: &str,
        kind: PenaltyKind,
        description: &str,
    ) -> ArenaResult<PenaltyId> {
        self.state
            .write()
            .await
            .issue_penalty(nickname, kind, description)
    }

    pub async fn serve_penalty(&self, id: PenaltyId) -> ArenaResult<()> {
        self.state.write().await.serve_penalty(id)
    }

    pub async fn revoke_penalty(&self, id: PenaltyId) -> ArenaResult<()> {
        self.state.write().await.revoke_penalty(id)
    }

    // --- matchmaking ---

    pub async fn join_queue(&self, nickname: &str) -> ArenaResult<()> {
        self.state.write().await.join_queue(nickname)
    }

    pub async fn leave_queue(&self, nickname: &str) -> ArenaResult<bool> {
        self.state.write().await.leave_queue(nickname)
    }

    /// Empty the queue, returning how many players were waiting
    pub async fn clear_queue(&self) -> usize {
        self.state.write().await.clear_queue()
    }

    /// Waiting nicknames in queue order
    pub async fn view_queue(&self) -> Vec<String> {
        self.state.read().await.queue_nicknames()
    }

    /// Run one pairing pass over the queue
    ///
    /// The scan and the queue update happen under one write lock, so two
    /// concurrent passes never pair the same player twice.
    pub async fn process_queue(&self) -> ArenaResult<Vec<MatchId>> {
        self.state.write().await.process_queue()
    }

    // --- lookups ---

    pub async fn find_player(&self, nickname: &str) -> Option<Player> {
        let state = self.state.read().await;
        let id = state.player_id(nickname)?;
        state.roster.players.get(&id).cloned()
    }

    pub async fn find_team(&self, name: &str) -> Option<TeamSummary> {
        let state = self.state.read().await;
        state.team_id(name).and_then(|id| state.team_summary(id))
    }

    pub async fn find_team_by_tag(&self, tag: &str) -> Option<TeamSummary> {
        let state = self.state.read().await;
        state
            .team_id_by_tag(tag)
            .and_then(|id| state.team_summary(id))
    }

    pub async fn find_game(&self, name: &str) -> Option<Game> {
        let state = self.state.read().await;
        state.game(name).map(|game| Game::clone(game))
    }

    pub async fn find_tournament(&self, name: &str) -> Option<TournamentSummary> {
        let state = self.state.read().await;
        state
            .tournament_id(name)
            .and_then(|id| state.tournament_summary(id))
    }

    pub async fn find_match(&self, id: MatchId) -> Option<MatchSummary> {
        self.state.read().await.match_summary(id).ok()
    }

    pub async fn find_penalty(&self, id: PenaltyId) -> Option<PenaltySummary> {
        self.state.read().await.penalty_summary(id)
    }

    // --- listings ---

    pub async fn players(&self) -> Vec<Player> {
        self.state.read().await.roster.players.values().cloned().collect()
    }

    /// Players currently in `tier`, in registration order
    pub async fn players_in_tier(&self, tier: Tier) -> Vec<Player> {
        self.state
            .read()
            .await
            .roster
            .players
            .values()
            .filter(|p| p.tier() == tier)
            .cloned()
            .collect()
    }

    pub async fn teams(&self) -> Vec<TeamSummary> {
        let state = self.state.read().await;
        state
            .roster
            .teams
            .keys()
            .filter_map(|id| state.team_summary(*id))
            .collect()
    }

    pub async fn games(&self) -> Vec<Game> {
        let state = self.state.read().await;
        state.games.iter().map(|game| Game::clone(game)).collect()
    }

    pub async fn tournaments(&self) -> Vec<TournamentSummary> {
        let state = self.state.read().await;
        state
            .tournaments
            .keys()
            .filter_map(|id| state.tournament_summary(*id))
            .collect()
    }

    /// Tournaments open for registration or in progress
    pub async fn active_tournaments(&self) -> Vec<TournamentSummary> {
        let state = self.state.read().await;
        state
            .tournaments
            .iter()
            .filter(|(_, t)| t.is_active())
            .filter_map(|(id, _)| state.tournament_summary(*id))
            .collect()
    }

    pub async fn matches(&self) -> Vec<MatchSummary> {
        let state = self.state.read().await;
        state
            .matches
            .keys()
            .filter_map(|id| state.match_summary(*id).ok())
            .collect()
    }

    pub async fn penalties(&self) -> Vec<PenaltySummary> {
        let state = self.state.read().await;
        state
            .penalties
            .keys()
            .filter_map(|id| state.penalty_summary(*id))
            .collect()
    }

    pub async fn prizes(&self) -> Vec<PrizeSummary> {
        let state = self.state.read().await;
        state.prizes.iter().map(|p| state.prize_summary(p)).collect()
    }
}
