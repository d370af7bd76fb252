//! Registry state and the synchronous operations behind [`Registry`].
//!
//! Every method here runs under the registry lock held by the caller, so a
//! method either applies all of its changes or returns before touching
//! anything, except where noted (penalty escalation).
//!
//! [`Registry`]: super::Registry

use super::{
    matchmaking::MatchmakingQueue,
    models::{
        MatchSummary, ParticipantRef, PenaltySummary, PrizeSummary, RatingAdjustment,
        TeamConfig, TeamSummary, TournamentConfig, TournamentSummary,
    },
};
use crate::{
    ArenaError, ArenaResult,
    entities::{
        Game, Match, MatchId, Participant, ParticipantDirectory, Penalty, PenaltyId,
        PenaltyKind, Player, PlayerDirectory, PlayerId, Prize, Team, TeamId, Tournament,
        TournamentId, TournamentStatus, distribute,
    },
    rating::RatingChange,
};
use log::{debug, info, warn};
use std::{collections::BTreeMap, sync::Arc};

/// Active penalties that trigger a ban
pub const MAX_ACTIVE_PENALTIES: usize = 3;

/// Players and teams, keyed by registration order
#[derive(Debug, Default)]
pub(crate) struct Roster {
    pub(crate) players: BTreeMap<PlayerId, Player>,
    pub(crate) teams: BTreeMap<TeamId, Team>,
}

impl PlayerDirectory for Roster {
    fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }
}

impl ParticipantDirectory for Roster {
    fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(&id)
    }
}

/// Everything the registry owns
#[derive(Debug)]
pub(crate) struct RegistryState {
    pub(crate) roster: Roster,
    pub(crate) games: Vec<Arc<Game>>,
    pub(crate) tournaments: BTreeMap<TournamentId, Tournament>,
    pub(crate) matches: BTreeMap<MatchId, Match>,
    pub(crate) penalties: BTreeMap<PenaltyId, Penalty>,
    pub(crate) prizes: Vec<Prize>,
    pub(crate) queue: MatchmakingQueue,
    next_player_id: PlayerId,
    next_team_id: TeamId,
    next_tournament_id: TournamentId,
    next_match_id: MatchId,
    next_penalty_id: PenaltyId,
}

impl Default for RegistryState {
    fn default() -> Self {
        Self {
            roster: Roster::default(),
            games: Vec::new(),
            tournaments: BTreeMap::new(),
            matches: BTreeMap::new(),
            penalties: BTreeMap::new(),
            prizes: Vec::new(),
            queue: MatchmakingQueue::new(),
            next_player_id: 1,
            next_team_id: 1,
            next_tournament_id: 1,
            next_match_id: 1,
            next_penalty_id: 1,
        }
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn take_id(counter: &mut i64) -> i64 {
    let id = *counter;
    *counter += 1;
    id
}

impl RegistryState {
    // --- lookups ---

    pub(crate) fn player_id(&self, nickname: &str) -> Option<PlayerId> {
        self.roster
            .players
            .iter()
            .find(|(_, p)| same_name(p.nickname(), nickname))
            .map(|(id, _)| *id)
    }

    pub(crate) fn require_player_id(&self, nickname: &str) -> ArenaResult<PlayerId> {
        self.player_id(nickname)
            .ok_or_else(|| ArenaError::PlayerNotFound(nickname.to_string()))
    }

    pub(crate) fn team_id(&self, name: &str) -> Option<TeamId> {
        self.roster
            .teams
            .iter()
            .find(|(_, t)| same_name(t.name(), name))
            .map(|(id, _)| *id)
    }

    pub(crate) fn team_id_by_tag(&self, tag: &str) -> Option<TeamId> {
        self.roster
            .teams
            .iter()
            .find(|(_, t)| same_name(t.tag(), tag))
            .map(|(id, _)| *id)
    }

    fn require_team_id(&self, name: &str) -> ArenaResult<TeamId> {
        self.team_id(name)
            .ok_or_else(|| ArenaError::TeamNotFound(name.to_string()))
    }

    pub(crate) fn game(&self, name: &str) -> Option<&Arc<Game>> {
        self.games.iter().find(|g| same_name(g.name(), name))
    }

    pub(crate) fn tournament_id(&self, name: &str) -> Option<TournamentId> {
        self.tournaments
            .iter()
            .find(|(_, t)| same_name(t.name(), name))
            .map(|(id, _)| *id)
    }

    fn require_tournament_id(&self, name: &str) -> ArenaResult<TournamentId> {
        self.tournament_id(name)
            .ok_or_else(|| ArenaError::TournamentNotFound(name.to_string()))
    }

    fn tournament_mut(&mut self, name: &str) -> ArenaResult<&mut Tournament> {
        let id = self.require_tournament_id(name)?;
        self.tournaments
            .get_mut(&id)
            .ok_or_else(|| ArenaError::TournamentNotFound(name.to_string()))
    }

    fn player_mut(&mut self, nickname: &str) -> ArenaResult<&mut Player> {
        let id = self.require_player_id(nickname)?;
        self.roster
            .players
            .get_mut(&id)
            .ok_or(ArenaError::UnknownPlayer(id))
    }

    pub(crate) fn resolve(&self, participant: &ParticipantRef) -> ArenaResult<Participant> {
        match participant {
            ParticipantRef::Player(nickname) => {
                self.require_player_id(nickname).map(Participant::Player)
            }
            ParticipantRef::Team(name) => self.require_team_id(name).map(Participant::Team),
        }
    }

    pub(crate) fn display_name(&self, participant: Participant) -> String {
        participant
            .name(&self.roster)
            .map(str::to_string)
            .unwrap_or_else(|err| err.client_message())
    }

    pub(crate) fn nickname(&self, player: PlayerId) -> String {
        self.display_name(Participant::Player(player))
    }

    // --- registration ---

    pub(crate) fn register_player(&mut self, player: Player) -> ArenaResult<PlayerId> {
        if self.player_id(player.nickname()).is_some() {
            return Err(ArenaError::DuplicateNickname(player.nickname().to_string()));
        }

        let id = take_id(&mut self.next_player_id);
        info!("Registered player {} (id {id})", player.nickname());
        self.roster.players.insert(id, player);
        Ok(id)
    }

    pub(crate) fn register_game(&mut self, game: Game) -> ArenaResult<()> {
        if self.game(game.name()).is_some() {
            return Err(ArenaError::DuplicateGame(game.name().to_string()));
        }

        info!("Registered game {}", game.name());
        self.games.push(Arc::new(game));
        Ok(())
    }

    pub(crate) fn register_team(&mut self, config: TeamConfig) -> ArenaResult<TeamId> {
        let captain = self.require_player_id(&config.captain)?;
        let game = self
            .game(&config.game)
            .cloned()
            .ok_or_else(|| ArenaError::GameNotFound(config.game.clone()))?;
        let team = Team::new(config.name, config.tag, captain, game)?;

        if self.team_id(team.name()).is_some() {
            return Err(ArenaError::DuplicateTeamName(team.name().to_string()));
        }
        if self
            .roster
            .teams
            .values()
            .any(|t| same_name(t.tag(), team.tag()))
        {
            return Err(ArenaError::DuplicateTeamTag(team.tag().to_string()));
        }

        let id = take_id(&mut self.next_team_id);
        info!("Registered team [{}] {} (id {id})", team.tag(), team.name());
        self.roster.teams.insert(id, team);
        Ok(id)
    }

    pub(crate) fn create_tournament(
        &mut self,
        config: TournamentConfig,
    ) -> ArenaResult<TournamentId> {
        let game = self
            .game(&config.game)
            .cloned()
            .ok_or_else(|| ArenaError::GameNotFound(config.game.clone()))?;
        let tournament = Tournament::new(
            config.name,
            game,
            config.format,
            config.start_date,
            config.end_date,
            config.prize_pool,
        )?;

        if self.tournament_id(tournament.name()).is_some() {
            return Err(ArenaError::DuplicateTournament(
                tournament.name().to_string(),
            ));
        }

        let id = take_id(&mut self.next_tournament_id);
        info!("Created tournament {} (id {id})", tournament.name());
        self.tournaments.insert(id, tournament);
        Ok(id)
    }

    // --- players and teams ---

    pub(crate) fn deactivate_player(&mut self, nickname: &str) -> ArenaResult<()> {
        let id = self.require_player_id(nickname)?;
        self.player_mut(nickname)?.deactivate()?;
        if self.queue.leave(id) {
            debug!("Removed inactive player {nickname} from the matchmaking queue");
        }
        info!("Deactivated player {nickname}");
        Ok(())
    }

    pub(crate) fn reactivate_player(&mut self, nickname: &str) -> ArenaResult<()> {
        self.player_mut(nickname)?.reactivate()?;
        info!("Reactivated player {nickname}");
        Ok(())
    }

    /// Move a player's rating by hand, outside any match
    pub(crate) fn adjust_rating(
        &mut self,
        nickname: &str,
        points: i32,
        adjustment: RatingAdjustment,
    ) -> ArenaResult<Player> {
        let player = self.player_mut(nickname)?;
        let before = player.tier();
        match adjustment {
            RatingAdjustment::Gain => player.gain_rating(points)?,
            RatingAdjustment::Lose => player.lose_rating(points)?,
        }
        info!(
            "Adjusted rating of {nickname} by {adjustment:?} {points} to {}",
            player.rating()
        );
        if player.tier() != before {
            info!("{nickname} moved from {before} to {}", player.tier());
        }
        Ok(player.clone())
    }

    pub(crate) fn add_team_member(&mut self, team: &str, nickname: &str) -> ArenaResult<()> {
        let team_id = self.require_team_id(team)?;
        let player = self.require_player_id(nickname)?;
        let Roster { players, teams } = &mut self.roster;
        teams
            .get_mut(&team_id)
            .ok_or(ArenaError::UnknownTeam(team_id))?
            .add_member(player, &*players)?;
        info!("Added {nickname} to team {team}");
        Ok(())
    }

    pub(crate) fn remove_team_member(&mut self, team: &str, nickname: &str) -> ArenaResult<()> {
        let team_id = self.require_team_id(team)?;
        let player = self.require_player_id(nickname)?;
        let Roster { players, teams } = &mut self.roster;
        teams
            .get_mut(&team_id)
            .ok_or(ArenaError::UnknownTeam(team_id))?
            .remove_member(player, &*players)?;
        info!("Removed {nickname} from team {team}");
        Ok(())
    }

    pub(crate) fn reassign_captain(&mut self, team: &str, nickname: &str) -> ArenaResult<()> {
        let team_id = self.require_team_id(team)?;
        let player = self.require_player_id(nickname)?;
        let Roster { players, teams } = &mut self.roster;
        teams
            .get_mut(&team_id)
            .ok_or(ArenaError::UnknownTeam(team_id))?
            .reassign_captain(player, &*players)?;
        info!("{nickname} is now captain of {team}");
        Ok(())
    }

    // --- tournament lifecycle ---

    pub(crate) fn enroll(
        &mut self,
        tournament: &str,
        participant: &ParticipantRef,
    ) -> ArenaResult<()> {
        let participant = self.resolve(participant)?;
        let id = self.require_tournament_id(tournament)?;
        let entry = self
            .tournaments
            .get_mut(&id)
            .ok_or_else(|| ArenaError::TournamentNotFound(tournament.to_string()))?;
        entry.enroll(participant, &self.roster)?;
        let enrolled = entry.participants().len();

        info!(
            "Enrolled {} in {tournament} ({enrolled} participants)",
            self.display_name(participant)
        );
        Ok(())
    }

    pub(crate) fn start_tournament(&mut self, name: &str) -> ArenaResult<()> {
        let tournament = self.tournament_mut(name)?;
        tournament.start()?;
        info!(
            "Started tournament {} with {} participants",
            tournament.name(),
            tournament.participants().len()
        );
        Ok(())
    }

    /// Finish a tournament and award prizes from its standings
    pub(crate) fn finish_tournament(&mut self, name: &str) -> ArenaResult<Vec<PrizeSummary>> {
        let id = self.require_tournament_id(name)?;
        let tournament = self
            .tournaments
            .get_mut(&id)
            .ok_or_else(|| ArenaError::TournamentNotFound(name.to_string()))?;

        let standings = tournament.compute_standings();
        let prizes = distribute(id, tournament.prize_pool(), &standings, &self.roster)?;
        tournament.finish()?;

        if prizes.is_empty() {
            info!("Finished tournament {name}; no standings, no prizes awarded");
        } else {
            info!("Finished tournament {name}; awarded {} prizes", prizes.len());
        }

        let summaries = prizes.iter().map(|p| self.prize_summary(p)).collect();
        self.prizes.extend(prizes);
        Ok(summaries)
    }

    pub(crate) fn cancel_tournament(&mut self, name: &str) -> ArenaResult<()> {
        self.tournament_mut(name)?.cancel()?;
        info!("Cancelled tournament {name}");
        Ok(())
    }

    // --- matches ---

    /// Schedule a tournament match between two enrolled participants
    pub(crate) fn schedule_match(
        &mut self,
        tournament: &str,
        first: &ParticipantRef,
        second: &ParticipantRef,
        round: u32,
    ) -> ArenaResult<MatchId> {
        let first = self.resolve(first)?;
        let second = self.resolve(second)?;
        let tournament_id = self.require_tournament_id(tournament)?;
        let entry = self
            .tournaments
            .get(&tournament_id)
            .ok_or_else(|| ArenaError::TournamentNotFound(tournament.to_string()))?;

        if entry.status() != TournamentStatus::InProgress {
            return Err(ArenaError::InvalidTournamentState {
                action: "schedule matches for",
                status: entry.status(),
            });
        }
        for participant in [first, second] {
            if !entry.is_enrolled(&participant) {
                return Err(ArenaError::NotEnrolled {
                    tournament: entry.name().to_string(),
                    participant: self.display_name(participant),
                });
            }
        }

        let new_match = Match::new(Some(tournament_id), first, second, round)?;
        if self.matches.values().any(|m| *m == new_match) {
            return Err(ArenaError::DuplicateMatch { round });
        }

        let id = take_id(&mut self.next_match_id);
        info!(
            "Scheduled match {id}: {} vs {} (round {round} of {tournament})",
            self.display_name(first),
            self.display_name(second)
        );
        self.matches.insert(id, new_match);
        if let Some(entry) = self.tournaments.get_mut(&tournament_id) {
            entry.add_match(id);
        }
        Ok(id)
    }

    pub(crate) fn start_match(&mut self, id: MatchId) -> ArenaResult<()> {
        self.matches
            .get_mut(&id)
            .ok_or(ArenaError::MatchNotFound(id))?
            .start()?;
        info!("Match {id} started");
        Ok(())
    }

    fn roster_members(&self, id: MatchId) -> ArenaResult<[Vec<PlayerId>; 2]> {
        let entry = self.matches.get(&id).ok_or(ArenaError::MatchNotFound(id))?;
        Ok([
            entry.first().members(&self.roster)?,
            entry.second().members(&self.roster)?,
        ])
    }

    fn apply_rating_changes(
        &mut self,
        members: [Vec<PlayerId>; 2],
        changes: [RatingChange<Participant>; 2],
    ) -> ArenaResult<()> {
        for (ids, change) in members.into_iter().zip(changes) {
            for id in ids {
                self.roster
                    .players
                    .get_mut(&id)
                    .ok_or(ArenaError::UnknownPlayer(id))?
                    .apply_rating_delta(change.delta)?;
            }
        }
        Ok(())
    }

    /// Record a final score and update every constituent player's rating
    pub(crate) fn finalize_match(
        &mut self,
        id: MatchId,
        first_score: i32,
        second_score: i32,
    ) -> ArenaResult<MatchSummary> {
        let members = self.roster_members(id)?;
        let changes = self
            .matches
            .get_mut(&id)
            .ok_or(ArenaError::MatchNotFound(id))?
            .finish(first_score, second_score)?;
        self.apply_rating_changes(members, changes)?;

        let summary = self.match_summary(id)?;
        info!(
            "Match {id} finished {} {} x {} {}",
            summary.first, summary.first_score, summary.second_score, summary.second
        );
        Ok(summary)
    }

    /// Resolve a match as a walkover and run the penalty through escalation
    ///
    /// The walkover stands even when escalation reports a ban.
    pub(crate) fn record_walkover(
        &mut self,
        id: MatchId,
        absent: &ParticipantRef,
    ) -> ArenaResult<PenaltyId> {
        let absent = self.resolve(absent)?;
        let members = self.roster_members(id)?;
        let result = self
            .matches
            .get_mut(&id)
            .ok_or(ArenaError::MatchNotFound(id))?
            .walkover(absent, &self.roster)?;
        self.apply_rating_changes(members, result.changes)?;

        info!(
            "Match {id} resolved as walkover, {} absent",
            self.display_name(absent)
        );
        self.apply_penalty(result.penalty)
    }

    // --- penalties ---

    /// Record a penalty and ban its player on reaching the active limit
    ///
    /// # Errors
    ///
    /// `MaxPenaltiesReached` after the penalty has been recorded and the
    /// player banned.
    pub(crate) fn apply_penalty(&mut self, penalty: Penalty) -> ArenaResult<PenaltyId> {
        let player = penalty.player();
        if !self.roster.players.contains_key(&player) {
            return Err(ArenaError::UnknownPlayer(player));
        }

        let id = take_id(&mut self.next_penalty_id);
        info!(
            "Penalty {id} ({}) issued to {}: {}",
            penalty.kind(),
            self.nickname(player),
            penalty.description()
        );
        self.penalties.insert(id, penalty);

        let active = self.active_penalty_count(player);
        if active < MAX_ACTIVE_PENALTIES {
            return Ok(id);
        }

        let nickname = self.nickname(player);
        let newly_banned = self
            .roster
            .players
            .get_mut(&player)
            .is_some_and(Player::ban);
        if self.queue.leave(player) {
            debug!("Removed banned player {nickname} from the matchmaking queue");
        }
        if newly_banned {
            warn!("Player {nickname} banned after {active} active penalties");
        } else {
            debug!("Player {nickname} is already banned ({active} active penalties)");
        }
        Err(ArenaError::MaxPenaltiesReached {
            nickname,
            active,
            newly_banned,
        })
    }

    pub(crate) fn issue_penalty(
        &mut self,
        nickname: &str,
        kind: PenaltyKind,
        description: &str,
    ) -> ArenaResult<PenaltyId> {
        let player = self.require_player_id(nickname)?;
        let penalty = Penalty::new(player, kind, description)?;
        self.apply_penalty(penalty)
    }

    pub(crate) fn serve_penalty(&mut self, id: PenaltyId) -> ArenaResult<()> {
        self.penalties
            .get_mut(&id)
            .ok_or(ArenaError::PenaltyNotFound(id))?
            .serve()?;
        info!("Penalty {id} served");
        Ok(())
    }

    pub(crate) fn revoke_penalty(&mut self, id: PenaltyId) -> ArenaResult<()> {
        self.penalties
            .get_mut(&id)
            .ok_or(ArenaError::PenaltyNotFound(id))?
            .revoke()?;
        info!("Penalty {id} revoked");
        Ok(())
    }

    pub(crate) fn active_penalty_count(&self, player: PlayerId) -> usize {
        self.penalties
            .values()
            .filter(|p| p.player() == player && p.is_active())
            .count()
    }

    // --- matchmaking ---

    pub(crate) fn join_queue(&mut self, nickname: &str) -> ArenaResult<()> {
        let id = self.require_player_id(nickname)?;
        let player = self.roster.require_player(id)?;
        if player.is_banned() {
            return Err(ArenaError::PlayerBanned {
                nickname: player.nickname().to_string(),
                action: "join the matchmaking queue",
            });
        }
        if !player.is_active() {
            return Err(ArenaError::PlayerInactive(player.nickname().to_string()));
        }

        if self.queue.join(id) {
            info!(
                "{nickname} joined the matchmaking queue ({} waiting)",
                self.queue.len()
            );
        } else {
            debug!("{nickname} is already in the matchmaking queue");
        }
        Ok(())
    }

    /// Returns whether the player was waiting
    pub(crate) fn leave_queue(&mut self, nickname: &str) -> ArenaResult<bool> {
        let id = self.require_player_id(nickname)?;
        let left = self.queue.leave(id);
        if left {
            info!("{nickname} left the matchmaking queue");
        }
        Ok(left)
    }

    pub(crate) fn clear_queue(&mut self) -> usize {
        let cleared = self.queue.len();
        self.queue.clear();
        info!("Cleared the matchmaking queue ({cleared} players)");
        cleared
    }

    pub(crate) fn queue_nicknames(&self) -> Vec<String> {
        self.queue.iter().map(|id| self.nickname(id)).collect()
    }

    /// Pair compatible waiting players into standalone round-1 matches
    pub(crate) fn process_queue(&mut self) -> ArenaResult<Vec<MatchId>> {
        debug!("Scanning matchmaking queue ({} waiting)", self.queue.len());
        let roster = &self.roster;
        let pairs = self
            .queue
            .take_pairs(|id| roster.players.get(&id).map(Player::tier));

        let mut created = Vec::with_capacity(pairs.len());
        for (first, second) in pairs {
            let new_match = Match::new(
                None,
                Participant::Player(first),
                Participant::Player(second),
                1,
            )?;
            let id = take_id(&mut self.next_match_id);
            self.matches.insert(id, new_match);
            info!(
                "Matchmaking paired {} with {} (match {id})",
                self.nickname(first),
                self.nickname(second)
            );
            created.push(id);
        }
        Ok(created)
    }

    // --- views ---

    pub(crate) fn team_summary(&self, id: TeamId) -> Option<TeamSummary> {
        let team = self.roster.teams.get(&id)?;
        Some(TeamSummary {
            id,
            name: team.name().to_string(),
            tag: team.tag().to_string(),
            captain: self.nickname(team.captain()),
            game: team.game().name().to_string(),
            members: team.members().iter().map(|m| self.nickname(*m)).collect(),
        })
    }

    pub(crate) fn tournament_summary(&self, id: TournamentId) -> Option<TournamentSummary> {
        let tournament = self.tournaments.get(&id)?;
        Some(TournamentSummary {
            id,
            name: tournament.name().to_string(),
            game: tournament.game().name().to_string(),
            format: tournament.format(),
            start_date: tournament.start_date(),
            end_date: tournament.end_date(),
            prize_pool: tournament.prize_pool(),
            status: tournament.status(),
            participants: tournament
                .participants()
                .iter()
                .map(|p| self.display_name(*p))
                .collect(),
            matches: tournament.matches().to_vec(),
        })
    }

    pub(crate) fn match_summary(&self, id: MatchId) -> ArenaResult<MatchSummary> {
        let entry = self.matches.get(&id).ok_or(ArenaError::MatchNotFound(id))?;
        let (first_score, second_score) = entry.scores();
        Ok(MatchSummary {
            id,
            tournament: entry
                .tournament()
                .and_then(|t| self.tournaments.get(&t))
                .map(|t| t.name().to_string()),
            first: self.display_name(entry.first()),
            second: self.display_name(entry.second()),
            first_score,
            second_score,
            played_at: entry.played_at(),
            status: entry.status(),
            round: entry.round(),
            winner: entry.winner().map(|w| self.display_name(w)),
        })
    }

    pub(crate) fn penalty_summary(&self, id: PenaltyId) -> Option<PenaltySummary> {
        let penalty = self.penalties.get(&id)?;
        Some(PenaltySummary {
            id,
            player: penalty.player(),
            nickname: self.nickname(penalty.player()),
            kind: penalty.kind(),
            description: penalty.description().to_string(),
            issued_on: penalty.issued_on(),
            status: penalty.status(),
        })
    }

    pub(crate) fn prize_summary(&self, prize: &Prize) -> PrizeSummary {
        PrizeSummary {
            tournament: self
                .tournaments
                .get(&prize.tournament())
                .map(|t| t.name().to_string())
                .unwrap_or_default(),
            participant: self.display_name(prize.participant()),
            placement: prize.placement(),
            medal: prize.medal(),
            amount: prize.amount(),
            per_member_amount: prize.per_member_amount(),
        }
    }
}
