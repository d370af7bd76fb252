//! Tournament entity and its status machine.

use super::{Game, MatchId, Participant, ParticipantDirectory, require_text};
use crate::{ArenaError, ArenaResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

/// Fewest participants a tournament can start with
pub const MIN_PARTICIPANTS: usize = 4;

/// Most participants a tournament accepts
pub const MAX_PARTICIPANTS: usize = 32;

/// Tournament status
///
/// `RegistrationOpen -> InProgress -> Finished`, and any non-finished
/// status may move to `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentStatus {
    RegistrationOpen,
    InProgress,
    Finished,
    Cancelled,
}

impl TournamentStatus {
    /// Whether the tournament still accepts or plays matches
    pub fn is_active(self) -> bool {
        matches!(
            self,
            TournamentStatus::RegistrationOpen | TournamentStatus::InProgress
        )
    }
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentStatus::RegistrationOpen => write!(f, "REGISTRATION_OPEN"),
            TournamentStatus::InProgress => write!(f, "IN_PROGRESS"),
            TournamentStatus::Finished => write!(f, "FINISHED"),
            TournamentStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Bracket format; informational until standings are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentFormat {
    SingleElimination,
    DoubleElimination,
    RoundRobin,
    Swiss,
}

impl fmt::Display for TournamentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentFormat::SingleElimination => write!(f, "SINGLE_ELIMINATION"),
            TournamentFormat::DoubleElimination => write!(f, "DOUBLE_ELIMINATION"),
            TournamentFormat::RoundRobin => write!(f, "ROUND_ROBIN"),
            TournamentFormat::Swiss => write!(f, "SWISS"),
        }
    }
}

/// A competition between enrolled participants
#[derive(Debug, Clone, PartialEq)]
pub struct Tournament {
    name: String,
    game: Arc<Game>,
    format: TournamentFormat,
    start_date: NaiveDate,
    end_date: NaiveDate,
    prize_pool: f64,
    status: TournamentStatus,
    participants: Vec<Participant>,
    matches: Vec<MatchId>,
}

impl Tournament {
    /// Create a tournament open for registration
    ///
    /// # Arguments
    ///
    /// * `name` - Unique display name
    /// * `game` - Game played; its per-team cap applies at enrollment
    /// * `format` - Bracket format
    /// * `start_date`, `end_date` - Inclusive schedule, end not before start
    /// * `prize_pool` - Total prize money, finite and not negative
    pub fn new(
        name: impl Into<String>,
        game: Arc<Game>,
        format: TournamentFormat,
        start_date: NaiveDate,
        end_date: NaiveDate,
        prize_pool: f64,
    ) -> ArenaResult<Self> {
        let name = name.into();
        require_text(&name, "Tournament name")?;

        if end_date < start_date {
            return Err(ArenaError::InvalidArgument(format!(
                "End date {end_date} is before start date {start_date}"
            )));
        }
        if !prize_pool.is_finite() || prize_pool < 0.0 {
            return Err(ArenaError::InvalidArgument(format!(
                "Prize pool must be a non-negative amount, got {prize_pool}"
            )));
        }

        Ok(Self {
            name,
            game,
            format,
            start_date,
            end_date,
            prize_pool,
            status: TournamentStatus::RegistrationOpen,
            participants: Vec::new(),
            matches: Vec::new(),
        })
    }

    /// Enroll a participant
    ///
    /// Checks run in a fixed order: registration status, capacity, each
    /// constituent player's status, team eligibility, and finally
    /// duplicates. The first failing check is reported.
    pub fn enroll<D>(&mut self, participant: Participant, directory: &D) -> ArenaResult<()>
    where
        D: ParticipantDirectory + ?Sized,
    {
        if self.status != TournamentStatus::RegistrationOpen {
            return Err(ArenaError::RegistrationClosed {
                tournament: self.name.clone(),
                status: self.status,
            });
        }

        if self.participants.len() >= MAX_PARTICIPANTS {
            return Err(ArenaError::TournamentFull {
                tournament: self.name.clone(),
                capacity: MAX_PARTICIPANTS,
            });
        }

        for id in participant.members(directory)? {
            let player = directory.require_player(id)?;
            if player.is_banned() {
                return Err(ArenaError::PlayerBanned {
                    nickname: player.nickname().to_string(),
                    action: "enter tournaments",
                });
            }
            if !player.is_active() {
                return Err(ArenaError::PlayerInactive(player.nickname().to_string()));
            }
        }

        if let Participant::Team(id) = participant {
            let team = directory.require_team(id)?;
            if !team.all_members_active(directory) {
                return Err(ArenaError::IncompleteTeam {
                    team: team.name().to_string(),
                    reason: "not all members are active".to_string(),
                });
            }
            let cap = self.game.max_players_per_team();
            if team.size() > cap {
                return Err(ArenaError::IncompleteTeam {
                    team: team.name().to_string(),
                    reason: format!(
                        "roster has {} players, {} allows {cap}",
                        team.size(),
                        self.game.name()
                    ),
                });
            }
        }

        if self.participants.contains(&participant) {
            return Err(ArenaError::DuplicateParticipant {
                tournament: self.name.clone(),
                participant: participant.name(directory)?.to_string(),
            });
        }

        self.participants.push(participant);
        Ok(())
    }

    /// Close registration and begin play
    pub fn start(&mut self) -> ArenaResult<()> {
        if self.status != TournamentStatus::RegistrationOpen {
            return Err(ArenaError::InvalidTournamentState {
                action: "start",
                status: self.status,
            });
        }
        if self.participants.len() < MIN_PARTICIPANTS {
            return Err(ArenaError::InsufficientParticipants {
                needed: MIN_PARTICIPANTS,
                current: self.participants.len(),
            });
        }

        self.status = TournamentStatus::InProgress;
        Ok(())
    }

    pub fn finish(&mut self) -> ArenaResult<()> {
        if self.status != TournamentStatus::InProgress {
            return Err(ArenaError::InvalidTournamentState {
                action: "finish",
                status: self.status,
            });
        }

        self.status = TournamentStatus::Finished;
        Ok(())
    }

    /// Cancel from any status except `Finished`
    pub fn cancel(&mut self) -> ArenaResult<()> {
        if self.status == TournamentStatus::Finished {
            return Err(ArenaError::InvalidTournamentState {
                action: "cancel",
                status: self.status,
            });
        }

        self.status = TournamentStatus::Cancelled;
        Ok(())
    }

    /// Final placements, best first
    ///
    /// Bracket resolution is not implemented, so this is always empty and
    /// prize distribution driven by it is a no-op.
    pub fn compute_standings(&self) -> Vec<(Participant, u32)> {
        Vec::new()
    }

    pub fn add_match(&mut self, id: MatchId) {
        self.matches.push(id);
    }

    pub fn is_enrolled(&self, participant: &Participant) -> bool {
        self.participants.contains(participant)
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn format(&self) -> TournamentFormat {
        self.format
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn prize_pool(&self) -> f64 {
        self.prize_pool
    }

    pub fn status(&self) -> TournamentStatus {
        self.status
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn matches(&self) -> &[MatchId] {
        &self.matches
    }
}

impl fmt::Display for Tournament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} - {} ({}) - {}/{} participants - prize pool {:.2}",
            self.status,
            self.name,
            self.game.name(),
            self.format,
            self.participants.len(),
            MAX_PARTICIPANTS,
            self.prize_pool
        )
    }
}
