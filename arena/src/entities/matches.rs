//! Match entity and its status machine.

use super::{Participant, ParticipantDirectory, Penalty, PenaltyKind, PlayerId, TournamentId};
use crate::{
    ArenaError, ArenaResult,
    rating::{MatchOutcome, RatingChange, Side, apply_outcome},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Match status
///
/// `Scheduled -> InProgress -> Finished`, and `Scheduled | InProgress ->
/// Walkover`. `Finished` and `Walkover` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Finished,
    Walkover,
}

impl MatchStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, MatchStatus::Finished | MatchStatus::Walkover)
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStatus::Scheduled => write!(f, "SCHEDULED"),
            MatchStatus::InProgress => write!(f, "IN_PROGRESS"),
            MatchStatus::Finished => write!(f, "FINISHED"),
            MatchStatus::Walkover => write!(f, "WALKOVER"),
        }
    }
}

/// What a walkover hands back to the caller
///
/// The match does not touch players or the penalty ledger itself.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkoverResult {
    pub changes: [RatingChange<Participant>; 2],
    pub penalty: Penalty,
}

/// A game between two distinct participants
///
/// `tournament` is `None` for standalone matchmaking matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    tournament: Option<TournamentId>,
    first: Participant,
    second: Participant,
    first_score: u32,
    second_score: u32,
    played_at: DateTime<Utc>,
    status: MatchStatus,
    round: u32,
    winner: Option<Participant>,
}

impl Match {
    pub fn new(
        tournament: Option<TournamentId>,
        first: Participant,
        second: Participant,
        round: u32,
    ) -> ArenaResult<Self> {
        if first == second {
            return Err(ArenaError::InvalidArgument(
                "A match needs two different participants".to_string(),
            ));
        }
        if round == 0 {
            return Err(ArenaError::InvalidArgument(
                "Rounds are numbered from 1".to_string(),
            ));
        }

        Ok(Self {
            tournament,
            first,
            second,
            first_score: 0,
            second_score: 0,
            played_at: Utc::now(),
            status: MatchStatus::Scheduled,
            round,
            winner: None,
        })
    }

    /// Begin play; the timestamp moves to now
    pub fn start(&mut self) -> ArenaResult<()> {
        if self.status != MatchStatus::Scheduled {
            return Err(ArenaError::InvalidMatchState {
                action: "start",
                status: self.status,
            });
        }
        self.status = MatchStatus::InProgress;
        self.played_at = Utc::now();
        Ok(())
    }

    /// Record the final score
    ///
    /// Returns the rating change owed to each side. The higher score wins;
    /// equal scores are a draw with no winner.
    ///
    /// # Errors
    ///
    /// `InvalidMatchState` if the match already ended, then
    /// `InvalidArgument` for a negative score.
    pub fn finish(
        &mut self,
        first_score: i32,
        second_score: i32,
    ) -> ArenaResult<[RatingChange<Participant>; 2]> {
        self.ensure_open("finish")?;
        let (Ok(first_score), Ok(second_score)) =
            (u32::try_from(first_score), u32::try_from(second_score))
        else {
            return Err(ArenaError::InvalidArgument(format!(
                "Scores cannot be negative ({first_score} x {second_score})"
            )));
        };

        let outcome = match first_score.cmp(&second_score) {
            std::cmp::Ordering::Greater => MatchOutcome::Decided {
                winner: Side::First,
            },
            std::cmp::Ordering::Less => MatchOutcome::Decided {
                winner: Side::Second,
            },
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        };

        self.first_score = first_score;
        self.second_score = second_score;
        self.status = MatchStatus::Finished;
        self.winner = match outcome {
            MatchOutcome::Decided { winner } => Some(self.participant(winner)),
            _ => None,
        };

        Ok(apply_outcome(outcome, self.first, self.second))
    }

    /// Resolve the match as a walkover against `absent`
    ///
    /// The side that showed up becomes the winner. The returned penalty
    /// targets the first roster member of the absent side.
    ///
    /// # Errors
    ///
    /// `InvalidMatchState` if the match already ended, then `NotInMatch`
    /// when `absent` is neither participant.
    pub fn walkover<D>(&mut self, absent: Participant, directory: &D) -> ArenaResult<WalkoverResult>
    where
        D: ParticipantDirectory + ?Sized,
    {
        self.ensure_open("record a walkover for")?;
        let Some(absent_side) = self.side_of(&absent) else {
            return Err(ArenaError::NotInMatch(absent.name(directory)?.to_string()));
        };
        let present = self.participant(absent_side.opponent());

        let Some(&offender) = absent.members(directory)?.first() else {
            return Err(ArenaError::InvalidArgument(format!(
                "{} has no players to penalize",
                absent.name(directory)?
            )));
        };
        let penalty = Penalty::new(
            offender,
            PenaltyKind::Walkover,
            format!("Walkover in the match against {}", present.name(directory)?),
        )?;

        self.status = MatchStatus::Walkover;
        self.winner = Some(present);

        Ok(WalkoverResult {
            changes: apply_outcome(
                MatchOutcome::Walkover {
                    absent: absent_side,
                },
                self.first,
                self.second,
            ),
            penalty,
        })
    }

    fn ensure_open(&self, action: &'static str) -> ArenaResult<()> {
        if self.status.is_terminal() {
            return Err(ArenaError::InvalidMatchState {
                action,
                status: self.status,
            });
        }
        Ok(())
    }

    fn participant(&self, side: Side) -> Participant {
        match side {
            Side::First => self.first,
            Side::Second => self.second,
        }
    }

    /// Which slot `participant` occupies, if any
    pub fn side_of(&self, participant: &Participant) -> Option<Side> {
        if *participant == self.first {
            Some(Side::First)
        } else if *participant == self.second {
            Some(Side::Second)
        } else {
            None
        }
    }

    /// Whether either side fields `player`
    pub fn involves_player<D>(&self, player: PlayerId, directory: &D) -> bool
    where
        D: ParticipantDirectory + ?Sized,
    {
        self.first.includes(player, directory) || self.second.includes(player, directory)
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn is_draw(&self) -> bool {
        self.status == MatchStatus::Finished && self.first_score == self.second_score
    }

    pub fn tournament(&self) -> Option<TournamentId> {
        self.tournament
    }

    pub fn first(&self) -> Participant {
        self.first
    }

    pub fn second(&self) -> Participant {
        self.second
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.first_score, self.second_score)
    }

    pub fn played_at(&self) -> DateTime<Utc> {
        self.played_at
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn winner(&self) -> Option<Participant> {
        self.winner
    }
}

/// Same tournament, same ordered pair, same round
impl PartialEq for Match {
    fn eq(&self, other: &Self) -> bool {
        self.tournament == other.tournament
            && self.first == other.first
            && self.second == other.second
            && self.round == other.round
    }
}

impl Eq for Match {}
