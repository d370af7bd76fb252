//! Pure rating computation for match outcomes.

use serde::{Deserialize, Serialize};

/// Points gained by every member of the winning side
pub const WIN_POINTS: i32 = 25;

/// Points lost by every member of the losing side
pub const LOSS_POINTS: i32 = 15;

/// Points gained by every member of both sides on a draw
pub const DRAW_POINTS: i32 = 5;

/// Points gained by every member of the side that showed up to a walkover
pub const WALKOVER_PRESENT_POINTS: i32 = 10;

/// Points lost by every member of the absent side of a walkover
pub const WALKOVER_ABSENT_POINTS: i32 = 30;

/// One of the two slots of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// The other slot
    pub fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

/// How a match ended, as far as ratings are concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// One side won on the scoreboard
    Decided { winner: Side },
    /// Equal scores
    Draw,
    /// One side did not show up
    Walkover { absent: Side },
}

/// Rating delta owed to one participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingChange<P> {
    pub participant: P,
    pub delta: i32,
}

impl<P> RatingChange<P> {
    fn new(participant: P, delta: i32) -> Self {
        Self { participant, delta }
    }
}

/// Compute the rating change of each side for an outcome
///
/// The returned array is always `[first, second]`. Deltas are meant to be
/// applied to every constituent player of the participant.
///
/// # Example
///
/// ```
/// use arena::rating::{apply_outcome, MatchOutcome, Side};
///
/// let [first, second] = apply_outcome(MatchOutcome::Decided { winner: Side::Second }, "a", "b");
/// assert_eq!(first.delta, -15);
/// assert_eq!(second.delta, 25);
/// ```
pub fn apply_outcome<P>(outcome: MatchOutcome, first: P, second: P) -> [RatingChange<P>; 2] {
    let (first_delta, second_delta) = match outcome {
        MatchOutcome::Decided { winner: Side::First } => (WIN_POINTS, -LOSS_POINTS),
        MatchOutcome::Decided {
            winner: Side::Second,
        } => (-LOSS_POINTS, WIN_POINTS),
        MatchOutcome::Draw => (DRAW_POINTS, DRAW_POINTS),
        MatchOutcome::Walkover { absent: Side::First } => {
            (-WALKOVER_ABSENT_POINTS, WALKOVER_PRESENT_POINTS)
        }
        MatchOutcome::Walkover {
            absent: Side::Second,
        } => (WALKOVER_PRESENT_POINTS, -WALKOVER_ABSENT_POINTS),
    };

    [
        RatingChange::new(first, first_delta),
        RatingChange::new(second, second_delta),
    ]
}
