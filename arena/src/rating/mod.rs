//! Rating engine and tier bands.
//!
//! Ratings are plain integers that move by fixed amounts per match outcome.
//! There is no expected-score model: every constituent player of a side
//! receives the same delta, independently of roster size.
//!
//! | Outcome            | First side | Second side |
//! |--------------------|-----------:|------------:|
//! | First wins         |        +25 |         -15 |
//! | Draw               |         +5 |          +5 |
//! | Second absent (WO) |        +10 |         -30 |
//!
//! The rating floor of zero is enforced by [`Player`](crate::entities::Player),
//! not here.

pub mod engine;
pub mod tier;

pub use engine::{
    DRAW_POINTS, LOSS_POINTS, MatchOutcome, RatingChange, Side, WALKOVER_ABSENT_POINTS,
    WALKOVER_PRESENT_POINTS, WIN_POINTS, apply_outcome,
};
pub use tier::Tier;
