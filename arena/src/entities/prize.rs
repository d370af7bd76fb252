//! Prize awards and the placement split.

use super::{Participant, ParticipantDirectory, TournamentId};
use crate::{ArenaError, ArenaResult};
use serde::{Deserialize, Serialize};

/// Share of the prize pool for each paid placement
pub const PRIZE_SPLIT: [(u32, f64); 3] = [(1, 0.50), (2, 0.30), (3, 0.20)];

/// Money awarded to one participant for a podium placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prize {
    tournament: TournamentId,
    participant: Participant,
    placement: u32,
    amount: f64,
    /// Roster size when the prize was awarded
    roster_size: usize,
}

impl Prize {
    /// Create a prize
    ///
    /// The roster size is captured now so the per-member share does not
    /// drift if the team changes later.
    pub fn new<D>(
        tournament: TournamentId,
        participant: Participant,
        placement: u32,
        amount: f64,
        directory: &D,
    ) -> ArenaResult<Self>
    where
        D: ParticipantDirectory + ?Sized,
    {
        if !(1..=3).contains(&placement) {
            return Err(ArenaError::InvalidArgument(format!(
                "Placement must be between 1 and 3, got {placement}"
            )));
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err(ArenaError::InvalidArgument(format!(
                "Prize amount cannot be negative, got {amount}"
            )));
        }

        let roster_size = participant.members(directory)?.len().max(1);
        Ok(Self {
            tournament,
            participant,
            placement,
            amount,
            roster_size,
        })
    }

    /// Amount each roster member receives
    pub fn per_member_amount(&self) -> f64 {
        self.amount / self.roster_size as f64
    }

    pub fn medal(&self) -> &'static str {
        match self.placement {
            1 => "🥇",
            2 => "🥈",
            3 => "🥉",
            _ => "",
        }
    }

    pub fn tournament(&self) -> TournamentId {
        self.tournament
    }

    pub fn participant(&self) -> Participant {
        self.participant
    }

    pub fn placement(&self) -> u32 {
        self.placement
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn roster_size(&self) -> usize {
        self.roster_size
    }
}

/// Split a prize pool across standings
///
/// Placements outside the podium get nothing.
pub fn distribute<D>(
    tournament: TournamentId,
    prize_pool: f64,
    standings: &[(Participant, u32)],
    directory: &D,
) -> ArenaResult<Vec<Prize>>
where
    D: ParticipantDirectory + ?Sized,
{
    standings
        .iter()
        .filter_map(|(participant, placement)| {
            PRIZE_SPLIT
                .iter()
                .find(|(paid, _)| paid == placement)
                .map(|(_, share)| (participant, placement, prize_pool * share))
        })
        .map(|(participant, placement, amount)| {
            Prize::new(tournament, *participant, *placement, amount, directory)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::participant::fixtures::TestDirectory;

    #[test]
    fn test_placement_and_amount_validation() {
        let mut dir = TestDirectory::default();
        let p = dir.add_player(1, "solo");
        assert!(Prize::new(1, p, 0, 10.0, &dir).is_err());
        assert!(Prize::new(1, p, 4, 10.0, &dir).is_err());
        assert!(Prize::new(1, p, 1, -0.5, &dir).is_err());
        assert!(Prize::new(1, p, 3, 0.0, &dir).is_ok());
    }

    #[test]
    fn test_per_member_amount() {
        let mut dir = TestDirectory::default();
        for id in 1..=4 {
            dir.add_player(id, &format!("p{id}"));
        }
        let team = dir.add_team(10, "Quad", &[1, 2, 3, 4]);
        let prize = Prize::new(1, team, 1, 1000.0, &dir).unwrap();
        assert_eq!(prize.per_member_amount(), 250.0);
        assert_eq!(prize.medal(), "🥇");

        let solo = Prize::new(1, Participant::Player(1), 2, 300.0, &dir).unwrap();
        assert_eq!(solo.per_member_amount(), 300.0);
    }

    #[test]
    fn test_distribute_split() {
        let mut dir = TestDirectory::default();
        let standings: Vec<_> = (1..=4)
            .map(|id| (dir.add_player(id, &format!("p{id}")), id as u32))
            .collect();

        let prizes = distribute(7, 10_000.0, &standings, &dir).unwrap();
        let amounts: Vec<_> = prizes.iter().map(|p| (p.placement(), p.amount())).collect();
        assert_eq!(amounts, vec![(1, 5000.0), (2, 3000.0), (3, 2000.0)]);
        assert!(prizes.iter().all(|p| p.tournament() == 7));
    }

    #[test]
    fn test_distribute_empty_standings() {
        let dir = TestDirectory::default();
        assert!(distribute(1, 500.0, &[], &dir).unwrap().is_empty());
    }
}
