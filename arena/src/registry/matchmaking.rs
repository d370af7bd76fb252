//! Matchmaking queue and first-fit tier pairing.

use crate::{entities::PlayerId, rating::Tier};
use std::collections::VecDeque;

/// FIFO queue of players waiting for a standalone match
#[derive(Debug, Clone, Default)]
pub struct MatchmakingQueue {
    waiting: VecDeque<PlayerId>,
}

impl MatchmakingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a player; returns `false` if they were already waiting
    pub fn join(&mut self, player: PlayerId) -> bool {
        if self.waiting.contains(&player) {
            return false;
        }
        self.waiting.push_back(player);
        true
    }

    /// Remove a player; returns `false` if they were not waiting
    pub fn leave(&mut self, player: PlayerId) -> bool {
        let before = self.waiting.len();
        self.waiting.retain(|id| *id != player);
        self.waiting.len() != before
    }

    pub fn clear(&mut self) {
        self.waiting.clear();
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.waiting.contains(&player)
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.waiting.iter().copied()
    }

    /// Pair waiting players and drop the paired ones from the queue
    ///
    /// `tier_of` resolves a player's current tier; players it cannot resolve
    /// stay in the queue unpaired.
    pub fn take_pairs<F>(&mut self, tier_of: F) -> Vec<(PlayerId, PlayerId)>
    where
        F: Fn(PlayerId) -> Option<Tier>,
    {
        let snapshot: Vec<_> = self
            .waiting
            .iter()
            .filter_map(|id| tier_of(*id).map(|tier| (*id, tier)))
            .collect();

        let pairs = pair_first_fit(&snapshot);
        self.waiting
            .retain(|id| !pairs.iter().any(|(a, b)| a == id || b == id));
        pairs
    }
}

/// Greedy first-fit pairing in queue order
///
/// Each unpaired entry, in order, is matched with the first later unpaired
/// entry whose tier is at most one band away. Earlier entries get priority.
/// Worst case is quadratic in the number of entries.
///
/// # Example
///
/// ```
/// use arena::{rating::Tier, registry::pair_first_fit};
///
/// let queue = [(1, Tier::Gold), (2, Tier::Bronze), (3, Tier::Gold)];
/// assert_eq!(pair_first_fit(&queue), vec![(1, 3)]);
/// ```
pub fn pair_first_fit<T: Copy>(waiting: &[(T, Tier)]) -> Vec<(T, T)> {
    let mut paired = vec![false; waiting.len()];
    let mut pairs = Vec::new();

    for i in 0..waiting.len() {
        if paired[i] {
            continue;
        }
        let (anchor, anchor_tier) = waiting[i];
        let partner = (i + 1..waiting.len())
            .find(|&j| !paired[j] && anchor_tier.is_compatible_with(waiting[j].1));
        if let Some(j) = partner {
            paired[i] = true;
            paired[j] = true;
            pairs.push((anchor, waiting[j].0));
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_is_idempotent() {
        let mut queue = MatchmakingQueue::new();
        assert!(queue.join(1));
        assert!(!queue.join(1));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_leave_and_clear() {
        let mut queue = MatchmakingQueue::new();
        queue.join(1);
        queue.join(2);
        assert!(queue.leave(1));
        assert!(!queue.leave(1));
        assert_eq!(queue.iter().collect::<Vec<_>>(), vec![2]);
        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_adjacent_tiers_pair() {
        let waiting = [(1, Tier::Silver), (2, Tier::Gold)];
        assert_eq!(pair_first_fit(&waiting), vec![(1, 2)]);
    }

    #[test]
    fn test_distant_tiers_do_not_pair() {
        let waiting = [(1, Tier::Bronze), (2, Tier::Gold), (3, Tier::Master)];
        assert!(pair_first_fit(&waiting).is_empty());
    }

    #[test]
    fn test_earlier_players_anchor_first() {
        let waiting = [
            (1, Tier::Gold),
            (2, Tier::Diamond),
            (3, Tier::Silver),
            (4, Tier::Master),
        ];
        // 1 takes 2, then 3 and 4 are three bands apart
        assert_eq!(pair_first_fit(&waiting), vec![(1, 2)]);
    }

    #[test]
    fn test_paired_players_are_not_reused() {
        let waiting = [(1, Tier::Gold), (2, Tier::Gold), (3, Tier::Gold)];
        assert_eq!(pair_first_fit(&waiting), vec![(1, 2)]);
    }

    #[test]
    fn test_take_pairs_leaves_unmatched_in_order() {
        let mut queue = MatchmakingQueue::new();
        for id in [10, 20, 30, 40] {
            queue.join(id);
        }
        let tiers = |id| match id {
            10 => Some(Tier::Gold),
            20 => Some(Tier::Bronze),
            30 => Some(Tier::Gold),
            _ => Some(Tier::Master),
        };

        assert_eq!(queue.take_pairs(tiers), vec![(10, 30)]);
        assert_eq!(queue.iter().collect::<Vec<_>>(), vec![20, 40]);
    }
}
