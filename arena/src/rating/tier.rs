//! Tier bands derived from rating.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Skill tier, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    /// 0 - 999
    Bronze,
    /// 1000 - 1499
    Silver,
    /// 1500 - 1999
    Gold,
    /// 2000 - 2499
    Diamond,
    /// 2500 and above
    Master,
}

impl Tier {
    /// Every tier in ascending order
    pub const ALL: [Tier; 5] = [
        Tier::Bronze,
        Tier::Silver,
        Tier::Gold,
        Tier::Diamond,
        Tier::Master,
    ];

    /// Tier whose band contains `rating`
    pub fn from_rating(rating: u32) -> Self {
        match rating {
            0..=999 => Tier::Bronze,
            1000..=1499 => Tier::Silver,
            1500..=1999 => Tier::Gold,
            2000..=2499 => Tier::Diamond,
            _ => Tier::Master,
        }
    }

    /// Position in the tier order (Bronze = 0)
    pub fn rank(self) -> u8 {
        match self {
            Tier::Bronze => 0,
            Tier::Silver => 1,
            Tier::Gold => 2,
            Tier::Diamond => 3,
            Tier::Master => 4,
        }
    }

    /// Lowest rating in this band
    pub fn min_rating(self) -> u32 {
        match self {
            Tier::Bronze => 0,
            Tier::Silver => 1000,
            Tier::Gold => 1500,
            Tier::Diamond => 2000,
            Tier::Master => 2500,
        }
    }

    /// Highest rating in this band, `None` for the open-ended top tier
    pub fn max_rating(self) -> Option<u32> {
        match self {
            Tier::Bronze => Some(999),
            Tier::Silver => Some(1499),
            Tier::Gold => Some(1999),
            Tier::Diamond => Some(2499),
            Tier::Master => None,
        }
    }

    /// Whether two tiers are close enough to be paired (at most one band apart)
    pub fn is_compatible_with(self, other: Tier) -> bool {
        self.rank().abs_diff(other.rank()) <= 1
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Bronze => write!(f, "BRONZE"),
            Tier::Silver => write!(f, "SILVER"),
            Tier::Gold => write!(f, "GOLD"),
            Tier::Diamond => write!(f, "DIAMOND"),
            Tier::Master => write!(f, "MASTER"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(Tier::from_rating(0), Tier::Bronze);
        assert_eq!(Tier::from_rating(999), Tier::Bronze);
        assert_eq!(Tier::from_rating(1000), Tier::Silver);
        assert_eq!(Tier::from_rating(1499), Tier::Silver);
        assert_eq!(Tier::from_rating(1500), Tier::Gold);
        assert_eq!(Tier::from_rating(2000), Tier::Diamond);
        assert_eq!(Tier::from_rating(2499), Tier::Diamond);
        assert_eq!(Tier::from_rating(2500), Tier::Master);
        assert_eq!(Tier::from_rating(u32::MAX), Tier::Master);
    }

    #[test]
    fn test_bands_are_contiguous() {
        for pair in Tier::ALL.windows(2) {
            let upper = pair[0].max_rating().unwrap();
            assert_eq!(upper + 1, pair[1].min_rating());
            assert_eq!(Tier::from_rating(pair[1].min_rating()), pair[1]);
        }
    }

    #[test]
    fn test_compatibility() {
        assert!(Tier::Gold.is_compatible_with(Tier::Gold));
        assert!(Tier::Gold.is_compatible_with(Tier::Silver));
        assert!(Tier::Gold.is_compatible_with(Tier::Diamond));
        assert!(!Tier::Gold.is_compatible_with(Tier::Bronze));
        assert!(!Tier::Bronze.is_compatible_with(Tier::Master));
    }

    #[test]
    fn test_order_matches_rank() {
        let mut sorted = Tier::ALL;
        sorted.sort();
        assert_eq!(sorted, Tier::ALL);
        assert!(Tier::Bronze < Tier::Master);
    }
}
