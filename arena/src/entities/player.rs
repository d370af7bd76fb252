//! Player entity.

use super::require_text;
use crate::{ArenaError, ArenaResult, rating::Tier};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rating of a newly registered player
pub const INITIAL_RATING: u32 = 1000;

/// Player status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlayerStatus {
    Active,
    /// Temporarily out of competition; can be reactivated
    Inactive,
    /// Set by penalty escalation only; never lifted by the core
    Banned,
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerStatus::Active => write!(f, "ACTIVE"),
            PlayerStatus::Inactive => write!(f, "INACTIVE"),
            PlayerStatus::Banned => write!(f, "BANNED"),
        }
    }
}

/// A registered competitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    nickname: String,
    real_name: String,
    email: String,
    birth_date: NaiveDate,
    rating: u32,
    tier: Tier,
    status: PlayerStatus,
}

impl Player {
    /// Create a new active player at [`INITIAL_RATING`]
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the nickname or real name is empty, the email
    /// has no `@`, or the birth date is missing or in the future.
    pub fn new(
        nickname: impl Into<String>,
        real_name: impl Into<String>,
        email: impl Into<String>,
        birth_date: Option<NaiveDate>,
    ) -> ArenaResult<Self> {
        let nickname = nickname.into();
        let real_name = real_name.into();
        let email = email.into();

        require_text(&nickname, "Nickname")?;
        require_text(&real_name, "Real name")?;
        if !email.contains('@') {
            return Err(ArenaError::InvalidArgument(format!(
                "Invalid email: {email}"
            )));
        }
        let birth_date = match birth_date {
            Some(date) if date <= Utc::now().date_naive() => date,
            Some(date) => {
                return Err(ArenaError::InvalidArgument(format!(
                    "Birth date {date} is in the future"
                )));
            }
            None => {
                return Err(ArenaError::InvalidArgument(
                    "Birth date is required".to_string(),
                ));
            }
        };

        Ok(Self {
            nickname,
            real_name,
            email,
            birth_date,
            rating: INITIAL_RATING,
            tier: Tier::from_rating(INITIAL_RATING),
            status: PlayerStatus::Active,
        })
    }

    /// Add rating points and recompute the tier
    pub fn gain_rating(&mut self, points: i32) -> ArenaResult<()> {
        let points = non_negative_points(points)?;
        self.rating = self.rating.saturating_add(points);
        self.tier = Tier::from_rating(self.rating);
        Ok(())
    }

    /// Remove rating points and recompute the tier; the rating stops at zero
    pub fn lose_rating(&mut self, points: i32) -> ArenaResult<()> {
        let points = non_negative_points(points)?;
        self.rating = self.rating.saturating_sub(points);
        self.tier = Tier::from_rating(self.rating);
        Ok(())
    }

    /// Apply a signed delta as produced by the rating engine
    pub fn apply_rating_delta(&mut self, delta: i32) -> ArenaResult<()> {
        if delta >= 0 {
            self.gain_rating(delta)
        } else {
            self.lose_rating(delta.checked_neg().unwrap_or(i32::MAX))
        }
    }

    /// Mark an active player as inactive
    pub fn deactivate(&mut self) -> ArenaResult<()> {
        match self.status {
            PlayerStatus::Banned => Err(ArenaError::PlayerBanned {
                nickname: self.nickname.clone(),
                action: "change status",
            }),
            _ => {
                self.status = PlayerStatus::Inactive;
                Ok(())
            }
        }
    }

    /// Bring an inactive player back into competition
    pub fn reactivate(&mut self) -> ArenaResult<()> {
        match self.status {
            PlayerStatus::Banned => Err(ArenaError::PlayerBanned {
                nickname: self.nickname.clone(),
                action: "change status",
            }),
            _ => {
                self.status = PlayerStatus::Active;
                Ok(())
            }
        }
    }

    /// Returns false if the player was already banned
    pub(crate) fn ban(&mut self) -> bool {
        let changed = self.status != PlayerStatus::Banned;
        self.status = PlayerStatus::Banned;
        changed
    }

    pub fn is_banned(&self) -> bool {
        self.status == PlayerStatus::Banned
    }

    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn real_name(&self) -> &str {
        &self.real_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn rating(&self) -> u32 {
        self.rating
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {} [{}] - {}",
            self.nickname, self.real_name, self.rating, self.tier, self.status
        )
    }
}

fn non_negative_points(points: i32) -> ArenaResult<u32> {
    u32::try_from(points).map_err(|_| {
        ArenaError::InvalidArgument(format!("Rating points must not be negative: {points}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn birth() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2001, 5, 15)
    }

    fn player() -> Player {
        Player::new("aspas", "Erick Santos", "aspas@email.com", birth()).unwrap()
    }

    #[test]
    fn test_new_player_defaults() {
        let p = player();
        assert_eq!(p.rating(), INITIAL_RATING);
        assert_eq!(p.tier(), Tier::Silver);
        assert!(p.is_active());
        assert!(!p.is_banned());
    }

    #[test]
    fn test_new_player_validation() {
        assert!(matches!(
            Player::new("  ", "Name", "a@b.c", birth()),
            Err(ArenaError::InvalidArgument(_))
        ));
        assert!(matches!(
            Player::new("nick", "", "a@b.c", birth()),
            Err(ArenaError::InvalidArgument(_))
        ));
        assert!(matches!(
            Player::new("nick", "Name", "no-at-sign", birth()),
            Err(ArenaError::InvalidArgument(_))
        ));
        assert!(matches!(
            Player::new("nick", "Name", "a@b.c", None),
            Err(ArenaError::InvalidArgument(_))
        ));
        let tomorrow = Utc::now().date_naive() + Duration::days(1);
        assert!(matches!(
            Player::new("nick", "Name", "a@b.c", Some(tomorrow)),
            Err(ArenaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_gain_rating_updates_tier() {
        let mut p = player();
        p.gain_rating(600).unwrap();
        assert_eq!(p.rating(), 1600);
        assert_eq!(p.tier(), Tier::Gold);
    }

    #[test]
    fn test_lose_rating_floors_at_zero() {
        let mut p = player();
        p.lose_rating(5000).unwrap();
        assert_eq!(p.rating(), 0);
        assert_eq!(p.tier(), Tier::Bronze);
    }

    #[test]
    fn test_negative_points_rejected() {
        let mut p = player();
        assert!(matches!(
            p.gain_rating(-1),
            Err(ArenaError::InvalidArgument(_))
        ));
        assert!(matches!(
            p.lose_rating(-1),
            Err(ArenaError::InvalidArgument(_))
        ));
        assert_eq!(p.rating(), INITIAL_RATING);
    }

    #[test]
    fn test_apply_rating_delta() {
        let mut p = player();
        p.apply_rating_delta(25).unwrap();
        assert_eq!(p.rating(), 1025);
        p.apply_rating_delta(-30).unwrap();
        assert_eq!(p.rating(), 995);
        assert_eq!(p.tier(), Tier::Bronze);
        p.apply_rating_delta(i32::MIN).unwrap();
        assert_eq!(p.rating(), 0);
    }

    #[test]
    fn test_deactivate_and_reactivate() {
        let mut p = player();
        p.deactivate().unwrap();
        assert!(!p.is_active());
        assert!(!p.is_banned());
        p.reactivate().unwrap();
        assert!(p.is_active());
    }

    #[test]
    fn test_banned_status_is_sticky() {
        let mut p = player();
        p.ban();
        assert!(p.deactivate().is_err());
        assert!(p.reactivate().is_err());
        assert_eq!(p.status(), PlayerStatus::Banned);
    }
}
