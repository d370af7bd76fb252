//! Penalty records.

use super::{PlayerId, require_text};
use crate::{ArenaError, ArenaResult};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason a penalty was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PenaltyKind {
    Walkover,
    Behavior,
    Cheating,
    Late,
}

impl fmt::Display for PenaltyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PenaltyKind::Walkover => write!(f, "WALKOVER"),
            PenaltyKind::Behavior => write!(f, "BEHAVIOR"),
            PenaltyKind::Cheating => write!(f, "CHEATING"),
            PenaltyKind::Late => write!(f, "LATE"),
        }
    }
}

/// Penalty status. Only `Active` penalties count toward a ban.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PenaltyStatus {
    Active,
    Served,
    Revoked,
}

impl fmt::Display for PenaltyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PenaltyStatus::Active => write!(f, "ACTIVE"),
            PenaltyStatus::Served => write!(f, "SERVED"),
            PenaltyStatus::Revoked => write!(f, "REVOKED"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Penalty {
    player: PlayerId,
    kind: PenaltyKind,
    description: String,
    issued_on: NaiveDate,
    status: PenaltyStatus,
}

impl Penalty {
    /// Create an active penalty issued today
    pub fn new(
        player: PlayerId,
        kind: PenaltyKind,
        description: impl Into<String>,
    ) -> ArenaResult<Self> {
        let description = description.into();
        require_text(&description, "Penalty description")?;

        Ok(Self {
            player,
            kind,
            description,
            issued_on: Utc::now().date_naive(),
            status: PenaltyStatus::Active,
        })
    }

    pub fn serve(&mut self) -> ArenaResult<()> {
        self.transition(PenaltyStatus::Served)
    }

    pub fn revoke(&mut self) -> ArenaResult<()> {
        self.transition(PenaltyStatus::Revoked)
    }

    fn transition(&mut self, to: PenaltyStatus) -> ArenaResult<()> {
        if self.status != PenaltyStatus::Active {
            return Err(ArenaError::InvalidPenaltyState {
                status: self.status,
            });
        }
        self.status = to;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status == PenaltyStatus::Active
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn kind(&self) -> PenaltyKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn issued_on(&self) -> NaiveDate {
        self.issued_on
    }

    pub fn status(&self) -> PenaltyStatus {
        self.status
    }
}
