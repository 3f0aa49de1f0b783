//! Sides, mission cards and the round score.

use serde::{Deserialize, Serialize};

/// The two teams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Resistance,
    Spies,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Resistance => f.write_str("resistance"),
            Side::Spies => f.write_str("spies"),
        }
    }
}

/// A mission ballot. Red is success, black is sabotage.
///
/// Only spies may play `Sabotage`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionCard {
    Success,
    Sabotage,
}

impl MissionCard {
    #[must_use]
    pub const fn is_sabotage(self) -> bool {
        matches!(self, MissionCard::Sabotage)
    }
}

impl From<bool> for MissionCard {
    /// `true` is a success (red) card.
    fn from(success: bool) -> Self {
        if success {
            MissionCard::Success
        } else {
            MissionCard::Sabotage
        }
    }
}

/// Rounds won by each side so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub resistance: usize,
    pub spies: usize,
}

impl Score {
    /// Tally decided round results.
    pub fn tally(results: impl IntoIterator<Item = Side>) -> Self {
        results.into_iter().fold(Self::default(), |mut score, side| {
            match side {
                Side::Resistance => score.resistance += 1,
                Side::Spies => score.spies += 1,
            }
            score
        })
    }

    /// The side that reached `win_limit`, if any.
    #[must_use]
    pub fn winner(&self, win_limit: usize) -> Option<Side> {
        if self.resistance >= win_limit {
            Some(Side::Resistance)
        } else if self.spies >= win_limit {
            Some(Side::Spies)
        } else {
            None
        }
    }
}
