//! Read-only projections of a game for rendering.
//!
//! `PublicView` is safe to broadcast: it never names a spy before the game
//! is over. `RoleView` is meant for a single requester.

use serde::{Deserialize, Serialize};

use crate::core::{Phase, Player, PlayerId};
use crate::rules::{MissionCard, Round, Score, Side};

/// "X of Y voted".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub cast: usize,
    pub expected: usize,
}

impl Tally {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cast >= self.expected
    }
}

/// What a player is told about their own role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleView {
    Resistance,
    /// The requester is a spy; the other spies in seat order.
    Spy { fellow_spies: Vec<PlayerId> },
}

impl RoleView {
    #[must_use]
    pub fn is_spy(&self) -> bool {
        matches!(self, RoleView::Spy { .. })
    }
}

/// Public record of one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub number: u8,
    pub party_size: usize,
    pub fails_required: usize,
    pub proposals: usize,
    pub mission_party: Option<Vec<PlayerId>>,
    /// Only once the mission is complete.
    pub sabotage_count: Option<usize>,
    pub winner: Option<Side>,
}

impl From<&Round> for RoundSummary {
    fn from(round: &Round) -> Self {
        Self {
            number: round.number(),
            party_size: round.party_size(),
            fails_required: round.fails_required(),
            proposals: round.votes().len(),
            mission_party: round.mission_party().map(<[PlayerId]>::to_vec),
            sabotage_count: round
                .mission_complete()
                .then(|| round.sabotage_count()),
            winner: round.outcome(),
        }
    }
}

/// Everything every player is allowed to know.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicView {
    pub phase: Phase,
    pub players: Vec<Player>,
    pub round: Option<u8>,
    pub leader: Option<PlayerId>,
    pub party_size: Option<usize>,
    pub fails_required: Option<usize>,
    /// Proposals left in the current round, including the pending one.
    /// `None` once a party has been approved.
    pub proposals_left: Option<usize>,
    pub current_party: Option<Vec<PlayerId>>,
    pub party_vote: Option<Tally>,
    /// Individual party ballots, once the vote has closed.
    pub party_ballots: Option<Vec<(PlayerId, bool)>>,
    pub mission_vote: Option<Tally>,
    pub score: Score,
    pub rounds: Vec<RoundSummary>,
    pub winner: Option<Side>,
    /// Filled in once the game is over.
    pub spies: Option<Vec<PlayerId>>,
}

/// The cards of a finished mission, shuffled so nobody can tell who
/// played which.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionReveal {
    pub round: u8,
    pub cards: Vec<MissionCard>,
    pub winner: Side,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_complete() {
        assert!(!Tally { cast: 2, expected: 5 }.is_complete());
        assert!(Tally { cast: 5, expected: 5 }.is_complete());
    }

    #[test]
    fn test_role_view_serde() {
        let role = RoleView::Spy {
            fellow_spies: vec![PlayerId(3)],
        };
        assert!(role.is_spy());
        let json = serde_json::to_string(&role).unwrap();
        let back: RoleView = serde_json::from_str(&json).unwrap();
        assert_eq!(role, back);
        assert!(!RoleView::Resistance.is_spy());
    }

    #[test]
    fn test_round_summary_of_open_round() {
        let round = Round::new(2, 3, 1, 5);
        let summary = RoundSummary::from(&round);
        assert_eq!(summary.number, 2);
        assert_eq!(summary.proposals, 0);
        assert_eq!(summary.mission_party, None);
        assert_eq!(summary.sabotage_count, None);
        assert_eq!(summary.winner, None);
    }
}
