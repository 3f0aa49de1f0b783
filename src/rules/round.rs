//! One mission attempt.
//!
//! A round collects party votes until one passes or the vote limit is
//! reached, then collects mission cards from the approved party.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::outcome::{MissionCard, Side};
use super::vote::Vote;
use crate::core::{PlayerId, RuleResult, RuleViolation};

/// A round of play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    number: u8,
    party_size: usize,
    fails_required: usize,
    vote_limit: usize,
    votes: SmallVec<[Vote; 5]>,
    mission_ballots: SmallVec<[(PlayerId, MissionCard); 5]>,
}

impl Round {
    /// Open round `number` (1-based).
    #[must_use]
    pub fn new(number: u8, party_size: usize, fails_required: usize, vote_limit: usize) -> Self {
        Self {
            number,
            party_size,
            fails_required,
            vote_limit,
            votes: SmallVec::new(),
            mission_ballots: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn number(&self) -> u8 {
        self.number
    }

    /// Members every proposal in this round must have.
    #[must_use]
    pub fn party_size(&self) -> usize {
        self.party_size
    }

    /// Sabotage cards needed to fail the mission.
    #[must_use]
    pub fn fails_required(&self) -> usize {
        self.fails_required
    }

    /// Proposals made so far, oldest first.
    #[must_use]
    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    #[must_use]
    pub fn last_vote(&self) -> Option<&Vote> {
        self.votes.last()
    }

    pub(crate) fn last_vote_mut(&mut self) -> Option<&mut Vote> {
        self.votes.last_mut()
    }

    /// True while another proposal may be made.
    #[must_use]
    pub fn can_still_vote(&self) -> bool {
        self.votes.len() < self.vote_limit
    }

    pub(crate) fn push_vote(&mut self, vote: Vote) {
        self.votes.push(vote);
    }

    /// The proposal that sent a party on the mission.
    #[must_use]
    pub fn approved_vote(&self) -> Option<&Vote> {
        self.last_vote().filter(|v| v.is_complete() && v.outcome())
    }

    /// The approved mission party.
    #[must_use]
    pub fn mission_party(&self) -> Option<&[PlayerId]> {
        self.approved_vote().map(Vote::members)
    }

    /// The vote limit was reached without approving a party.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        !self.can_still_vote()
            && self
                .last_vote()
                .is_some_and(|v| v.is_complete() && !v.outcome())
    }

    /// Record a mission card.
    ///
    /// Only checks the round's own bookkeeping (party membership and
    /// duplicates). Whether the player may sabotage is up to the caller.
    pub fn cast_mission_ballot(&mut self, player: PlayerId, card: MissionCard) -> RuleResult<()> {
        if self.mission_ballot(player).is_some() {
            return Err(RuleViolation::DuplicateVote(player));
        }
        let in_party = self
            .mission_party()
            .is_some_and(|party| party.contains(&player));
        if !in_party {
            return Err(RuleViolation::NotPartyMember(player));
        }
        self.mission_ballots.push((player, card));
        Ok(())
    }

    #[must_use]
    pub fn mission_ballot(&self, player: PlayerId) -> Option<MissionCard> {
        self.mission_ballots
            .iter()
            .find(|(voter, _)| *voter == player)
            .map(|&(_, card)| card)
    }

    /// Mission cards in the order they were played.
    ///
    /// The order reveals who played what; shuffle before showing it.
    #[must_use]
    pub fn mission_ballots(&self) -> &[(PlayerId, MissionCard)] {
        &self.mission_ballots
    }

    #[must_use]
    pub fn sabotage_count(&self) -> usize {
        self.mission_ballots
            .iter()
            .filter(|(_, card)| card.is_sabotage())
            .count()
    }

    /// Every member of the approved party has played a card.
    #[must_use]
    pub fn mission_complete(&self) -> bool {
        self.mission_party()
            .is_some_and(|party| self.mission_ballots.len() >= party.len())
    }

    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.outcome().is_some()
    }

    /// The side that won this round, once it is decided.
    ///
    /// Spies win by exhaustion, or when at least `fails_required` sabotage
    /// cards were played. `None` while votes or mission cards are pending.
    #[must_use]
    pub fn outcome(&self) -> Option<Side> {
        if self.is_exhausted() {
            return Some(Side::Spies);
        }
        if !self.mission_complete() {
            return None;
        }
        if self.sabotage_count() < self.fails_required {
            Some(Side::Resistance)
        } else {
            Some(Side::Spies)
        }
    }
}
