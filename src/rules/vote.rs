//! Party approval vote.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PartyMembers, PlayerId, RuleResult, RuleViolation};

/// One proposal and the ballots cast on it.
///
/// Ballots keep the order they were cast in. The proposal passes on a
/// strict majority; a tie rejects it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    members: PartyMembers,
    ballots: SmallVec<[(PlayerId, bool); 10]>,
    electorate: usize,
}

impl Vote {
    /// Open a vote on `members`, expecting `electorate` ballots.
    #[must_use]
    pub fn new(members: PartyMembers, electorate: usize) -> Self {
        Self {
            members,
            ballots: SmallVec::new(),
            electorate,
        }
    }

    /// The proposed party, in proposal order.
    #[must_use]
    pub fn members(&self) -> &[PlayerId] {
        &self.members
    }

    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        self.members.contains(&player)
    }

    /// Record a ballot. `true` approves the party.
    pub fn cast_ballot(&mut self, player: PlayerId, approve: bool) -> RuleResult<()> {
        if self.ballot(player).is_some() {
            return Err(RuleViolation::DuplicateVote(player));
        }
        self.ballots.push((player, approve));
        Ok(())
    }

    /// The ballot `player` cast, if any.
    #[must_use]
    pub fn ballot(&self, player: PlayerId) -> Option<bool> {
        self.ballots
            .iter()
            .find(|(voter, _)| *voter == player)
            .map(|&(_, approve)| approve)
    }

    /// Ballots in the order they were cast.
    #[must_use]
    pub fn ballots(&self) -> &[(PlayerId, bool)] {
        &self.ballots
    }

    #[must_use]
    pub fn approvals(&self) -> usize {
        self.ballots.iter().filter(|(_, approve)| *approve).count()
    }

    #[must_use]
    pub fn rejections(&self) -> usize {
        self.ballots.len() - self.approvals()
    }

    /// Number of ballots expected.
    #[must_use]
    pub fn electorate(&self) -> usize {
        self.electorate
    }

    /// True once every expected ballot is in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.ballots.len() >= self.electorate
    }

    /// Majority of the ballots cast so far approve.
    #[must_use]
    pub fn outcome(&self) -> bool {
        self.approvals() > self.rejections()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote() -> Vote {
        Vote::new(SmallVec::from_slice(&[PlayerId(0), PlayerId(1)]), 5)
    }

    #[test]
    fn test_majority_approves() {
        let mut vote = vote();
        for (i, approve) in [true, true, false, true, false].into_iter().enumerate() {
            vote.cast_ballot(PlayerId(i as u64), approve).unwrap();
        }

        assert!(vote.is_complete());
        assert_eq!(vote.approvals(), 3);
        assert_eq!(vote.rejections(), 2);
        assert!(vote.outcome());
    }

    #[test]
    fn test_tie_rejects() {
        let mut vote = Vote::new(SmallVec::from_slice(&[PlayerId(0)]), 6);
        for i in 0..6u64 {
            vote.cast_ballot(PlayerId(i), i % 2 == 0).unwrap();
        }
        assert_eq!(vote.approvals(), vote.rejections());
        assert!(!vote.outcome());
    }

    #[test]
    fn test_empty_vote_rejects() {
        assert!(!vote().outcome());
        assert!(!vote().is_complete());
    }

    #[test]
    fn test_duplicate_ballot_rejected() {
        let mut vote = vote();
        vote.cast_ballot(PlayerId(3), true).unwrap();

        assert_eq!(
            vote.cast_ballot(PlayerId(3), false),
            Err(RuleViolation::DuplicateVote(PlayerId(3)))
        );
        assert_eq!(vote.ballot(PlayerId(3)), Some(true));
        assert_eq!(vote.ballots().len(), 1);
    }

    #[test]
    fn test_ballot_order_preserved() {
        let mut vote = vote();
        for id in [4, 0, 2] {
            vote.cast_ballot(PlayerId(id), id != 0).unwrap();
        }
        let order: Vec<_> = vote.ballots().iter().map(|(p, _)| p.0).collect();
        assert_eq!(order, vec![4, 0, 2]);
    }

    #[test]
    fn test_members() {
        let vote = vote();
        assert_eq!(vote.members(), &[PlayerId(0), PlayerId(1)]);
        assert!(vote.contains(PlayerId(1)));
        assert!(!vote.contains(PlayerId(2)));
    }
}
