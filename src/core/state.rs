//! Game phases.
//!
//! ```text
//! NotStarted -> ProposalPending -> PartyVoteInProgress -> PartyVoteResults
//!   PartyVoteResults -> MissionVoteInProgress | ProposalPending | GameOver
//!   MissionVoteInProgress -> MissionVoteResults
//!   MissionVoteResults -> ProposalPending | GameOver
//! ```
//!
//! `advance` drives the `NotStarted`, `PartyVoteResults` and
//! `MissionVoteResults` edges. Every other edge is taken by the vote
//! methods themselves.

use serde::{Deserialize, Serialize};

/// Current phase of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    NotStarted,
    /// Waiting for the leader to propose a party.
    ProposalPending,
    /// Every player votes on the proposed party.
    PartyVoteInProgress,
    /// All party ballots are in; waiting for `advance`.
    PartyVoteResults,
    /// Members of the approved party play mission cards.
    MissionVoteInProgress,
    /// All mission cards are in; waiting for `advance`.
    MissionVoteResults,
    /// Terminal.
    GameOver,
}

impl Phase {
    /// True between the start and the end of the game.
    #[must_use]
    pub const fn is_running(self) -> bool {
        !matches!(self, Phase::NotStarted | Phase::GameOver)
    }

    /// True while a party proposal is on the table.
    #[must_use]
    pub const fn has_proposal(self) -> bool {
        matches!(self, Phase::PartyVoteInProgress | Phase::PartyVoteResults)
    }

    /// True once a party has been proposed in this cycle (party vote or
    /// mission).
    #[must_use]
    pub const fn has_party(self) -> bool {
        matches!(
            self,
            Phase::PartyVoteInProgress
                | Phase::PartyVoteResults
                | Phase::MissionVoteInProgress
                | Phase::MissionVoteResults
        )
    }

    /// True if `advance` is the legal way out of this phase.
    #[must_use]
    pub const fn is_driver_advanceable(self) -> bool {
        matches!(
            self,
            Phase::NotStarted | Phase::PartyVoteResults | Phase::MissionVoteResults
        )
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::NotStarted => "not started",
            Phase::ProposalPending => "proposal pending",
            Phase::PartyVoteInProgress => "party vote in progress",
            Phase::PartyVoteResults => "party vote results",
            Phase::MissionVoteInProgress => "mission vote in progress",
            Phase::MissionVoteResults => "mission vote results",
            Phase::GameOver => "game over",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_phases() {
        assert!(!Phase::NotStarted.is_running());
        assert!(!Phase::GameOver.is_running());
        assert!(Phase::ProposalPending.is_running());
        assert!(Phase::MissionVoteResults.is_running());
    }

    #[test]
    fn test_party_phases() {
        assert!(!Phase::ProposalPending.has_party());
        assert!(Phase::PartyVoteInProgress.has_proposal());
        assert!(!Phase::MissionVoteInProgress.has_proposal());
        assert!(Phase::MissionVoteInProgress.has_party());
    }

    #[test]
    fn test_driver_phases() {
        let driven: Vec<_> = [
            Phase::NotStarted,
            Phase::ProposalPending,
            Phase::PartyVoteInProgress,
            Phase::PartyVoteResults,
            Phase::MissionVoteInProgress,
            Phase::MissionVoteResults,
            Phase::GameOver,
        ]
        .into_iter()
        .filter(|p| p.is_driver_advanceable())
        .collect();

        assert_eq!(
            driven,
            vec![Phase::NotStarted, Phase::PartyVoteResults, Phase::MissionVoteResults]
        );
    }

    #[test]
    fn test_phase_serde() {
        let json = serde_json::to_string(&Phase::PartyVoteResults).unwrap();
        assert_eq!(json, "\"PartyVoteResults\"");
        let back: Phase = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Phase::PartyVoteResults);
    }
}
