//! Notifications produced by accepted calls.
//!
//! Every mutator returns the events it caused, in order, so a controller
//! can render them without diffing state before and after the call.

use serde::{Deserialize, Serialize};

use crate::core::{PartyMembers, Phase, PlayerId};
use crate::rules::Side;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Spies were appointed. Only the count is public.
    GameStarted { spy_count: usize },

    RoundStarted {
        round: u8,
        party_size: usize,
        fails_required: usize,
        leader: PlayerId,
    },

    PartyProposed {
        leader: PlayerId,
        members: PartyMembers,
    },

    /// A party ballot was accepted. The ballot itself stays hidden until
    /// the vote closes.
    PartyBallotCast {
        player: PlayerId,
        cast: usize,
        expected: usize,
    },

    PartyVoteClosed {
        approved: bool,
        approvals: usize,
        rejections: usize,
    },

    MissionStarted { members: PartyMembers },

    MissionBallotCast {
        player: PlayerId,
        cast: usize,
        expected: usize,
    },

    /// All mission cards are in.
    MissionClosed { sabotage_count: usize },

    LeaderChanged { leader: PlayerId },

    /// The round ran out of proposals.
    VoteLimitReached { round: u8 },

    RoundDecided { round: u8, winner: Side },

    PhaseChanged { from: Phase, to: Phase },

    GameOver { winner: Option<Side> },
}
