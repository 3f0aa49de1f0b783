//! Game commands and the action history.
//!
//! An `Action` is one command a controller forwards to the engine. Every
//! accepted action is recorded as an `ActionRecord`, which is enough to
//! replay a game from its seed.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::rules::MissionCard;

/// Members of a proposed party. Parties never exceed five players.
pub type PartyMembers = SmallVec<[PlayerId; 5]>;

/// A command for the engine.
///
/// ## Example
///
/// ```
/// use resistance_engine::core::{Action, ActionKind, PlayerId};
/// use resistance_engine::rules::MissionCard;
///
/// let propose = Action::propose(&[PlayerId(0), PlayerId(1)]);
/// assert_eq!(propose.kind(), ActionKind::ProposeParty);
///
/// let sabotage = Action::VoteMission(MissionCard::Sabotage);
/// assert_eq!(sabotage.kind(), ActionKind::VoteMission);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Drive the game out of a results phase (or start it).
    Advance,
    /// Leader nominates a party.
    ProposeParty(PartyMembers),
    /// Approve (`true`) or reject the proposed party.
    VoteParty(bool),
    /// Play a mission card.
    VoteMission(MissionCard),
}

impl Action {
    /// Build a proposal from a slice of members.
    #[must_use]
    pub fn propose(members: &[PlayerId]) -> Self {
        Action::ProposeParty(SmallVec::from_slice(members))
    }

    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Advance => ActionKind::Advance,
            Action::ProposeParty(_) => ActionKind::ProposeParty,
            Action::VoteParty(_) => ActionKind::VoteParty,
            Action::VoteMission(_) => ActionKind::VoteMission,
        }
    }
}

/// The kind of an action, without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Advance,
    ProposeParty,
    VoteParty,
    VoteMission,
    /// Role lookup through `GameInstance::role_of`.
    RevealRole,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = match self {
            ActionKind::Advance => "advance",
            ActionKind::ProposeParty => "propose a party",
            ActionKind::VoteParty => "vote on the party",
            ActionKind::VoteMission => "vote on the mission",
            ActionKind::RevealRole => "reveal roles",
        };
        f.write_str(verb)
    }
}

/// An accepted action with ordering metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Who issued it. `None` for `Advance`.
    pub actor: Option<PlayerId>,

    pub action: Action,

    /// Round number when the action was accepted (0 before the start).
    pub round: u8,

    /// Position in the game's history.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(actor: Option<PlayerId>, action: Action, round: u8, sequence: u32) -> Self {
        Self {
            actor,
            action,
            round,
            sequence,
        }
    }
}
