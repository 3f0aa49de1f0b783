//! Rule violations and configuration errors.
//!
//! Every rejected call returns one of these and leaves the game untouched.
//! None of them are fatal: the caller decides whether to re-prompt.

use super::action::ActionKind;
use super::player::PlayerId;
use super::state::Phase;

/// A call that the rules do not allow right now.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    /// Player count outside the allowed range.
    #[error("the number of players must be between {min} and {max}, got {count}")]
    InvalidPlayerCount { count: usize, min: usize, max: usize },

    /// Actor or proposed member is not seated in this game.
    #[error("{0} is not registered in this game")]
    UnregisteredPlayer(PlayerId),

    /// The same identity was seated twice.
    #[error("{0} is seated more than once")]
    DuplicatePlayer(PlayerId),

    /// Proposal attempted by someone other than the leader.
    #[error("only the leader ({leader}) can propose a party, not {actor}")]
    NotLeader { actor: PlayerId, leader: PlayerId },

    /// Proposed party size does not match the round.
    #[error("party must have {expected} members, got {actual}")]
    WrongPartySize { expected: usize, actual: usize },

    /// A proposed party names the same player twice.
    #[error("{0} appears more than once in the proposed party")]
    DuplicatePartyMember(PlayerId),

    /// The call is not allowed in the current phase.
    #[error("cannot {action} while the game is in phase {phase}")]
    IllegalState { action: ActionKind, phase: Phase },

    /// The player already cast a ballot in this vote.
    #[error("{0} has already voted")]
    DuplicateVote(PlayerId),

    /// Mission ballot from someone outside the approved party.
    #[error("{0} is not a member of the mission party")]
    NotPartyMember(PlayerId),

    /// A resistance member tried to play sabotage.
    #[error("{0} is not allowed to sabotage the mission")]
    IneligibleBallot(PlayerId),
}

pub type RuleResult<T> = Result<T, RuleViolation>;

/// Inconsistent `RulesConfig`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("player range {min}..={max} is empty or starts below 1")]
    InvalidPlayerRange { min: usize, max: usize },

    #[error("expected {expected} party size rows, found {found}")]
    MissingPartySizes { expected: usize, found: usize },

    #[error("party sizes for {player_count} players must list {rounds} rounds, each between 1 and {player_count}")]
    InvalidPartySizes { player_count: usize, rounds: usize },

    #[error("a win limit of {win_limit} cannot be settled within {rounds} rounds")]
    WinLimitTooHigh { win_limit: usize, rounds: usize },

    #[error("two-sabotage round {round} is outside 1..={rounds}")]
    InvalidTwoFailRound { round: usize, rounds: usize },

    #[error("round {round} for {player_count} players sends {party_size} members but needs {fails_required} sabotage cards to fail")]
    UnfailableMission {
        player_count: usize,
        round: usize,
        fails_required: usize,
        party_size: usize,
    },

    #[error("{0} must be at least 1")]
    ZeroLimit(&'static str),
}
