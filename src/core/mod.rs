//! Core types: players, RNG, configuration, actions, phases and errors.
//!
//! Nothing here knows about votes or missions. The rule objects in
//! `rules` and the engine in `game` are built on top.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionKind, ActionRecord, PartyMembers};
pub use config::{RulesConfig, ROUND_COUNT};
pub use error::{ConfigError, RuleResult, RuleViolation};
pub use player::{Party, Player, PlayerId};
pub use rng::GameRng;
pub use state::Phase;
