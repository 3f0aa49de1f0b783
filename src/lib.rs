//! # resistance-engine
//!
//! Rules engine for *The Resistance*, the hidden-role party game for 5 to
//! 10 players.
//!
//! ## Design Principles
//!
//! 1. **Transport-Agnostic**: The engine never talks to users. A controller
//!    feeds it commands tagged with an actor and renders the returned
//!    `GameEvent`s.
//!
//! 2. **Atomic Rejection**: Every mutator either applies fully or returns a
//!    `RuleViolation` and changes nothing.
//!
//! 3. **Secrets Stay Inside**: Spy identities are only reachable through
//!    `role_of` (for the requester) or once the game is over.
//!
//! ## Architecture
//!
//! - **Explicit Phases**: `Phase` is a plain enum and every entry point
//!   matches on it. Vote phases complete themselves; result phases wait for
//!   the controller to call `advance`.
//!
//! - **Injected Randomness**: Spy assignment draws from a seeded ChaCha8
//!   stream, so a seed and an action history replay a game exactly.
//!
//! - **Persistent Data Structures**: Rounds and history live in `im`
//!   vectors, so cloning a game for what-if exploration is cheap.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, rules configuration, actions, phases, errors
//! - `rules`: Votes, rounds, mission cards and scoring
//! - `game`: The `GameInstance` engine, builder, events and views

pub mod core;
pub mod game;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionKind, ActionRecord, ConfigError, GameRng, Party, Phase, Player, PlayerId,
    RuleResult, RuleViolation, RulesConfig,
};

pub use crate::rules::{MissionCard, Round, Score, Side, Vote};

pub use crate::game::{
    GameBuilder, GameEvent, GameInstance, MissionReveal, PublicView, RoleView, RoundSummary,
    Tally,
};
