//! Rule objects that live inside a game.
//!
//! - `Vote`: one party proposal and its approval ballots
//! - `Round`: one mission attempt, its votes and its mission cards
//! - `Side`, `MissionCard`, `Score`: who wins what
//!
//! These types only enforce their own bookkeeping. Phase checks, role
//! checks and leader rotation belong to `GameInstance`.

pub mod outcome;
pub mod round;
pub mod vote;

pub use outcome::{MissionCard, Score, Side};
pub use round::Round;
pub use vote::Vote;
