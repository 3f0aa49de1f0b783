//! The game engine and what it hands to a controller.
//!
//! - `GameInstance`: the state machine
//! - `GameBuilder`: construction and replay
//! - `GameEvent`: what an accepted call changed
//! - Views: public snapshot, private role, mission reveal

mod builder;
mod event;
mod instance;
mod view;

pub use builder::GameBuilder;
pub use event::GameEvent;
pub use instance::GameInstance;
pub use view::{MissionReveal, PublicView, RoleView, RoundSummary, Tally};
