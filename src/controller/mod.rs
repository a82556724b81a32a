//! The move controller: the only component that mutates a game session.

pub mod builder;
pub mod machine;

pub use builder::ControllerBuilder;
pub use machine::{ClickOutcome, MatchController};
