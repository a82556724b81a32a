//! Outbound notifications.
//!
//! The controller describes every observable change as a `GameEvent` and
//! hands it to its `GameListener`, if one is set. Without a listener the
//! events are simply dropped.

pub mod event;
pub mod listener;

pub use event::GameEvent;
pub use listener::{EventLog, GameListener};
