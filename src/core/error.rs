//! Engine errors.
//!
//! Only contract violations are errors. Stale clicks, mismatches and
//! "no more matches" are ordinary outcomes and never surface here.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three card stacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackKind {
    /// The pile the player is trying to clear.
    Main,
    /// The face-up pile whose top card is the match target.
    Bottom,
    /// The face-down reserve pile.
    Spare,
}

impl fmt::Display for StackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StackKind::Main => "main",
            StackKind::Bottom => "bottom",
            StackKind::Spare => "spare",
        };
        f.write_str(name)
    }
}

/// A violated engine precondition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// A top card was requested from an empty stack.
    EmptyStack(StackKind),
    /// A pile move was requested while the source stack was empty.
    InvalidTransition {
        from: StackKind,
        to: StackKind,
    },
    /// A deal was requested on a state that still holds cards.
    AlreadyPopulated,
    /// The configuration cannot produce a playable game.
    InvalidConfig(&'static str),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::EmptyStack(stack) => write!(f, "{} stack is empty", stack),
            EngineError::InvalidTransition { from, to } => {
                write!(f, "cannot move a card from the empty {} stack to the {} stack", from, to)
            }
            EngineError::AlreadyPopulated => {
                f.write_str("game state already holds cards; reset before dealing again")
            }
            EngineError::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(EngineError::EmptyStack(StackKind::Bottom).to_string(), "bottom stack is empty");
        assert_eq!(
            EngineError::InvalidTransition {
                from: StackKind::Spare,
                to: StackKind::Bottom,
            }
            .to_string(),
            "cannot move a card from the empty spare stack to the bottom stack"
        );
    }

    #[test]
    fn test_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(EngineError::AlreadyPopulated);
        assert!(err.to_string().contains("reset"));
    }
}
