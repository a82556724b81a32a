//! Core engine types: state, configuration, errors, randomness.
//!
//! The state here knows nothing about match rules; rules live in `rules`
//! and sequencing lives in `controller`.

pub mod config;
pub mod error;
pub mod rng;
pub mod state;

pub use config::{GameConfig, RuleKind};
pub use error::{EngineError, StackKind};
pub use rng::{GameRng, RandomSource, SequenceSource};
pub use state::{GameState, Phase};
