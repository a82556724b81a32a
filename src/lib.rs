//! # rust-match
//!
//! A solitaire card-matching puzzle engine.
//!
//! The board has three stacks: a face-up main stack the player clears, a
//! face-up bottom stack whose top card is the match target, and a face-down
//! spare stack that can be cycled with the bottom stack. A main card matches
//! when its rank differs from the bottom card's rank by one.
//!
//! ## Design Principles
//!
//! 1. **Single Writer**: Only `MatchController` mutates a session. Every
//!    other component is a pure function over `GameState`.
//!
//! 2. **Swappable Rules**: Matching lives behind the `MatchRule` trait so a
//!    variant rule does not touch the controller.
//!
//! 3. **Deterministic Replays**: All randomness flows through a
//!    `RandomSource`. A seed reproduces a deal exactly.
//!
//! ## Modules
//!
//! - `core`: Game state, phases, configuration, errors, RNG
//! - `cards`: Card values and the random card generator
//! - `rules`: Match rules and the rules engine
//! - `events`: Outbound notifications and the listener trait
//! - `controller`: The move controller and its builder
//!
//! ## Example
//!
//! ```
//! use rust_match::{ControllerBuilder, GameConfig, Phase};
//!
//! let mut game = ControllerBuilder::new()
//!     .config(GameConfig::default().with_seed(42))
//!     .build()
//!     .unwrap();
//!
//! if let Some(card) = game.show_hint().into_iter().min() {
//!     assert!(game.on_card_clicked(card).unwrap().is_matched());
//! }
//! assert!(matches!(game.phase(), Phase::Playing | Phase::Won | Phase::Lost));
//! ```

pub mod core;
pub mod cards;
pub mod rules;
pub mod events;
pub mod controller;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    EngineError, StackKind,
    GameConfig, RuleKind,
    GameRng, RandomSource, SequenceSource,
    GameState, Phase,
};

pub use crate::cards::{Card, CardGenerator, CardId, Color, Rank, Suit};

pub use crate::rules::{
    rule_from_config, AdjacentRank, CardNotFound, MatchOutcome, MatchRule, RankOrSuit, RulesEngine,
};

pub use crate::events::{EventLog, GameEvent, GameListener};

pub use crate::controller::{ClickOutcome, ControllerBuilder, MatchController};
