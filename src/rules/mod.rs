//! Match rules and the pure rules engine.
//!
//! `MatchRule` is the swappable matching policy; `RulesEngine` evaluates
//! clickability, match attempts, scores and available matches over a
//! `GameState` without mutating it.

pub mod engine;
pub mod policy;

pub use engine::{CardNotFound, MatchOutcome, RulesEngine};
pub use policy::{rule_from_config, AdjacentRank, MatchRule, RankOrSuit};
