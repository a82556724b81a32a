//! Match rules.
//!
//! A match rule decides whether a main-stack card may be played onto the
//! current bottom card. Rules are trait objects so a game can swap them
//! without touching the controller:
//! - `AdjacentRank`: ranks differ by exactly one (default)
//! - `RankOrSuit`: equal rank or equal suit

use crate::cards::Card;
use crate::core::config::{GameConfig, RuleKind};

/// Policy deciding whether two cards match.
///
/// Implementations must be symmetric: `can_match(a, b) == can_match(b, a)`.
pub trait MatchRule: Send + Sync {
    /// Whether `a` and `b` match.
    fn can_match(&self, a: &Card, b: &Card) -> bool;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Ranks differ by exactly one, regardless of suit.
///
/// King and Ace are not adjacent unless built with `with_wraparound`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AdjacentRank {
    wraparound: bool,
}

impl AdjacentRank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat King and Ace as adjacent.
    #[must_use]
    pub fn with_wraparound() -> Self {
        Self { wraparound: true }
    }
}

impl MatchRule for AdjacentRank {
    fn can_match(&self, a: &Card, b: &Card) -> bool {
        let diff = a.rank.value().abs_diff(b.rank.value());
        diff == 1 || (self.wraparound && diff == 12)
    }

    fn name(&self) -> &'static str {
        if self.wraparound {
            "adjacent-rank-wrap"
        } else {
            "adjacent-rank"
        }
    }
}

/// Equal rank or equal suit.
#[derive(Clone, Copy, Debug, Default)]
pub struct RankOrSuit;

impl MatchRule for RankOrSuit {
    fn can_match(&self, a: &Card, b: &Card) -> bool {
        a.rank == b.rank || a.suit == b.suit
    }

    fn name(&self) -> &'static str {
        "rank-or-suit"
    }
}

/// Build the rule a configuration selects.
#[must_use]
pub fn rule_from_config(config: &GameConfig) -> Box<dyn MatchRule> {
    match config.rule {
        RuleKind::AdjacentRank if config.wraparound => Box::new(AdjacentRank::with_wraparound()),
        RuleKind::AdjacentRank => Box::new(AdjacentRank::new()),
        RuleKind::RankOrSuit => Box::new(RankOrSuit),
    }
}
