//! Pure rule evaluation over a game state.
//!
//! Nothing here mutates its arguments. The controller decides what to do
//! with each outcome:
//! - What cards are clickable
//! - Whether a clicked card matches the bottom card
//! - How much a match scores
//! - Which cards could match right now

use rustc_hash::FxHashSet;

use super::policy::{rule_from_config, MatchRule};
use crate::cards::{Card, CardId};
use crate::core::config::GameConfig;
use crate::core::state::GameState;

/// Result of checking a main-stack card against the bottom card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The card matches the current bottom card.
    Matched {
        card: Card,
        bottom: Card,
    },
    /// The card is present but does not match (or is not clickable).
    Mismatch {
        card: Card,
    },
}

impl MatchOutcome {
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched { .. })
    }
}

/// The clicked id is not in the main stack (stale or foreign click).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardNotFound(pub CardId);

impl std::fmt::Display for CardNotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is not in the main stack", self.0)
    }
}

impl std::error::Error for CardNotFound {}

/// Stateless rule evaluation with a pluggable match rule.
pub struct RulesEngine {
    rule: Box<dyn MatchRule>,
    base_score: u32,
}

impl RulesEngine {
    /// Create an engine from a rule and a base score.
    #[must_use]
    pub fn new(rule: Box<dyn MatchRule>, base_score: u32) -> Self {
        Self { rule, base_score }
    }

    /// Create the engine a configuration describes.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(rule_from_config(config), config.base_score)
    }

    /// The active match rule.
    #[must_use]
    pub fn rule(&self) -> &dyn MatchRule {
        self.rule.as_ref()
    }

    #[must_use]
    pub fn base_score(&self) -> u32 {
        self.base_score
    }

    /// Whether two cards match under the active rule.
    #[must_use]
    pub fn can_match(&self, a: &Card, b: &Card) -> bool {
        self.rule.can_match(a, b)
    }

    /// Whether a main-stack card can currently be clicked.
    ///
    /// Unknown ids are not clickable.
    #[must_use]
    pub fn is_clickable(&self, state: &GameState, id: CardId) -> bool {
        state
            .main_card(id)
            .map_or(false, |card| state.is_card_clickable(&card))
    }

    /// Check a main-stack card against the current bottom card.
    ///
    /// Returns `Err(CardNotFound)` for ids not in the main stack. Never
    /// mutates state.
    pub fn attempt_match(&self, state: &GameState, id: CardId) -> Result<MatchOutcome, CardNotFound> {
        let card = state.main_card(id).ok_or(CardNotFound(id))?;

        if !state.is_card_clickable(&card) {
            return Ok(MatchOutcome::Mismatch { card });
        }

        let bottom = state.top_bottom();
        debug_assert!(bottom.is_some(), "attempt_match with an empty bottom stack");

        match bottom {
            Some(bottom) if self.rule.can_match(&card, &bottom) => Ok(MatchOutcome::Matched { card, bottom }),
            _ => Ok(MatchOutcome::Mismatch { card }),
        }
    }

    /// Points for a match.
    ///
    /// Base score, doubled when the ranks are equal (reachable only under
    /// rules that match equal ranks), times the level.
    #[must_use]
    pub fn compute_score(&self, matched: &Card, bottom: &Card, level: u32) -> u32 {
        let base = if matched.rank == bottom.rank {
            self.base_score.saturating_mul(2)
        } else {
            self.base_score
        };
        base.saturating_mul(level)
    }

    /// Ids of every main-stack card that matches the current bottom card.
    ///
    /// Empty when the main stack or bottom stack is empty.
    #[must_use]
    pub fn available_matches(&self, state: &GameState) -> FxHashSet<CardId> {
        let Some(bottom) = state.top_bottom() else {
            return FxHashSet::default();
        };

        state
            .main_cards()
            .filter(|card| state.is_card_clickable(card) && self.rule.can_match(card, &bottom))
            .map(|card| card.id)
            .collect()
    }

    /// Whether any main-stack card matches. Stops at the first match.
    #[must_use]
    pub fn has_available_matches(&self, state: &GameState) -> bool {
        let Some(bottom) = state.top_bottom() else {
            return false;
        };

        state
            .main_cards()
            .any(|card| state.is_card_clickable(card) && self.rule.can_match(card, &bottom))
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl std::fmt::Debug for RulesEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RulesEngine")
            .field("rule", &self.rule.name())
            .field("base_score", &self.base_score)
            .finish()
    }
}
