//! Game configuration.
//!
//! `GameConfig` holds everything a host can tune without writing code:
//! deal sizes, base score, starting level, the match rule and the seed.
//! It is plain serde data so a host can load it from its own settings.

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Built-in match rules selectable from configuration.
///
/// Custom rules are injected through the controller builder instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    /// Ranks differ by exactly one.
    #[default]
    AdjacentRank,
    /// Equal rank or equal suit.
    RankOrSuit,
}

/// Game configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cards dealt to the main stack.
    pub main_count: usize,

    /// Cards dealt to the bottom stack. Must be at least 1 so there is
    /// always a comparison card.
    pub bottom_count: usize,

    /// Cards dealt face-down to the spare stack.
    pub spare_count: usize,

    /// Points for one match at level 1, before the equal-rank bonus.
    pub base_score: u32,

    /// Level of a freshly built controller.
    pub starting_level: u32,

    /// Seed for the deal RNG. `None` seeds from OS entropy once per
    /// controller.
    pub seed: Option<u64>,

    /// Match rule used when no custom rule is injected.
    pub rule: RuleKind,

    /// Let `AdjacentRank` match King with Ace.
    pub wraparound: bool,

    /// Run the win/lose check after bottom/spare cycling too.
    pub end_check_on_cycle: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            main_count: 9,
            bottom_count: 1,
            spare_count: 2,
            base_score: 10,
            starting_level: 1,
            seed: None,
            rule: RuleKind::AdjacentRank,
            wraparound: false,
            end_check_on_cycle: false,
        }
    }
}

impl GameConfig {
    /// Set the deal sizes.
    #[must_use]
    pub fn with_deal(mut self, main: usize, bottom: usize, spare: usize) -> Self {
        self.main_count = main;
        self.bottom_count = bottom;
        self.spare_count = spare;
        self
    }

    /// Set the base score.
    #[must_use]
    pub fn with_base_score(mut self, score: u32) -> Self {
        self.base_score = score;
        self
    }

    /// Set the starting level.
    #[must_use]
    pub fn with_starting_level(mut self, level: u32) -> Self {
        self.starting_level = level;
        self
    }

    /// Use a fixed seed for deterministic deals.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Select a built-in match rule.
    #[must_use]
    pub fn with_rule(mut self, rule: RuleKind) -> Self {
        self.rule = rule;
        self
    }

    /// Allow King/Ace adjacency.
    #[must_use]
    pub fn with_wraparound(mut self, wraparound: bool) -> Self {
        self.wraparound = wraparound;
        self
    }

    /// Check for game end after cycling moves as well as matches.
    #[must_use]
    pub fn with_end_check_on_cycle(mut self, enabled: bool) -> Self {
        self.end_check_on_cycle = enabled;
        self
    }

    /// Reject configurations that cannot produce a playable deal.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.bottom_count == 0 {
            return Err(EngineError::InvalidConfig("bottom_count must be at least 1"));
        }
        if self.starting_level == 0 {
            return Err(EngineError::InvalidConfig("starting_level must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();

        assert_eq!(config.main_count, 9);
        assert_eq!(config.bottom_count, 1);
        assert_eq!(config.spare_count, 2);
        assert_eq!(config.base_score, 10);
        assert_eq!(config.starting_level, 1);
        assert_eq!(config.rule, RuleKind::AdjacentRank);
        assert!(config.seed.is_none());
        assert!(!config.end_check_on_cycle);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_deal(4, 2, 3)
            .with_base_score(25)
            .with_seed(123)
            .with_rule(RuleKind::RankOrSuit)
            .with_end_check_on_cycle(true);

        assert_eq!(config.main_count, 4);
        assert_eq!(config.bottom_count, 2);
        assert_eq!(config.spare_count, 3);
        assert_eq!(config.base_score, 25);
        assert_eq!(config.seed, Some(123));
        assert_eq!(config.rule, RuleKind::RankOrSuit);
        assert!(config.end_check_on_cycle);
    }

    #[test]
    fn test_validate() {
        let no_bottom = GameConfig::default().with_deal(9, 0, 2);
        assert!(matches!(no_bottom.validate(), Err(EngineError::InvalidConfig(_))));

        let level_zero = GameConfig::default().with_starting_level(0);
        assert!(matches!(level_zero.validate(), Err(EngineError::InvalidConfig(_))));

        // An empty main stack is a legal (instantly won) deal
        assert!(GameConfig::default().with_deal(0, 1, 0).validate().is_ok());
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default().with_seed(7).with_wraparound(true);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "main_count": 12, "rule": "RankOrSuit" }"#).unwrap();

        assert_eq!(config.main_count, 12);
        assert_eq!(config.rule, RuleKind::RankOrSuit);
        assert_eq!(config.spare_count, 2);
        assert_eq!(config.base_score, 10);
    }
}
