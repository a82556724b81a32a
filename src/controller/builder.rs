//! Builder for a ready-to-play controller.

use log::info;

use super::machine::MatchController;
use crate::core::config::GameConfig;
use crate::core::error::EngineError;
use crate::core::rng::{GameRng, RandomSource};
use crate::events::GameListener;
use crate::rules::{MatchRule, RulesEngine};

/// Builds a `MatchController` and deals its first board.
#[derive(Default)]
pub struct ControllerBuilder {
    config: GameConfig,
    rule: Option<Box<dyn MatchRule>>,
    listener: Option<Box<dyn GameListener>>,
}

impl ControllerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `rule` instead of the one named by the config.
    pub fn rule(mut self, rule: impl MatchRule + 'static) -> Self {
        self.rule = Some(Box::new(rule));
        self
    }

    /// Listener installed before the first deal, so it sees `GameStarted`.
    pub fn listener(mut self, listener: impl GameListener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Build with a ChaCha generator seeded from the config, or from
    /// entropy if the config has no seed.
    pub fn build(self) -> Result<MatchController<GameRng>, EngineError> {
        let rng = match self.config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        info!("dealing with seed {}", rng.seed());
        self.build_with_source(rng)
    }

    /// Build with an arbitrary random source, e.g. a scripted one.
    pub fn build_with_source<R: RandomSource>(self, source: R) -> Result<MatchController<R>, EngineError> {
        let rules = match self.rule {
            Some(rule) => RulesEngine::new(rule, self.config.base_score),
            None => RulesEngine::from_config(&self.config),
        };

        let mut controller = MatchController::new(self.config, rules, source)?;
        if let Some(listener) = self.listener {
            controller.set_listener(listener);
        }
        controller.start_new_game()?;
        Ok(controller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::SequenceSource;
    use crate::core::state::Phase;
    use crate::events::{EventLog, GameEvent};
    use crate::rules::RankOrSuit;

    #[test]
    fn test_build_deals_board() {
        let controller = ControllerBuilder::new()
            .config(GameConfig::default().with_seed(42))
            .build()
            .unwrap();

        assert_eq!(controller.phase(), Phase::Playing);
        assert_eq!(controller.main_stack().len(), 9);
        assert_eq!(controller.bottom_stack().len(), 1);
        assert_eq!(controller.spare_stack().len(), 2);
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = ControllerBuilder::new().config(GameConfig::default().with_seed(7)).build().unwrap();
        let b = ControllerBuilder::new().config(GameConfig::default().with_seed(7)).build().unwrap();

        assert_eq!(a.main_stack(), b.main_stack());
        assert_eq!(a.bottom_stack(), b.bottom_stack());
        assert_eq!(a.spare_stack(), b.spare_stack());
    }

    #[test]
    fn test_listener_sees_first_deal() {
        let log = EventLog::new();
        let _controller = ControllerBuilder::new()
            .config(GameConfig::default().with_seed(1))
            .listener(log.clone())
            .build()
            .unwrap();

        assert!(log.contains(|e| *e == GameEvent::GameStarted { level: 1 }));
    }

    #[test]
    fn test_rule_override() {
        let controller = ControllerBuilder::new()
            .rule(RankOrSuit)
            .build_with_source(SequenceSource::new(vec![0, 5]))
            .unwrap();

        assert_eq!(controller.rules().rule().name(), "rank-or-suit");
    }

    #[test]
    fn test_starting_level_and_base_score() {
        let config = GameConfig::default()
            .with_deal(1, 1, 0)
            .with_starting_level(3)
            .with_base_score(5);
        // bottom 6♥, main 5♦
        let mut controller = ControllerBuilder::new()
            .config(config)
            .build_with_source(SequenceSource::new(vec![0, 5, 1, 4]))
            .unwrap();
        let id = controller.main_stack()[0].id;

        controller.on_card_clicked(id).unwrap();

        assert_eq!(controller.level(), 3);
        assert_eq!(controller.score(), 15);
    }

    #[test]
    fn test_invalid_config() {
        let result = ControllerBuilder::new()
            .config(GameConfig::default().with_starting_level(0))
            .build();

        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }
}
