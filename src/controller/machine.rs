//! The move controller state machine.
//!
//! ## Phases
//!
//! ```text
//!            pause_game            match empties main
//!   Paused <-----------> Playing --------------------> Won
//!            resume_game    |
//!                           | no main card can match
//!                           +-----------------------> Lost
//!
//!   any phase --start_new_game / restart_game / set_level--> Playing
//! ```
//!
//! The controller is the only writer of the phase. Every public operation
//! finishes its state mutation before the listener hears about it, so a
//! listener never observes a half-applied move.

use log::{debug, error, info, warn};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::cards::{Card, CardGenerator, CardId};
use crate::core::config::GameConfig;
use crate::core::error::EngineError;
use crate::core::rng::{GameRng, RandomSource};
use crate::core::state::{GameState, Phase};
use crate::events::{GameEvent, GameListener};
use crate::rules::{CardNotFound, MatchOutcome, RulesEngine};

/// What a click did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Not Playing, or the click would have emptied the bottom stack.
    Ignored,
    /// The bottom top card went face-down onto the spare stack.
    CycledToSpare(Card),
    /// The spare top card went face-up onto the bottom stack.
    CycledToBottom(Card),
    /// The main card matched and is now the bottom card.
    Matched { card: Card, score_delta: u32 },
    /// The main card did not match, or the id was stale.
    Mismatch(CardId),
}

impl ClickOutcome {
    #[must_use]
    pub fn is_matched(&self) -> bool {
        matches!(self, ClickOutcome::Matched { .. })
    }
}

/// Sequences moves over a single game session.
pub struct MatchController<R = GameRng> {
    state: GameState,
    rules: RulesEngine,
    generator: CardGenerator<R>,
    config: GameConfig,
    listener: Option<Box<dyn GameListener>>,
    hints_active: bool,
    /// Events raised by the operation in progress.
    pending: SmallVec<[GameEvent; 6]>,
}

fn contract_violation(err: EngineError) -> EngineError {
    error!("engine contract violated: {}", err);
    err
}

impl<R: RandomSource> MatchController<R> {
    /// Create a controller with an empty board.
    ///
    /// Call `start_new_game` to deal; `ControllerBuilder` does both.
    pub fn new(config: GameConfig, rules: RulesEngine, source: R) -> Result<Self, EngineError> {
        config.validate()?;

        Ok(Self {
            state: GameState::with_level(config.starting_level),
            rules,
            generator: CardGenerator::new(source),
            config,
            listener: None,
            hints_active: false,
            pending: SmallVec::new(),
        })
    }

    /// Install the listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: Box<dyn GameListener>) {
        self.listener = Some(listener);
    }

    /// Remove and return the listener.
    pub fn take_listener(&mut self) -> Option<Box<dyn GameListener>> {
        self.listener.take()
    }

    // === Lifecycle ===

    /// Deal a fresh board at the current level.
    ///
    /// Works from any phase. Score and moves return to zero.
    pub fn start_new_game(&mut self) -> Result<(), EngineError> {
        let previous_phase = self.state.phase();
        self.state.reset();

        let (main, bottom, spare) = (self.config.main_count, self.config.bottom_count, self.config.spare_count);
        if let Err(err) = self
            .generator
            .populate_initial_state(&mut self.state, main, bottom, spare)
        {
            self.pending.clear();
            return Err(contract_violation(err));
        }

        if self.hints_active {
            self.hints_active = false;
            self.emit(GameEvent::MatchableCardsChanged(Vec::new()));
        }
        if previous_phase != Phase::Playing {
            self.emit(GameEvent::PhaseChanged(Phase::Playing));
        }
        self.emit(GameEvent::ScoreChanged(0));
        self.emit(GameEvent::BottomCardChanged(self.state.top_bottom()));
        self.emit(GameEvent::SpareCardChanged(self.state.top_spare()));
        self.emit(GameEvent::GameStarted {
            level: self.state.level(),
        });

        debug!(
            "new game at level {} with rule {}",
            self.state.level(),
            self.rules.rule().name()
        );
        self.flush();
        Ok(())
    }

    /// Deal again at the current level.
    pub fn restart_game(&mut self) -> Result<(), EngineError> {
        self.start_new_game()
    }

    /// Playing -> Paused. Returns false (no-op) from any other phase.
    pub fn pause_game(&mut self) -> bool {
        self.transition(Phase::Playing, Phase::Paused)
    }

    /// Paused -> Playing. Returns false (no-op) from any other phase.
    pub fn resume_game(&mut self) -> bool {
        self.transition(Phase::Paused, Phase::Playing)
    }

    /// Set the level, then deal a new board.
    ///
    /// Level 0 is raised to 1.
    pub fn set_level(&mut self, level: u32) -> Result<(), EngineError> {
        if level == 0 {
            warn!("level 0 requested; using 1");
        }
        self.state.set_level(level);
        info!("level set to {}", self.state.level());
        self.start_new_game()
    }

    /// Advance one level, then deal a new board.
    pub fn next_level(&mut self) -> Result<(), EngineError> {
        self.set_level(self.state.level().saturating_add(1))
    }

    // === Moves ===

    /// Handle a click on any card.
    ///
    /// Ignored unless Playing. Clicking the bottom top card cycles it to the
    /// spare stack, clicking the spare top card cycles it back, and any
    /// other id is treated as a main-card match attempt. The last bottom
    /// card stays in place: clicking it is `Ignored` and raises no events.
    ///
    /// Errors only on engine contract violations; mismatches and stale ids
    /// are ordinary outcomes.
    pub fn on_card_clicked(&mut self, id: CardId) -> Result<ClickOutcome, EngineError> {
        if self.state.phase() != Phase::Playing {
            debug!("ignoring click on {} while {:?}", id, self.state.phase());
            return Ok(ClickOutcome::Ignored);
        }

        let result = if self.state.top_bottom().map(|c| c.id) == Some(id) {
            self.cycle_bottom_to_spare()
        } else if self.state.top_spare().map(|c| c.id) == Some(id) {
            self.cycle_spare_to_bottom()
        } else {
            Ok(self.match_card(id))
        };

        self.flush();
        result
    }

    /// Try to match a main-stack card against the bottom card.
    ///
    /// On success the card moves onto the bottom stack, moves and score
    /// increase and the end-of-game check runs. On failure only a mismatch
    /// notification is raised.
    pub fn handle_card_match(&mut self, id: CardId) -> ClickOutcome {
        if self.state.phase() != Phase::Playing {
            return ClickOutcome::Ignored;
        }
        let outcome = self.match_card(id);
        self.flush();
        outcome
    }

    /// Decide whether the game is over.
    ///
    /// An empty main stack wins; otherwise a main stack with no possible
    /// match loses. Only acts while Playing. Returns the resulting phase.
    pub fn check_game_end(&mut self) -> Phase {
        let phase = self.evaluate_game_end();
        self.flush();
        phase
    }

    // === Hints ===

    /// Compute the currently matchable main cards and publish them.
    ///
    /// Read-only with respect to the board. Returns an empty set outside
    /// Playing.
    pub fn show_hint(&mut self) -> FxHashSet<CardId> {
        if self.state.phase() != Phase::Playing {
            return FxHashSet::default();
        }

        let ids = self.rules.available_matches(&self.state);
        self.hints_active = !ids.is_empty();
        self.emit(GameEvent::matchable(&ids));
        self.flush();
        ids
    }

    /// Clear hint highlighting. Calling it again is a no-op.
    pub fn clear_hints(&mut self) {
        if self.hints_active {
            self.hints_active = false;
            self.emit(GameEvent::MatchableCardsChanged(Vec::new()));
            self.flush();
        }
    }

    // === Queries ===

    /// Snapshot of the main stack.
    #[must_use]
    pub fn main_stack(&self) -> im::Vector<Card> {
        self.state.main_stack()
    }

    /// Snapshot of the bottom stack.
    #[must_use]
    pub fn bottom_stack(&self) -> im::Vector<Card> {
        self.state.bottom_stack()
    }

    /// Snapshot of the spare stack.
    #[must_use]
    pub fn spare_stack(&self) -> im::Vector<Card> {
        self.state.spare_stack()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.state.score()
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.state.level()
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.state.moves()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Whether hint highlighting is currently shown.
    #[must_use]
    pub fn hints_active(&self) -> bool {
        self.hints_active
    }

    /// Read-only view of the full state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn rules(&self) -> &RulesEngine {
        &self.rules
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // === Internals ===

    fn cycle_bottom_to_spare(&mut self) -> Result<ClickOutcome, EngineError> {
        if self.state.bottom_len() < 2 {
            debug!("last bottom card stays in place");
            return Ok(ClickOutcome::Ignored);
        }

        let card = self.state.move_bottom_to_spare().map_err(contract_violation)?;
        debug!("cycled {} to spare", card.id);
        self.emit_piles_changed();
        Ok(ClickOutcome::CycledToSpare(card))
    }

    fn cycle_spare_to_bottom(&mut self) -> Result<ClickOutcome, EngineError> {
        let card = self.state.move_spare_to_bottom().map_err(contract_violation)?;
        debug!("cycled {} to bottom", card);
        self.emit_piles_changed();
        Ok(ClickOutcome::CycledToBottom(card))
    }

    fn emit_piles_changed(&mut self) {
        self.emit(GameEvent::BottomCardChanged(self.state.top_bottom()));
        self.emit(GameEvent::SpareCardChanged(self.state.top_spare()));
        if self.config.end_check_on_cycle {
            self.evaluate_game_end();
        }
    }

    fn match_card(&mut self, id: CardId) -> ClickOutcome {
        match self.rules.attempt_match(&self.state, id) {
            Ok(MatchOutcome::Matched { card, bottom }) => {
                let score_delta = self.rules.compute_score(&card, &bottom, self.state.level());

                self.state.remove_from_main(card.id);
                self.state.add_to_bottom(card);
                self.state.increment_moves();
                self.state.add_score(score_delta);
                debug!("matched {} onto {} for {} points", card, bottom, score_delta);

                self.emit(GameEvent::MainCardRemoved(card.id));
                self.emit(GameEvent::BottomCardChanged(self.state.top_bottom()));
                self.emit(GameEvent::ScoreChanged(self.state.score()));
                if self.hints_active {
                    self.hints_active = false;
                    self.emit(GameEvent::MatchableCardsChanged(Vec::new()));
                }

                self.evaluate_game_end();
                ClickOutcome::Matched { card, score_delta }
            }
            Ok(MatchOutcome::Mismatch { card }) => {
                debug!("{} does not match", card);
                self.emit(GameEvent::Mismatch(card.id));
                ClickOutcome::Mismatch(card.id)
            }
            Err(CardNotFound(stale)) => {
                warn!("click on {} which is not in play", stale);
                self.emit(GameEvent::Mismatch(stale));
                ClickOutcome::Mismatch(stale)
            }
        }
    }

    fn evaluate_game_end(&mut self) -> Phase {
        if self.state.phase() != Phase::Playing {
            return self.state.phase();
        }

        if self.state.main_len() == 0 {
            self.state.set_phase(Phase::Won);
            info!("game won with score {} in {} moves", self.state.score(), self.state.moves());
            self.emit(GameEvent::PhaseChanged(Phase::Won));
            self.emit(GameEvent::GameWon);
        } else if !self.rules.has_available_matches(&self.state) {
            self.state.set_phase(Phase::Lost);
            info!("game lost with {} cards left", self.state.main_len());
            self.emit(GameEvent::PhaseChanged(Phase::Lost));
            self.emit(GameEvent::GameLost);
        }
        self.state.phase()
    }

    fn transition(&mut self, from: Phase, to: Phase) -> bool {
        if self.state.phase() != from {
            return false;
        }
        self.state.set_phase(to);
        debug!("phase {:?} -> {:?}", from, to);
        self.emit(GameEvent::PhaseChanged(to));
        self.flush();
        true
    }

    fn emit(&mut self, event: GameEvent) {
        self.pending.push(event);
    }

    fn flush(&mut self) {
        let events = std::mem::take(&mut self.pending);
        if let Some(listener) = self.listener.as_mut() {
            for event in &events {
                listener.on_event(event);
            }
        }
    }
}

impl<R> std::fmt::Debug for MatchController<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchController")
            .field("state", &self.state)
            .field("rules", &self.rules)
            .field("config", &self.config)
            .field("has_listener", &self.listener.is_some())
            .field("hints_active", &self.hints_active)
            .finish()
    }
}
