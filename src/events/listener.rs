//! Listener trait for controller notifications.
//!
//! The controller holds zero or one listener. Every method has a no-op
//! default, so a presentation layer implements only what it renders.
//!
//! ## Usage
//!
//! ```
//! use rust_match::events::{EventLog, GameEvent, GameListener};
//!
//! let log = EventLog::new();
//! let mut listener: Box<dyn GameListener> = Box::new(log.clone());
//!
//! listener.on_event(&GameEvent::ScoreChanged(10));
//! assert_eq!(log.events(), vec![GameEvent::ScoreChanged(10)]);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::event::GameEvent;
use crate::cards::{Card, CardId};
use crate::core::state::Phase;

/// Receives controller notifications.
///
/// `on_event` is the single entry point the controller calls. Its default
/// implementation routes each event to the matching `on_*` method; a
/// listener that wants the raw events (a log, a channel) overrides
/// `on_event` instead.
#[allow(unused_variables)]
pub trait GameListener {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameStarted { level } => self.on_game_started(*level),
            GameEvent::ScoreChanged(score) => self.on_score_changed(*score),
            GameEvent::GameWon => self.on_game_won(),
            GameEvent::GameLost => self.on_game_lost(),
            GameEvent::PhaseChanged(phase) => self.on_phase_changed(*phase),
            GameEvent::MatchableCardsChanged(ids) => self.on_matchable_cards_changed(ids),
            GameEvent::MainCardRemoved(id) => self.on_main_card_removed(*id),
            GameEvent::BottomCardChanged(card) => self.on_bottom_card_changed(*card),
            GameEvent::SpareCardChanged(card) => self.on_spare_card_changed(*card),
            GameEvent::Mismatch(id) => self.on_mismatch(*id),
        }
    }

    fn on_game_started(&mut self, level: u32) {}

    fn on_score_changed(&mut self, score: u32) {}

    fn on_game_won(&mut self) {}

    fn on_game_lost(&mut self) {}

    fn on_phase_changed(&mut self, phase: Phase) {}

    /// Ids to highlight, ascending. Empty clears all highlights.
    fn on_matchable_cards_changed(&mut self, ids: &[CardId]) {}

    fn on_main_card_removed(&mut self, id: CardId) {}

    fn on_bottom_card_changed(&mut self, card: Option<Card>) {}

    fn on_spare_card_changed(&mut self, card: Option<Card>) {}

    /// Consumed by the mismatch animation.
    fn on_mismatch(&mut self, id: CardId) {}
}

/// Records every event into a shared buffer.
///
/// Clones share the buffer, so a host keeps one handle and gives the
/// controller another.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    /// Remove and return all recorded events.
    pub fn drain(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Whether any recorded event satisfies `predicate`.
    pub fn contains(&self, predicate: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.borrow().iter().any(predicate)
    }
}

impl GameListener for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
