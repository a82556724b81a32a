//! Game session bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::cards::CardId;
use crate::controller::{ClickOutcome, ControllerBuilder, MatchController};
use crate::core::{EngineError, GameConfig, GameRng, RuleKind};
use crate::events::{EventLog, GameEvent};

use super::py_core::{phase_name, PyCard};

fn to_py_err(err: EngineError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Python wrapper for a match game session.
///
/// Events are buffered; call `drain_events()` after each action to get
/// `(kind, payload)` tuples in the order they were raised.
#[pyclass(name = "MatchGame", unsendable)]
pub struct PyMatchGame {
    controller: MatchController<GameRng>,
    log: EventLog,
}

#[pymethods]
impl PyMatchGame {
    /// Create a session and deal the first board.
    ///
    /// # Arguments
    /// - seed: RNG seed; random if omitted
    /// - main_count, bottom_count, spare_count: Deal sizes
    /// - level: Starting level (score multiplier)
    /// - rule: "adjacent" or "rank_or_suit"
    /// - wraparound: Let King and Ace match under the adjacent rule
    #[new]
    #[pyo3(signature = (
        seed = None,
        main_count = 9,
        bottom_count = 1,
        spare_count = 2,
        level = 1,
        rule = "adjacent",
        wraparound = false
    ))]
    fn new(
        seed: Option<u64>,
        main_count: usize,
        bottom_count: usize,
        spare_count: usize,
        level: u32,
        rule: &str,
        wraparound: bool,
    ) -> PyResult<Self> {
        let rule = match rule {
            "adjacent" => RuleKind::AdjacentRank,
            "rank_or_suit" => RuleKind::RankOrSuit,
            other => return Err(PyValueError::new_err(format!("unknown rule: {}", other))),
        };

        let mut config = GameConfig::default()
            .with_deal(main_count, bottom_count, spare_count)
            .with_starting_level(level)
            .with_rule(rule)
            .with_wraparound(wraparound);
        if let Some(seed) = seed {
            config = config.with_seed(seed);
        }

        let log = EventLog::new();
        let controller = ControllerBuilder::new()
            .config(config)
            .listener(log.clone())
            .build()
            .map_err(to_py_err)?;
        Ok(Self { controller, log })
    }

    fn start_new_game(&mut self) -> PyResult<()> {
        self.controller.start_new_game().map_err(to_py_err)
    }

    fn restart_game(&mut self) -> PyResult<()> {
        self.controller.restart_game().map_err(to_py_err)
    }

    /// Returns False if the game was not playing.
    fn pause_game(&mut self) -> bool {
        self.controller.pause_game()
    }

    /// Returns False if the game was not paused.
    fn resume_game(&mut self) -> bool {
        self.controller.resume_game()
    }

    /// Click a card by id.
    ///
    /// Returns one of "ignored", "cycled_to_spare", "cycled_to_bottom",
    /// "matched" or "mismatch".
    fn on_card_clicked(&mut self, card_id: u32) -> PyResult<&'static str> {
        let outcome = self
            .controller
            .on_card_clicked(CardId::new(card_id))
            .map_err(to_py_err)?;
        Ok(match outcome {
            ClickOutcome::Ignored => "ignored",
            ClickOutcome::CycledToSpare(_) => "cycled_to_spare",
            ClickOutcome::CycledToBottom(_) => "cycled_to_bottom",
            ClickOutcome::Matched { .. } => "matched",
            ClickOutcome::Mismatch(_) => "mismatch",
        })
    }

    /// Returns the resulting phase name.
    fn check_game_end(&mut self) -> &'static str {
        phase_name(self.controller.check_game_end())
    }

    /// Ids of the main cards that currently match, ascending.
    fn show_hint(&mut self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.controller.show_hint().into_iter().map(CardId::raw).collect();
        ids.sort_unstable();
        ids
    }

    fn clear_hints(&mut self) {
        self.controller.clear_hints();
    }

    fn next_level(&mut self) -> PyResult<()> {
        self.controller.next_level().map_err(to_py_err)
    }

    fn set_level(&mut self, level: u32) -> PyResult<()> {
        self.controller.set_level(level).map_err(to_py_err)
    }

    #[getter]
    fn main_stack(&self) -> Vec<PyCard> {
        self.controller.main_stack().into_iter().map(PyCard).collect()
    }

    #[getter]
    fn bottom_stack(&self) -> Vec<PyCard> {
        self.controller.bottom_stack().into_iter().map(PyCard).collect()
    }

    #[getter]
    fn spare_stack(&self) -> Vec<PyCard> {
        self.controller.spare_stack().into_iter().map(PyCard).collect()
    }

    #[getter]
    fn score(&self) -> u32 {
        self.controller.score()
    }

    #[getter]
    fn level(&self) -> u32 {
        self.controller.level()
    }

    #[getter]
    fn moves(&self) -> u32 {
        self.controller.moves()
    }

    #[getter]
    fn phase(&self) -> &'static str {
        phase_name(self.controller.phase())
    }

    /// Remove and return buffered events as `(kind, payload)` tuples.
    fn drain_events(&self, py: Python<'_>) -> Vec<(&'static str, PyObject)> {
        self.log
            .drain()
            .into_iter()
            .map(|event| event_to_py(py, event))
            .collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "MatchGame(level={}, score={}, phase={}, main={})",
            self.controller.level(),
            self.controller.score(),
            phase_name(self.controller.phase()),
            self.controller.state().main_len()
        )
    }
}

fn event_to_py(py: Python<'_>, event: GameEvent) -> (&'static str, PyObject) {
    match event {
        GameEvent::GameStarted { level } => ("game_started", level.into_py(py)),
        GameEvent::ScoreChanged(score) => ("score_changed", score.into_py(py)),
        GameEvent::GameWon => ("game_won", py.None()),
        GameEvent::GameLost => ("game_lost", py.None()),
        GameEvent::PhaseChanged(phase) => ("phase_changed", phase_name(phase).into_py(py)),
        GameEvent::MatchableCardsChanged(ids) => (
            "matchable_cards_changed",
            ids.into_iter().map(CardId::raw).collect::<Vec<_>>().into_py(py),
        ),
        GameEvent::MainCardRemoved(id) => ("main_card_removed", id.raw().into_py(py)),
        GameEvent::BottomCardChanged(card) => ("bottom_card_changed", card.map(PyCard).into_py(py)),
        GameEvent::SpareCardChanged(card) => ("spare_card_changed", card.map(PyCard).into_py(py)),
        GameEvent::Mismatch(id) => ("mismatch", id.raw().into_py(py)),
    }
}
