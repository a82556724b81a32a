//! Card bindings for Python.

use pyo3::prelude::*;

use crate::cards::{Card, Suit};
use crate::core::Phase;

/// Python wrapper for Card.
#[pyclass(name = "Card")]
#[derive(Clone, Debug)]
pub struct PyCard(pub Card);

#[pymethods]
impl PyCard {
    #[getter]
    fn id(&self) -> u32 {
        self.0.id.raw()
    }

    /// "hearts", "diamonds", "clubs" or "spades".
    #[getter]
    fn suit(&self) -> &'static str {
        suit_name(self.0.suit)
    }

    /// Rank value, 1 (Ace) to 13 (King).
    #[getter]
    fn rank(&self) -> u8 {
        self.0.rank.value()
    }

    #[getter]
    fn face_up(&self) -> bool {
        self.0.face_up
    }

    /// Rank label and suit symbol, e.g. "Q♥".
    #[getter]
    fn label(&self) -> String {
        self.0.to_string()
    }

    fn is_red(&self) -> bool {
        self.0.is_red()
    }

    fn __repr__(&self) -> String {
        format!("Card(id={}, {})", self.0.id.raw(), self.0)
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        self.0.id.raw() as u64
    }
}

pub(crate) fn suit_name(suit: Suit) -> &'static str {
    match suit {
        Suit::Hearts => "hearts",
        Suit::Diamonds => "diamonds",
        Suit::Clubs => "clubs",
        Suit::Spades => "spades",
    }
}

pub(crate) fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Playing => "playing",
        Phase::Won => "won",
        Phase::Lost => "lost",
        Phase::Paused => "paused",
    }
}
