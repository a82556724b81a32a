//! Python bindings for the rust-match puzzle engine.
//!
//! # Quick Start
//!
//! ```python
//! import rust_match as rm
//!
//! game = rm.MatchGame(seed=42)
//! for card_id in game.show_hint():
//!     game.on_card_clicked(card_id)
//!     break
//!
//! for kind, payload in game.drain_events():
//!     print(kind, payload)
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_game;

pub use py_core::*;
pub use py_game::*;

/// rust-match: a card-matching puzzle engine.
#[pymodule]
fn rust_match(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCard>()?;
    m.add_class::<PyMatchGame>()?;
    Ok(())
}
