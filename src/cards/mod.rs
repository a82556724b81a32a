//! Card system: card values and the deck generator.
//!
//! ## Key Types
//!
//! - `CardId`: Unique identity assigned by the game state
//! - `Suit`, `Rank`, `Color`: The card face
//! - `Card`: A copyable card value with orientation
//! - `CardGenerator`: Random/deterministic card creation and dealing

pub mod card;
pub mod generator;

pub use card::{Card, CardId, Color, Rank, Suit};
pub use generator::CardGenerator;
