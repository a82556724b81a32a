//! Outbound game events.
//!
//! Each variant is one notification a presentation layer may react to.
//! They are the minimal deltas a renderer needs to animate a move without
//! re-reading the whole board.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::core::state::Phase;

/// A notification raised by the controller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new board was dealt.
    GameStarted { level: u32 },
    /// The score changed (including the reset to 0 on a new game).
    ScoreChanged(u32),
    /// The main stack became empty.
    GameWon,
    /// No main card can match the bottom card.
    GameLost,
    /// The phase changed (pause, resume, win, loss).
    PhaseChanged(Phase),
    /// Hint highlighting changed. Ids are sorted; empty clears highlights.
    MatchableCardsChanged(Vec<CardId>),
    /// A card left the main stack.
    MainCardRemoved(CardId),
    /// The bottom top card changed. `None` if the bottom stack is empty.
    BottomCardChanged(Option<Card>),
    /// The spare top card changed. `None` if the spare stack is empty.
    SpareCardChanged(Option<Card>),
    /// A click on a main card did not match.
    Mismatch(CardId),
}

impl GameEvent {
    /// Build a hint event with ids in ascending order.
    #[must_use]
    pub fn matchable(ids: &FxHashSet<CardId>) -> Self {
        let mut sorted: Vec<_> = ids.iter().copied().collect();
        sorted.sort_unstable();
        GameEvent::MatchableCardsChanged(sorted)
    }

    /// Whether this event ends the game.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::GameWon | GameEvent::GameLost)
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::GameStarted { level } => write!(f, "game started (level {})", level),
            GameEvent::ScoreChanged(score) => write!(f, "score {}", score),
            GameEvent::GameWon => f.write_str("game won"),
            GameEvent::GameLost => f.write_str("game lost"),
            GameEvent::PhaseChanged(phase) => write!(f, "phase {:?}", phase),
            GameEvent::MatchableCardsChanged(ids) => write!(f, "{} matchable cards", ids.len()),
            GameEvent::MainCardRemoved(id) => write!(f, "{} removed from main", id),
            GameEvent::BottomCardChanged(Some(card)) => write!(f, "bottom now {}", card),
            GameEvent::BottomCardChanged(None) => f.write_str("bottom empty"),
            GameEvent::SpareCardChanged(Some(card)) => write!(f, "spare now {}", card.id),
            GameEvent::SpareCardChanged(None) => f.write_str("spare empty"),
            GameEvent::Mismatch(id) => write!(f, "{} does not match", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matchable_sorts_ids() {
        let ids: FxHashSet<_> = [CardId(9), CardId(2), CardId(5)].into_iter().collect();

        assert_eq!(
            GameEvent::matchable(&ids),
            GameEvent::MatchableCardsChanged(vec![CardId(2), CardId(5), CardId(9)])
        );
        assert_eq!(
            GameEvent::matchable(&FxHashSet::default()),
            GameEvent::MatchableCardsChanged(Vec::new())
        );
    }

    #[test]
    fn test_is_terminal() {
        assert!(GameEvent::GameWon.is_terminal());
        assert!(GameEvent::GameLost.is_terminal());
        assert!(!GameEvent::ScoreChanged(10).is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(GameEvent::ScoreChanged(30).to_string(), "score 30");
        assert_eq!(GameEvent::Mismatch(CardId(4)).to_string(), "Card(4) does not match");
        assert_eq!(GameEvent::BottomCardChanged(None).to_string(), "bottom empty");
    }

    #[test]
    fn test_serialization() {
        let event = GameEvent::GameStarted { level: 3 };
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
