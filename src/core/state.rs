//! Game state: the three card stacks and progression counters.
//!
//! ## Stacks
//!
//! - **Main**: the cards the player is trying to clear, all face-up
//! - **Bottom**: face-up pile; only the top (last) card is compared
//! - **Spare**: face-down reserve; only the top (last) card is actionable
//!
//! ## Ownership
//!
//! Stacks are `im::Vector`s. Read accessors return O(1) snapshot copies, so
//! a renderer can hold a view of the board without being able to mutate it.
//! All mutation goes through the stack operations on `GameState`, which
//! enforce each stack's orientation convention.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::error::{EngineError, StackKind};
use crate::cards::{Card, CardId};

/// Coarse game lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Playing,
    Won,
    Lost,
    Paused,
}

impl Phase {
    /// Won or Lost.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }
}

/// Complete state of one game session.
///
/// The id counter survives `reset`, so ids are never reused within a
/// session even across boards.
#[derive(Clone, Debug)]
pub struct GameState {
    main: Vector<Card>,
    bottom: Vector<Card>,
    spare: Vector<Card>,

    score: u32,
    level: u32,
    moves: u32,
    phase: Phase,

    /// Next card ID to allocate.
    next_card_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Create an empty state at level 1.
    #[must_use]
    pub fn new() -> Self {
        Self::with_level(1)
    }

    /// Create an empty state at the given level (clamped to at least 1).
    #[must_use]
    pub fn with_level(level: u32) -> Self {
        Self {
            main: Vector::new(),
            bottom: Vector::new(),
            spare: Vector::new(),
            score: 0,
            level: level.max(1),
            moves: 0,
            phase: Phase::Playing,
            next_card_id: 1,
        }
    }

    // === Card IDs ===

    /// Allocate a new card ID.
    pub fn alloc_card_id(&mut self) -> CardId {
        let id = CardId(self.next_card_id);
        self.next_card_id += 1;
        id
    }

    /// The ID the next allocation will return.
    #[must_use]
    pub fn peek_next_card_id(&self) -> CardId {
        CardId(self.next_card_id)
    }

    // === Stack Mutation ===

    /// Push a card onto the main stack, face-up.
    pub fn add_to_main(&mut self, card: Card) {
        self.main.push_back(card.with_face_up(true));
    }

    /// Push a card onto the bottom stack, face-up.
    pub fn add_to_bottom(&mut self, card: Card) {
        self.bottom.push_back(card.with_face_up(true));
    }

    /// Push a card onto the spare stack, face-down.
    pub fn add_to_spare(&mut self, card: Card) {
        self.spare.push_back(card.with_face_up(false));
    }

    /// Remove a card from the main stack.
    ///
    /// Returns true if the card was found and removed. A missing id is not
    /// an error: the view layer may click a card that is already gone.
    pub fn remove_from_main(&mut self, id: CardId) -> bool {
        if let Some(pos) = self.main.iter().position(|c| c.id == id) {
            self.main.remove(pos);
            true
        } else {
            false
        }
    }

    /// Move the bottom top card onto the spare stack, face-down.
    pub fn move_bottom_to_spare(&mut self) -> Result<Card, EngineError> {
        let card = self.bottom.pop_back().ok_or(EngineError::InvalidTransition {
            from: StackKind::Bottom,
            to: StackKind::Spare,
        })?;
        self.add_to_spare(card);
        Ok(card.with_face_up(false))
    }

    /// Move the spare top card onto the bottom stack, face-up.
    pub fn move_spare_to_bottom(&mut self) -> Result<Card, EngineError> {
        let card = self.spare.pop_back().ok_or(EngineError::InvalidTransition {
            from: StackKind::Spare,
            to: StackKind::Bottom,
        })?;
        self.add_to_bottom(card);
        Ok(card.with_face_up(true))
    }

    /// Clear the board for a new game.
    ///
    /// Empties all stacks, zeroes score and moves and returns to Playing.
    /// Level and the card id counter are preserved.
    pub fn reset(&mut self) {
        self.main.clear();
        self.bottom.clear();
        self.spare.clear();
        self.score = 0;
        self.moves = 0;
        self.phase = Phase::Playing;
    }

    // === Progression ===

    /// Add points to the score.
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Count one successful match.
    pub fn increment_moves(&mut self) {
        self.moves += 1;
    }

    /// Set the level (clamped to at least 1).
    pub fn set_level(&mut self, level: u32) {
        self.level = level.max(1);
    }

    /// Set the phase. The controller is the only caller during play.
    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    // === Queries ===

    /// Snapshot of the main stack, in play order.
    #[must_use]
    pub fn main_stack(&self) -> Vector<Card> {
        self.main.clone()
    }

    /// Snapshot of the bottom stack; the last card is the active one.
    #[must_use]
    pub fn bottom_stack(&self) -> Vector<Card> {
        self.bottom.clone()
    }

    /// Snapshot of the spare stack; the last card is the actionable one.
    #[must_use]
    pub fn spare_stack(&self) -> Vector<Card> {
        self.spare.clone()
    }

    /// Iterate over main-stack cards without copying the stack.
    pub fn main_cards(&self) -> impl Iterator<Item = &Card> {
        self.main.iter()
    }

    #[must_use]
    pub fn main_len(&self) -> usize {
        self.main.len()
    }

    #[must_use]
    pub fn bottom_len(&self) -> usize {
        self.bottom.len()
    }

    #[must_use]
    pub fn spare_len(&self) -> usize {
        self.spare.len()
    }

    /// Look up a main-stack card by id.
    #[must_use]
    pub fn main_card(&self, id: CardId) -> Option<Card> {
        self.main.iter().find(|c| c.id == id).copied()
    }

    /// The active comparison card.
    ///
    /// Fails only if the bottom stack is empty, which a correctly dealt
    /// game never allows.
    pub fn current_bottom_card(&self) -> Result<Card, EngineError> {
        self.top_bottom().ok_or(EngineError::EmptyStack(StackKind::Bottom))
    }

    /// Top of the bottom stack, if any.
    #[must_use]
    pub fn top_bottom(&self) -> Option<Card> {
        self.bottom.last().copied()
    }

    /// Top of the spare stack, if any.
    #[must_use]
    pub fn top_spare(&self) -> Option<Card> {
        self.spare.last().copied()
    }

    /// Whether all three stacks are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.bottom.is_empty() && self.spare.is_empty()
    }

    /// Clickability policy for main-stack cards.
    ///
    /// Every card currently in the main stack is clickable. Layered rulesets
    /// restrict this without touching the controller.
    #[must_use]
    pub fn is_card_clickable(&self, card: &Card) -> bool {
        self.main.iter().any(|c| c.id == card.id)
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// All main cards cleared.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.phase == Phase::Won
    }

    /// Won or Lost.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn card(state: &mut GameState, suit: Suit, rank: u8) -> Card {
        Card::new(state.alloc_card_id(), suit, Rank::new(rank).unwrap())
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new();

        assert_eq!(state.level(), 1);
        assert_eq!(state.score(), 0);
        assert_eq!(state.moves(), 0);
        assert_eq!(state.phase(), Phase::Playing);
        assert!(state.is_empty());
    }

    #[test]
    fn test_with_level_clamps_zero() {
        assert_eq!(GameState::with_level(0).level(), 1);
        assert_eq!(GameState::with_level(4).level(), 4);
    }

    #[test]
    fn test_alloc_card_id() {
        let mut state = GameState::new();

        let a = state.alloc_card_id();
        let b = state.alloc_card_id();

        assert_eq!(a, CardId(1));
        assert_eq!(b, CardId(2));
        assert_eq!(state.peek_next_card_id(), CardId(3));
    }

    #[test]
    fn test_add_forces_orientation() {
        let mut state = GameState::new();
        let down = card(&mut state, Suit::Hearts, 3).with_face_up(false);
        let up = card(&mut state, Suit::Clubs, 4);
        let up2 = card(&mut state, Suit::Spades, 5);
        let down2 = card(&mut state, Suit::Diamonds, 6).with_face_up(false);

        state.add_to_main(down);
        state.add_to_bottom(down2);
        state.add_to_spare(up);
        state.add_to_spare(up2);

        assert!(state.main_stack()[0].face_up);
        assert!(state.top_bottom().unwrap().face_up);
        assert!(state.spare_stack().iter().all(|c| !c.face_up));
    }

    #[test]
    fn test_remove_from_main() {
        let mut state = GameState::new();
        let a = card(&mut state, Suit::Hearts, 1);
        let b = card(&mut state, Suit::Hearts, 2);
        state.add_to_main(a);
        state.add_to_main(b);

        assert!(state.remove_from_main(a.id));
        assert_eq!(state.main_len(), 1);
        assert_eq!(state.main_card(b.id), Some(b));

        // Missing ids are a no-op
        assert!(!state.remove_from_main(a.id));
        assert!(!state.remove_from_main(CardId(99)));
        assert_eq!(state.main_len(), 1);
    }

    #[test]
    fn test_current_bottom_card_empty() {
        let state = GameState::new();
        assert_eq!(
            state.current_bottom_card(),
            Err(EngineError::EmptyStack(StackKind::Bottom))
        );
    }

    #[test]
    fn test_current_bottom_card_is_last() {
        let mut state = GameState::new();
        let older = card(&mut state, Suit::Hearts, 1);
        let newer = card(&mut state, Suit::Spades, 9);
        state.add_to_bottom(older);
        state.add_to_bottom(newer);

        assert_eq!(state.current_bottom_card(), Ok(newer));
    }

    #[test]
    fn test_move_bottom_to_spare() {
        let mut state = GameState::new();
        let x = card(&mut state, Suit::Hearts, 7);
        state.add_to_bottom(x);

        let moved = state.move_bottom_to_spare().unwrap();

        assert_eq!(moved.id, x.id);
        assert!(!moved.face_up);
        assert_eq!(state.bottom_len(), 0);
        assert_eq!(state.top_spare().map(|c| c.id), Some(x.id));
        assert!(!state.top_spare().unwrap().face_up);
    }

    #[test]
    fn test_move_spare_to_bottom() {
        let mut state = GameState::new();
        let x = card(&mut state, Suit::Hearts, 7);
        let y = card(&mut state, Suit::Clubs, 2);
        state.add_to_bottom(x);
        state.add_to_spare(y);

        let moved = state.move_spare_to_bottom().unwrap();

        assert!(moved.face_up);
        assert_eq!(state.spare_len(), 0);
        let ids: Vec<_> = state.bottom_stack().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![x.id, y.id]);
        assert!(state.top_bottom().unwrap().face_up);
    }

    #[test]
    fn test_bottom_spare_round_trip() {
        let mut state = GameState::new();
        let x = card(&mut state, Suit::Hearts, 7);
        let y = card(&mut state, Suit::Clubs, 8);
        let z = card(&mut state, Suit::Spades, 2);
        state.add_to_bottom(x);
        state.add_to_bottom(y);
        state.add_to_spare(z);
        let bottom = state.bottom_stack();
        let spare = state.spare_stack();

        let down = state.move_bottom_to_spare().unwrap();
        assert!(!down.face_up);
        let up = state.move_spare_to_bottom().unwrap();
        assert_eq!(up.id, y.id);
        assert!(up.face_up);

        assert_eq!(state.bottom_stack(), bottom);
        assert_eq!(state.spare_stack(), spare);
        assert!(state.bottom_stack().iter().all(|c| c.face_up));
        assert!(state.spare_stack().iter().all(|c| !c.face_up));
    }

    #[test]
    fn test_moves_from_empty_stacks_fail() {
        let mut state = GameState::new();

        assert_eq!(
            state.move_bottom_to_spare(),
            Err(EngineError::InvalidTransition {
                from: StackKind::Bottom,
                to: StackKind::Spare,
            })
        );
        assert_eq!(
            state.move_spare_to_bottom(),
            Err(EngineError::InvalidTransition {
                from: StackKind::Spare,
                to: StackKind::Bottom,
            })
        );
        assert!(state.is_empty());
    }

    #[test]
    fn test_reset_preserves_level_and_ids() {
        let mut state = GameState::with_level(3);
        let a = card(&mut state, Suit::Hearts, 1);
        state.add_to_main(a);
        state.add_score(50);
        state.increment_moves();
        state.set_phase(Phase::Lost);

        state.reset();

        assert!(state.is_empty());
        assert_eq!(state.score(), 0);
        assert_eq!(state.moves(), 0);
        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.level(), 3);
        assert_eq!(state.alloc_card_id(), CardId(2));
    }

    #[test]
    fn test_snapshots_are_detached() {
        let mut state = GameState::new();
        let a = card(&mut state, Suit::Hearts, 1);
        state.add_to_main(a);

        let mut snapshot = state.main_stack();
        snapshot.clear();

        assert_eq!(state.main_len(), 1);
    }

    #[test]
    fn test_is_card_clickable() {
        let mut state = GameState::new();
        let a = card(&mut state, Suit::Hearts, 1);
        let b = card(&mut state, Suit::Hearts, 2);
        state.add_to_main(a);
        state.add_to_bottom(b);

        assert!(state.is_card_clickable(&a));
        assert!(!state.is_card_clickable(&b));
    }

    #[test]
    fn test_phase_queries() {
        let mut state = GameState::new();
        assert!(!state.is_over());

        state.set_phase(Phase::Won);
        assert!(state.is_won());
        assert!(state.is_over());

        state.set_phase(Phase::Lost);
        assert!(!state.is_won());
        assert!(state.is_over());

        assert!(!Phase::Paused.is_terminal());
    }

    #[test]
    fn test_score_saturates() {
        let mut state = GameState::new();
        state.add_score(u32::MAX);
        state.add_score(10);
        assert_eq!(state.score(), u32::MAX);
    }
}
