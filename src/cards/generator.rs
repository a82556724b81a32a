//! Card generation and dealing.
//!
//! `CardGenerator` draws suits and ranks from an injected `RandomSource`.
//! For each card the suit is drawn before the rank, and deals populate the
//! bottom stack first, then spare, then main. Together these make a deal
//! fully determined by the source, which is what lets tests script one with
//! a `SequenceSource`.

use log::debug;

use super::card::{Card, CardId, Rank, Suit};
use crate::core::error::EngineError;
use crate::core::rng::RandomSource;
use crate::core::state::GameState;

/// Produces cards and deals initial boards.
#[derive(Clone, Debug)]
pub struct CardGenerator<R> {
    source: R,
}

impl<R: RandomSource> CardGenerator<R> {
    /// Create a generator over the given randomness source.
    #[must_use]
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Uniformly random suit.
    pub fn random_suit(&mut self) -> Suit {
        Suit::ALL[self.source.next_below(Suit::ALL.len() as u32) as usize]
    }

    /// Uniformly random rank in `1..=13`.
    pub fn random_rank(&mut self) -> Rank {
        let offset = self.source.next_below(u32::from(Rank::MAX)) as u8;
        Rank::new(Rank::MIN + offset).unwrap_or(Rank::ACE)
    }

    /// Generate a face-up card with random suit and rank.
    pub fn generate_random_card(&mut self, id: CardId) -> Card {
        let suit = self.random_suit();
        let rank = self.random_rank();
        Card::new(id, suit, rank)
    }

    /// Generate `count` random cards with consecutive ids from `start_id`.
    pub fn generate_random_cards(&mut self, count: usize, start_id: CardId) -> Vec<Card> {
        (0..count as u32)
            .map(|offset| self.generate_random_card(CardId(start_id.0 + offset)))
            .collect()
    }

    /// Deterministic constructor for forcing specific matchups.
    #[must_use]
    pub fn generate_card(suit: Suit, rank: Rank, id: CardId) -> Card {
        Card::new(id, suit, rank)
    }

    /// Uniform random permutation (Fisher-Yates).
    pub fn shuffle(&mut self, mut cards: Vec<Card>) -> Vec<Card> {
        for i in (1..cards.len()).rev() {
            let j = self.source.next_below(i as u32 + 1) as usize;
            cards.swap(i, j);
        }
        cards
    }

    /// Deal a fresh board into an empty state.
    ///
    /// Each card takes a new id from the state's counter. Dealing into a
    /// state that still holds cards is a contract violation.
    pub fn populate_initial_state(
        &mut self,
        state: &mut GameState,
        main_count: usize,
        bottom_count: usize,
        spare_count: usize,
    ) -> Result<(), EngineError> {
        if !state.is_empty() {
            return Err(EngineError::AlreadyPopulated);
        }

        for _ in 0..bottom_count {
            let card = self.generate_random_card(state.alloc_card_id());
            state.add_to_bottom(card);
        }
        for _ in 0..spare_count {
            let card = self.generate_random_card(state.alloc_card_id());
            state.add_to_spare(card);
        }
        for _ in 0..main_count {
            let card = self.generate_random_card(state.alloc_card_id());
            state.add_to_main(card);
        }

        debug!(
            "dealt {} main, {} bottom, {} spare (next id {})",
            main_count,
            bottom_count,
            spare_count,
            state.peek_next_card_id()
        );
        Ok(())
    }
}
