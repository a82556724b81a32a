//! Injectable randomness for card generation.
//!
//! ## Key Features
//!
//! - **Injectable**: the generator only sees the `RandomSource` trait
//! - **Deterministic**: same seed produces an identical deal
//! - **Scriptable**: `SequenceSource` replays fixed values so tests can force
//!   specific matchups
//!
//! ## Usage
//!
//! ```
//! use rust_match::core::{GameRng, RandomSource};
//!
//! let mut rng1 = GameRng::new(42);
//! let mut rng2 = GameRng::new(42);
//!
//! // Same seed, same sequence
//! assert_eq!(rng1.next_below(13), rng2.next_below(13));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of bounded random integers.
///
/// The card generator draws every suit and rank through this trait, so a
/// host can substitute any source (seeded, scripted, hardware).
pub trait RandomSource {
    /// Return a value in `0..bound`, or 0 when `bound` is 0.
    fn next_below(&mut self, bound: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_below(&mut self, bound: u32) -> u32 {
        (**self).next_below(bound)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_below(&mut self, bound: u32) -> u32 {
        (**self).next_below(bound)
    }
}

/// Seeded RNG used for production deals.
///
/// Uses ChaCha8 for speed with good statistical quality. Not intended to be
/// cryptographic.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded once per process from OS entropy.
    ///
    /// The chosen seed is kept so a surprising deal can be replayed with
    /// `GameRng::new(rng.seed())`.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.inner.gen_range(0..bound)
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Each value is reduced modulo the requested bound. Intended for tests
/// and demos that need a specific deal:
///
/// ```
/// use rust_match::core::{RandomSource, SequenceSource};
///
/// let mut source = SequenceSource::new(vec![2, 17]);
/// assert_eq!(source.next_below(4), 2);
/// assert_eq!(source.next_below(13), 4);
/// assert_eq!(source.next_below(4), 2); // wrapped
/// ```
#[derive(Clone, Debug, Default)]
pub struct SequenceSource {
    values: Vec<u32>,
    cursor: usize,
}

impl SequenceSource {
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Number of values drawn so far.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn next_below(&mut self, bound: u32) -> u32 {
        if self.values.is_empty() || bound == 0 {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.next_below(1000), rng2.next_below(1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.next_below(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.next_below(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_next_below_in_bounds() {
        let mut rng = GameRng::new(7);
        assert_eq!(rng.seed(), 7);
        for _ in 0..1000 {
            assert!(rng.next_below(13) < 13);
        }
        // A bound of 1 only ever yields 0
        assert_eq!(rng.next_below(1), 0);
    }

    #[test]
    fn test_zero_bound_yields_zero() {
        let mut rng = GameRng::new(3);
        let mut source = SequenceSource::new(vec![5]);

        assert_eq!(rng.next_below(0), 0);
        assert_eq!(source.next_below(0), 0);
    }

    #[test]
    fn test_sequence_source_cycles() {
        let mut source = SequenceSource::new(vec![1, 5, 30]);

        assert_eq!(source.next_below(4), 1);
        assert_eq!(source.next_below(4), 1); // 5 % 4
        assert_eq!(source.next_below(13), 4); // 30 % 13
        assert_eq!(source.next_below(10), 1);
        assert_eq!(source.drawn(), 4);
    }

    #[test]
    fn test_sequence_source_empty() {
        let mut source = SequenceSource::default();
        assert_eq!(source.next_below(13), 0);
    }

    #[test]
    fn test_source_through_reference() {
        fn draw(mut source: impl RandomSource) -> u32 {
            source.next_below(4)
        }

        let mut source = SequenceSource::new(vec![3]);
        assert_eq!(draw(&mut source), 3);
        assert_eq!(source.drawn(), 1);
    }
}
