//! Deterministic random number generation for match setup.
//!
//! Deck shuffles, the mulligan reshuffle and the battlefield pick all draw
//! from one seeded `GameRng`, so a match set up from the same deck lists and
//! seed is reproducible.
//!
//! ```
//! use riftbound_engine::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.pick_index(100), b.pick_index(100));
//! ```

use im::Vector;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded ChaCha8 RNG.
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

    /// Pick an index in `0..len`. Returns `None` when `len` is zero.
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.inner.gen_range(0..len))
        }
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Shuffle a persistent vector.
    pub fn shuffle_vector<T: Clone>(&mut self, cards: &mut Vector<T>) {
        let mut flat: Vec<T> = cards.iter().cloned().collect();
        self.shuffle(&mut flat);
        *cards = flat.into_iter().collect();
    }

    /// Get the current state for snapshots.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state.
///
/// ChaCha8's word position makes this O(1) regardless of how many numbers
/// have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..50 {
            assert_eq!(rng1.pick_index(1000), rng2.pick_index(1000));
        }
    }

    #[test]
    fn test_pick_index_empty() {
        let mut rng = GameRng::new(1);
        assert_eq!(rng.pick_index(0), None);
        assert!(rng.pick_index(3).is_some_and(|i| i < 3));
    }

    #[test]
    fn test_shuffle_vector_keeps_elements() {
        let mut rng = GameRng::new(9);
        let mut cards: Vector<u32> = (0..20).collect();
        rng.shuffle_vector(&mut cards);

        let mut sorted: Vec<u32> = cards.iter().copied().collect();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_state_restore() {
        let mut rng = GameRng::new(42);
        rng.pick_index(10);
        let state = rng.state();

        let mut restored = GameRng::from_state(&state);
        for _ in 0..10 {
            assert_eq!(rng.pick_index(1000), restored.pick_index(1000));
        }
    }
}
