//! Random index sources for the enemy's card choice.
//!
//! ## Key Features
//!
//! - **Pluggable**: The engine only sees `IndexSource`, so hosts and tests
//!   can substitute their own policy.
//! - **Deterministic**: `GameRng` with the same seed produces identical choices.
//! - **Scripted**: `ScriptedIndices` replays a fixed sequence for scenario tests.
//!
//! ```
//! use duel_core::core::{GameRng, IndexSource};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! for _ in 0..10 {
//!     assert_eq!(a.next_index(3), b.next_index(3));
//! }
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniformly distributed indices.
pub trait IndexSource: Send {
    /// Return an index in `0..len`.
    ///
    /// Callers never pass `len == 0`.
    fn next_index(&mut self, len: usize) -> usize;
}

/// Seeded ChaCha8 RNG.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Build from an optional seed, falling back to entropy.
    #[must_use]
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }
}

impl IndexSource for GameRng {
    fn next_index(&mut self, len: usize) -> usize {
        self.gen_range_usize(0..len)
    }
}

/// Replays a fixed list of indices, cycling when exhausted.
///
/// Each scripted value is reduced modulo the requested length, so a script
/// stays valid as the enemy's hand shrinks.
#[derive(Clone, Debug, Default)]
pub struct ScriptedIndices {
    script: Vec<usize>,
    position: usize,
}

impl ScriptedIndices {
    /// Create a script.
    pub fn new(script: impl Into<Vec<usize>>) -> Self {
        Self {
            script: script.into(),
            position: 0,
        }
    }
}

impl IndexSource for ScriptedIndices {
    fn next_index(&mut self, len: usize) -> usize {
        if self.script.is_empty() || len == 0 {
            return 0;
        }
        let value = self.script[self.position % self.script.len()];
        self.position += 1;
        value % len
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
            assert_eq!(rng1.next_index(1000), rng2.next_index(1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.next_index(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.next_index(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_index_in_range() {
        let mut rng = GameRng::from_entropy();
        for len in 1..10 {
            for _ in 0..50 {
                assert!(rng.next_index(len) < len);
            }
        }
    }

    #[test]
    fn test_seed_option() {
        let mut seeded = GameRng::from_seed_option(Some(9));
        let mut direct = GameRng::new(9);
        for _ in 0..20 {
            assert_eq!(seeded.next_index(3), direct.next_index(3));
        }
    }

    #[test]
    fn test_scripted_cycles_and_wraps() {
        let mut script = ScriptedIndices::new(vec![2, 0, 5]);
        assert_eq!(script.next_index(3), 2);
        assert_eq!(script.next_index(3), 0);
        assert_eq!(script.next_index(2), 1); // 5 % 2
        assert_eq!(script.next_index(3), 2); // cycled
    }

    #[test]
    fn test_scripted_empty_returns_zero() {
        let mut script = ScriptedIndices::default();
        assert_eq!(script.next_index(3), 0);
    }
}
