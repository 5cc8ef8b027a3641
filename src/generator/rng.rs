//! Deterministic random number generation for level generation.
//!
//! Same seed, same level: the generator draws every random choice from a
//! `LevelRng`, which wraps ChaCha8.
//!
//! ```
//! use sokoban_engine::generator::LevelRng;
//!
//! let mut a: Vec<u32> = (0..10).collect();
//! let mut b = a.clone();
//! LevelRng::new(7).shuffle(&mut a);
//! LevelRng::new(7).shuffle(&mut b);
//! assert_eq!(a, b);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded RNG for the level generator.
#[derive(Clone, Debug)]
pub struct LevelRng {
    inner: ChaCha8Rng,
}

impl LevelRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate a random boolean with given probability of true.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}
