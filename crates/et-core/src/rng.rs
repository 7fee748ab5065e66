//! The simulation-level RNG.
//!
//! # Determinism strategy
//!
//! A run draws every random number from one `SmallRng`, seeded once when the
//! simulation is built and threaded by `&mut` through population setup,
//! dispersal, and the transition dice.  Nothing reads process-wide state, so
//! two runs built with the same seed consume the same stream in the same
//! order and produce identical tallies and logs.

use rand::distributions::WeightedIndex;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy.  Used for unseeded runs only.
    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
    }

    /// Build from an optional seed: `Some` is reproducible, `None` is not.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::new(s),
            None => Self::from_entropy(),
        }
    }

    /// A uniform draw in `[0, 1)`: the per-agent, per-event transition dice.
    #[inline]
    pub fn dice(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Choose a random element from a slice.  `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }

    /// Draw an index with probability proportional to `weights[i]`.
    ///
    /// Returns `None` when the weights do not form a distribution (empty,
    /// negative, non-finite, or all zero).  Callers decide the fallback.
    pub fn choose_weighted(&mut self, weights: &[f64]) -> Option<usize> {
        let dist = WeightedIndex::new(weights).ok()?;
        Some(self.0.sample(dist))
    }
}
