//! Per-run random number generator.
//!
//! Every run owns one [`SimulationRng`]; nothing in the engine touches a
//! process-global generator.

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};
use rand_distr::Distribution;

/// Seeded generator that remembers its seed.
///
/// # Examples
///
/// ```rust
/// use scenario_engine::rng::SimulationRng;
///
/// let mut a = SimulationRng::from_seed(42);
/// let mut b = SimulationRng::from_seed(42);
/// assert_eq!(a.gen_uniform(), b.gen_uniform());
/// assert_eq!(a.seed(), 42);
/// ```
pub struct SimulationRng {
    inner: StdRng,
    seed: u64,
}

impl SimulationRng {
    /// Creates a generator initialised with the given seed.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates a generator from a seed drawn from OS entropy.
    ///
    /// The drawn seed is kept so the run can be replayed.
    pub fn from_entropy() -> Self {
        Self::from_seed(OsRng.next_u64())
    }

    /// Creates a seeded generator, or an entropy-seeded one for `None`.
    #[inline]
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates a uniform value in [0, 1).
    #[inline]
    pub fn gen_uniform(&mut self) -> f64 {
        self.inner.gen()
    }

    /// Draws one value from `dist`.
    #[inline]
    pub fn sample<D: Distribution<f64>>(&mut self, dist: &D) -> f64 {
        dist.sample(&mut self.inner)
    }

    /// Fills the buffer with draws from `dist`, in order.
    #[inline]
    pub fn fill<D: Distribution<f64>>(&mut self, dist: &D, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = dist.sample(&mut self.inner);
        }
    }
}
