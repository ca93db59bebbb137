//! Injectable source of uniform random draws.
//!
//! Battle resolution consumes exactly one draw per battle. Keeping the source
//! behind a trait lets tests pin the draw and assert an exact outcome.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// A source of uniformly distributed values in `[0, 1)`.
pub trait RandomSource {
    fn draw(&mut self) -> f64;
}

/// OS-seeded random source used outside of tests.
#[derive(Debug)]
pub struct SystemRandom {
    rng: SmallRng,
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl RandomSource for SystemRandom {
    fn draw(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}
