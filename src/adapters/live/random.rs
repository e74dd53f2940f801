//! Live adapter for the `RandomSource` port.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ports::RandomSource;

/// Pseudo-random source backed by a `StdRng` owned by one registry.
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Creates a reproducible source: equal seeds yield equal streams.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Creates a source seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    /// Creates a seeded source when `seed` is given, an entropy-seeded one otherwise.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl RandomSource for SeededRandom {
    fn draw(&mut self, upper: i32) -> i32 {
        self.rng.random_range(0..upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_seeds_produce_equal_streams() {
        let mut a = SeededRandom::seeded(42);
        let mut b = SeededRandom::seeded(42);
        let xs: Vec<i32> = (0..16).map(|_| a.draw(i32::MAX)).collect();
        let ys: Vec<i32> = (0..16).map(|_| b.draw(i32::MAX)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn draws_stay_within_bounds() {
        let mut source = SeededRandom::new(Some(7));
        for _ in 0..1_000 {
            let v = source.draw(10);
            assert!((0..10).contains(&v), "draw out of range: {v}");
        }
    }

    #[test]
    fn entropy_source_draws_within_bounds() {
        let mut source = SeededRandom::new(None);
        let v = source.draw(3);
        assert!((0..3).contains(&v));
    }
}
