//! Seeded random stream
//!
//! Every stochastic decision in a session draws from one `RandomStream`.
//! It is seeded once when the session is created and never reseeded.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone)]
pub struct RandomStream {
    rng: ChaCha8Rng,
    seed: u64,
    draws: u64,
}

impl RandomStream {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            draws: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Uniform float in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.draws += 1;
        self.rng.gen::<f64>()
    }

    /// Uniform integer in [low, high]. Degenerate ranges return `low` without drawing.
    pub fn range_inclusive(&mut self, low: i32, high: i32) -> i32 {
        if low >= high {
            return low;
        }
        self.draws += 1;
        self.rng.gen_range(low..=high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = RandomStream::new(42);
        let mut b = RandomStream::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
            assert_eq!(a.range_inclusive(-3, 3), b.range_inclusive(-3, 3));
        }
        assert_eq!(a.draws(), 200);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = RandomStream::new(1);
        let mut b = RandomStream::new(2);
        let same = (0..16).all(|_| a.next_f64().to_bits() == b.next_f64().to_bits());
        assert!(!same);
    }

    #[test]
    fn test_degenerate_range_does_not_draw() {
        let mut stream = RandomStream::new(7);
        assert_eq!(stream.range_inclusive(0, 0), 0);
        assert_eq!(stream.range_inclusive(5, 2), 5);
        assert_eq!(stream.draws(), 0);
    }

    #[test]
    fn test_values_in_range() {
        let mut stream = RandomStream::new(9);
        for _ in 0..500 {
            let f = stream.next_f64();
            assert!((0.0..1.0).contains(&f));
            let i = stream.range_inclusive(-2, 2);
            assert!((-2..=2).contains(&i));
        }
    }
}
