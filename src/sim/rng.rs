//! Seeded random source for level generation
//!
//! Same seed, same sequence: level generation draws from this and nothing
//! else, so a seed fully describes a level.

use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Deterministic random number generator (PCG32)
#[derive(Debug, Clone)]
pub struct LevelRng {
    seed: u64,
    inner: Pcg32,
}

impl LevelRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// The seed this generator was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        self.inner.random::<f32>()
    }

    /// Uniform float in [min, max)
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Uniform integer in an inclusive range
    pub fn range_u32(&mut self, range: RangeInclusive<u32>) -> u32 {
        if range.is_empty() {
            return *range.start();
        }
        self.inner.random_range(range)
    }

    /// Uniform index in [0, len); `len` must be non-zero
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        self.inner.random_range(0..len.max(1))
    }

    /// True with the given probability
    pub fn chance(&mut self, probability: f32) -> bool {
        self.next_f32() < probability
    }

    /// -1.0 or 1.0 with equal probability
    pub fn sign(&mut self) -> f32 {
        if self.chance(0.5) { -1.0 } else { 1.0 }
    }
}
