//! Deterministic, splittable PRNG wrapper.
//!
//! A single `Xoshiro256PlusPlus` stream that can be split into
//! independent child streams via [`Rng::create_child`]. The engine uses
//! this to hand each trial its own private, deterministically-seeded
//! stream without needing real threads.

use rand::distributions::{Uniform, WeightedIndex};
use rand::prelude::Distribution;
use rand::{Rng as _, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

#[derive(Debug)]
pub struct Rng {
    rng: Xoshiro256PlusPlus,
}

impl Rng {
    #[must_use]
    pub fn from_seed(seed: u64) -> Rng {
        Rng {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// Split off an independent, deterministic child stream.
    #[must_use]
    #[allow(clippy::missing_panics_doc)]
    pub fn create_child(&mut self) -> Rng {
        Rng {
            rng: Xoshiro256PlusPlus::from_rng(&mut self.rng).unwrap(),
        }
    }

    /// Uniform integer in `[0, bound)`. Panics if `bound == 0`.
    pub fn uniform_below(&mut self, bound: usize) -> usize {
        self.rng.sample(Uniform::new(0, bound))
    }

    /// Uniform integer in `[lo, hi)`.
    pub fn uniform_range(&mut self, lo: usize, hi: usize) -> usize {
        self.rng.sample(Uniform::new(lo, hi))
    }

    /// `true` with probability `1/r`, the "1-in-r" convention used for
    /// every mutation rate.
    pub fn one_in(&mut self, r: u32) -> bool {
        debug_assert!(r > 0);
        self.rng.gen_ratio(1, r)
    }

    pub fn gen_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Sample an index with probability proportional to `weights[i]`.
    /// Returns `None` if every weight is zero, matching C2's "if the sum
    /// is 0 return a uniform pick" contract (the caller performs the
    /// uniform fallback).
    pub fn weighted_index(&mut self, weights: &[u64]) -> Option<usize> {
        if weights.iter().all(|&w| w == 0) {
            return None;
        }
        WeightedIndex::new(weights).ok().map(|d| d.sample(&mut self.rng))
    }
}
