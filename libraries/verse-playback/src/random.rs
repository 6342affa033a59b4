//! Random index selection for random-mode navigation
//!
//! The playlist never calls an RNG directly; it asks a [`RandomSource`]
//! so tests and reproducible sessions can supply their own sequence.

use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};

/// Source of uniformly distributed indices
pub trait RandomSource {
    /// Return an index in `[0, bound)`
    ///
    /// Callers never pass `bound == 0`.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// Thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        thread_rng().gen_range(0..bound)
    }
}

/// Deterministic RNG seeded from a `u64`
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Create from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

/// Pick a uniformly random index in `[0, len)` different from `current`
///
/// Draws from the `len - 1` other slots and shifts past `current`, so every
/// other index is equally likely and no redraw loop is needed.
/// `len` must be at least 2.
pub(crate) fn pick_other(source: &mut dyn RandomSource, len: usize, current: usize) -> usize {
    debug_assert!(len >= 2);
    let drawn = source.next_index(len - 1).min(len - 2);
    if drawn >= current {
        drawn + 1
    } else {
        drawn
    }
}

/// Build the configured source
pub(crate) fn source_for_seed(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    }
}
