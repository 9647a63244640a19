use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

//
// ─── RANDOM SOURCE ─────────────────────────────────────────────────────────────
//

/// Source of uniform randomness for question and answer generation.
///
/// Everything that consumes randomness takes a `RandomSource` instead of
/// reaching for a global generator, so tests can inject a seeded or scripted
/// implementation and assert exact outputs.
pub trait RandomSource {
    /// Returns a uniformly distributed index in `[0, bound)`.
    ///
    /// `bound` must be at least 1.
    fn pick(&mut self, bound: usize) -> usize;
}

/// Randomness from the thread-local generator. The production source.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, bound: usize) -> usize {
        rand::rng().random_range(0..bound)
    }
}

/// Reproducible randomness derived from a fixed seed.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }
}

/// Replays a fixed sequence of picks, for tests that pin exact outputs.
///
/// # Panics
///
/// `pick` panics when the script is exhausted or when the next scripted value
/// is not below the requested bound; both indicate a test whose script does
/// not match the code path under test.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    picks: VecDeque<usize>,
}

impl ScriptedRandom {
    #[must_use]
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }

    /// Number of scripted picks not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.picks.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn pick(&mut self, bound: usize) -> usize {
        let value = self.picks.pop_front().expect("scripted picks exhausted");
        assert!(
            value < bound,
            "scripted pick {value} is out of range for bound {bound}"
        );
        value
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
