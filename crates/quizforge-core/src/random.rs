//! Injectable randomness.
//!
//! Every shuffle, probability draw and random pick in the engine goes through
//! [`RandomSource`], so tests can fix outcomes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of random draws used by the engine.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` is never zero.
    fn next_index(&mut self, len: usize) -> usize;
}

/// Adapter from any `rand` generator.
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Deterministic source for reproducible quizzes.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Fisher-Yates shuffle driven by a [`RandomSource`].
///
/// `rand::seq::SliceRandom` would draw from the RNG directly and bypass
/// scripted sources.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}

/// Uniform pick from a slice.
pub fn choose<'a, T>(items: &'a [T], rng: &mut dyn RandomSource) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        Some(&items[rng.next_index(items.len())])
    }
}

/// Scripted source for tests: replays the given draws, cycling when exhausted.
#[cfg(test)]
pub(crate) struct ScriptedSource {
    draws: Vec<f64>,
    pos: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub(crate) fn new(draws: Vec<f64>) -> Self {
        assert!(!draws.is_empty());
        Self { draws, pos: 0 }
    }

    fn advance(&mut self) -> f64 {
        let v = self.draws[self.pos % self.draws.len()];
        self.pos += 1;
        v
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn next_f64(&mut self) -> f64 {
        self.advance()
    }

    fn next_index(&mut self, len: usize) -> usize {
        ((self.advance() * len as f64) as usize).min(len - 1)
    }
}
