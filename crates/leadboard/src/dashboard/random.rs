//! Injectable randomness for dashboard sampling.
//!
//! Every sampling operation takes a [`RandomSource`] instead of reaching for a
//! global generator. Tests script exact draws with [`SequenceSource`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

pub trait RandomSource {
    /// Uniform draw in `0..upper`. Returns 0 when `upper` is 0 or 1.
    fn next_below(&mut self, upper: usize) -> usize;

    /// Uniform draw in `low..=high`. Returns `low` when the range is empty.
    fn next_in_range(&mut self, low: i64, high: i64) -> i64;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_below(&mut self, upper: usize) -> usize {
        (**self).next_below(upper)
    }

    fn next_in_range(&mut self, low: i64, high: i64) -> i64 {
        (**self).next_in_range(low, high)
    }
}

/// Adapts any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

/// A fresh seed from the thread generator, for callers that want to report
/// which seed produced an otherwise unseeded snapshot.
pub fn entropy_seed() -> u64 {
    rand::random()
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_below(&mut self, upper: usize) -> usize {
        if upper <= 1 {
            return 0;
        }
        self.rng.gen_range(0..upper)
    }

    fn next_in_range(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..=high)
    }
}

/// Replays a fixed list of raw draws, wrapping each into the requested range.
///
/// `next_below(n)` yields `raw % n` and `next_in_range(lo, hi)` yields
/// `lo + raw % (hi - lo + 1)`. Once the list is exhausted every draw is 0,
/// i.e. the low end of the requested range.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    draws: VecDeque<u64>,
}

impl SequenceSource {
    pub fn new(draws: impl IntoIterator<Item = u64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }

    fn next_raw(&mut self) -> u64 {
        self.draws.pop_front().unwrap_or(0)
    }
}

impl RandomSource for SequenceSource {
    fn next_below(&mut self, upper: usize) -> usize {
        let raw = self.next_raw();
        if upper <= 1 {
            return 0;
        }
        (raw % upper as u64) as usize
    }

    fn next_in_range(&mut self, low: i64, high: i64) -> i64 {
        let raw = self.next_raw();
        if high <= low {
            return low;
        }
        let span = high.abs_diff(low).saturating_add(1);
        low.saturating_add((raw % span) as i64)
    }
}
