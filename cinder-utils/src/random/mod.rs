//! Seedable pseudo-random sources.
//!
//! Every source implements [`Random`]. [`RandomSource`] lets callers pick the
//! algorithm at runtime (for example from configuration) without boxing.

use enum_dispatch::enum_dispatch;
use serde::Deserialize;

pub mod legacy_random;
pub mod xoroshiro;

use legacy_random::LegacyRandom;
use xoroshiro::Xoroshiro;

/// A stateful pseudo-random number generator.
#[enum_dispatch]
pub trait Random {
    /// Returns a uniformly distributed `i32`.
    fn next_i32(&mut self) -> i32;

    /// Returns a value in `0..bound`. `bound` must be positive.
    fn next_i32_bounded(&mut self, bound: i32) -> i32;

    /// Returns a value in `min..=max`.
    fn next_i32_between(&mut self, min: i32, max: i32) -> i32 {
        self.next_i32_bounded(max - min + 1) + min
    }

    /// Returns a value in `min..max`, or `min` when the range is empty.
    fn next_i32_between_exclusive(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        min + self.next_i32_bounded(max - min)
    }
}

/// A random source whose algorithm is chosen at runtime.
#[enum_dispatch(Random)]
pub enum RandomSource {
    /// The 48-bit linear congruential generator.
    Legacy(LegacyRandom),
    /// The xoroshiro128++ generator.
    Xoroshiro(Xoroshiro),
}

/// Selects which algorithm backs a [`RandomSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RandomKind {
    /// See [`LegacyRandom`].
    #[default]
    Legacy,
    /// See [`Xoroshiro`].
    Xoroshiro,
}

impl RandomKind {
    /// Creates a source of this kind from a fixed seed.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> RandomSource {
        match self {
            Self::Legacy => RandomSource::Legacy(LegacyRandom::from_seed(seed)),
            Self::Xoroshiro => RandomSource::Xoroshiro(Xoroshiro::from_seed(seed)),
        }
    }

    /// Creates a source of this kind seeded from the thread-local entropy pool.
    #[must_use]
    pub fn from_entropy(self) -> RandomSource {
        self.with_seed(rand::random::<u64>())
    }
}
