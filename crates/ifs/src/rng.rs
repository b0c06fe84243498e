//! Seedable random sources for reproducible runs.
//!
//! Engines own an `R: Rng` handed in at construction. `ReplayToken` turns a
//! `(seed, index)` pair into an independent `StdRng`, so a batch of chains
//! can be regenerated one at a time.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Replay token to make chains reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// Token for the next chain in the same batch.
    pub fn next(self) -> Self {
        Self {
            seed: self.seed,
            index: self.index.wrapping_add(1),
        }
    }

    #[inline]
    pub fn to_std_rng(self) -> StdRng {
        StdRng::seed_from_u64(self.mixed_seed())
    }

    /// SplitMix64-style mixing of `seed` and `index`.
    pub fn mixed_seed(self) -> u64 {
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)))
    }
}

/// `StdRng` seeded directly from `seed`.
#[inline]
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
