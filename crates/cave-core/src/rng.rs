//! Random number generation for cave filling
//!
//! Uses a seeded ChaCha RNG so the same seed always yields the same cave.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Cave random number generator
///
/// Wraps ChaCha8Rng for reproducible generation. Each generation run owns
/// its own instance; nothing is shared between runs.
#[derive(Debug, Clone)]
pub struct CaveRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl CaveRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG from seed text
    ///
    /// Text that parses as a `u64` is used as-is; anything else is hashed.
    pub fn from_seed_text(text: &str) -> Self {
        Self::new(seed_from_text(text))
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns 0..n-1
    ///
    /// Returns 0 if n is 0.
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Returns true with probability percent/100
    pub fn percent(&mut self, percent: u32) -> bool {
        self.rn2(100) < percent
    }
}

/// Map seed text to a numeric seed.
///
/// FNV-1a is used instead of the std hasher so seeds stay stable across
/// platforms and toolchain versions.
pub fn seed_from_text(text: &str) -> u64 {
    if let Ok(seed) = text.trim().parse::<u64>() {
        return seed;
    }
    text.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
    })
}
