//! Deterministic seeding for a generation run.
//!
//! A [`Seed`] fixes every noise field and the decoration RNG of one run.
//! Sub-seeds are derived with a SplitMix64 finalizer rather than std's
//! `DefaultHasher`, so a given seed produces the same world on every platform
//! and toolchain.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Half-width of the range that noise coordinate offsets are folded into.
///
/// [`Seed::random`] draws from the same range.
pub const SEED_RANGE: i64 = 1_000_000;

/// Salts separating the independent streams derived from one world seed.
pub(crate) mod salt {
    pub const TERRAIN: u64 = 0x01;
    pub const CAVE: u64 = 0x02;
    pub const DECORATION: u64 = 0x03;
    /// Ore profile `i` uses `ORE_BASE + i`.
    pub const ORE_BASE: u64 = 0x100;
}

/// World seed for one generation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(pub i64);

impl Seed {
    /// Draw a fresh seed in `[-SEED_RANGE, SEED_RANGE)` from the thread RNG.
    ///
    /// This is the only non-deterministic entry point of the crate; hosts call
    /// it when the user asks for "a new world".
    pub fn random() -> Self {
        Self(rand::rng().random_range(-SEED_RANGE..SEED_RANGE))
    }

    /// Returns the raw seed value.
    pub fn value(self) -> i64 {
        self.0
    }

    /// Noise-space coordinate offset for this seed.
    ///
    /// Seeds inside `[-SEED_RANGE, SEED_RANGE)` map to themselves; larger
    /// seeds wrap so that noise coordinates keep full `f64` precision.
    pub fn coordinate_offset(self) -> f64 {
        let span = 2 * SEED_RANGE;
        (self.0.wrapping_add(SEED_RANGE).rem_euclid(span) - SEED_RANGE) as f64
    }

    /// Derive a well-mixed `u64` for the stream identified by `salt`.
    pub fn derive(self, salt: u64) -> u64 {
        let mut z = (self.0 as u64).wrapping_add(salt.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Permutation seed for a `noise` crate generator.
    pub fn noise_seed(self, salt: u64) -> u32 {
        (self.derive(salt) >> 32) as u32
    }

    /// The RNG driving decoration draws for this run.
    ///
    /// Two runs with the same seed see the same sequence.
    pub fn decoration_rng(self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.derive(salt::DECORATION))
    }
}

impl From<i64> for Seed {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
