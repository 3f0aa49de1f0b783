//! Injected, deterministic randomness.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical spy assignments
//! - **Context streams**: Spy assignment draws from its own stream, so
//!   display-only shuffles can never influence who the spies are
//! - **Stable**: Context seeds come from a fixed mix, not the std hasher,
//!   so a recorded seed replays the same spies on any toolchain
//!
//! ```
//! use resistance_engine::core::GameRng;
//!
//! let mut a = GameRng::new(7).for_context("spies");
//! let mut b = GameRng::new(7).for_context("spies");
//! assert_eq!(a.sample_indices(10, 4), b.sample_indices(10, 4));
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Golden ratio constant, also used to spread fork seeds.
const CONTEXT_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// 64-bit FNV prime.
const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;

/// Seeded RNG used for spy assignment and reveal shuffles.
///
/// ChaCha8 keeps it fast while giving cryptographic quality output.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed,
    /// regardless of how much the parent stream has been used.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let context_seed = context
            .bytes()
            .fold(self.seed ^ CONTEXT_MIX, |acc, byte| {
                (acc ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
            });
        Self::new(context_seed)
    }

    /// Pick `amount` distinct indices from `0..length`, uniformly over all
    /// subsets of that size. Returned in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `amount > length`.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        let mut picked = rand::seq::index::sample(&mut self.inner, length, amount).into_vec();
        picked.sort_unstable();
        picked
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}
