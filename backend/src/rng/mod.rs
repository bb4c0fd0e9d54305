//! Deterministic random number generation
//!
//! A 48-bit linear congruential engine reproducing the `java.util.Random`
//! bit stream, in a single-threaded and a lock-free variant, plus the
//! helpers built around it: seed mixing, positional streams and Gaussian
//! draws.
//!
//! NOT cryptographic. Same seed → same sequence.

pub mod gaussian;
pub mod legacy;
pub mod positional;
pub mod seed;
pub mod snapshot;
pub mod source;
pub mod state;

pub use gaussian::MarsagliaPolarGaussian;
pub use legacy::{LegacyRandom, SingleThreadedRandom, ThreadSafeRandom};
pub use positional::{
    LegacyPositionalHash, MixedPositionalHash, PositionalHash, PositionalRandomFactory,
};
pub use seed::{generate_unique_seed, Seed128, SeedUniquifier};
pub use snapshot::{RandomSnapshot, SnapshotError};
pub use source::{BitSource, RandomError, RandomSource};
pub use state::{CompareAndSwap, StateCell, Unsynchronized};

/// Single-threaded engine with the given seed.
pub fn create(seed: i64) -> SingleThreadedRandom {
    SingleThreadedRandom::new(seed)
}

/// Single-threaded engine with a process-unique seed.
pub fn create_unique() -> SingleThreadedRandom {
    SingleThreadedRandom::with_unique_seed()
}

/// Lock-free engine with the given seed.
pub fn create_thread_safe(seed: i64) -> ThreadSafeRandom {
    ThreadSafeRandom::new(seed)
}
