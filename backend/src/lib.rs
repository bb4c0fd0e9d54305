//! Legacy Random Core - Rust Engine
//!
//! Deterministic 48-bit LCG random sources with bit-exact legacy output.
//!
//! # Architecture
//!
//! - **rng**: Engines, seed support, positional streams, Gaussian draws
//! - **threading**: Detection of concurrent misuse of single-threaded resources
//! - **config**: JSON engine configuration
//!
//! # Critical Invariants
//!
//! 1. Same seed → same sequence, in every engine variant
//! 2. Every draw is derived from `next(bits)` on a 48-bit register
//! 3. Reseeding always discards the cached Gaussian

// Module declarations
pub mod config;
pub mod rng;
pub mod threading;

// Re-exports for convenience
pub use config::{ConfigError, EngineConfig, EngineVariant};
pub use rng::{
    create, create_thread_safe, create_unique, BitSource, LegacyRandom, PositionalRandomFactory,
    RandomError, RandomSnapshot, RandomSource, Seed128, SeedUniquifier, SingleThreadedRandom,
    ThreadSafeRandom,
};
pub use threading::{guard, ConcurrencyGuard, ConcurrentMisuseError};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn legacy_random_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::random::PyLegacyRandom>()?;
    Ok(())
}
