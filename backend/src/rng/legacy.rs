//! 48-bit linear congruential engine
//!
//! The classic `java.util.Random` recurrence:
//!
//! ```text
//! state' = (state * 0x5DEECE66D + 0xB) mod 2^48
//! next(bits) = state' >> (48 - bits)
//! ```
//!
//! Same seed → same sequence, bit for bit, in both variants. The variants
//! differ only in how the register is updated (see [`crate::rng::state`]).

use crate::rng::gaussian::MarsagliaPolarGaussian;
use crate::rng::positional::PositionalRandomFactory;
use crate::rng::seed::{generate_unique_seed, SeedUniquifier};
use crate::rng::snapshot::{RandomSnapshot, SnapshotError};
use crate::rng::source::{BitSource, RandomSource};
use crate::rng::state::{CompareAndSwap, StateCell, Unsynchronized};

pub const MULTIPLIER: u64 = 0x5_DEEC_E66D;
pub const INCREMENT: u64 = 0xB;
pub const STATE_MASK: u64 = (1 << 48) - 1;

/// Register value stored for a given seed.
pub fn scramble_seed(seed: i64) -> u64 {
    (seed as u64 ^ MULTIPLIER) & STATE_MASK
}

fn step(state: u64) -> u64 {
    state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT) & STATE_MASK
}

/// The 48-bit register on its own; implements [`BitSource`].
#[derive(Debug)]
pub struct LcgRegister<S: StateCell> {
    cell: S,
}

impl<S: StateCell> LcgRegister<S> {
    fn seeded(seed: i64) -> Self {
        Self {
            cell: S::new(scramble_seed(seed)),
        }
    }

    fn state(&self) -> u64 {
        self.cell.get()
    }
}

impl<S: StateCell> BitSource for LcgRegister<S> {
    /// Advances the register and returns its top `bits` bits.
    ///
    /// `bits` must be in `1..=32`. Debug builds panic otherwise; in release
    /// builds the register still advances but the returned value is
    /// unspecified.
    fn next(&self, bits: u32) -> i32 {
        debug_assert!((1..=32).contains(&bits), "bits must be in 1..=32, got {bits}");
        let next = self.cell.advance(step);
        (next >> (48 - bits)) as i32
    }
}

/// Seeded LCG engine with an attached Gaussian generator.
///
/// # Example
/// ```
/// use legacy_random_core::rng::{BitSource, SingleThreadedRandom};
///
/// let rng = SingleThreadedRandom::new(0);
/// assert_eq!(rng.next_int(), -1155484576);
/// let die = rng.next_int_between_inclusive(1, 6).unwrap();
/// assert!((1..=6).contains(&die));
/// ```
#[derive(Debug)]
pub struct LegacyRandom<S: StateCell = Unsynchronized> {
    register: LcgRegister<S>,
    gaussian: MarsagliaPolarGaussian,
}

/// Default engine; cannot be shared between threads.
pub type SingleThreadedRandom = LegacyRandom<Unsynchronized>;

/// Lock-free engine; `Send + Sync`, share it behind an `Arc`.
pub type ThreadSafeRandom = LegacyRandom<CompareAndSwap>;

impl<S: StateCell> LegacyRandom<S> {
    pub fn new(seed: i64) -> Self {
        Self {
            register: LcgRegister::seeded(seed),
            gaussian: MarsagliaPolarGaussian::new(),
        }
    }

    /// Seeded from the process-wide uniquifier.
    pub fn with_unique_seed() -> Self {
        Self::new(generate_unique_seed())
    }

    /// Seeded from an injected uniquifier.
    pub fn from_uniquifier(uniquifier: &SeedUniquifier) -> Self {
        Self::new(uniquifier.next_seed())
    }

    /// Raw 48-bit register.
    pub fn state(&self) -> u64 {
        self.register.state()
    }

    pub fn snapshot(&self) -> RandomSnapshot {
        RandomSnapshot {
            variant: S::NAME.to_string(),
            state: self.register.state(),
            cached_gaussian: self.gaussian.cached(),
        }
    }

    /// Rebuilds an engine that continues exactly where the snapshot left off.
    ///
    /// # Errors
    /// [`SnapshotError::VariantMismatch`] if the snapshot was taken from an
    /// engine with another update strategy, and
    /// [`SnapshotError::StateOutOfRange`] if the register uses more than 48 bits.
    pub fn restore(snapshot: &RandomSnapshot) -> Result<Self, SnapshotError> {
        if snapshot.variant != S::NAME {
            return Err(SnapshotError::VariantMismatch {
                expected: S::NAME.to_string(),
                found: snapshot.variant.clone(),
            });
        }
        if snapshot.state & !STATE_MASK != 0 {
            return Err(SnapshotError::StateOutOfRange {
                state: snapshot.state,
            });
        }
        let mut gaussian = MarsagliaPolarGaussian::new();
        gaussian.restore_cache(snapshot.cached_gaussian);
        Ok(Self {
            register: LcgRegister {
                cell: S::new(snapshot.state),
            },
            gaussian,
        })
    }
}

impl<S: StateCell> BitSource for LegacyRandom<S> {
    #[inline]
    fn next(&self, bits: u32) -> i32 {
        self.register.next(bits)
    }
}

impl<S: StateCell> RandomSource for LegacyRandom<S> {
    type Strategy = S;

    fn fork(&self) -> Self {
        let seed = self.next_long();
        tracing::debug!(variant = S::NAME, seed, "forked engine");
        Self::new(seed)
    }

    fn fork_positional(&self) -> PositionalRandomFactory<S> {
        let seed = self.next_long();
        tracing::debug!(variant = S::NAME, seed, "forked positional factory");
        PositionalRandomFactory::new(seed)
    }

    fn set_seed(&mut self, seed: i64) {
        self.register.cell.set(scramble_seed(seed));
        self.gaussian.reset();
    }

    fn next_gaussian(&mut self) -> f64 {
        self.gaussian.next_gaussian(&self.register)
    }
}
