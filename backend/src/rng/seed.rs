//! Seed support
//!
//! Pure helpers for turning raw 64-bit seeds into well-mixed ones, expanding
//! them to 128 bits, deriving seeds from strings, and handing out seeds that
//! are practically never repeated within one process.

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const STAFFORD13_K1: u64 = 0xBF58_476D_1CE4_E5B9;
const STAFFORD13_K2: u64 = 0x94D0_49BB_1331_11EB;

/// XOR applied to the low half when upgrading a seed to 128 bits.
pub const SILVER_RATIO_64: i64 = 0x6A09_E667_F3BC_C909;

/// Added to the low half to derive the high half.
pub const GOLDEN_RATIO_64: i64 = 0x9E37_79B9_7F4A_7C15_u64 as i64;

/// Multiplier advancing the unique-seed counter.
pub const UNIQUIFIER_MULTIPLIER: u64 = 0x1066_89D4_5497_FDB5;

/// Initial value of the unique-seed counter.
pub const UNIQUIFIER_INITIAL: u64 = 0x001E_D8B5_5FAC_9DEC;

/// Stafford's "Mix13" 64-bit finalizer.
///
/// Removes the linear artifacts of raw seeds: every input bit affects every
/// output bit with roughly even probability.
pub fn mix_stafford13(seed: i64) -> i64 {
    let mut s = seed as u64;
    s = (s ^ (s >> 30)).wrapping_mul(STAFFORD13_K1);
    s = (s ^ (s >> 27)).wrapping_mul(STAFFORD13_K2);
    (s ^ (s >> 31)) as i64
}

/// A 128-bit seed made of two independent halves.
///
/// # Example
/// ```
/// use legacy_random_core::rng::seed::Seed128;
///
/// let a = Seed128::new(1, 2);
/// let b = a.xor(Seed128::new(3, 3));
/// assert_eq!(b, Seed128::new(2, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seed128 {
    pub lo: i64,
    pub hi: i64,
}

impl Seed128 {
    pub const fn new(lo: i64, hi: i64) -> Self {
        Self { lo, hi }
    }

    pub fn xor_halves(self, xor_lo: i64, xor_hi: i64) -> Self {
        Self::new(self.lo ^ xor_lo, self.hi ^ xor_hi)
    }

    pub fn xor(self, other: Seed128) -> Self {
        self.xor_halves(other.lo, other.hi)
    }

    /// Both halves passed through [`mix_stafford13`].
    pub fn mixed(self) -> Self {
        Self::new(mix_stafford13(self.lo), mix_stafford13(self.hi))
    }
}

/// Expands a 64-bit seed to 128 bits without mixing.
pub fn upgrade_seed_to_128bit_unmixed(seed: i64) -> Seed128 {
    let lo = seed ^ SILVER_RATIO_64;
    let hi = lo.wrapping_add(GOLDEN_RATIO_64);
    Seed128::new(lo, hi)
}

/// Expands a 64-bit seed to 128 bits and mixes both halves.
pub fn upgrade_seed_to_128bit(seed: i64) -> Seed128 {
    upgrade_seed_to_128bit_unmixed(seed).mixed()
}

/// Derives a 128-bit seed from the UTF-8 bytes of `input`.
///
/// The 16-byte MD5 digest is split into two big-endian halves. Collision
/// resistance is all that is needed here; the result is not meant to be
/// secret.
pub fn seed_from_hash_of(input: &str) -> Seed128 {
    let digest = Md5::digest(input.as_bytes());
    let mut lo = [0u8; 8];
    let mut hi = [0u8; 8];
    lo.copy_from_slice(&digest[0..8]);
    hi.copy_from_slice(&digest[8..16]);
    Seed128::new(i64::from_be_bytes(lo), i64::from_be_bytes(hi))
}

fn nano_clock() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as i64)
        .unwrap_or(0)
}

/// Source of seeds that are practically never repeated.
///
/// Each call advances an atomic counter multiplicatively and XORs the new
/// counter value with a nanosecond clock reading. Tests can inject their own
/// counter start and clock to get a reproducible sequence.
#[derive(Debug)]
pub struct SeedUniquifier {
    counter: AtomicU64,
    clock: fn() -> i64,
}

impl SeedUniquifier {
    pub const fn new() -> Self {
        Self::with_clock(UNIQUIFIER_INITIAL, nano_clock)
    }

    pub const fn with_clock(initial: u64, clock: fn() -> i64) -> Self {
        Self {
            counter: AtomicU64::new(initial),
            clock,
        }
    }

    /// Advances the counter and returns the next seed.
    pub fn next_seed(&self) -> i64 {
        let advance = |c: u64| c.wrapping_mul(UNIQUIFIER_MULTIPLIER);
        // fetch_update only fails if the closure returns None
        let previous = match self
            .counter
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |c| Some(advance(c)))
        {
            Ok(c) | Err(c) => c,
        };
        (advance(previous) as i64) ^ (self.clock)()
    }

    /// Current counter value.
    pub fn counter(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}

impl Default for SeedUniquifier {
    fn default() -> Self {
        Self::new()
    }
}

static SEED_UNIQUIFIER: SeedUniquifier = SeedUniquifier::new();

/// The process-wide uniquifier used by [`generate_unique_seed`].
pub fn global_uniquifier() -> &'static SeedUniquifier {
    &SEED_UNIQUIFIER
}

/// Returns a seed from the process-wide uniquifier.
pub fn generate_unique_seed() -> i64 {
    SEED_UNIQUIFIER.next_seed()
}
