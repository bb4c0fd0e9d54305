//! Positional random streams
//!
//! A [`PositionalRandomFactory`] derives a fresh engine from a block
//! coordinate or a string key. The same factory seed plus the same input
//! always yields the same stream, independent of how many other streams were
//! derived before it.
//!
//! How inputs are hashed is a [`PositionalHash`] strategy. The default,
//! [`LegacyPositionalHash`], must stay bit-compatible with existing worlds;
//! it is weak (neighbouring coordinates collide more than they should), so
//! new call sites should prefer [`MixedPositionalHash`].

use crate::rng::legacy::LegacyRandom;
use crate::rng::seed::{mix_stafford13, seed_from_hash_of};
use crate::rng::state::{StateCell, Unsynchronized};
use std::fmt::{self, Write};
use std::marker::PhantomData;

/// Maps positional inputs to 64-bit seeds.
pub trait PositionalHash {
    fn hash_position(x: i32, y: i32, z: i32) -> i64;

    fn hash_key(key: &str) -> i64;
}

/// Coordinate and string hashes kept for output compatibility.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyPositionalHash;

impl PositionalHash for LegacyPositionalHash {
    fn hash_position(x: i32, y: i32, z: i32) -> i64 {
        legacy_coordinate_seed(x, y, z)
    }

    fn hash_key(key: &str) -> i64 {
        legacy_string_hash(key) as i64
    }
}

/// Coordinates mixed through Stafford13, keys through the 128-bit digest.
#[derive(Debug, Clone, Copy, Default)]
pub struct MixedPositionalHash;

impl PositionalHash for MixedPositionalHash {
    fn hash_position(x: i32, y: i32, z: i32) -> i64 {
        let packed = mix_stafford13(((x as u32 as i64) << 32) | (z as u32 as i64));
        mix_stafford13(packed ^ y as i64)
    }

    fn hash_key(key: &str) -> i64 {
        seed_from_hash_of(key).lo
    }
}

/// Legacy block-coordinate seed.
pub fn legacy_coordinate_seed(x: i32, y: i32, z: i32) -> i64 {
    let mut seed = (x as i64).wrapping_mul(3_129_871)
        ^ (z as i64).wrapping_mul(116_129_781)
        ^ y as i64;
    seed = seed
        .wrapping_mul(seed)
        .wrapping_mul(42_317_861)
        .wrapping_add(seed.wrapping_mul(11));
    seed >> 16
}

/// 31-polynomial over UTF-16 code units.
pub fn legacy_string_hash(key: &str) -> i32 {
    key.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Immutable source of positional engines.
///
/// Holds only its seed, so it is `Send + Sync` whatever engine variant it
/// produces.
pub struct PositionalRandomFactory<S: StateCell = Unsynchronized, H: PositionalHash = LegacyPositionalHash> {
    seed: i64,
    _marker: PhantomData<fn() -> (S, H)>,
}

impl<S: StateCell, H: PositionalHash> PositionalRandomFactory<S, H> {
    pub fn new(seed: i64) -> Self {
        Self {
            seed,
            _marker: PhantomData,
        }
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Same seed, different hash strategy.
    pub fn with_hash<H2: PositionalHash>(&self) -> PositionalRandomFactory<S, H2> {
        PositionalRandomFactory::new(self.seed)
    }

    pub fn at(&self, x: i32, y: i32, z: i32) -> LegacyRandom<S> {
        LegacyRandom::new(H::hash_position(x, y, z) ^ self.seed)
    }

    pub fn from_hash_of(&self, key: &str) -> LegacyRandom<S> {
        LegacyRandom::new(H::hash_key(key) ^ self.seed)
    }

    /// Appends a stable description of this factory's configuration.
    pub fn parity_config_string(&self, out: &mut String) {
        // Writing to a String cannot fail
        let _ = write!(out, "PositionalRandomFactory{{seed={}}}", self.seed);
    }
}

impl<S: StateCell, H: PositionalHash> Clone for PositionalRandomFactory<S, H> {
    fn clone(&self) -> Self {
        Self::new(self.seed)
    }
}

impl<S: StateCell, H: PositionalHash> fmt::Debug for PositionalRandomFactory<S, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionalRandomFactory")
            .field("seed", &self.seed)
            .field("variant", &S::NAME)
            .finish()
    }
}
