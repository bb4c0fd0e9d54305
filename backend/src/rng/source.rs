//! Random source traits
//!
//! [`BitSource`] is the primitive: one method producing up to 32 random
//! bits. Every other numeric draw is a provided method built on it, so any
//! engine implementing `next` gets identical derived behavior.
//!
//! [`RandomSource`] adds the engine-level operations: reseeding, forking and
//! Gaussian draws.

use crate::rng::positional::PositionalRandomFactory;
use thiserror::Error;

/// 2^-24, scale for 24-bit float draws.
const FLOAT_UNIT: f32 = 1.0 / (1u32 << 24) as f32;

/// 2^-53, scale for 53-bit double draws.
const DOUBLE_UNIT: f64 = 1.0 / (1u64 << 53) as f64;

/// Invalid arguments to a ranged draw
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RandomError {
    #[error("Bound must be positive, got {bound}")]
    NonPositiveBound { bound: i32 },

    #[error("Lower bound {lower} must be less than upper bound {upper}")]
    EmptyRange { lower: i32, upper: i32 },
}

/// A generator exposing `next(bits)` and the draws derived from it.
pub trait BitSource {
    /// Returns the top `bits` bits of the next generator state.
    ///
    /// Callers must pass `bits` in `1..=32`; the result for any other value
    /// is unspecified and the engines in this crate panic on it in debug
    /// builds.
    fn next(&self, bits: u32) -> i32;

    /// Full 32-bit draw.
    fn next_int(&self) -> i32 {
        self.next(32)
    }

    /// Uniform draw in `[0, bound)`.
    ///
    /// Powers of two take the high bits directly. Other bounds use
    /// rejection sampling so every residue is equally likely.
    ///
    /// # Errors
    /// [`RandomError::NonPositiveBound`] if `bound <= 0`.
    fn next_int_bounded(&self, bound: i32) -> Result<i32, RandomError> {
        if bound <= 0 {
            return Err(RandomError::NonPositiveBound { bound });
        }

        if bound & (bound - 1) == 0 {
            return Ok(((bound as i64 * self.next(31) as i64) >> 31) as i32);
        }

        loop {
            let bits = self.next(31);
            let value = bits % bound;
            // Reject the tail that would bias the low residues.
            if bits.wrapping_sub(value).wrapping_add(bound - 1) >= 0 {
                return Ok(value);
            }
        }
    }

    /// Uniform draw in `[lower, upper)`.
    ///
    /// # Errors
    /// [`RandomError::EmptyRange`] if `lower >= upper`; spans wider than
    /// `i32::MAX` are rejected as non-positive bounds.
    fn next_int_between(&self, lower: i32, upper: i32) -> Result<i32, RandomError> {
        if lower >= upper {
            return Err(RandomError::EmptyRange { lower, upper });
        }
        let offset = self.next_int_bounded(upper.wrapping_sub(lower))?;
        Ok(lower.wrapping_add(offset))
    }

    /// Uniform draw in `[lower, upper]`.
    ///
    /// # Errors
    /// [`RandomError::NonPositiveBound`] if `upper < lower` or the span
    /// does not fit in an `i32`.
    fn next_int_between_inclusive(&self, lower: i32, upper: i32) -> Result<i32, RandomError> {
        let span = upper.wrapping_sub(lower).wrapping_add(1);
        Ok(self.next_int_bounded(span)?.wrapping_add(lower))
    }

    /// 64-bit draw: high word from the first `next(32)`, low word from the second.
    fn next_long(&self) -> i64 {
        let upper = self.next(32) as i64;
        let lower = self.next(32) as u32 as i64;
        (upper << 32) | lower
    }

    fn next_boolean(&self) -> bool {
        self.next(1) != 0
    }

    /// Uniform `f32` in `[0, 1)` with 24 bits of precision.
    fn next_float(&self) -> f32 {
        self.next(24) as f32 * FLOAT_UNIT
    }

    /// Uniform `f64` in `[0, 1)` with 53 bits of precision.
    fn next_double(&self) -> f64 {
        let upper = self.next(26) as i64;
        let lower = self.next(27) as i64;
        ((upper << 27) + lower) as f64 * DOUBLE_UNIT
    }

    /// Symmetric triangular distribution centred on `mode`.
    fn triangle(&self, mode: f64, spread: f64) -> f64 {
        mode + spread * (self.next_double() - self.next_double())
    }

    /// Skips ahead by discarding `count` full-width draws.
    fn consume_count(&self, count: usize) {
        for _ in 0..count {
            self.next_int();
        }
    }
}

/// Engine-level operations on top of [`BitSource`].
pub trait RandomSource: BitSource {
    /// Engine family produced by forks and positional factories.
    type Strategy: crate::rng::state::StateCell;

    /// New independent engine of the same variant seeded from `next_long()`.
    fn fork(&self) -> Self
    where
        Self: Sized;

    /// Positional factory seeded from `next_long()`.
    fn fork_positional(&self) -> PositionalRandomFactory<Self::Strategy>;

    /// Reseeds the engine and discards any cached Gaussian.
    fn set_seed(&mut self, seed: i64);

    /// Standard normal draw.
    fn next_gaussian(&mut self) -> f64;
}
