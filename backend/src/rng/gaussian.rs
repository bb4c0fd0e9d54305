//! Marsaglia polar method
//!
//! Turns pairs of uniform draws into pairs of independent standard normal
//! values. One value is returned, the other cached for the next call.
//!
//! The cache is plain state owned by one engine. It is not synchronized:
//! drawing Gaussians requires `&mut` access to the owner.

use crate::rng::source::BitSource;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarsagliaPolarGaussian {
    next_next_gaussian: Option<f64>,
}

impl MarsagliaPolarGaussian {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the cached value without touching the source.
    pub fn reset(&mut self) {
        self.next_next_gaussian = None;
    }

    pub fn cached(&self) -> Option<f64> {
        self.next_next_gaussian
    }

    pub(crate) fn restore_cache(&mut self, cached: Option<f64>) {
        self.next_next_gaussian = cached;
    }

    pub fn next_gaussian<B: BitSource + ?Sized>(&mut self, source: &B) -> f64 {
        if let Some(cached) = self.next_next_gaussian.take() {
            return cached;
        }

        loop {
            let x = 2.0 * source.next_double() - 1.0;
            let y = 2.0 * source.next_double() - 1.0;
            let s = x * x + y * y;
            if s < 1.0 && s != 0.0 {
                let multiplier = (-2.0 * s.ln() / s).sqrt();
                self.next_next_gaussian = Some(y * multiplier);
                return x * multiplier;
            }
        }
    }
}
