//! PyO3 wrapper for the thread-safe engine

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::rng::{BitSource, RandomSnapshot, RandomSource, ThreadSafeRandom};

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyErr::new::<PyValueError, _>(e.to_string())
}

/// Python wrapper for [`ThreadSafeRandom`]
///
/// # Example (from Python)
///
/// ```python
/// from legacy_random_core import LegacyRandom
///
/// rng = LegacyRandom(0)
/// assert rng.next_int() == -1155484576
/// child = rng.fork()
/// ```
#[pyclass(name = "LegacyRandom")]
pub struct PyLegacyRandom {
    inner: ThreadSafeRandom,
}

#[pymethods]
impl PyLegacyRandom {
    /// Seeded engine; a process-unique seed when `seed` is omitted
    #[new]
    #[pyo3(signature = (seed=None))]
    fn new(seed: Option<i64>) -> Self {
        let inner = match seed {
            Some(seed) => ThreadSafeRandom::new(seed),
            None => ThreadSafeRandom::with_unique_seed(),
        };
        Self { inner }
    }

    fn set_seed(&mut self, seed: i64) {
        self.inner.set_seed(seed);
    }

    fn fork(&self) -> Self {
        Self {
            inner: self.inner.fork(),
        }
    }

    fn next_bits(&self, bits: u32) -> PyResult<i32> {
        if !(1..=32).contains(&bits) {
            return Err(value_error(format!("bits must be in 1..=32, got {bits}")));
        }
        Ok(self.inner.next(bits))
    }

    #[pyo3(signature = (bound=None))]
    fn next_int(&self, bound: Option<i32>) -> PyResult<i32> {
        match bound {
            Some(bound) => self.inner.next_int_bounded(bound).map_err(value_error),
            None => Ok(self.inner.next_int()),
        }
    }

    fn next_int_between(&self, lower: i32, upper: i32) -> PyResult<i32> {
        self.inner.next_int_between(lower, upper).map_err(value_error)
    }

    fn next_int_between_inclusive(&self, lower: i32, upper: i32) -> PyResult<i32> {
        self.inner
            .next_int_between_inclusive(lower, upper)
            .map_err(value_error)
    }

    fn next_long(&self) -> i64 {
        self.inner.next_long()
    }

    fn next_boolean(&self) -> bool {
        self.inner.next_boolean()
    }

    fn next_float(&self) -> f32 {
        self.inner.next_float()
    }

    fn next_double(&self) -> f64 {
        self.inner.next_double()
    }

    fn next_gaussian(&mut self) -> f64 {
        self.inner.next_gaussian()
    }

    fn triangle(&self, mode: f64, spread: f64) -> f64 {
        self.inner.triangle(mode, spread)
    }

    fn consume_count(&self, count: usize) {
        self.inner.consume_count(count);
    }

    /// Random value at a block position of a factory forked from this engine
    fn positional_int(&self, x: i32, y: i32, z: i32) -> i32 {
        self.inner.fork_positional().at(x, y, z).next_int()
    }

    /// JSON checkpoint of the engine
    fn snapshot(&self) -> PyResult<String> {
        self.inner.snapshot().to_json().map_err(value_error)
    }

    #[staticmethod]
    fn restore(json: &str) -> PyResult<Self> {
        let snapshot = RandomSnapshot::from_json(json).map_err(value_error)?;
        let inner = ThreadSafeRandom::restore(&snapshot).map_err(value_error)?;
        Ok(Self { inner })
    }
}
