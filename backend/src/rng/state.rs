//! Register update strategies
//!
//! The LCG register is the only mutable state of an engine. How it is
//! updated decides whether the engine may be shared between threads:
//!
//! - [`Unsynchronized`] keeps the register in a `Cell`. Lowest overhead, and
//!   the `Cell` makes the engine `!Sync`, so sharing it across threads does
//!   not compile.
//! - [`CompareAndSwap`] keeps the register in an `AtomicU64` and advances it
//!   with a CAS retry loop. Every draw is a single linearizable transition,
//!   so concurrent callers see a gap-free, duplicate-free sequence.

use std::cell::Cell;
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

/// Storage and update discipline for a 48-bit register.
pub trait StateCell: Debug + Send + 'static {
    /// Short name used in logs and snapshots.
    const NAME: &'static str;

    fn new(state: u64) -> Self;

    fn get(&self) -> u64;

    fn set(&self, state: u64);

    /// Replaces the register with `step(current)` and returns the new value.
    fn advance(&self, step: impl Fn(u64) -> u64) -> u64;
}

/// Plain interior mutability, single thread only.
#[derive(Debug)]
pub struct Unsynchronized(Cell<u64>);

impl StateCell for Unsynchronized {
    const NAME: &'static str = "single_threaded";

    fn new(state: u64) -> Self {
        Self(Cell::new(state))
    }

    fn get(&self) -> u64 {
        self.0.get()
    }

    fn set(&self, state: u64) {
        self.0.set(state);
    }

    fn advance(&self, step: impl Fn(u64) -> u64) -> u64 {
        let next = step(self.0.get());
        self.0.set(next);
        next
    }
}

/// Lock-free register advanced by compare-and-swap.
#[derive(Debug)]
pub struct CompareAndSwap(AtomicU64);

impl StateCell for CompareAndSwap {
    const NAME: &'static str = "thread_safe";

    fn new(state: u64) -> Self {
        Self(AtomicU64::new(state))
    }

    fn get(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    fn set(&self, state: u64) {
        self.0.store(state, Ordering::Release);
    }

    fn advance(&self, step: impl Fn(u64) -> u64) -> u64 {
        let mut current = self.0.load(Ordering::Acquire);
        loop {
            let next = step(current);
            match self
                .0
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return next,
                Err(observed) => current = observed,
            }
        }
    }
}
