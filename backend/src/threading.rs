//! Threading detector
//!
//! Debug instrumentation for resources that must only ever be used from one
//! thread at a time. Correct single-threaded use costs one uncontended mutex
//! round trip per lock/unlock pair and never blocks.
//!
//! When a second thread calls [`ConcurrencyGuard::check_and_lock`] while the
//! guard is held, that thread records its own stack and blocks. The holder's
//! next [`ConcurrencyGuard::check_and_unlock`] then fails with a
//! [`ConcurrentMisuseError`] carrying both stacks, releases the guard, and
//! wakes the contender, whose lock call fails with the same error.

use std::backtrace::Backtrace;
use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use thiserror::Error;

/// Name, id and stack of one thread at the moment it was captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadDump {
    pub name: String,
    pub id: String,
    pub stack: String,
}

impl ThreadDump {
    /// Captures the calling thread.
    pub fn capture() -> Self {
        let current = thread::current();
        Self {
            name: current.name().unwrap_or("<unnamed>").to_string(),
            id: format!("{:?}", current.id()),
            stack: Backtrace::force_capture().to_string(),
        }
    }
}

impl fmt::Display for ThreadDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}):\n{}", self.name, self.id, self.stack)
    }
}

/// A single-threaded resource was entered by two threads at once.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Accessing {resource} from multiple threads (holder: {}, contender: {})", .holder.name, .contender.name)]
pub struct ConcurrentMisuseError {
    pub resource: String,
    pub holder: ThreadDump,
    pub contender: ThreadDump,
}

impl ConcurrentMisuseError {
    /// Both thread dumps, holder first.
    pub fn thread_dumps(&self) -> String {
        format!("{}\n{}", self.holder, self.contender)
    }
}

/// Observable state of a guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Free,
    Held,
    Contended,
}

#[derive(Debug, Default)]
struct Inner {
    held: bool,
    contender: Option<ThreadDump>,
    /// Incremented on every failing unlock; contenders wait for it to move.
    reports: u64,
    last_report: Option<ConcurrentMisuseError>,
}

/// Detects concurrent entry into a resource that is contractually confined
/// to one thread.
///
/// # Example
/// ```
/// use legacy_random_core::threading::ConcurrencyGuard;
///
/// let guard = ConcurrencyGuard::new("chunk generator");
/// guard.check_and_lock().unwrap();
/// guard.check_and_unlock().unwrap();
/// ```
#[derive(Debug)]
pub struct ConcurrencyGuard {
    name: String,
    inner: Mutex<Inner>,
    released: Condvar,
}

impl ConcurrencyGuard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: Mutex::new(Inner::default()),
            released: Condvar::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> GuardState {
        let inner = self.lock_inner();
        match (inner.held, inner.contender.is_some()) {
            (false, _) => GuardState::Free,
            (true, false) => GuardState::Held,
            (true, true) => GuardState::Contended,
        }
    }

    // The detector must keep working after a panic on another thread.
    fn lock_inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks the resource as held by the calling thread.
    ///
    /// # Errors
    /// If another thread holds the guard, blocks until it unlocks and then
    /// returns the misuse report.
    pub fn check_and_lock(&self) -> Result<(), ConcurrentMisuseError> {
        let mut inner = self.lock_inner();
        if !inner.held {
            inner.held = true;
            return Ok(());
        }

        inner.contender = Some(ThreadDump::capture());
        let seen = inner.reports;
        while inner.reports == seen {
            inner = self
                .released
                .wait(inner)
                .unwrap_or_else(PoisonError::into_inner);
        }

        match inner.last_report.clone() {
            Some(report) => Err(report),
            // A report always accompanies the counter bump
            None => Ok(()),
        }
    }

    /// Releases the resource.
    ///
    /// # Errors
    /// If another thread tried to enter while the guard was held, returns
    /// the misuse report after releasing the guard and waking that thread.
    pub fn check_and_unlock(&self) -> Result<(), ConcurrentMisuseError> {
        let mut inner = self.lock_inner();
        inner.held = false;

        let Some(contender) = inner.contender.take() else {
            return Ok(());
        };

        let report = ConcurrentMisuseError {
            resource: self.name.clone(),
            holder: ThreadDump::capture(),
            contender,
        };
        tracing::warn!(
            resource = %self.name,
            "Thread dumps:\n{}",
            report.thread_dumps()
        );

        inner.last_report = Some(report.clone());
        inner.reports = inner.reports.wrapping_add(1);
        drop(inner);
        self.released.notify_all();
        Err(report)
    }

    /// Runs `f` between a lock and an unlock.
    ///
    /// # Errors
    /// Either side's misuse report; the value of `f` is discarded when the
    /// unlock reports misuse.
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> Result<R, ConcurrentMisuseError> {
        self.check_and_lock()?;
        let value = f();
        self.check_and_unlock()?;
        Ok(value)
    }
}

/// Guard for the named resource.
pub fn guard(name: impl Into<String>) -> ConcurrencyGuard {
    ConcurrencyGuard::new(name)
}
