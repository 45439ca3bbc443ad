//! Profiling session and scoped timing guards.
//!
//! A [`Profiler`] is an explicit session context: clones share one
//! append-only ledger, and independent sessions never see each other's
//! records. Timing is taken with [`ScopeGuard`], which finalizes its record
//! when dropped, so early returns, `?` propagation and panics all leave
//! exactly one record behind.
//!
//! # Example
//!
//! ```rust
//! use arvak_profile::{Profiler, ProfilerConfig};
//!
//! let profiler = Profiler::new(ProfilerConfig::new("example"));
//!
//! let sum = profiler.instrumented("sum", || (1..=10).sum::<u32>());
//! assert_eq!(sum, 55);
//!
//! {
//!     let outer = profiler.scope("build");
//!     let _inner = outer.child("operators");
//! }
//!
//! let scopes: Vec<String> = profiler.records().into_iter().map(|r| r.scope).collect();
//! assert_eq!(scopes, vec!["sum", "build/operators", "build"]);
//! ```

use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::{trace, warn};

use crate::config::ProfilerConfig;
use crate::record::{ProfilingRecord, RecordStatus};
use crate::report::ProfileReport;

/// Shared state behind a profiling session.
#[derive(Debug)]
struct Session {
    config: ProfilerConfig,
    ledger: Mutex<Vec<ProfilingRecord>>,
}

/// A profiling session owning an append-only ledger of timing records.
///
/// Cloning is cheap and yields a handle to the same session, so a profiler
/// can be handed to worker threads.
#[derive(Debug, Clone)]
pub struct Profiler {
    inner: Arc<Session>,
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new(ProfilerConfig::default())
    }
}

impl Profiler {
    /// Create a new, empty session.
    pub fn new(config: ProfilerConfig) -> Self {
        Self {
            inner: Arc::new(Session {
                config,
                ledger: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Create a session configured from the environment.
    pub fn from_env() -> Self {
        Self::new(ProfilerConfig::from_env())
    }

    /// Session label.
    pub fn session(&self) -> &str {
        &self.inner.config.session
    }

    /// Session configuration.
    pub fn config(&self) -> &ProfilerConfig {
        &self.inner.config
    }

    /// Whether finalized scopes are appended to the ledger.
    pub fn is_enabled(&self) -> bool {
        self.inner.config.enabled
    }

    /// Open a top-level timing scope.
    pub fn scope(&self, label: impl Into<String>) -> ScopeGuard {
        ScopeGuard::open(self.clone(), label.into(), 0)
    }

    /// Run `f` inside a timing scope and return its value unchanged.
    ///
    /// If `f` panics, the record is finalized as [`RecordStatus::Failed`]
    /// while unwinding and the panic continues.
    pub fn instrumented<T>(&self, label: impl Into<String>, f: impl FnOnce() -> T) -> T {
        let _guard = self.scope(label);
        f()
    }

    /// Run a fallible `f` inside a timing scope.
    ///
    /// An `Err` marks the record failed and is returned to the caller as is.
    pub fn try_instrumented<T, E>(
        &self,
        label: impl Into<String>,
        f: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        let mut guard = self.scope(label);
        let result = f();
        if result.is_err() {
            guard.fail();
        }
        result
    }

    /// Snapshot of all finalized records, in finalization order.
    pub fn records(&self) -> Vec<ProfilingRecord> {
        self.ledger().clone()
    }

    /// Number of finalized records.
    pub fn len(&self) -> usize {
        self.ledger().len()
    }

    /// True if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.ledger().is_empty()
    }

    /// Aggregate the current ledger into a report.
    pub fn report(&self) -> ProfileReport {
        let records = self.records();
        ProfileReport::from_records(self.session(), &records)
    }

    /// Drop every record collected so far.
    pub fn reset(&self) {
        self.ledger().clear();
    }

    fn append(&self, record: ProfilingRecord) {
        if !self.is_enabled() {
            return;
        }
        if self.inner.config.emit_events {
            trace!(
                session = %self.session(),
                scope = %record.scope,
                elapsed_us = record.elapsed.as_micros() as u64,
                status = ?record.status,
                "profiling scope finalized"
            );
        }
        self.ledger().push(record);
    }

    /// Lock the ledger, recovering from poisoning.
    ///
    /// A panic elsewhere must not turn into a secondary failure here.
    fn ledger(&self) -> MutexGuard<'_, Vec<ProfilingRecord>> {
        match self.inner.ledger.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!(session = %self.session(), "profiling ledger lock poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}

/// RAII timing context for one scope.
///
/// The record is appended when the guard is dropped or [`finish`]ed.
///
/// [`finish`]: ScopeGuard::finish
#[derive(Debug)]
#[must_use = "a scope is timed until the guard is dropped"]
pub struct ScopeGuard {
    profiler: Profiler,
    scope: String,
    depth: usize,
    start: Instant,
    started_at: DateTime<Utc>,
    status: RecordStatus,
    finalized: bool,
}

impl ScopeGuard {
    fn open(profiler: Profiler, scope: String, depth: usize) -> Self {
        Self {
            profiler,
            scope,
            depth,
            start: Instant::now(),
            started_at: Utc::now(),
            status: RecordStatus::Completed,
            finalized: false,
        }
    }

    /// Full scope label.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Nesting level of this scope.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Time spent in the scope so far.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Open a sub-scope keyed `<this scope>/<label>`.
    pub fn child(&self, label: impl AsRef<str>) -> ScopeGuard {
        ScopeGuard::open(
            self.profiler.clone(),
            format!("{}/{}", self.scope, label.as_ref()),
            self.depth + 1,
        )
    }

    /// Run `f` inside a sub-scope and return its value unchanged.
    pub fn instrumented<T>(&self, label: impl AsRef<str>, f: impl FnOnce() -> T) -> T {
        let _child = self.child(label);
        f()
    }

    /// Run a fallible `f` inside a sub-scope; an `Err` marks the sub-scope
    /// failed. The parent is left as is.
    pub fn try_instrumented<T, E>(
        &self,
        label: impl AsRef<str>,
        f: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        let mut child = self.child(label);
        let result = f();
        if result.is_err() {
            child.fail();
        }
        result
    }

    /// Mark the scope as failed. The record is still written on exit.
    pub fn fail(&mut self) {
        self.status = RecordStatus::Failed;
    }

    /// Finalize now and return the elapsed time.
    pub fn finish(mut self) -> Duration {
        self.finalize()
    }

    fn finalize(&mut self) -> Duration {
        let elapsed = self.start.elapsed();
        if self.finalized {
            return elapsed;
        }
        self.finalized = true;

        if std::thread::panicking() {
            self.status = RecordStatus::Failed;
        }

        self.profiler.append(ProfilingRecord {
            scope: std::mem::take(&mut self.scope),
            elapsed,
            call_count: 1,
            status: self.status,
            started_at: self.started_at,
            depth: self.depth,
        });
        elapsed
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        self.finalize();
    }
}
