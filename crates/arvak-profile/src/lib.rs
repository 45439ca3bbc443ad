//! `arvak-profile` — scoped timing instrumentation.
//!
//! Wraps computations in timing scopes and collects the results in a
//! per-session ledger that can be folded into a hotspot report.
//!
//! - **Whole-call timing**: [`Profiler::instrumented`] and
//!   [`Profiler::try_instrumented`] wrap a closure and return its value
//!   unchanged.
//! - **Line-level timing**: [`ScopeGuard::child`] opens nested sub-scopes
//!   keyed `parent/child` inside a single call.
//! - **Reporting**: [`Profiler::records`] returns the raw ledger and
//!   [`Profiler::report`] aggregates it per scope; [`export`] writes JSON.
//!
//! # Quick start
//!
//! ```rust
//! use arvak_profile::{Profiler, ProfilerConfig};
//!
//! let profiler = Profiler::new(ProfilerConfig::new("quick-start"));
//!
//! let parsed: Result<u32, std::num::ParseIntError> =
//!     profiler.try_instrumented("parse", || "17".parse());
//! assert_eq!(parsed.unwrap(), 17);
//!
//! let report = profiler.report();
//! assert_eq!(report.scope("parse").unwrap().call_count, 1);
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod profiler;
pub mod record;
pub mod report;

pub use config::ProfilerConfig;
pub use error::{ProfileError, ProfileResult};
pub use profiler::{Profiler, ScopeGuard};
pub use record::{ProfilingRecord, RecordStatus};
pub use report::{ProfileReport, ScopeSummary};
