//! Finalized timing records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How an instrumented scope exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// The scope exited normally.
    Completed,
    /// The wrapped computation returned an error or panicked.
    Failed,
}

/// A single timing record.
///
/// Records in the ledger always carry `call_count == 1`; aggregated report
/// rows reuse the type with the summed count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilingRecord {
    /// Scope label. Nested scopes are keyed `parent/child`.
    pub scope: String,
    /// Wall-clock time spent inside the scope (monotonic clock).
    pub elapsed: Duration,
    /// Number of calls folded into this record.
    pub call_count: u64,
    /// Exit status.
    pub status: RecordStatus,
    /// When the scope was entered.
    pub started_at: DateTime<Utc>,
    /// Nesting level; 0 for a whole-call scope.
    pub depth: usize,
}

impl ProfilingRecord {
    /// Whether the scope exited with a failure.
    pub fn failed(&self) -> bool {
        self.status == RecordStatus::Failed
    }

    /// The last path segment of the scope label.
    pub fn leaf(&self) -> &str {
        self.scope.rsplit('/').next().unwrap_or(&self.scope)
    }
}
