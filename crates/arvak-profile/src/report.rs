//! Profiling report structure.
//!
//! Folds the raw ledger into one row per scope label so that an external
//! viewer can rank hotspots without re-aggregating.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::record::ProfilingRecord;

/// Schema version of the serialized report.
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Aggregated timings for one scope label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeSummary {
    /// Scope label.
    pub scope: String,
    /// Nesting level of the scope.
    pub depth: usize,
    /// Number of finalized calls.
    pub call_count: u64,
    /// Calls that exited with a failure.
    pub failed_count: u64,
    /// Summed elapsed time.
    pub total: Duration,
    /// Longest single call.
    pub max: Duration,
}

impl ScopeSummary {
    fn new(record: &ProfilingRecord) -> Self {
        Self {
            scope: record.scope.clone(),
            depth: record.depth,
            call_count: 0,
            failed_count: 0,
            total: Duration::ZERO,
            max: Duration::ZERO,
        }
    }

    fn absorb(&mut self, record: &ProfilingRecord) {
        self.call_count += record.call_count;
        if record.failed() {
            self.failed_count += record.call_count;
        }
        self.total += record.elapsed;
        self.max = self.max.max(record.elapsed);
    }

    /// Mean elapsed time per call.
    pub fn mean(&self) -> Duration {
        match u32::try_from(self.call_count) {
            Ok(0) => Duration::ZERO,
            Ok(n) => self.total / n,
            Err(_) => Duration::from_secs_f64(self.total.as_secs_f64() / self.call_count as f64),
        }
    }
}

/// Complete profiling report for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    /// Schema version for forward compatibility.
    pub schema_version: String,
    /// Session label.
    pub session: String,
    /// Timestamp of report generation.
    pub generated_at: DateTime<Utc>,
    /// Number of raw records folded into this report.
    pub total_records: usize,
    /// One row per scope, in order of first finalization.
    pub scopes: Vec<ScopeSummary>,
}

impl ProfileReport {
    /// Build a report from a ledger snapshot.
    pub fn from_records(session: &str, records: &[ProfilingRecord]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut scopes: Vec<ScopeSummary> = Vec::new();

        for record in records {
            let slot = *index.entry(record.scope.as_str()).or_insert_with(|| {
                scopes.push(ScopeSummary::new(record));
                scopes.len() - 1
            });
            scopes[slot].absorb(record);
        }

        Self {
            schema_version: SCHEMA_VERSION.into(),
            session: session.into(),
            generated_at: Utc::now(),
            total_records: records.len(),
            scopes,
        }
    }

    /// Look up the row for a scope label.
    pub fn scope(&self, label: &str) -> Option<&ScopeSummary> {
        self.scopes.iter().find(|s| s.scope == label)
    }

    /// The `n` scopes with the largest total time, largest first.
    pub fn hotspots(&self, n: usize) -> Vec<&ScopeSummary> {
        let mut ranked: Vec<&ScopeSummary> = self.scopes.iter().collect();
        ranked.sort_by(|a, b| b.total.cmp(&a.total).then(a.depth.cmp(&b.depth)));
        ranked.truncate(n);
        ranked
    }

    /// Summed time of all top-level scopes.
    pub fn top_level_total(&self) -> Duration {
        self.scopes
            .iter()
            .filter(|s| s.depth == 0)
            .map(|s| s.total)
            .sum()
    }
}
