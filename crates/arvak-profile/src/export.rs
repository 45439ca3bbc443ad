//! Export Module: JSON output of profiling reports and raw ledgers.
//!
//! Reports are written as a single JSON document. The raw ledger is written
//! as JSON Lines, one [`ProfilingRecord`] per line, so ledgers from several
//! runs can be concatenated and folded into one report with
//! [`read_ledger`] and [`ProfileReport::from_records`].

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{ProfileError, ProfileResult};
use crate::record::ProfilingRecord;
use crate::report::ProfileReport;

/// Export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Whether to pretty-print report JSON. Ledger lines are always compact.
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Export a profiling report to a JSON string.
pub fn to_json(report: &ProfileReport, config: &ExportConfig) -> ProfileResult<String> {
    if config.pretty {
        serde_json::to_string_pretty(report).map_err(ProfileError::from)
    } else {
        serde_json::to_string(report).map_err(ProfileError::from)
    }
}

/// Export a profiling report to a JSON file.
pub fn to_file(report: &ProfileReport, path: &Path, config: &ExportConfig) -> ProfileResult<()> {
    let json = to_json(report, config)?;
    std::fs::write(path, json).map_err(|e| io_error("write", path, e))
}

/// Write ledger records as JSON Lines.
pub fn write_ledger<W: Write>(records: &[ProfilingRecord], mut writer: W) -> ProfileResult<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer
            .write_all(b"\n")
            .map_err(|e| ProfileError::Io(e.to_string()))?;
    }
    writer.flush().map_err(|e| ProfileError::Io(e.to_string()))
}

/// Append ledger records to a JSON Lines file, creating it if needed.
pub fn append_ledger(records: &[ProfilingRecord], path: &Path) -> ProfileResult<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| io_error("open", path, e))?;
    write_ledger(records, BufWriter::new(file))
}

/// Read JSON Lines ledger records. Blank lines are skipped.
pub fn read_ledger<R: BufRead>(reader: R) -> ProfileResult<Vec<ProfilingRecord>> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| ProfileError::Io(e.to_string()))?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line)
            .map_err(|e| ProfileError::Export(format!("ledger line {}: {}", index + 1, e)))?;
        records.push(record);
    }
    Ok(records)
}

/// Read a JSON Lines ledger file.
pub fn read_ledger_file(path: &Path) -> ProfileResult<Vec<ProfilingRecord>> {
    let file = File::open(path).map_err(|e| io_error("open", path, e))?;
    read_ledger(BufReader::new(file))
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> ProfileError {
    ProfileError::Io(format!("Failed to {} {}: {}", action, path.display(), e))
}
