//! Profiler session configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a profiling session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilerConfig {
    /// Session label carried into every report.
    pub session: String,
    /// When false, scopes are still timed for the caller but nothing is
    /// appended to the ledger.
    pub enabled: bool,
    /// Emit a `trace!` event for every finalized record.
    pub emit_events: bool,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            session: "default".into(),
            enabled: true,
            emit_events: true,
        }
    }
}

impl ProfilerConfig {
    /// Create a config for a named session.
    pub fn new(session: impl Into<String>) -> Self {
        Self {
            session: session.into(),
            ..Self::default()
        }
    }

    /// Disable ledger recording.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Toggle per-record trace events.
    #[must_use]
    pub fn with_events(mut self, emit: bool) -> Self {
        self.emit_events = emit;
        self
    }

    /// Create config from environment variables.
    ///
    /// Environment variables:
    /// - `ARVAK_PROFILE`: `0`, `off`, `false` or `no` disables recording
    ///   (default: enabled)
    /// - `ARVAK_PROFILE_SESSION`: session label (default: "default")
    pub fn from_env() -> Self {
        let enabled = std::env::var("ARVAK_PROFILE").map_or(true, |v| parse_switch(&v));
        let session =
            std::env::var("ARVAK_PROFILE_SESSION").unwrap_or_else(|_| "default".to_string());

        Self {
            session,
            enabled,
            ..Self::default()
        }
    }
}

fn parse_switch(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "off" | "false" | "no"
    )
}
