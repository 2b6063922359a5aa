use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One derived telemetry sample.
///
/// `captured_at` is assigned by this client at ingestion time; the upstream
/// engine does not supply a trustworthy timestamp with its metrics payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSample {
    pub captured_at: DateTime<Utc>,
    pub response_time: f64,
    pub success_rate: f64,
    pub cpu_usage: f64,
    pub active_attackers: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// One upstream log line. The timestamp is server-assigned and opaque to the
/// client; it is displayed verbatim, never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
}
