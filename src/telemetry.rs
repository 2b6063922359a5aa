//! Telemetry core module.
//!
//! This module provides the entity types produced by the two upstream data
//! streams and the bounded sliding-window buffer that retains the most
//! recent samples of each.
//!
//! Components:
//! - `types`: `MetricSample` and `LogEntry` entities plus `Severity`.
//! - `buffer`: `TelemetryBuffer<T>`, a fixed-capacity FIFO window.

pub mod buffer;
pub mod types;

pub use buffer::TelemetryBuffer;
pub use types::{LogEntry, MetricSample, Severity};

/// Default capacity of the metrics window.
pub const METRICS_CAPACITY: usize = 20;
/// Default capacity of the log window.
pub const LOGS_CAPACITY: usize = 100;
