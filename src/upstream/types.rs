use chrono::Utc;
use serde::Deserialize;

use crate::telemetry::MetricSample;

/// Variant success of one telemetry fetch.
///
/// `Throttled` is a first-class success path, not an error: the upstream
/// returns partial but usable data under rate limiting, and consumers must
/// ingest it exactly like `Fresh`. Hard failures never reach this type; they
/// surface as `FetchError`.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Fresh(T),
    Throttled(T),
}

impl<T> FetchOutcome<T> {
    pub fn is_throttled(&self) -> bool {
        matches!(self, FetchOutcome::Throttled(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            FetchOutcome::Fresh(payload) | FetchOutcome::Throttled(payload) => payload,
        }
    }
}

/// Raw metrics body as served by `GET /metrics`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsPayload {
    pub response_time: f64,
    pub success_rate: f64,
    pub cpu_usage: f64,
    pub active_attackers: u32,
}

impl From<MetricsPayload> for MetricSample {
    /// Stamps the sample with a client-side capture time; the upstream body
    /// carries no timestamp the client is willing to trust.
    fn from(payload: MetricsPayload) -> Self {
        MetricSample {
            captured_at: Utc::now(),
            response_time: payload.response_time,
            success_rate: payload.success_rate,
            cpu_usage: payload.cpu_usage,
            active_attackers: payload.active_attackers,
        }
    }
}
