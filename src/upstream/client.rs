use std::time::Duration;

use log::trace;
use serde::de::DeserializeOwned;

use crate::configuration::types::AttackConfig;
use crate::error_handling::types::FetchError;
use crate::telemetry::LogEntry;

use super::types::{FetchOutcome, MetricsPayload};

/// HTTP client for the upstream attack engine.
///
/// One instance is shared by both pollers and the session controller. All
/// calls are classified into the three-way outcome described in the module
/// docs; nothing in here panics on upstream misbehavior.
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /metrics`: one derived telemetry reading.
    pub async fn fetch_metrics(&self) -> Result<FetchOutcome<MetricsPayload>, FetchError> {
        self.fetch_json("/metrics").await
    }

    /// `GET /logs`: the engine's complete rolling log. Non-array bodies fail
    /// classification even under 429.
    pub async fn fetch_logs(&self) -> Result<FetchOutcome<Vec<LogEntry>>, FetchError> {
        self.fetch_json("/logs").await
    }

    /// Submits an attack configuration.
    ///
    /// The acknowledgement body is arbitrary; any response whose body is
    /// valid JSON counts as success, regardless of status code. Only
    /// transport and parse failures are errors.
    pub async fn configure(&self, config: &AttackConfig) -> Result<serde_json::Value, FetchError> {
        let response = self
            .http
            .post(self.url("/configure"))
            .json(config)
            .send()
            .await?;
        let body = response.text().await?;
        let ack = serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;
        trace!("configure acknowledged: {}", ack);
        Ok(ack)
    }

    /// Best-effort stop notification. Success is transport-level only; the
    /// response is not inspected.
    pub async fn stop(&self) -> Result<(), FetchError> {
        self.http.post(self.url("/stop")).send().await?;
        Ok(())
    }

    /// Performs one GET and classifies the outcome.
    ///
    /// 2xx with parseable body -> `Fresh`; 429 with parseable body ->
    /// `Throttled`; any other status -> `Protocol`; unreachable upstream ->
    /// `Transport`; unparseable body under 2xx or 429 -> `Parse`.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<FetchOutcome<T>, FetchError> {
        let response = self.http.get(self.url(path)).send().await?;
        let status = response.status();
        let throttled = status.as_u16() == 429;
        if !status.is_success() && !throttled {
            return Err(FetchError::Protocol(status.as_u16()));
        }

        let body = response.text().await?;
        let payload =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;
        Ok(if throttled {
            trace!("GET {} throttled but carried a payload", path);
            FetchOutcome::Throttled(payload)
        } else {
            FetchOutcome::Fresh(payload)
        })
    }
}
