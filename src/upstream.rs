//! Upstream attack-engine client.
//!
//! This module wraps the four HTTP endpoints the engine exposes. The
//! distinguishing behavior lives in the fetch path: the engine signals rate
//! limiting with HTTP 429 responses that still carry a representative
//! telemetry payload, and those must flow into the buffers like any 2xx
//! response instead of being dropped as errors.
//!
//! Components:
//! - `client`: `UpstreamClient`, one reqwest client plus outcome
//!   classification.
//! - `types`: `FetchOutcome` and the raw metrics wire payload.

pub mod client;
pub mod types;

pub use client::UpstreamClient;
pub use types::{FetchOutcome, MetricsPayload};
