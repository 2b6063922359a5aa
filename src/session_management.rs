//! Session lifecycle core module.
//!
//! This module owns the one piece of state shared across the system: the
//! attack session. A session moves `Idle -> Configuring -> Active -> Idle`,
//! and every transition bumps a monotonically increasing epoch counter. The
//! pollers capture the epoch when they start and re-check it at every append,
//! which is what keeps a late-arriving poll response from repopulating
//! buffers after the operator has already stopped the run.
//!
//! Components:
//! - `session`: the `Session` object (state, epoch, both telemetry buffers).
//! - `poller`: per-stream cadence loops and the idempotent start/stop handle.
//! - `controller`: the operator-facing configure/stop state machine.

use serde::{Deserialize, Serialize};

pub mod controller;
pub mod poller;
pub mod session;

#[cfg(test)]
mod tests;

pub use controller::SessionController;
pub use poller::Poller;
pub use session::Session;

/// Lifecycle state of the attack session.
///
/// Variants:
/// - `Idle`: no run active, buffers empty.
/// - `Configuring`: a configure request is in flight upstream.
/// - `Active`: the run is live and both pollers are ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Configuring,
    Active,
}
