//! Presentation seam.
//!
//! The core never draws anything; it hands immutable buffer snapshots to a
//! [`RenderSurface`] after every successful mutation and raises transient
//! operator notifications through the same trait. The web dashboard reads
//! the same snapshots over the JSON API; `ConsoleSurface` is the in-process
//! renderer wired up by `main`.

use log::{debug, warn};

use crate::telemetry::{LogEntry, MetricSample};

/// Render sink consumed by the session core.
///
/// Implementors receive copy-on-read snapshots and must not assume they can
/// mutate shared state; everything arrives by value or shared reference.
pub trait RenderSurface: Send + Sync {
    /// Called after every successful metrics-buffer mutation (including the
    /// clear on stop).
    fn render_metrics(&self, snapshot: &[MetricSample]);

    /// Called after every successful log-buffer mutation (including the
    /// clear on stop).
    fn render_logs(&self, snapshot: &[LogEntry]);

    /// Transient operator notification (configure/stop failures and other
    /// non-fatal conditions).
    fn notify(&self, message: &str);
}

/// Log-backed surface: summarizes every refresh instead of drawing it.
pub struct ConsoleSurface;

impl RenderSurface for ConsoleSurface {
    fn render_metrics(&self, snapshot: &[MetricSample]) {
        match snapshot.last() {
            Some(latest) => debug!(
                "metrics window: {} samples, latest rt={:.1}ms success={:.0}% cpu={:.0}% attackers={}",
                snapshot.len(),
                latest.response_time,
                latest.success_rate * 100.0,
                latest.cpu_usage,
                latest.active_attackers
            ),
            None => debug!("metrics window cleared"),
        }
    }

    fn render_logs(&self, snapshot: &[LogEntry]) {
        match snapshot.last() {
            Some(latest) => debug!(
                "log window: {} entries, latest [{:?}] {}",
                snapshot.len(),
                latest.severity,
                latest.message
            ),
            None => debug!("log window cleared"),
        }
    }

    fn notify(&self, message: &str) {
        warn!("{}", message);
    }
}
