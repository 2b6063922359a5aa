use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::presentation::RenderSurface;
use crate::telemetry::MetricSample;
use crate::upstream::UpstreamClient;

use super::session::Session;

/// Idempotent handle to one stream's polling task.
///
/// `start` on a running poller and `stop` on a stopped one are both no-ops.
pub struct Poller {
    label: &'static str,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            handle: None,
        }
    }

    pub fn start<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.is_running() {
            debug!("{} poller already running, start ignored", self.label);
            return;
        }
        debug!("{} poller starting", self.label);
        self.handle = Some(tokio::spawn(task));
    }

    pub fn stop(&mut self) {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                debug!("{} poller stopped", self.label);
            }
            None => debug!("{} poller not running, stop ignored", self.label),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

/// Drives `GET /metrics` on a fixed cadence for as long as `epoch` stays
/// current. One sample per tick; a failed poll skips the tick and the next
/// one retries independently. The fetch is awaited before the next tick is
/// taken, so at most one request is ever in flight for this stream.
pub async fn metrics_loop(
    client: Arc<UpstreamClient>,
    session: Arc<Session>,
    surface: Arc<dyn RenderSurface>,
    period: Duration,
    epoch: u64,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if session.current_epoch() != epoch {
            debug!("metrics poller epoch went stale, exiting");
            break;
        }
        match client.fetch_metrics().await {
            Ok(outcome) => {
                if outcome.is_throttled() {
                    debug!("metrics poll throttled upstream, ingesting partial payload");
                }
                let sample = MetricSample::from(outcome.into_inner());
                if session.ingest_metric(epoch, sample) {
                    surface.render_metrics(&session.metrics_snapshot());
                } else {
                    debug!("metrics poll resolved after stop, result discarded");
                    break;
                }
            }
            Err(e) => warn!("metrics poll skipped: {}", e),
        }
    }
}

/// Drives `GET /logs` on a fixed cadence; same lifecycle rules as
/// `metrics_loop`. Each successful poll replaces the log window with the
/// upstream's current rolling log.
pub async fn logs_loop(
    client: Arc<UpstreamClient>,
    session: Arc<Session>,
    surface: Arc<dyn RenderSurface>,
    period: Duration,
    epoch: u64,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if session.current_epoch() != epoch {
            debug!("logs poller epoch went stale, exiting");
            break;
        }
        match client.fetch_logs().await {
            Ok(outcome) => {
                if outcome.is_throttled() {
                    debug!("logs poll throttled upstream, ingesting partial payload");
                }
                if session.ingest_logs(epoch, outcome.into_inner()) {
                    surface.render_logs(&session.logs_snapshot());
                } else {
                    debug!("logs poll resolved after stop, result discarded");
                    break;
                }
            }
            Err(e) => warn!("logs poll skipped: {}", e),
        }
    }
}
