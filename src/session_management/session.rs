use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use uuid::Uuid;

use crate::telemetry::{LogEntry, MetricSample, TelemetryBuffer};

use super::SessionState;

/// The attack session: lifecycle state, epoch counter, and both telemetry
/// windows, behind one shared object.
///
/// The controller is the only writer of `state` and `epoch`; pollers hold an
/// `Arc<Session>` and go through the `ingest_*` methods, which re-validate
/// the epoch under the buffer lock. An ingest carrying a stale epoch (any
/// transition happened since the poller started) is rejected, so results
/// from polls issued before a stop can never land after it.
pub struct Session {
    id: Uuid,
    state: Mutex<SessionState>,
    epoch: AtomicU64,
    metrics: Mutex<TelemetryBuffer<MetricSample>>,
    logs: Mutex<TelemetryBuffer<LogEntry>>,
}

impl Session {
    pub fn new(metrics_capacity: usize, logs_capacity: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: Mutex::new(SessionState::Idle),
            epoch: AtomicU64::new(0),
            metrics: Mutex::new(TelemetryBuffer::new(metrics_capacity)),
            logs: Mutex::new(TelemetryBuffer::new(logs_capacity)),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        *self.state.lock().unwrap()
    }

    pub fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Moves to `next`, bumping the epoch first so anything still holding
    /// the old epoch is invalidated before the new state becomes visible.
    /// Returns the new epoch. Controller-only.
    pub(crate) fn advance(&self, next: SessionState) -> u64 {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        *self.state.lock().unwrap() = next;
        epoch
    }

    /// Atomically enters `Configuring` from `Idle`. Returns the new epoch,
    /// or `None` when the session is not idle (a second configure racing
    /// the first must lose, not fork the lifecycle).
    pub(crate) fn try_begin_configure(&self) -> Option<u64> {
        let mut state = self.state.lock().unwrap();
        if *state != SessionState::Idle {
            return None;
        }
        *state = SessionState::Configuring;
        Some(self.epoch.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn accepts(&self, epoch: u64) -> bool {
        self.current_epoch() == epoch && self.state() == SessionState::Active
    }

    /// Appends one metric sample if `epoch` is still current and the session
    /// is still active. Returns whether the sample was accepted.
    pub fn ingest_metric(&self, epoch: u64, sample: MetricSample) -> bool {
        let mut metrics = self.metrics.lock().unwrap();
        if !self.accepts(epoch) {
            return false;
        }
        metrics.append(sample);
        true
    }

    /// Replaces the log window with the latest upstream rolling log, under
    /// the same epoch guard. The upstream serves its complete recent log on
    /// every poll, so replacement (not blind append) is what keeps the
    /// window duplicate-free; the buffer bound still caps oversized
    /// payloads.
    pub fn ingest_logs(&self, epoch: u64, entries: Vec<LogEntry>) -> bool {
        let mut logs = self.logs.lock().unwrap();
        if !self.accepts(epoch) {
            return false;
        }
        logs.clear();
        for entry in entries {
            logs.append(entry);
        }
        true
    }

    pub fn metrics_snapshot(&self) -> Vec<MetricSample> {
        self.metrics.lock().unwrap().snapshot()
    }

    pub fn logs_snapshot(&self) -> Vec<LogEntry> {
        self.logs.lock().unwrap().snapshot()
    }

    pub fn metrics_len(&self) -> usize {
        self.metrics.lock().unwrap().len()
    }

    pub fn logs_len(&self) -> usize {
        self.logs.lock().unwrap().len()
    }

    pub(crate) fn clear_buffers(&self) {
        self.metrics.lock().unwrap().clear();
        self.logs.lock().unwrap().clear();
    }
}
