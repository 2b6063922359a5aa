//! Operator-facing lifecycle control for the attack session.
//!
//! `SessionController` ties the whole core together: it validates operator
//! input, drives the `Idle -> Configuring -> Active -> Idle` state machine,
//! and starts/stops the two telemetry pollers as a unit. It aggregates the
//! shared [`Session`], the [`UpstreamClient`], and the injected
//! [`RenderSurface`].
//!
//! Highlights
//! - Configure never leaves the session in `Configuring`: the upstream call
//!   either activates the run or rolls back to `Idle`.
//! - Stop is local-state-wins: the session always lands in `Idle`, pollers
//!   down and buffers cleared, even when the upstream stop call fails. The
//!   console must never keep showing a live attack the operator believes has
//!   ended.
//! - A stop racing an in-flight configure is resolved by the epoch check:
//!   the acknowledgement arrives, finds its epoch stale, and the session
//!   stays `Idle` with no pollers started.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, info, warn};

use crate::configuration::config::Config;
use crate::configuration::types::AttackConfig;
use crate::error_handling::types::{FetchError, SessionError};
use crate::presentation::RenderSurface;
use crate::upstream::UpstreamClient;

use super::poller::{self, Poller};
use super::session::Session;
use super::SessionState;

pub struct SessionController {
    client: Arc<UpstreamClient>,
    session: Arc<Session>,
    surface: Arc<dyn RenderSurface>,
    metrics_poller: Mutex<Poller>,
    logs_poller: Mutex<Poller>,
    metrics_period: Duration,
    logs_period: Duration,
}

impl SessionController {
    pub fn new(config: &Config, surface: Arc<dyn RenderSurface>) -> Result<Self, FetchError> {
        let client = UpstreamClient::new(
            &config.upstream_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(Self {
            client: Arc::new(client),
            session: Arc::new(Session::new(config.metrics_capacity, config.logs_capacity)),
            surface,
            metrics_poller: Mutex::new(Poller::new("metrics")),
            logs_poller: Mutex::new(Poller::new("logs")),
            metrics_period: Duration::from_millis(config.metrics_interval_ms),
            logs_period: Duration::from_millis(config.logs_interval_ms),
        })
    }

    /// Shared handle to the session (read-only snapshots for presentation).
    pub fn session(&self) -> Arc<Session> {
        Arc::clone(&self.session)
    }

    /// Submits an attack configuration and, on upstream acknowledgement,
    /// activates the run and starts both pollers.
    ///
    /// Fails without touching the network when the parameters are out of
    /// range or the session is not idle. On upstream failure the session
    /// rolls back to `Idle` and the failure is surfaced to both the caller
    /// and the render surface.
    pub async fn configure(&self, config: AttackConfig) -> Result<(), SessionError> {
        config.validate().map_err(SessionError::InvalidConfig)?;

        let epoch = match self.session.try_begin_configure() {
            Some(epoch) => epoch,
            None => return Err(SessionError::AlreadyRunning),
        };
        info!(
            "configuring attack: {} attackers, {:?} mode against {:?}, blacklist {}",
            config.num_threads,
            config.attack_mode,
            config.target_endpoint,
            if config.use_blacklist { "on" } else { "off" }
        );

        match self.client.configure(&config).await {
            Err(e) => {
                self.session.advance(SessionState::Idle);
                self.surface.notify(&format!("Attack configure failed: {}", e));
                Err(SessionError::ConfigureFailed(e))
            }
            Ok(ack) => {
                if self.session.current_epoch() != epoch {
                    info!("configure acknowledged after a stop request, staying idle");
                    return Err(SessionError::Superseded);
                }
                debug!("upstream acknowledged configure: {}", ack);
                let run_epoch = self.session.advance(SessionState::Active);
                self.start_pollers(run_epoch);
                info!("session {} active", self.session.id());
                Ok(())
            }
        }
    }

    /// Stops the run. Always lands in `Idle`: pollers are stopped and both
    /// buffers cleared before the best-effort upstream notification goes
    /// out, and an upstream failure is reported but never propagated.
    /// Calling this from `Idle` is a no-op.
    pub async fn stop(&self) {
        if self.session.state() == SessionState::Idle {
            debug!("stop requested while idle, nothing to do");
            return;
        }

        info!("stopping session {}", self.session.id());
        self.session.advance(SessionState::Idle);
        self.metrics_poller.lock().unwrap().stop();
        self.logs_poller.lock().unwrap().stop();
        self.session.clear_buffers();
        self.surface.render_metrics(&[]);
        self.surface.render_logs(&[]);

        if let Err(e) = self.client.stop().await {
            warn!("upstream stop notification failed: {}", e);
            self.surface
                .notify(&format!("Upstream stop notification failed: {}", e));
        }
    }

    pub fn pollers_running(&self) -> (bool, bool) {
        (
            self.metrics_poller.lock().unwrap().is_running(),
            self.logs_poller.lock().unwrap().is_running(),
        )
    }

    fn start_pollers(&self, epoch: u64) {
        self.metrics_poller.lock().unwrap().start(poller::metrics_loop(
            Arc::clone(&self.client),
            Arc::clone(&self.session),
            Arc::clone(&self.surface),
            self.metrics_period,
            epoch,
        ));
        self.logs_poller.lock().unwrap().start(poller::logs_loop(
            Arc::clone(&self.client),
            Arc::clone(&self.session),
            Arc::clone(&self.surface),
            self.logs_period,
            epoch,
        ));
    }
}
