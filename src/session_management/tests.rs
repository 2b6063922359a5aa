//! End-to-end tests for the session core against a canned upstream.
//!
//! Each test spins a raw TCP stub that speaks just enough HTTP/1.1 for
//! reqwest, with per-route bodies and optional artificial latency to force
//! the in-flight races the lifecycle has to survive.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::configuration::config::Config;
use crate::configuration::types::{AttackConfig, AttackMode, TargetEndpoint};
use crate::error_handling::types::SessionError;
use crate::presentation::RenderSurface;
use crate::telemetry::{LogEntry, MetricSample};

use super::controller::SessionController;
use super::SessionState;

const METRICS_BODY: &str =
    r#"{"responseTime":35.0,"successRate":0.8,"cpuUsage":70.0,"activeAttackers":8}"#;
const LOGS_BODY: &str =
    r#"[{"timestamp":"12:00:01","type":"info","message":"thread 3 got 200"},
        {"timestamp":"12:00:02","type":"warning","message":"thread 5 got 429"}]"#;

#[derive(Clone)]
struct StubBehavior {
    metrics_status: &'static str,
    metrics_delay_ms: u64,
    configure_delay_ms: u64,
}

impl Default for StubBehavior {
    fn default() -> Self {
        Self {
            metrics_status: "200 OK",
            metrics_delay_ms: 0,
            configure_delay_ms: 0,
        }
    }
}

fn http_response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    )
}

/// Minimal canned upstream: routes on the request line only.
async fn spawn_upstream(behavior: StubBehavior) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let behavior = behavior.clone();
            tokio::spawn(async move {
                let mut request = [0u8; 2048];
                let n = socket.read(&mut request).await.unwrap_or(0);
                let head = String::from_utf8_lossy(&request[..n]);
                let response = if head.starts_with("GET /metrics") {
                    if behavior.metrics_delay_ms > 0 {
                        tokio::time::sleep(Duration::from_millis(behavior.metrics_delay_ms)).await;
                    }
                    http_response(behavior.metrics_status, METRICS_BODY)
                } else if head.starts_with("GET /logs") {
                    http_response("200 OK", LOGS_BODY)
                } else if head.starts_with("POST /configure") {
                    if behavior.configure_delay_ms > 0 {
                        tokio::time::sleep(Duration::from_millis(behavior.configure_delay_ms))
                            .await;
                    }
                    http_response("200 OK", r#"{"message":"attack initiated"}"#)
                } else if head.starts_with("POST /stop") {
                    http_response("200 OK", r#"{"message":"attack stopped"}"#)
                } else {
                    http_response("404 Not Found", r#"{"error":"no such route"}"#)
                };
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });
    addr
}

#[derive(Default)]
struct RecordingSurface {
    metric_renders: AtomicUsize,
    log_renders: AtomicUsize,
    notifications: Mutex<Vec<String>>,
}

impl RenderSurface for RecordingSurface {
    fn render_metrics(&self, _snapshot: &[MetricSample]) {
        self.metric_renders.fetch_add(1, Ordering::SeqCst);
    }
    fn render_logs(&self, _snapshot: &[LogEntry]) {
        self.log_renders.fetch_add(1, Ordering::SeqCst);
    }
    fn notify(&self, message: &str) {
        self.notifications.lock().unwrap().push(message.to_string());
    }
}

fn test_config(addr: SocketAddr) -> Config {
    Config {
        upstream_url: format!("http://{}", addr),
        metrics_interval_ms: 20,
        logs_interval_ms: 25,
        request_timeout_secs: 2,
        ..Config::default()
    }
}

fn attack_config() -> AttackConfig {
    AttackConfig {
        num_threads: 10,
        rate_limit: 5,
        attack_mode: AttackMode::Single,
        target_endpoint: TargetEndpoint::Limited,
        use_blacklist: false,
    }
}

fn controller_for(addr: SocketAddr) -> (SessionController, Arc<RecordingSurface>) {
    let surface = Arc::new(RecordingSurface::default());
    let controller = SessionController::new(&test_config(addr), surface.clone()).unwrap();
    (controller, surface)
}

#[tokio::test]
async fn configure_success_activates_and_both_pollers_tick() {
    let addr = spawn_upstream(StubBehavior::default()).await;
    let (controller, surface) = controller_for(addr);
    let session = controller.session();

    controller.configure(attack_config()).await.unwrap();
    assert_eq!(session.state(), SessionState::Active);
    assert_eq!(controller.pollers_running(), (true, true));

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(session.metrics_len() >= 2, "metrics cadence never ticked");
    assert_eq!(session.logs_len(), 2);
    assert!(surface.metric_renders.load(Ordering::SeqCst) >= 2);
    assert!(surface.log_renders.load(Ordering::SeqCst) >= 1);

    controller.stop().await;
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(controller.pollers_running(), (false, false));
    assert!(session.metrics_snapshot().is_empty());
    assert!(session.logs_snapshot().is_empty());
}

#[tokio::test]
async fn configure_transport_failure_rolls_back_to_idle() {
    // Bind then drop: nothing listens on this port.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (controller, surface) = controller_for(addr);
    let result = controller.configure(attack_config()).await;

    assert!(matches!(result, Err(SessionError::ConfigureFailed(_))));
    assert_eq!(controller.session().state(), SessionState::Idle);
    assert_eq!(controller.pollers_running(), (false, false));
    assert!(controller.session().metrics_snapshot().is_empty());
    assert_eq!(surface.notifications.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn out_of_range_config_is_rejected_before_any_network_call() {
    // Unreachable upstream proves validation short-circuits the request.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (controller, _surface) = controller_for(addr);
    let mut config = attack_config();
    config.num_threads = 0;

    let result = controller.configure(config).await;
    assert!(matches!(result, Err(SessionError::InvalidConfig(_))));
    assert_eq!(controller.session().state(), SessionState::Idle);
}

#[tokio::test]
async fn second_configure_is_rejected_while_active() {
    let addr = spawn_upstream(StubBehavior::default()).await;
    let (controller, _surface) = controller_for(addr);

    controller.configure(attack_config()).await.unwrap();
    let result = controller.configure(attack_config()).await;
    assert!(matches!(result, Err(SessionError::AlreadyRunning)));
    assert_eq!(controller.session().state(), SessionState::Active);

    controller.stop().await;
}

#[tokio::test]
async fn stop_from_idle_is_a_noop() {
    // Upstream unreachable: a no-op stop must not even try to call it.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (controller, surface) = controller_for(addr);
    controller.stop().await;

    assert_eq!(controller.session().state(), SessionState::Idle);
    assert!(surface.notifications.lock().unwrap().is_empty());
}

#[tokio::test]
async fn delayed_poll_response_is_discarded_after_stop() {
    let addr = spawn_upstream(StubBehavior {
        metrics_delay_ms: 150,
        ..StubBehavior::default()
    })
    .await;
    let (controller, _surface) = controller_for(addr);
    let session = controller.session();

    controller.configure(attack_config()).await.unwrap();
    // Let the first metrics request get in flight, then stop underneath it.
    tokio::time::sleep(Duration::from_millis(50)).await;
    controller.stop().await;

    assert_eq!(session.state(), SessionState::Idle);
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(
        session.metrics_snapshot().is_empty(),
        "stale metrics response was appended after stop"
    );
    assert!(session.logs_snapshot().is_empty());
}

#[tokio::test]
async fn throttled_metrics_are_ingested_like_fresh_ones() {
    let addr = spawn_upstream(StubBehavior {
        metrics_status: "429 Too Many Requests",
        ..StubBehavior::default()
    })
    .await;
    let (controller, _surface) = controller_for(addr);
    let session = controller.session();

    controller.configure(attack_config()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let snapshot = session.metrics_snapshot();
    assert!(!snapshot.is_empty(), "throttled payloads must still ingest");
    assert_eq!(snapshot[0].active_attackers, 8);

    controller.stop().await;
}

#[tokio::test]
async fn stop_during_inflight_configure_supersedes_activation() {
    let addr = spawn_upstream(StubBehavior {
        configure_delay_ms: 150,
        ..StubBehavior::default()
    })
    .await;
    let (controller, _surface) = controller_for(addr);
    let controller = Arc::new(controller);

    let configure_task = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.configure(attack_config()).await })
    };
    // The configure request is held upstream; stop while it is in flight.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(controller.session().state(), SessionState::Configuring);
    controller.stop().await;

    let result = configure_task.await.unwrap();
    assert!(matches!(result, Err(SessionError::Superseded)));
    assert_eq!(controller.session().state(), SessionState::Idle);
    assert_eq!(controller.pollers_running(), (false, false));
    assert!(controller.session().metrics_snapshot().is_empty());
}
