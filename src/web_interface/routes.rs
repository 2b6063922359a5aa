use std::sync::Arc;

use rust_embed::RustEmbed;
use warp::{http::StatusCode, reply, Filter, Rejection, Reply};

use super::types::{AckResponse, ApiError, StatusResponse};
use crate::configuration::types::AttackConfig;
use crate::error_handling::types::SessionError;
use crate::session_management::SessionController;

/// Static dashboard assets compiled into the binary.
#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

/// GET / -> dashboard page
pub fn dashboard_route() -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path::end().and(warp::get()).and_then(|| async move {
        match Assets::get("index.html") {
            Some(content) => {
                let html = String::from_utf8_lossy(content.data.as_ref()).into_owned();
                Ok::<_, Rejection>(reply::html(html).into_response())
            }
            None => Ok::<_, Rejection>(
                reply::with_status(
                    reply::html("<h1>hornet: dashboard asset missing</h1>".to_string()),
                    StatusCode::NOT_FOUND,
                )
                .into_response(),
            ),
        }
    })
}

/// GET /assets/:name -> embedded static file
pub fn asset_route() -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("assets" / String)
        .and(warp::get())
        .and_then(|name: String| async move {
            match Assets::get(&name) {
                Some(content) => {
                    let mime = mime_guess::from_path(&name).first_or_octet_stream();
                    let res = reply::with_header(
                        content.data.into_owned(),
                        "Content-Type",
                        mime.as_ref().to_string(),
                    )
                    .into_response();
                    Ok::<_, Rejection>(res)
                }
                None => Ok::<_, Rejection>(
                    reply::with_status(
                        reply::json(&ApiError {
                            message: "Asset not found".to_string(),
                        }),
                        StatusCode::NOT_FOUND,
                    )
                    .into_response(),
                ),
            }
        })
}

/// GET /api/status -> session overview
pub fn status_route(
    controller: Arc<SessionController>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "status")
        .and(warp::get())
        .and_then(move || {
            let session = controller.session();
            async move {
                Ok::<_, Rejection>(reply::json(&StatusResponse {
                    session_id: session.id(),
                    state: session.state(),
                    metrics_buffered: session.metrics_len(),
                    logs_buffered: session.logs_len(),
                }))
            }
        })
}

/// GET /api/metrics -> metrics window snapshot
pub fn metrics_route(
    controller: Arc<SessionController>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "metrics")
        .and(warp::get())
        .and_then(move || {
            let session = controller.session();
            async move { Ok::<_, Rejection>(reply::json(&session.metrics_snapshot())) }
        })
}

/// GET /api/logs -> log window snapshot
pub fn logs_route(
    controller: Arc<SessionController>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "logs").and(warp::get()).and_then(move || {
        let session = controller.session();
        async move { Ok::<_, Rejection>(reply::json(&session.logs_snapshot())) }
    })
}

/// POST /api/configure -> operator configure intent
pub fn configure_route(
    controller: Arc<SessionController>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "configure")
        .and(warp::post())
        .and(warp::body::json())
        .and_then(move |config: AttackConfig| {
            let controller = controller.clone();
            async move {
                match controller.configure(config).await {
                    Ok(()) => Ok::<_, Rejection>(reply::with_status(
                        reply::json(&AckResponse {
                            message: "Attack configured and started".to_string(),
                        }),
                        StatusCode::OK,
                    )),
                    Err(e) => {
                        let status = match &e {
                            SessionError::InvalidConfig(_) => StatusCode::BAD_REQUEST,
                            SessionError::AlreadyRunning | SessionError::Superseded => {
                                StatusCode::CONFLICT
                            }
                            SessionError::ConfigureFailed(_) => StatusCode::BAD_GATEWAY,
                        };
                        Ok::<_, Rejection>(reply::with_status(
                            reply::json(&ApiError {
                                message: e.to_string(),
                            }),
                            status,
                        ))
                    }
                }
            }
        })
}

/// POST /api/stop -> operator stop intent (always succeeds locally)
pub fn stop_route(
    controller: Arc<SessionController>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "stop")
        .and(warp::post())
        .and_then(move || {
            let controller = controller.clone();
            async move {
                controller.stop().await;
                Ok::<_, Rejection>(reply::json(&AckResponse {
                    message: "Attack stopped".to_string(),
                }))
            }
        })
}
