use serde::Serialize;
use uuid::Uuid;

use crate::session_management::SessionState;

/// API error payload
#[derive(Serialize)]
pub struct ApiError {
    pub message: String,
}

/// Acknowledgement payload for operator intents
#[derive(Serialize)]
pub struct AckResponse {
    pub message: String,
}

/// Current session overview served at `GET /api/status`
#[derive(Serialize)]
pub struct StatusResponse {
    pub session_id: Uuid,
    pub state: SessionState,
    pub metrics_buffered: usize,
    pub logs_buffered: usize,
}
