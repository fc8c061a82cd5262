//! HTTP endpoint handlers

use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{error, info};

use super::{
    responses::{ApiResponse, HealthResponse, StatusResponse},
    ApiState,
};
use crate::referee::Command;

fn dispatch(state: &ApiState, command: Command, message: &str) -> Result<Json<ApiResponse>, StatusCode> {
    match state.referee.send(command) {
        Ok(()) => {
            info!("{} requested over HTTP", message);
            Ok(Json(ApiResponse::accepted(
                format!("{} requested", message),
                state.referee.snapshot(),
            )))
        }
        Err(e) => {
            error!("Failed to forward {:?}: {}", command, e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Handle POST /start - Press the Start button
pub async fn start_handler(State(state): State<ApiState>) -> Result<Json<ApiResponse>, StatusCode> {
    dispatch(&state, Command::Start, "Start")
}

/// Handle POST /stop - Press the Stop button
pub async fn stop_handler(State(state): State<ApiState>) -> Result<Json<ApiResponse>, StatusCode> {
    dispatch(&state, Command::Stop, "Stop")
}

/// Handle GET /status - Return what the window shows
pub async fn status_handler(State(state): State<ApiState>) -> Result<Json<StatusResponse>, StatusCode> {
    if state.referee.is_closed() {
        error!("Status requested after the referee closed");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    Ok(Json(StatusResponse {
        display: state.referee.snapshot(),
        uptime: state.uptime(),
        timestamp: chrono::Utc::now(),
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
