//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::AppState;
use super::responses::{available_actions, ApiResponse, StatusResponse, HealthResponse};

/// Handle POST /start - (Re-)start the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.start_timer().await {
        Ok(timer) => {
            info!("Start endpoint called - countdown started");
            Ok(Json(ApiResponse::for_timer(
                "Countdown started".to_string(),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to start countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /pause - Pause the countdown in place
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let timer = state.pause_timer().await;
    info!("Pause endpoint called - countdown is {:?}", timer.phase);
    Json(ApiResponse::for_timer("Countdown paused".to_string(), timer))
}

/// Handle POST /resume - Continue a paused countdown
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.resume_timer().await {
        Ok(timer) => {
            info!("Resume endpoint called - countdown is {:?}", timer.phase);
            Ok(Json(ApiResponse::for_timer(
                "Countdown resumed".to_string(),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to resume countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let timer = state.timer_state().await;
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        available_actions: available_actions(timer.phase),
        timer,
        duration_seconds: state.duration.as_secs(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
