//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    orchestrator::CloseOutcome,
    services::TalkTimer,
    state::{AppState, MonitorPlacement, Output},
};
use super::responses::{
    ApiResponse, HealthResponse, StartTimerRequest, StatusResponse, StopTimerRequest,
};

pub type ApiResult = Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)>;

fn failure(code: StatusCode, message: String) -> (StatusCode, Json<ApiResponse>) {
    (code, Json(ApiResponse::error(message)))
}

/// Handle POST /timer/start - Start the talk timer
pub async fn timer_start_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartTimerRequest>,
) -> ApiResult {
    if state.talk_timer.is_running() {
        return Err(failure(StatusCode::CONFLICT, "Talk timer is already running".to_string()));
    }

    match state.start_timer(request.target_seconds, request.count_up).await {
        Ok(timer) => {
            info!("Timer start endpoint called - talk timer running");
            Ok(Json(ApiResponse::ok("Talk timer started".to_string()).with_timer(timer)))
        }
        Err(e) => {
            error!("Failed to start talk timer: {}", e);
            Err(failure(StatusCode::INTERNAL_SERVER_ERROR, e))
        }
    }
}

/// Handle POST /timer/stop - Stop the talk timer
pub async fn timer_stop_handler(
    State(state): State<Arc<AppState>>,
    request: Option<Json<StopTimerRequest>>,
) -> ApiResult {
    if !state.talk_timer.is_running() {
        return Err(failure(StatusCode::CONFLICT, "Talk timer is not running".to_string()));
    }

    let persist_final_value = request.map(|Json(r)| r.persist_final_value).unwrap_or(false);
    match state.stop_timer(persist_final_value).await {
        Ok(timer) => {
            info!("Timer stop endpoint called - talk timer stopped");
            Ok(Json(ApiResponse::ok("Talk timer stopped".to_string()).with_timer(timer)))
        }
        Err(e) => {
            error!("Failed to stop talk timer: {}", e);
            Err(failure(StatusCode::INTERNAL_SERVER_ERROR, e))
        }
    }
}

/// Handle POST /countdown/stop - Stop the countdown
pub async fn countdown_stop_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    match state.stop_countdown().await {
        Ok(displays) => {
            info!("Countdown stop endpoint called");
            Ok(Json(ApiResponse::ok("Countdown stopped".to_string()).with_displays(displays)))
        }
        Err(e) => {
            error!("Failed to stop countdown: {}", e);
            Err(failure(StatusCode::INTERNAL_SERVER_ERROR, e))
        }
    }
}

/// Handle PUT /monitors/:output - Change where an output is shown
pub async fn monitor_handler(
    State(state): State<Arc<AppState>>,
    Path(output): Path<Output>,
    Json(placement): Json<MonitorPlacement>,
) -> ApiResult {
    match state.change_monitor(output, placement).await {
        Ok(displays) => Ok(Json(
            ApiResponse::ok(format!("{} placement updated", output)).with_displays(displays),
        )),
        Err(e) => {
            error!("Failed to change {} monitor: {}", output, e);
            Err(failure(StatusCode::INTERNAL_SERVER_ERROR, e))
        }
    }
}

/// Handle POST /zoom-alert - Flash the zoom alert on the timer display
pub async fn zoom_alert_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    match state.zoom_alert().await {
        Ok(()) => Ok(Json(ApiResponse::ok("Zoom alert raised".to_string()))),
        Err(e) => {
            error!("Failed to raise zoom alert: {}", e);
            Err(failure(StatusCode::INTERNAL_SERVER_ERROR, e))
        }
    }
}

/// Handle POST /shutdown - Close the application unless the timer is running
pub async fn shutdown_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    match state.request_shutdown().await {
        Ok(CloseOutcome::Accepted) => {
            info!("Shutdown endpoint called - closing");
            Ok(Json(ApiResponse::ok("Closing".to_string())))
        }
        Ok(CloseOutcome::Vetoed) => {
            warn!("Shutdown endpoint called while talk timer is running");
            Err((
                StatusCode::CONFLICT,
                Json(ApiResponse::vetoed("Talk timer is running".to_string())),
            ))
        }
        Err(e) => {
            error!("Failed to request shutdown: {}", e);
            Err(failure(StatusCode::INTERNAL_SERVER_ERROR, e))
        }
    }
}

/// Handle GET /status - Return current display and timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let displays = match state.orchestrator.snapshot().await {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get display snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        always_on_top: displays.always_on_top,
        displays,
        talk_timer: state.talk_timer.clock_request_info(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
