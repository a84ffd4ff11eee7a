//! HTTP control API module
//!
//! Operator-facing endpoints that feed events to the orchestrator. Serving
//! clock data to web clocks is not part of this API.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timer/start", post(timer_start_handler))
        .route("/timer/stop", post(timer_stop_handler))
        .route("/countdown/stop", post(countdown_stop_handler))
        .route("/monitors/:output", put(monitor_handler))
        .route("/zoom-alert", post(zoom_alert_handler))
        .route("/shutdown", post(shutdown_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
