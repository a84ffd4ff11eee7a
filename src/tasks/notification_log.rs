//! Notification subscriber task

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use crate::{orchestrator::Notification, state::AppState};

/// Background task that records orchestrator notifications in the app state
pub async fn notification_log_task(
    state: Arc<AppState>,
    mut notifications: broadcast::Receiver<Notification>,
) {
    info!("Starting notification task");

    loop {
        match notifications.recv().await {
            Ok(Notification::RefreshSchedule) => {
                debug!("Schedule refresh requested");
                if let Err(e) = state.record_action("refresh-schedule") {
                    warn!("Failed to record schedule refresh: {}", e);
                }
            }
            Ok(Notification::AlwaysOnTopChanged(on_top)) => {
                info!("Always on top is now {}", on_top);
            }
            Ok(Notification::ShutDown) => {
                info!("Shutdown notification received");
                if let Err(e) = state.record_action("shutdown") {
                    warn!("Failed to record shutdown: {}", e);
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Notification task lagged, skipped {} notifications", skipped);
            }
            Err(RecvError::Closed) => {
                debug!("Notification channel closed");
                break;
            }
        }
    }
}
