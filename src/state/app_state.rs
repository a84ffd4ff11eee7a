//! Main application state shared by the control API and background tasks

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{info, warn};

use super::{MonitorPlacement, Output, TalkTimerRuntimeState};
use crate::{
    orchestrator::{CloseOutcome, DisplaySnapshot, Event, OrchestratorHandle},
    services::SharedTalkTimer,
};

/// Application state handed to every API handler
#[derive(Debug)]
pub struct AppState {
    /// Route to the orchestrator's owner task
    pub orchestrator: OrchestratorHandle,
    pub talk_timer: Arc<SharedTalkTimer>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Flipped to true once a close request has been accepted
    pub shutdown_tx: watch::Sender<bool>,
    /// Keep the receiver alive to prevent channel closure
    pub _shutdown_rx: watch::Receiver<bool>,
}

impl AppState {
    pub fn new(
        orchestrator: OrchestratorHandle,
        talk_timer: Arc<SharedTalkTimer>,
        port: u16,
        host: String,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            orchestrator,
            talk_timer,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            shutdown_tx,
            _shutdown_rx: shutdown_rx,
        }
    }

    /// Remember the most recent action and when it happened
    pub fn record_action(&self, action: &str) -> Result<(), String> {
        let mut last_action = self.last_action.lock()
            .map_err(|e| format!("Failed to lock last action: {}", e))?;
        *last_action = Some(action.to_string());
        drop(last_action);

        let mut last_time = self.last_action_time.lock()
            .map_err(|e| format!("Failed to lock last action time: {}", e))?;
        *last_time = Some(Utc::now());
        Ok(())
    }

    /// Start the talk timer and tell the orchestrator
    pub async fn start_timer(&self, target_seconds: u64, is_counting_up: bool) -> Result<TalkTimerRuntimeState, String> {
        let timer_state = self.talk_timer.start(target_seconds, is_counting_up)?;
        self.orchestrator.send(Event::TimerStarted).await?;
        self.record_action("timer-start")?;
        Ok(timer_state)
    }

    /// Stop the talk timer and tell the orchestrator
    pub async fn stop_timer(&self, persist_final_value: bool) -> Result<TalkTimerRuntimeState, String> {
        let timer_state = self.talk_timer.stop()?;
        self.orchestrator
            .send(Event::TimerStopped { persist_final_value })
            .await?;
        self.record_action("timer-stop")?;
        Ok(timer_state)
    }

    pub async fn stop_countdown(&self) -> Result<DisplaySnapshot, String> {
        self.orchestrator.send(Event::StopCountdown).await?;
        self.record_action("countdown-stop")?;
        self.orchestrator.snapshot().await
    }

    pub async fn change_monitor(&self, output: Output, placement: MonitorPlacement) -> Result<DisplaySnapshot, String> {
        info!("Changing {} placement to {:?}", output, placement);
        self.orchestrator.change_monitor(output, placement).await?;
        self.record_action(&format!("{}-monitor", output))?;
        self.orchestrator.snapshot().await
    }

    pub async fn zoom_alert(&self) -> Result<(), String> {
        self.orchestrator.send(Event::ZoomAlert).await?;
        self.record_action("zoom-alert")
    }

    /// Ask the orchestrator to close; on acceptance, signal the server to stop
    pub async fn request_shutdown(&self) -> Result<CloseOutcome, String> {
        let outcome = self.orchestrator.request_close().await?;
        if outcome == CloseOutcome::Accepted {
            if let Err(e) = self.shutdown_tx.send(true) {
                warn!("Failed to signal shutdown: {}", e);
            }
        }
        Ok(outcome)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
