//! Typed inputs and outputs of the orchestrator

use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

use crate::state::{CountdownWindowState, DisplayWindowState, MonitorPlacement, Options, Output};

/// Inputs to the orchestrator, delivered on its owner task
#[derive(Debug)]
pub enum Event {
    /// The configured placement of one output was edited
    MonitorChanged {
        output: Output,
        placement: MonitorPlacement,
    },
    TimerStarted,
    TimerStopped {
        /// Hold the final value on screen before reverting to time of day
        persist_final_value: bool,
    },
    StopCountdown,
    OptionsChanged(Options),
    /// Raised by network-facing code on its own threads
    ZoomAlert,
    CloseRequested(oneshot::Sender<CloseOutcome>),
    Snapshot(oneshot::Sender<DisplaySnapshot>),
}

/// Notifications broadcast to the rest of the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    RefreshSchedule,
    /// Sent before the displays are closed so dependents can persist state
    ShutDown,
    AlwaysOnTopChanged(bool),
}

/// Outcome of a request to close the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseOutcome {
    Accepted,
    /// The talk timer is running
    Vetoed,
}

/// Point-in-time view of both outputs
#[derive(Debug, Clone, Serialize)]
pub struct DisplaySnapshot {
    pub timer: DisplayWindowState,
    pub countdown: CountdownWindowState,
    pub always_on_top: bool,
    pub options: Options,
}

/// Cloneable sender that marshals events onto the orchestrator's owner task
#[derive(Debug, Clone)]
pub struct OrchestratorHandle {
    tx: mpsc::Sender<Event>,
}

impl OrchestratorHandle {
    /// Create a handle and the receiver to hand to the owner task
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.tx
            .send(event)
            .await
            .map_err(|e| format!("Orchestrator is not running: {}", e))
    }

    /// Send from a thread outside the async runtime
    pub fn blocking_send(&self, event: Event) -> Result<(), String> {
        self.tx
            .blocking_send(event)
            .map_err(|e| format!("Orchestrator is not running: {}", e))
    }

    pub async fn change_monitor(&self, output: Output, placement: MonitorPlacement) -> Result<(), String> {
        self.send(Event::MonitorChanged { output, placement }).await
    }

    pub async fn request_close(&self) -> Result<CloseOutcome, String> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Event::CloseRequested(reply_tx)).await?;
        reply_rx
            .await
            .map_err(|e| format!("Orchestrator dropped close request: {}", e))
    }

    pub async fn snapshot(&self) -> Result<DisplaySnapshot, String> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Event::Snapshot(reply_tx)).await?;
        reply_rx
            .await
            .map_err(|e| format!("Orchestrator dropped snapshot request: {}", e))
    }
}
