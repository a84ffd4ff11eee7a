//! Talk timer subsystem as seen from the display core

use std::{
    sync::Mutex,
    time::{Duration, Instant},
};

use tracing::info;

use crate::state::TalkTimerRuntimeState;

/// Read-only view of the talk timer
pub trait TalkTimer: Send + Sync {
    fn is_running(&self) -> bool;
    /// Current timer values, or `None` if the timer has never run
    fn clock_request_info(&self) -> Option<TalkTimerRuntimeState>;
}

#[derive(Debug)]
struct Run {
    started: Instant,
    stopped_after: Option<Duration>,
    target_seconds: u64,
    is_counting_up: bool,
}

/// In-process talk timer shared between the control API and the orchestrator
#[derive(Debug, Default)]
pub struct SharedTalkTimer {
    run: Mutex<Option<Run>>,
}

impl SharedTalkTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing a talk of `target_seconds`
    pub fn start(&self, target_seconds: u64, is_counting_up: bool) -> Result<TalkTimerRuntimeState, String> {
        let mut run = self.run.lock()
            .map_err(|e| format!("Failed to lock talk timer: {}", e))?;

        if matches!(&*run, Some(r) if r.stopped_after.is_none()) {
            return Err("Talk timer is already running".to_string());
        }

        *run = Some(Run {
            started: Instant::now(),
            stopped_after: None,
            target_seconds,
            is_counting_up,
        });
        info!(target_seconds, is_counting_up, "Talk timer started");
        Ok(TalkTimerRuntimeState::running(target_seconds, is_counting_up))
    }

    /// Stop the timer, returning its final state
    pub fn stop(&self) -> Result<TalkTimerRuntimeState, String> {
        let mut run = self.run.lock()
            .map_err(|e| format!("Failed to lock talk timer: {}", e))?;

        match run.as_mut() {
            Some(r) if r.stopped_after.is_none() => {
                let elapsed = r.started.elapsed();
                r.stopped_after = Some(elapsed);
                info!(elapsed_secs = elapsed.as_secs(), "Talk timer stopped");
                Ok(snapshot(r))
            }
            _ => Err("Talk timer is not running".to_string()),
        }
    }
}

fn snapshot(run: &Run) -> TalkTimerRuntimeState {
    TalkTimerRuntimeState {
        is_running: run.stopped_after.is_none(),
        elapsed: run.stopped_after.unwrap_or_else(|| run.started.elapsed()),
        target_seconds: run.target_seconds,
        is_counting_up: run.is_counting_up,
    }
}

impl TalkTimer for SharedTalkTimer {
    fn is_running(&self) -> bool {
        self.clock_request_info()
            .map(|info| info.is_running)
            .unwrap_or(false)
    }

    fn clock_request_info(&self) -> Option<TalkTimerRuntimeState> {
        self.run.lock().ok().and_then(|run| run.as_ref().map(snapshot))
    }
}
