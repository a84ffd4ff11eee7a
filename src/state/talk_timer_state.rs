//! Talk timer runtime state, as reported by the talk timer subsystem

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Snapshot of the running talk timer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalkTimerRuntimeState {
    pub is_running: bool,
    pub elapsed: Duration,
    pub target_seconds: u64,
    pub is_counting_up: bool,
}

impl TalkTimerRuntimeState {
    /// Create a running timer state with nothing elapsed yet
    pub fn running(target_seconds: u64, is_counting_up: bool) -> Self {
        Self {
            is_running: true,
            elapsed: Duration::ZERO,
            target_seconds,
            is_counting_up,
        }
    }

    /// Seconds left before the target, if still short of it
    pub fn remaining_seconds(&self) -> Option<u64> {
        if self.is_running {
            self.target_seconds.checked_sub(self.elapsed.as_secs())
        } else {
            None
        }
    }
}
