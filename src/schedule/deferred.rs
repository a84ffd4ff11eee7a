//! One-shot delayed actions

use chrono::NaiveDateTime;

/// Actions the orchestrator defers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Open the timer window after the startup delay
    OpenTimerWindow,
    /// Hide the timer window if it shares a monitor with the countdown
    HideTimerIfColocated,
    /// Return the timer display to time of day once a stopped timer's
    /// final value has been held long enough
    RevertToTimeOfDay,
}

/// Handle for cancelling a scheduled action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeferredToken(u64);

#[derive(Debug)]
struct Entry {
    token: DeferredToken,
    due: NaiveDateTime,
    action: DeferredAction,
}

/// Pending actions ordered by due time, then by scheduling order
#[derive(Debug, Default)]
pub struct DeferredQueue {
    entries: Vec<Entry>,
    next_token: u64,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: NaiveDateTime, action: DeferredAction) -> DeferredToken {
        let token = DeferredToken(self.next_token);
        self.next_token += 1;

        let index = self.entries.partition_point(|entry| entry.due <= due);
        self.entries.insert(index, Entry { token, due, action });
        token
    }

    /// Returns false if the action already ran or was cancelled
    pub fn cancel(&mut self, token: DeferredToken) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.token != token);
        self.entries.len() != before
    }

    pub fn next_due(&self) -> Option<NaiveDateTime> {
        self.entries.first().map(|entry| entry.due)
    }

    /// Remove and return every action due at or before `now`
    pub fn take_due(&mut self, now: NaiveDateTime) -> Vec<DeferredAction> {
        let count = self.entries.partition_point(|entry| entry.due <= now);
        self.entries.drain(..count).map(|entry| entry.action).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
