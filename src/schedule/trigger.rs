//! Countdown trigger evaluation

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::state::Options;

/// Result of evaluating the trigger at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerWindow {
    pub in_window: bool,
    /// Whole seconds since the countdown period began (0 outside a window)
    pub offset_seconds: i64,
}

impl TriggerWindow {
    pub const OUTSIDE: TriggerWindow = TriggerWindow {
        in_window: false,
        offset_seconds: 0,
    };

    pub fn inside(offset_seconds: i64) -> Self {
        Self {
            in_window: true,
            offset_seconds,
        }
    }
}

/// Decides whether a countdown period is in progress at `now`
pub trait CountdownTrigger: Send {
    fn evaluate(&self, now: NaiveDateTime) -> TriggerWindow;

    /// Pick up new options; triggers with fixed configuration ignore this
    fn reconfigure(&mut self, _options: &Options) {}
}

/// Countdown periods that begin at fixed times of day and last `duration`.
///
/// `duration` is capped at one day. When periods overlap, the one that
/// started earliest wins.
#[derive(Debug, Clone)]
pub struct TimeOfDayTrigger {
    start_times: Vec<NaiveTime>,
    duration: Duration,
}

impl TimeOfDayTrigger {
    pub fn new(start_times: Vec<NaiveTime>, duration: Duration) -> Self {
        Self {
            start_times,
            duration: duration.min(Duration::days(1)),
        }
    }

    pub fn from_options(options: &Options) -> Self {
        Self::new(options.countdown_start_times.clone(), options.countdown_duration())
    }

    /// Start of the period containing `now` for one configured time.
    /// Periods that began yesterday and run past midnight are included.
    fn period_containing(&self, now: NaiveDateTime, start_time: NaiveTime) -> Option<NaiveDateTime> {
        let today = now.date().and_time(start_time);
        [Some(today), today.checked_sub_signed(Duration::days(1))]
            .into_iter()
            .flatten()
            .find(|start| {
                *start <= now
                    && start
                        .checked_add_signed(self.duration)
                        .is_some_and(|end| now < end)
            })
    }
}

impl CountdownTrigger for TimeOfDayTrigger {
    fn evaluate(&self, now: NaiveDateTime) -> TriggerWindow {
        self.start_times
            .iter()
            .filter_map(|start_time| self.period_containing(now, *start_time))
            .min()
            .map(|start| TriggerWindow::inside((now - start).num_seconds()))
            .unwrap_or(TriggerWindow::OUTSIDE)
    }

    fn reconfigure(&mut self, options: &Options) {
        *self = Self::from_options(options);
    }
}
