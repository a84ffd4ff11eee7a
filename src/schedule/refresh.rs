//! Rate limiter for the schedule-refresh notification

use chrono::{Duration, NaiveDateTime};

/// Lets one schedule refresh through per `interval` of elapsed time.
///
/// A refresh is due once the full interval has elapsed (`>=`), so under a
/// steady 1 Hz heartbeat refreshes land exactly `interval` apart. Elapsed
/// time is the total duration between timestamps, not a seconds-of-minute
/// difference.
#[derive(Debug, Clone)]
pub struct ScheduleRefresh {
    interval: Duration,
    last: Option<NaiveDateTime>,
}

impl ScheduleRefresh {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn last_refresh(&self) -> Option<NaiveDateTime> {
        self.last
    }

    /// Record a refresh at `now` if one is due and report whether it was
    pub fn check(&mut self, now: NaiveDateTime) -> bool {
        let due = match self.last {
            None => true,
            // wall clock moved backwards
            Some(last) if now < last => true,
            Some(last) => now - last >= self.interval,
        };

        if due {
            self.last = Some(now);
        }
        due
    }
}

impl Default for ScheduleRefresh {
    fn default() -> Self {
        Self::new(Duration::seconds(10))
    }
}
