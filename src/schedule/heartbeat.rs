//! Fixed-period self-rearming heartbeat

use std::time::Duration;

use tokio::time::Instant;
use tracing::{error, warn};

/// The recurring timer behind the heartbeat
pub trait TickSchedule {
    fn stop(&mut self);
    /// Arm the next tick one period from now
    fn start(&mut self);
}

/// Work performed on every tick. Each check runs even if the other fails.
pub trait HeartbeatBody {
    fn arm_countdown(&mut self) -> anyhow::Result<()>;
    fn refresh_schedule(&mut self) -> anyhow::Result<()>;
}

/// Deadline-based schedule polled by the owner loop
#[derive(Debug, Clone)]
pub struct IntervalSchedule {
    period: Duration,
    deadline: Option<Instant>,
}

impl IntervalSchedule {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            deadline: None,
        }
    }

    /// When the next tick is due, or `None` while stopped
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

impl Default for IntervalSchedule {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl TickSchedule for IntervalSchedule {
    fn stop(&mut self) {
        self.deadline = None;
    }

    fn start(&mut self) {
        self.deadline = Some(Instant::now() + self.period);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatPhase {
    Idle,
    Running,
    Busy,
}

/// Heartbeat that stops its schedule while a tick body runs and re-arms it
/// afterwards on every exit path.
#[derive(Debug)]
pub struct Heartbeat<S> {
    schedule: S,
    phase: HeartbeatPhase,
}

impl<S: TickSchedule> Heartbeat<S> {
    pub fn new(schedule: S) -> Self {
        Self {
            schedule,
            phase: HeartbeatPhase::Idle,
        }
    }

    pub fn phase(&self) -> HeartbeatPhase {
        self.phase
    }

    pub fn schedule(&self) -> &S {
        &self.schedule
    }

    pub fn start(&mut self) {
        if self.phase == HeartbeatPhase::Idle {
            self.schedule.start();
            self.phase = HeartbeatPhase::Running;
        }
    }

    /// Run one tick
    pub fn fire<B: HeartbeatBody + ?Sized>(&mut self, body: &mut B) {
        if self.phase != HeartbeatPhase::Running {
            warn!(phase = ?self.phase, "Heartbeat fired while not running, ignoring");
            return;
        }

        self.schedule.stop();
        self.phase = HeartbeatPhase::Busy;
        let _rearm = Rearm(self);

        if let Err(e) = body.arm_countdown() {
            error!("Error during heartbeat countdown check: {:#}", e);
        }
        if let Err(e) = body.refresh_schedule() {
            error!("Error during heartbeat schedule refresh: {:#}", e);
        }
    }
}

/// Restarts the schedule when dropped
struct Rearm<'a, S: TickSchedule>(&'a mut Heartbeat<S>);

impl<S: TickSchedule> Drop for Rearm<'_, S> {
    fn drop(&mut self) {
        self.0.schedule.start();
        self.0.phase = HeartbeatPhase::Running;
    }
}
