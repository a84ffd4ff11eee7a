//! Time-driven scheduling: heartbeat, countdown trigger, refresh limiter and
//! deferred one-shot actions.

pub mod deferred;
pub mod heartbeat;
pub mod refresh;
pub mod trigger;

pub use deferred::{DeferredAction, DeferredQueue, DeferredToken};
pub use heartbeat::{Heartbeat, HeartbeatBody, HeartbeatPhase, IntervalSchedule, TickSchedule};
pub use refresh::ScheduleRefresh;
pub use trigger::{CountdownTrigger, TimeOfDayTrigger, TriggerWindow};
