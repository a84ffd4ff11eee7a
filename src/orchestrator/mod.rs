//! Display orchestration
//!
//! The [`Orchestrator`] owns both output state machines and turns monitor
//! edits, timer lifecycle events, close requests and heartbeat ticks into
//! window transitions. It is not thread-safe by itself: it is owned by a
//! single task (see [`crate::tasks::orchestrator_task`]) and every other
//! component reaches it through an [`OrchestratorHandle`].

pub mod events;

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::{
    clock::Clock,
    display::{CountdownDisplay, CountdownMachine, DisplayStateMachine, TimerDisplay},
    schedule::{
        CountdownTrigger, DeferredAction, DeferredQueue, DeferredToken, HeartbeatBody,
        ScheduleRefresh,
    },
    services::TalkTimer,
    state::{MonitorChange, MonitorPlacement, Options, Output},
};

pub use events::{CloseOutcome, DisplaySnapshot, Event, Notification, OrchestratorHandle};

/// Cosmetic delay before the timer window first opens
pub const STARTUP_OPEN_DELAY: Duration = Duration::seconds(1);
/// Grace period before hiding a timer window that shares the countdown's monitor
pub const COLOCATION_HIDE_DELAY: Duration = Duration::seconds(1);
pub const SCHEDULE_REFRESH_INTERVAL: Duration = Duration::seconds(10);

/// Everything the orchestrator drives or reads
pub struct Collaborators<T, C> {
    pub options: Options,
    pub timer_display: T,
    pub countdown_display: C,
    pub clock: Arc<dyn Clock>,
    pub trigger: Box<dyn CountdownTrigger>,
    pub talk_timer: Arc<dyn TalkTimer>,
    pub notifications: broadcast::Sender<Notification>,
}

pub struct Orchestrator<T, C> {
    options: Options,
    timer: DisplayStateMachine<T>,
    countdown: CountdownMachine<C>,
    clock: Arc<dyn Clock>,
    trigger: Box<dyn CountdownTrigger>,
    talk_timer: Arc<dyn TalkTimer>,
    notifications: broadcast::Sender<Notification>,
    deferred: DeferredQueue,
    refresh: ScheduleRefresh,
    revert_token: Option<DeferredToken>,
    always_on_top: bool,
    shut_down: bool,
}

impl<T: TimerDisplay, C: CountdownDisplay> Orchestrator<T, C> {
    pub fn new(parts: Collaborators<T, C>) -> Self {
        let always_on_top = parts.options.always_on_top;
        Self {
            options: parts.options,
            timer: DisplayStateMachine::new(Output::Timer, parts.timer_display),
            countdown: CountdownMachine::new(parts.countdown_display),
            clock: parts.clock,
            trigger: parts.trigger,
            talk_timer: parts.talk_timer,
            notifications: parts.notifications,
            deferred: DeferredQueue::new(),
            refresh: ScheduleRefresh::new(SCHEDULE_REFRESH_INTERVAL),
            revert_token: None,
            always_on_top,
            shut_down: false,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn timer(&self) -> &DisplayStateMachine<T> {
        &self.timer
    }

    pub fn countdown(&self) -> &CountdownMachine<C> {
        &self.countdown
    }

    pub fn always_on_top(&self) -> bool {
        self.always_on_top
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn last_schedule_refresh(&self) -> Option<NaiveDateTime> {
        self.refresh.last_refresh()
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            timer: self.timer.window().clone(),
            countdown: self.countdown.snapshot(),
            always_on_top: self.always_on_top,
            options: self.options.clone(),
        }
    }

    /// Schedule the timer window to open shortly after startup
    pub fn launch(&mut self) {
        if self.options.can_display_timer_window() {
            let due = self.clock.now() + STARTUP_OPEN_DELAY;
            self.deferred.schedule(due, DeferredAction::OpenTimerWindow);
            debug!(%due, "Timer window launch scheduled");
        }
    }

    pub fn handle(&mut self, event: Event) {
        debug!(?event, "Handling event");

        match event {
            Event::MonitorChanged { output, placement } => self.change_monitor(output, placement),
            Event::TimerStarted => self.on_timer_started(),
            Event::TimerStopped { persist_final_value } => self.on_timer_stopped(persist_final_value),
            Event::StopCountdown => self.stop_countdown(),
            Event::OptionsChanged(options) => self.set_options(options),
            Event::ZoomAlert => self.on_zoom_alert(),
            Event::CloseRequested(reply) => {
                let outcome = self.request_close();
                if reply.send(outcome).is_err() {
                    warn!("Close requester went away before the reply");
                }
            }
            Event::Snapshot(reply) => {
                if reply.send(self.snapshot()).is_err() {
                    warn!("Snapshot requester went away before the reply");
                }
            }
        }
    }

    /// Record a new placement for `output` and apply the resulting change
    pub fn change_monitor(&mut self, output: Output, placement: MonitorPlacement) {
        let previous = self.options.placement(output).clone();
        self.options.set_placement(output, placement.clone());

        match MonitorChange::between(&previous, &placement) {
            Some(change) => self.apply_change(output, change),
            None => debug!(%output, ?placement, "Placement unchanged"),
        }
    }

    /// Drive one output's state machine through `change`
    pub fn apply_change(&mut self, output: Output, change: MonitorChange) {
        info!(%output, ?change, "Monitor changed");

        match output {
            Output::Timer => {
                let target = self.options.timer_monitor.clone();
                self.timer.apply(change, &target);
                self.keep_countdown_on_top();
            }
            Output::Countdown => {
                let target = self.options.countdown_monitor.clone();
                self.countdown.apply(change, &target);
            }
        }

        self.update_always_on_top();
    }

    /// Start a countdown `offset_seconds` into its period and show it
    pub fn start_countdown(&mut self, offset_seconds: i64) -> anyhow::Result<()> {
        if !self.options.can_display_countdown_window() {
            return Ok(());
        }

        info!("Launching countdown timer");
        self.countdown.start(offset_seconds)?;

        let target = self.options.countdown_monitor.clone();
        self.countdown.open(&target);
        if self.countdown.state().is_open() {
            let due = self.clock.now() + COLOCATION_HIDE_DELAY;
            self.deferred.schedule(due, DeferredAction::HideTimerIfColocated);
        }

        self.update_always_on_top();
        Ok(())
    }

    /// Stop the countdown and bring back the timer window if it is enabled
    pub fn stop_countdown(&mut self) {
        self.countdown.stop();

        if self.options.can_display_timer_window() && !self.timer.is_visible() {
            self.open_timer_window();
        }

        self.update_always_on_top();
    }

    /// Ask to close the application; refused while the talk timer runs
    pub fn request_close(&mut self) -> CloseOutcome {
        if self.talk_timer.is_running() {
            warn!("Close requested while the talk timer is running, cancelling");
            return CloseOutcome::Vetoed;
        }

        info!("Closing displays");
        self.notify(Notification::ShutDown);
        self.timer.close();
        self.countdown.close();
        self.shut_down = true;
        CloseOutcome::Accepted
    }

    /// When the earliest deferred action is due
    pub fn next_deferred_due(&self) -> Option<NaiveDateTime> {
        self.deferred.next_due()
    }

    /// Time left until the earliest deferred action, zero if overdue
    pub fn time_until_next_deferred(&self) -> Option<std::time::Duration> {
        self.deferred.next_due().map(|due| {
            (due - self.clock.now())
                .to_std()
                .unwrap_or(std::time::Duration::ZERO)
        })
    }

    /// Run every deferred action that is due
    pub fn run_due(&mut self) {
        let now = self.clock.now();
        for action in self.deferred.take_due(now) {
            debug!(?action, "Running deferred action");
            match action {
                DeferredAction::OpenTimerWindow => {
                    if self.options.can_display_timer_window() {
                        self.open_timer_window();
                    }
                }
                DeferredAction::HideTimerIfColocated => {
                    if self.countdown.is_counting_down()
                        && self.options.countdown_and_timer_share_monitor()
                    {
                        info!("Countdown shares the timer's monitor, hiding timer window");
                        self.timer.hide();
                        self.update_always_on_top();
                    }
                }
                DeferredAction::RevertToTimeOfDay => {
                    self.revert_token = None;
                    self.revert_to_time_of_day();
                }
            }
        }
    }

    fn open_timer_window(&mut self) {
        let target = self.options.timer_monitor.clone();
        self.timer.open(&target);
        self.keep_countdown_on_top();
        self.update_always_on_top();
    }

    fn keep_countdown_on_top(&mut self) {
        if self.countdown.is_counting_down() {
            self.countdown.activate();
        }
    }

    fn on_timer_started(&mut self) {
        if let Some(token) = self.revert_token.take() {
            self.deferred.cancel(token);
        }
        if let Err(e) = self.timer.display_mut().show_timer_layout() {
            error!("Could not show timer layout: {}", e);
        }
    }

    fn on_timer_stopped(&mut self, persist_final_value: bool) {
        if let Some(token) = self.revert_token.take() {
            self.deferred.cancel(token);
        }

        if !persist_final_value {
            self.revert_to_time_of_day();
            return;
        }

        let hold = self.options.persist_duration();
        match self.clock.now().checked_add_signed(hold) {
            Some(due) => {
                self.revert_token = Some(self.deferred.schedule(due, DeferredAction::RevertToTimeOfDay));
            }
            None => {
                warn!(?hold, "Final value hold is out of range, reverting now");
                self.revert_to_time_of_day();
            }
        }
    }

    fn revert_to_time_of_day(&mut self) {
        if let Err(e) = self.timer.display_mut().show_time_of_day() {
            error!("Could not show time of day: {}", e);
        }
    }

    fn on_zoom_alert(&mut self) {
        if let Err(e) = self.timer.display_mut().flash_zoom_alert() {
            error!("Could not show zoom alert: {}", e);
        }
    }

    /// Adopt new options, moving any output whose placement changed
    fn set_options(&mut self, options: Options) {
        let changes = [Output::Timer, Output::Countdown].map(|output| {
            let change = MonitorChange::between(self.options.placement(output), options.placement(output));
            (output, change)
        });

        self.trigger.reconfigure(&options);
        self.options = options;

        for (output, change) in changes {
            if let Some(change) = change {
                self.apply_change(output, change);
            }
        }
        self.update_always_on_top();
    }

    fn update_always_on_top(&mut self) {
        let always_on_top =
            self.options.always_on_top || self.timer.is_visible() || self.countdown.is_visible();

        if always_on_top != self.always_on_top {
            self.always_on_top = always_on_top;
            self.notify(Notification::AlwaysOnTopChanged(always_on_top));
        }
    }

    fn notify(&self, notification: Notification) {
        if self.notifications.send(notification).is_err() {
            debug!("No notification subscribers");
        }
    }
}

impl<T: TimerDisplay, C: CountdownDisplay> HeartbeatBody for Orchestrator<T, C> {
    fn arm_countdown(&mut self) -> anyhow::Result<()> {
        let window = self.trigger.evaluate(self.clock.now());

        if !window.in_window {
            if self.countdown.is_counting_down() {
                info!("Countdown period ended");
                self.stop_countdown();
            }
            self.countdown.rearm();
            return Ok(());
        }

        if self.options.can_display_countdown_window()
            && !self.countdown.is_counting_down()
            && !self.countdown.is_done()
        {
            self.start_countdown(window.offset_seconds)?;
        }
        Ok(())
    }

    fn refresh_schedule(&mut self) -> anyhow::Result<()> {
        if self.refresh.check(self.clock.now()) {
            debug!("Refreshing schedule");
            self.notify(Notification::RefreshSchedule);
        }
        Ok(())
    }
}
