//! Shared fakes for orchestrator tests

#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use tokio::sync::broadcast;

use stage_clock::{
    clock::ManualClock,
    display::{CountdownDisplay, DisplayError, DisplayResult, OutputDisplay, TimerDisplay},
    orchestrator::{Collaborators, Notification, Orchestrator},
    schedule::TimeOfDayTrigger,
    services::TalkTimer,
    state::{MonitorId, MonitorPlacement, Options, Output, TalkTimerRuntimeState, WindowGeometry},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    OpenWindowed,
    OpenOnMonitor(String),
    Relocate(String),
    Hide,
    Close,
    SavePos,
    TimerLayout,
    TimeOfDay,
    ZoomAlert,
    Start(i64),
    Stop,
    Activate,
}

/// Call log shared by both fake displays so cross-output ordering is visible
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<(Output, Call)>>>,
}

impl Recorder {
    fn push(&self, output: Output, call: Call) {
        self.calls.lock().unwrap().push((output, call));
    }

    pub fn all(&self) -> Vec<(Output, Call)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls(&self, output: Output) -> Vec<Call> {
        self.all()
            .into_iter()
            .filter(|(o, _)| *o == output)
            .map(|(_, c)| c)
            .collect()
    }

    pub fn count(&self, output: Output, call: &Call) -> usize {
        self.calls(output).iter().filter(|c| *c == call).count()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

#[derive(Debug)]
pub struct FakeDisplay {
    output: Output,
    recorder: Recorder,
    window: bool,
    visible: bool,
    pub fail: Arc<AtomicBool>,
}

impl FakeDisplay {
    pub fn new(output: Output, recorder: Recorder) -> Self {
        Self {
            output,
            recorder,
            window: false,
            visible: false,
            fail: Arc::new(AtomicBool::new(false)),
        }
    }

    fn record(&self, call: Call) -> DisplayResult<()> {
        self.recorder.push(self.output, call);
        if self.fail.load(Ordering::SeqCst) {
            return Err(DisplayError::Unavailable {
                output: self.output,
                reason: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

impl OutputDisplay for FakeDisplay {
    fn open_windowed(&mut self, _geometry: Option<WindowGeometry>) -> DisplayResult<bool> {
        self.record(Call::OpenWindowed)?;
        self.window = true;
        self.visible = true;
        Ok(true)
    }

    fn open_on_monitor(&mut self, monitor: &MonitorId) -> DisplayResult<bool> {
        self.record(Call::OpenOnMonitor(monitor.0.clone()))?;
        self.window = true;
        self.visible = true;
        Ok(true)
    }

    fn relocate(&mut self, monitor: &MonitorId) -> DisplayResult<()> {
        self.record(Call::Relocate(monitor.0.clone()))
    }

    fn hide(&mut self) -> DisplayResult<()> {
        self.record(Call::Hide)?;
        self.visible = false;
        Ok(())
    }

    fn close(&mut self) -> DisplayResult<()> {
        self.record(Call::Close)?;
        self.window = false;
        self.visible = false;
        Ok(())
    }

    fn save_windowed_pos(&mut self) -> DisplayResult<WindowGeometry> {
        self.record(Call::SavePos)?;
        Ok(WindowGeometry::default())
    }

    fn is_window_available(&self) -> bool {
        self.window
    }

    fn is_window_visible(&self) -> bool {
        self.visible
    }
}

impl TimerDisplay for FakeDisplay {
    fn show_timer_layout(&mut self) -> DisplayResult<()> {
        self.record(Call::TimerLayout)
    }

    fn show_time_of_day(&mut self) -> DisplayResult<()> {
        self.record(Call::TimeOfDay)
    }

    fn flash_zoom_alert(&mut self) -> DisplayResult<()> {
        self.record(Call::ZoomAlert)
    }
}

impl CountdownDisplay for FakeDisplay {
    fn start(&mut self, offset_seconds: i64) -> DisplayResult<()> {
        self.record(Call::Start(offset_seconds))
    }

    fn stop(&mut self) -> DisplayResult<()> {
        self.record(Call::Stop)
    }

    fn activate(&mut self) -> DisplayResult<()> {
        self.record(Call::Activate)
    }
}

#[derive(Debug, Default)]
pub struct FakeTalkTimer {
    pub running: AtomicBool,
}

impl TalkTimer for FakeTalkTimer {
    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn clock_request_info(&self) -> Option<TalkTimerRuntimeState> {
        self.is_running()
            .then(|| TalkTimerRuntimeState::running(600, false))
    }
}

pub fn on(id: &str) -> MonitorPlacement {
    MonitorPlacement::OnMonitor(MonitorId::from(id))
}

/// 09:50:00 on a fixed day
pub fn morning() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 12)
        .unwrap()
        .and_hms_opt(9, 50, 0)
        .unwrap()
}

pub fn time(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap()
}

pub struct Harness {
    pub orchestrator: Orchestrator<FakeDisplay, FakeDisplay>,
    pub clock: Arc<ManualClock>,
    pub recorder: Recorder,
    pub talk_timer: Arc<FakeTalkTimer>,
    pub notifications: broadcast::Receiver<Notification>,
    pub timer_fail: Arc<AtomicBool>,
    pub countdown_fail: Arc<AtomicBool>,
}

impl Harness {
    pub fn new(options: Options) -> Self {
        let clock = Arc::new(ManualClock::new(morning()));
        let recorder = Recorder::default();
        let talk_timer = Arc::new(FakeTalkTimer::default());
        let (tx, notifications) = broadcast::channel(64);

        let timer_display = FakeDisplay::new(Output::Timer, recorder.clone());
        let countdown_display = FakeDisplay::new(Output::Countdown, recorder.clone());
        let timer_fail = timer_display.fail.clone();
        let countdown_fail = countdown_display.fail.clone();

        let orchestrator = Orchestrator::new(Collaborators {
            trigger: Box::new(TimeOfDayTrigger::from_options(&options)),
            options,
            timer_display,
            countdown_display,
            clock: clock.clone(),
            talk_timer: talk_timer.clone(),
            notifications: tx,
        });

        Self {
            orchestrator,
            clock,
            recorder,
            talk_timer,
            notifications,
            timer_fail,
            countdown_fail,
        }
    }

    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }

    /// Advance the clock and run whatever deferred actions fell due
    pub fn advance_and_run(&mut self, by: Duration) {
        self.clock.advance(by);
        self.orchestrator.run_due();
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        let mut received = Vec::new();
        while let Ok(n) = self.notifications.try_recv() {
            received.push(n);
        }
        received
    }
}

/// Options with a countdown period starting at 09:55 for five minutes
pub fn countdown_options(timer: MonitorPlacement, countdown: MonitorPlacement) -> Options {
    Options {
        timer_monitor: timer,
        countdown_monitor: countdown,
        countdown_start_times: vec![time(9, 55, 0)],
        countdown_duration_secs: 300,
        ..Default::default()
    }
}
