//! Per-output display state machine

use tracing::{debug, error, info};

use super::{DisplayError, DisplayResult, OutputDisplay};
use crate::state::{
    DisplayWindowState, MonitorChange, MonitorId, MonitorPlacement, Output, WindowState,
};

/// Tracks whether one output is closed, windowed or full-screen and issues
/// the window operations needed to move between those states.
///
/// A failed operation is logged and leaves the machine at the last state it
/// successfully reached.
#[derive(Debug)]
pub struct DisplayStateMachine<D> {
    output: Output,
    display: D,
    window: DisplayWindowState,
}

impl<D: OutputDisplay> DisplayStateMachine<D> {
    pub fn new(output: Output, display: D) -> Self {
        Self {
            output,
            display,
            window: DisplayWindowState::default(),
        }
    }

    pub fn output(&self) -> Output {
        self.output
    }

    pub fn state(&self) -> WindowState {
        self.window.state
    }

    pub fn window(&self) -> &DisplayWindowState {
        &self.window
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn is_visible(&self) -> bool {
        self.window.state.is_open() && self.display.is_window_visible()
    }

    /// Apply a placement edit. `target` is the placement after the edit.
    pub fn apply(&mut self, change: MonitorChange, target: &MonitorPlacement) -> bool {
        debug!(output = %self.output, ?change, from = ?self.window.state, "Applying monitor change");

        let result = match change {
            MonitorChange::WindowToNone | MonitorChange::MonitorToNone => self.try_hide(),
            MonitorChange::WindowToMonitor | MonitorChange::NoneToMonitor => {
                self.target_monitor(target).and_then(|monitor| self.try_open_on_monitor(&monitor))
            }
            MonitorChange::MonitorToWindow | MonitorChange::NoneToWindow => self.try_open_windowed(),
            MonitorChange::MonitorToMonitor => {
                self.target_monitor(target).and_then(|monitor| self.try_relocate(&monitor))
            }
        };

        self.absorb(result, "change monitor")
    }

    /// Open the output according to its configured placement
    pub fn open(&mut self, target: &MonitorPlacement) -> bool {
        let result = match target {
            MonitorPlacement::None => {
                debug!(output = %self.output, "No placement configured, not opening");
                Ok(())
            }
            MonitorPlacement::Windowed => self.try_open_windowed(),
            MonitorPlacement::OnMonitor(monitor) => self.try_open_on_monitor(monitor),
        };

        self.absorb(result, "open window")
    }

    /// Hide the output's window; a no-op when already closed
    pub fn hide(&mut self) -> bool {
        let result = self.try_hide();
        self.absorb(result, "hide window")
    }

    /// Destroy the output's window, remembering its geometry if windowed
    pub fn close(&mut self) -> bool {
        let result = self.try_close();
        self.absorb(result, "close window")
    }

    fn absorb(&self, result: DisplayResult<()>, action: &str) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                error!(output = %self.output, state = ?self.window.state, "Could not {}: {}", action, e);
                false
            }
        }
    }

    fn target_monitor(&self, target: &MonitorPlacement) -> DisplayResult<MonitorId> {
        target
            .monitor_id()
            .cloned()
            .ok_or(DisplayError::NoTargetMonitor { output: self.output })
    }

    /// Geometry must be captured while the window is still windowed
    fn save_if_windowed(&mut self) -> DisplayResult<()> {
        if self.window.state == WindowState::OpenWindowed {
            let geometry = self.display.save_windowed_pos()?;
            debug!(output = %self.output, ?geometry, "Saved windowed position");
            self.window.windowed_geometry = Some(geometry);
        }
        Ok(())
    }

    fn try_hide(&mut self) -> DisplayResult<()> {
        if self.window.state == WindowState::Closed {
            debug!(output = %self.output, "Window already closed, nothing to hide");
            return Ok(());
        }

        self.save_if_windowed()?;
        self.display.hide()?;
        self.transition(WindowState::Closed);
        Ok(())
    }

    fn try_close(&mut self) -> DisplayResult<()> {
        self.save_if_windowed()?;
        self.display.close()?;
        self.transition(WindowState::Closed);
        Ok(())
    }

    fn try_open_on_monitor(&mut self, monitor: &MonitorId) -> DisplayResult<()> {
        self.save_if_windowed()?;
        if self.display.open_on_monitor(monitor)? {
            self.transition(WindowState::OpenOnMonitor);
        } else {
            debug!(output = %self.output, %monitor, "Display declined to open on monitor");
        }
        Ok(())
    }

    fn try_open_windowed(&mut self) -> DisplayResult<()> {
        if self.display.open_windowed(self.window.windowed_geometry)? {
            self.transition(WindowState::OpenWindowed);
        } else {
            debug!(output = %self.output, "Display declined to open windowed");
        }
        Ok(())
    }

    /// Move an existing full-screen window, or open a fresh one if none exists
    fn try_relocate(&mut self, monitor: &MonitorId) -> DisplayResult<()> {
        if self.window.state.is_open() && self.display.is_window_available() {
            self.save_if_windowed()?;
            self.display.relocate(monitor)?;
            self.transition(WindowState::OpenOnMonitor);
            Ok(())
        } else {
            self.try_open_on_monitor(monitor)
        }
    }

    fn transition(&mut self, to: WindowState) {
        if self.window.state != to {
            info!(output = %self.output, from = ?self.window.state, to = ?to, "Display state changed");
            self.window.state = to;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::WindowGeometry;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        OpenWindowed(Option<WindowGeometry>),
        OpenOnMonitor(String),
        Relocate(String),
        Hide,
        Close,
        SavePos,
    }

    #[derive(Debug, Default)]
    struct FakeDisplay {
        calls: Vec<Call>,
        available: bool,
        fail_open: bool,
        decline_open: bool,
        geometry: WindowGeometry,
    }

    impl OutputDisplay for FakeDisplay {
        fn open_windowed(&mut self, geometry: Option<WindowGeometry>) -> DisplayResult<bool> {
            self.calls.push(Call::OpenWindowed(geometry));
            if self.fail_open {
                return Err(DisplayError::Unavailable {
                    output: Output::Timer,
                    reason: "no window".to_string(),
                });
            }
            self.available = !self.decline_open;
            Ok(!self.decline_open)
        }

        fn open_on_monitor(&mut self, monitor: &MonitorId) -> DisplayResult<bool> {
            self.calls.push(Call::OpenOnMonitor(monitor.0.clone()));
            if self.fail_open {
                return Err(DisplayError::Unavailable {
                    output: Output::Timer,
                    reason: "monitor gone".to_string(),
                });
            }
            self.available = !self.decline_open;
            Ok(!self.decline_open)
        }

        fn relocate(&mut self, monitor: &MonitorId) -> DisplayResult<()> {
            self.calls.push(Call::Relocate(monitor.0.clone()));
            Ok(())
        }

        fn hide(&mut self) -> DisplayResult<()> {
            self.calls.push(Call::Hide);
            Ok(())
        }

        fn close(&mut self) -> DisplayResult<()> {
            self.calls.push(Call::Close);
            self.available = false;
            Ok(())
        }

        fn save_windowed_pos(&mut self) -> DisplayResult<WindowGeometry> {
            self.calls.push(Call::SavePos);
            Ok(self.geometry)
        }

        fn is_window_available(&self) -> bool {
            self.available
        }

        fn is_window_visible(&self) -> bool {
            self.available
        }
    }

    fn on(id: &str) -> MonitorPlacement {
        MonitorPlacement::OnMonitor(MonitorId::from(id))
    }

    fn machine() -> DisplayStateMachine<FakeDisplay> {
        DisplayStateMachine::new(Output::Timer, FakeDisplay::default())
    }

    fn windowed_machine() -> DisplayStateMachine<FakeDisplay> {
        let mut m = machine();
        m.display_mut().geometry = WindowGeometry { x: 40, y: 50, width: 800, height: 600 };
        assert!(m.apply(MonitorChange::NoneToWindow, &MonitorPlacement::Windowed));
        m.display_mut().calls.clear();
        m
    }

    fn monitor_machine(id: &str) -> DisplayStateMachine<FakeDisplay> {
        let mut m = machine();
        assert!(m.apply(MonitorChange::NoneToMonitor, &on(id)));
        m.display_mut().calls.clear();
        m
    }

    #[test]
    fn none_to_window_opens_windowed() {
        let mut m = machine();
        assert!(m.apply(MonitorChange::NoneToWindow, &MonitorPlacement::Windowed));
        assert_eq!(m.state(), WindowState::OpenWindowed);
        assert_eq!(m.display().calls, vec![Call::OpenWindowed(None)]);
    }

    #[test]
    fn none_to_monitor_opens_on_monitor() {
        let mut m = machine();
        assert!(m.apply(MonitorChange::NoneToMonitor, &on("2")));
        assert_eq!(m.state(), WindowState::OpenOnMonitor);
        assert_eq!(m.display().calls, vec![Call::OpenOnMonitor("2".to_string())]);
    }

    #[test]
    fn window_to_none_saves_before_hiding() {
        let mut m = windowed_machine();
        assert!(m.apply(MonitorChange::WindowToNone, &MonitorPlacement::None));
        assert_eq!(m.state(), WindowState::Closed);
        assert_eq!(m.display().calls, vec![Call::SavePos, Call::Hide]);
        assert_eq!(
            m.window().windowed_geometry,
            Some(WindowGeometry { x: 40, y: 50, width: 800, height: 600 })
        );
    }

    #[test]
    fn window_to_monitor_saves_before_opening() {
        let mut m = windowed_machine();
        assert!(m.apply(MonitorChange::WindowToMonitor, &on("1")));
        assert_eq!(m.state(), WindowState::OpenOnMonitor);
        assert_eq!(
            m.display().calls,
            vec![Call::SavePos, Call::OpenOnMonitor("1".to_string())]
        );
    }

    #[test]
    fn monitor_to_none_hides_without_saving() {
        let mut m = monitor_machine("1");
        assert!(m.apply(MonitorChange::MonitorToNone, &MonitorPlacement::None));
        assert_eq!(m.state(), WindowState::Closed);
        assert_eq!(m.display().calls, vec![Call::Hide]);
    }

    #[test]
    fn monitor_to_window_restores_saved_geometry() {
        let mut m = windowed_machine();
        m.apply(MonitorChange::WindowToMonitor, &on("1"));
        m.display_mut().calls.clear();

        assert!(m.apply(MonitorChange::MonitorToWindow, &MonitorPlacement::Windowed));
        assert_eq!(m.state(), WindowState::OpenWindowed);
        assert_eq!(
            m.display().calls,
            vec![Call::OpenWindowed(Some(WindowGeometry { x: 40, y: 50, width: 800, height: 600 }))]
        );
    }

    #[test]
    fn monitor_to_monitor_relocates_open_window() {
        let mut m = monitor_machine("1");
        assert!(m.apply(MonitorChange::MonitorToMonitor, &on("2")));
        assert_eq!(m.state(), WindowState::OpenOnMonitor);
        assert_eq!(m.display().calls, vec![Call::Relocate("2".to_string())]);
    }

    #[test]
    fn monitor_to_monitor_opens_fresh_without_window() {
        let mut m = machine();
        assert!(m.apply(MonitorChange::MonitorToMonitor, &on("2")));
        assert_eq!(m.state(), WindowState::OpenOnMonitor);
        assert_eq!(m.display().calls, vec![Call::OpenOnMonitor("2".to_string())]);
    }

    #[test]
    fn repeated_hide_from_closed_is_a_no_op() {
        let mut m = windowed_machine();
        assert!(m.apply(MonitorChange::WindowToNone, &MonitorPlacement::None));
        assert!(m.apply(MonitorChange::WindowToNone, &MonitorPlacement::None));
        assert_eq!(m.state(), WindowState::Closed);
        assert_eq!(m.display().calls, vec![Call::SavePos, Call::Hide]);
    }

    #[test]
    fn failed_open_keeps_last_good_state() {
        let mut m = monitor_machine("1");
        m.display_mut().fail_open = true;
        assert!(!m.apply(MonitorChange::MonitorToWindow, &MonitorPlacement::Windowed));
        assert_eq!(m.state(), WindowState::OpenOnMonitor);
    }

    #[test]
    fn declined_open_leaves_state_unchanged() {
        let mut m = machine();
        m.display_mut().decline_open = true;
        assert!(m.apply(MonitorChange::NoneToMonitor, &on("1")));
        assert_eq!(m.state(), WindowState::Closed);
    }

    #[test]
    fn monitor_change_without_monitor_target_is_rejected() {
        let mut m = machine();
        assert!(!m.apply(MonitorChange::NoneToMonitor, &MonitorPlacement::Windowed));
        assert_eq!(m.state(), WindowState::Closed);
        assert!(m.display().calls.is_empty());
    }

    #[test]
    fn close_saves_windowed_geometry() {
        let mut m = windowed_machine();
        assert!(m.close());
        assert_eq!(m.state(), WindowState::Closed);
        assert_eq!(m.display().calls, vec![Call::SavePos, Call::Close]);
    }
}
