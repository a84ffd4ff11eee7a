//! Display backend that logs window operations instead of drawing them
//!
//! Used by the headless binary in place of a GUI toolkit. It keeps the same
//! window bookkeeping a real backend would: one window per output, which may
//! exist while hidden.

use tracing::info;

use crate::{
    display::{CountdownDisplay, DisplayError, DisplayResult, OutputDisplay, TimerDisplay},
    state::{MonitorId, Output, WindowGeometry},
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Placement {
    Windowed(WindowGeometry),
    Monitor(MonitorId),
}

#[derive(Debug)]
struct Window {
    placement: Placement,
    visible: bool,
}

#[derive(Debug)]
pub struct ConsoleDisplay {
    output: Output,
    window: Option<Window>,
    countdown_offset: Option<i64>,
}

impl ConsoleDisplay {
    pub fn new(output: Output) -> Self {
        Self {
            output,
            window: None,
            countdown_offset: None,
        }
    }

    fn show(&mut self, placement: Placement) {
        info!(output = %self.output, ?placement, "Showing window");
        self.window = Some(Window {
            placement,
            visible: true,
        });
    }

    fn window_mut(&mut self, operation: &'static str) -> DisplayResult<&mut Window> {
        let output = self.output;
        self.window.as_mut().ok_or(DisplayError::Failed {
            output,
            operation,
            reason: "no window".to_string(),
        })
    }
}

impl OutputDisplay for ConsoleDisplay {
    fn open_windowed(&mut self, geometry: Option<WindowGeometry>) -> DisplayResult<bool> {
        self.show(Placement::Windowed(geometry.unwrap_or_default()));
        Ok(true)
    }

    fn open_on_monitor(&mut self, monitor: &MonitorId) -> DisplayResult<bool> {
        self.show(Placement::Monitor(monitor.clone()));
        Ok(true)
    }

    fn relocate(&mut self, monitor: &MonitorId) -> DisplayResult<()> {
        let output = self.output;
        let window = self.window_mut("relocate")?;
        info!(%output, %monitor, "Relocating window");
        window.placement = Placement::Monitor(monitor.clone());
        window.visible = true;
        Ok(())
    }

    fn hide(&mut self) -> DisplayResult<()> {
        if let Some(window) = self.window.as_mut() {
            info!(output = %self.output, "Hiding window");
            window.visible = false;
        }
        Ok(())
    }

    fn close(&mut self) -> DisplayResult<()> {
        if self.window.take().is_some() {
            info!(output = %self.output, "Closing window");
        }
        Ok(())
    }

    fn save_windowed_pos(&mut self) -> DisplayResult<WindowGeometry> {
        let output = self.output;
        match &self.window_mut("save windowed position")?.placement {
            Placement::Windowed(geometry) => Ok(*geometry),
            Placement::Monitor(_) => Err(DisplayError::Failed {
                output,
                operation: "save windowed position",
                reason: "window is full-screen".to_string(),
            }),
        }
    }

    fn is_window_available(&self) -> bool {
        self.window.is_some()
    }

    fn is_window_visible(&self) -> bool {
        self.window.as_ref().map(|w| w.visible).unwrap_or(false)
    }
}

impl TimerDisplay for ConsoleDisplay {
    fn show_timer_layout(&mut self) -> DisplayResult<()> {
        info!(output = %self.output, "Showing timer layout");
        Ok(())
    }

    fn show_time_of_day(&mut self) -> DisplayResult<()> {
        info!(output = %self.output, "Showing time of day");
        Ok(())
    }

    fn flash_zoom_alert(&mut self) -> DisplayResult<()> {
        info!(output = %self.output, "Flashing zoom alert");
        Ok(())
    }
}

impl CountdownDisplay for ConsoleDisplay {
    fn start(&mut self, offset_seconds: i64) -> DisplayResult<()> {
        info!(output = %self.output, offset_seconds, "Countdown running");
        self.countdown_offset = Some(offset_seconds);
        Ok(())
    }

    fn stop(&mut self) -> DisplayResult<()> {
        if self.countdown_offset.take().is_some() {
            info!(output = %self.output, "Countdown halted");
        }
        Ok(())
    }

    fn activate(&mut self) -> DisplayResult<()> {
        let output = self.output;
        self.window_mut("activate")?.visible = true;
        info!(%output, "Window activated");
        Ok(())
    }
}
