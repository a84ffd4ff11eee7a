//! Output display contracts and the per-output state machines
//!
//! The rendering side of each output (clock faces, animations, the GUI
//! toolkit) lives behind [`OutputDisplay`]. Everything in this module decides
//! *which* window operation to issue and tracks the state that results.

pub mod countdown;
pub mod state_machine;

use thiserror::Error;

use crate::state::{MonitorId, Output, WindowGeometry};

pub use countdown::CountdownMachine;
pub use state_machine::DisplayStateMachine;

/// Failure reported by a display backend
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("{output} display is unavailable: {reason}")]
    Unavailable { output: Output, reason: String },

    #[error("{output} display failed to {operation}: {reason}")]
    Failed {
        output: Output,
        operation: &'static str,
        reason: String,
    },

    #[error("{output} display has no target monitor")]
    NoTargetMonitor { output: Output },
}

pub type DisplayResult<T> = Result<T, DisplayError>;

/// Window operations common to both outputs.
///
/// `open_*` return `Ok(false)` when the backend declined to show a window.
pub trait OutputDisplay: Send {
    fn open_windowed(&mut self, geometry: Option<WindowGeometry>) -> DisplayResult<bool>;
    fn open_on_monitor(&mut self, monitor: &MonitorId) -> DisplayResult<bool>;
    fn relocate(&mut self, monitor: &MonitorId) -> DisplayResult<()>;
    fn hide(&mut self) -> DisplayResult<()>;
    fn close(&mut self) -> DisplayResult<()>;
    /// Capture the current windowed rectangle
    fn save_windowed_pos(&mut self) -> DisplayResult<WindowGeometry>;
    fn is_window_available(&self) -> bool;
    fn is_window_visible(&self) -> bool;
}

/// The talk timer output
pub trait TimerDisplay: OutputDisplay {
    /// Split layout showing the running timer beside the clock
    fn show_timer_layout(&mut self) -> DisplayResult<()>;
    /// Full-screen time of day
    fn show_time_of_day(&mut self) -> DisplayResult<()>;
    fn flash_zoom_alert(&mut self) -> DisplayResult<()>;
}

/// The pre-meeting countdown output
pub trait CountdownDisplay: OutputDisplay {
    /// Begin counting down, `offset_seconds` into the countdown period
    fn start(&mut self, offset_seconds: i64) -> DisplayResult<()>;
    fn stop(&mut self) -> DisplayResult<()>;
    /// Bring the countdown window to the top and focus it
    fn activate(&mut self) -> DisplayResult<()>;
}

impl<T: OutputDisplay + ?Sized> OutputDisplay for Box<T> {
    fn open_windowed(&mut self, geometry: Option<WindowGeometry>) -> DisplayResult<bool> {
        (**self).open_windowed(geometry)
    }

    fn open_on_monitor(&mut self, monitor: &MonitorId) -> DisplayResult<bool> {
        (**self).open_on_monitor(monitor)
    }

    fn relocate(&mut self, monitor: &MonitorId) -> DisplayResult<()> {
        (**self).relocate(monitor)
    }

    fn hide(&mut self) -> DisplayResult<()> {
        (**self).hide()
    }

    fn close(&mut self) -> DisplayResult<()> {
        (**self).close()
    }

    fn save_windowed_pos(&mut self) -> DisplayResult<WindowGeometry> {
        (**self).save_windowed_pos()
    }

    fn is_window_available(&self) -> bool {
        (**self).is_window_available()
    }

    fn is_window_visible(&self) -> bool {
        (**self).is_window_visible()
    }
}

impl<T: TimerDisplay + ?Sized> TimerDisplay for Box<T> {
    fn show_timer_layout(&mut self) -> DisplayResult<()> {
        (**self).show_timer_layout()
    }

    fn show_time_of_day(&mut self) -> DisplayResult<()> {
        (**self).show_time_of_day()
    }

    fn flash_zoom_alert(&mut self) -> DisplayResult<()> {
        (**self).flash_zoom_alert()
    }
}

impl<T: CountdownDisplay + ?Sized> CountdownDisplay for Box<T> {
    fn start(&mut self, offset_seconds: i64) -> DisplayResult<()> {
        (**self).start(offset_seconds)
    }

    fn stop(&mut self) -> DisplayResult<()> {
        (**self).stop()
    }

    fn activate(&mut self) -> DisplayResult<()> {
        (**self).activate()
    }
}
