//! Per-output window state tracked by the display state machines

use serde::{Deserialize, Serialize};

/// Which representation of an output is currently live
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowState {
    #[default]
    Closed,
    OpenWindowed,
    OpenOnMonitor,
}

impl WindowState {
    pub fn is_open(&self) -> bool {
        !matches!(self, WindowState::Closed)
    }
}

/// Last known windowed rectangle, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            x: 10,
            y: 10,
            width: 700,
            height: 500,
        }
    }
}

/// Window state of one output plus its remembered windowed geometry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayWindowState {
    pub state: WindowState,
    pub windowed_geometry: Option<WindowGeometry>,
}

/// Countdown output state.
///
/// `counting_down` and `done` are never both set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownWindowState {
    pub window: DisplayWindowState,
    pub counting_down: bool,
    pub done: bool,
}
