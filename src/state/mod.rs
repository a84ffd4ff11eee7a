//! State management module
//!
//! This module contains the data model shared by the display state machines,
//! the orchestrator and the control API.

pub mod app_state;
pub mod options;
pub mod placement;
pub mod talk_timer_state;
pub mod window_state;

// Re-export main types
pub use app_state::AppState;
pub use options::Options;
pub use placement::{MonitorChange, MonitorId, MonitorPlacement, Output, PlacementKind};
pub use talk_timer_state::TalkTimerRuntimeState;
pub use window_state::{CountdownWindowState, DisplayWindowState, WindowGeometry, WindowState};
