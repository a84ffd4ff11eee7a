//! External collaborator implementations
//!
//! This module contains the in-process stand-ins for the subsystems the
//! display core consumes: the talk timer and a logging display backend.

pub mod console_display;
pub mod talk_timer;

// Re-export main types
pub use console_display::ConsoleDisplay;
pub use talk_timer::{SharedTalkTimer, TalkTimer};
