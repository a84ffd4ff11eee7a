//! Background tasks module
//!
//! This module contains the tasks that run alongside the control API.

pub mod notification_log;
pub mod orchestrator_task;

// Re-export main functions
pub use notification_log::notification_log_task;
pub use orchestrator_task::orchestrator_task;
