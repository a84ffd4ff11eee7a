//! Stage Clock - display orchestration for a presentation timer
//!
//! This library decides when the talk-timer and pre-meeting countdown
//! displays open, move, hide and close: a heartbeat arms the countdown from a
//! time-of-day trigger, and an orchestrator maps monitor edits and timer
//! lifecycle events onto per-output display state machines.

pub mod api;
pub mod clock;
pub mod config;
pub mod display;
pub mod orchestrator;
pub mod schedule;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use orchestrator::{Orchestrator, OrchestratorHandle};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::ShutdownSignals;
