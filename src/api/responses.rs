//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{orchestrator::DisplaySnapshot, state::TalkTimerRuntimeState};

/// Body of POST /timer/start
#[derive(Debug, Clone, Deserialize)]
pub struct StartTimerRequest {
    pub target_seconds: u64,
    #[serde(default)]
    pub count_up: bool,
}

/// Body of POST /timer/stop
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopTimerRequest {
    #[serde(default)]
    pub persist_final_value: bool,
}

/// API response structure for control endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displays: Option<DisplaySnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer: Option<TalkTimerRuntimeState>,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: &str, message: String) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            displays: None,
            timer: None,
        }
    }

    pub fn ok(message: String) -> Self {
        Self::new("ok", message)
    }

    pub fn vetoed(message: String) -> Self {
        Self::new("vetoed", message)
    }

    pub fn error(message: String) -> Self {
        Self::new("error", message)
    }

    pub fn with_displays(mut self, displays: DisplaySnapshot) -> Self {
        self.displays = Some(displays);
        self
    }

    pub fn with_timer(mut self, timer: TalkTimerRuntimeState) -> Self {
        self.timer = Some(timer);
        self
    }
}

/// Status response with display and timer information
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub displays: DisplaySnapshot,
    pub talk_timer: Option<TalkTimerRuntimeState>,
    pub always_on_top: bool,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
