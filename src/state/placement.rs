//! Monitor placement and placement-change descriptors

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two audience-facing outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Output {
    Timer,
    Countdown,
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Timer => write!(f, "timer"),
            Output::Countdown => write!(f, "countdown"),
        }
    }
}

/// Identifier of a physical display as reported by the monitor enumerator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonitorId(pub String);

impl From<&str> for MonitorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for MonitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Desired placement of one output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "monitor_id", rename_all = "snake_case")]
pub enum MonitorPlacement {
    #[default]
    None,
    Windowed,
    OnMonitor(MonitorId),
}

/// Category of a placement, ignoring the monitor id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementKind {
    None,
    Window,
    Monitor,
}

impl MonitorPlacement {
    pub fn kind(&self) -> PlacementKind {
        match self {
            MonitorPlacement::None => PlacementKind::None,
            MonitorPlacement::Windowed => PlacementKind::Window,
            MonitorPlacement::OnMonitor(_) => PlacementKind::Monitor,
        }
    }

    pub fn is_windowed(&self) -> bool {
        matches!(self, MonitorPlacement::Windowed)
    }

    pub fn monitor_id(&self) -> Option<&MonitorId> {
        match self {
            MonitorPlacement::OnMonitor(id) => Some(id),
            _ => None,
        }
    }
}

/// A single placement edit, consumed once by the orchestrator.
///
/// `None -> None` and `Window -> Window` edits are not changes at all and
/// have no variant; [`MonitorChange::between`] reports them as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorChange {
    NoneToWindow,
    NoneToMonitor,
    WindowToNone,
    WindowToMonitor,
    MonitorToNone,
    MonitorToWindow,
    MonitorToMonitor,
}

impl MonitorChange {
    /// Describe the edit from `from` to `to`, or `None` when nothing changed
    pub fn between(from: &MonitorPlacement, to: &MonitorPlacement) -> Option<Self> {
        use PlacementKind as K;

        match (from.kind(), to.kind()) {
            (K::None, K::None) | (K::Window, K::Window) => None,
            (K::None, K::Window) => Some(MonitorChange::NoneToWindow),
            (K::None, K::Monitor) => Some(MonitorChange::NoneToMonitor),
            (K::Window, K::None) => Some(MonitorChange::WindowToNone),
            (K::Window, K::Monitor) => Some(MonitorChange::WindowToMonitor),
            (K::Monitor, K::None) => Some(MonitorChange::MonitorToNone),
            (K::Monitor, K::Window) => Some(MonitorChange::MonitorToWindow),
            (K::Monitor, K::Monitor) if from == to => None,
            (K::Monitor, K::Monitor) => Some(MonitorChange::MonitorToMonitor),
        }
    }
}
