//! Read-only application options consumed by the orchestrator

use std::{fs, path::Path};

use anyhow::{bail, Context};
use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{MonitorPlacement, Output};

/// Longest countdown period, and so the furthest the trigger looks back
pub const MAX_COUNTDOWN_DURATION_SECS: u64 = 24 * 60 * 60;
pub const MAX_PERSIST_DURATION_SECS: u64 = 60 * 60;

/// Options relevant to display orchestration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Keep the operator window above other windows
    pub always_on_top: bool,
    pub timer_monitor: MonitorPlacement,
    pub countdown_monitor: MonitorPlacement,
    /// How long a stopped timer keeps showing its final value
    pub persist_duration_secs: u64,
    /// Times of day at which a countdown period begins
    pub countdown_start_times: Vec<NaiveTime>,
    pub countdown_duration_secs: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            always_on_top: false,
            timer_monitor: MonitorPlacement::None,
            countdown_monitor: MonitorPlacement::None,
            persist_duration_secs: 4,
            countdown_start_times: Vec::new(),
            countdown_duration_secs: 300,
        }
    }
}

impl Options {
    /// Load options from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("Invalid options file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let options: Self = serde_json::from_str(raw).context("Failed to parse options")?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.countdown_duration_secs > MAX_COUNTDOWN_DURATION_SECS {
            bail!(
                "countdown_duration_secs {} exceeds {}",
                self.countdown_duration_secs,
                MAX_COUNTDOWN_DURATION_SECS
            );
        }
        if self.persist_duration_secs > MAX_PERSIST_DURATION_SECS {
            bail!(
                "persist_duration_secs {} exceeds {}",
                self.persist_duration_secs,
                MAX_PERSIST_DURATION_SECS
            );
        }
        Ok(())
    }

    /// Countdown period length, capped at [`MAX_COUNTDOWN_DURATION_SECS`]
    pub fn countdown_duration(&self) -> Duration {
        capped_seconds(self.countdown_duration_secs, MAX_COUNTDOWN_DURATION_SECS)
    }

    /// Final-value hold, capped at [`MAX_PERSIST_DURATION_SECS`]
    pub fn persist_duration(&self) -> Duration {
        capped_seconds(self.persist_duration_secs, MAX_PERSIST_DURATION_SECS)
    }

    pub fn placement(&self, output: Output) -> &MonitorPlacement {
        match output {
            Output::Timer => &self.timer_monitor,
            Output::Countdown => &self.countdown_monitor,
        }
    }

    pub fn set_placement(&mut self, output: Output, placement: MonitorPlacement) {
        match output {
            Output::Timer => self.timer_monitor = placement,
            Output::Countdown => self.countdown_monitor = placement,
        }
    }

    pub fn can_display_timer_window(&self) -> bool {
        self.timer_monitor != MonitorPlacement::None
    }

    pub fn can_display_countdown_window(&self) -> bool {
        self.countdown_monitor != MonitorPlacement::None
    }

    pub fn timer_is_windowed(&self) -> bool {
        self.timer_monitor.is_windowed()
    }

    pub fn countdown_is_windowed(&self) -> bool {
        self.countdown_monitor.is_windowed()
    }

    /// Timer and countdown are both full-screen on the same monitor
    pub fn countdown_and_timer_share_monitor(&self) -> bool {
        match (self.timer_monitor.monitor_id(), self.countdown_monitor.monitor_id()) {
            (Some(timer), Some(countdown)) => timer == countdown,
            _ => false,
        }
    }
}

fn capped_seconds(secs: u64, max: u64) -> Duration {
    // Both maxima are far inside i64 seconds
    Duration::seconds(secs.min(max) as i64)
}
