//! Countdown output: a display state machine plus the counting/done latch

use std::ops::{Deref, DerefMut};

use tracing::{debug, error, info};

use super::{CountdownDisplay, DisplayResult, DisplayStateMachine};
use crate::state::{CountdownWindowState, Output};

/// Countdown display state.
///
/// `done` latches when a countdown stops and suppresses auto-start until it
/// is re-armed, which happens once the trigger window has been left.
#[derive(Debug)]
pub struct CountdownMachine<D> {
    machine: DisplayStateMachine<D>,
    counting_down: bool,
    done: bool,
}

impl<D: CountdownDisplay> CountdownMachine<D> {
    pub fn new(display: D) -> Self {
        Self {
            machine: DisplayStateMachine::new(Output::Countdown, display),
            counting_down: false,
            done: false,
        }
    }

    pub fn is_counting_down(&self) -> bool {
        self.counting_down
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn snapshot(&self) -> CountdownWindowState {
        CountdownWindowState {
            window: self.machine.window().clone(),
            counting_down: self.counting_down,
            done: self.done,
        }
    }

    /// Begin counting down `offset_seconds` into the countdown period
    pub fn start(&mut self, offset_seconds: i64) -> DisplayResult<()> {
        self.machine.display_mut().start(offset_seconds)?;
        info!(offset_seconds, "Countdown started");
        self.counting_down = true;
        self.done = false;
        Ok(())
    }

    /// Stop counting down and hide the countdown window.
    ///
    /// The done latch is set whether or not the display stops cleanly.
    pub fn stop(&mut self) {
        if let Err(e) = self.machine.display_mut().stop() {
            error!("Could not stop countdown: {}", e);
        }
        if self.counting_down {
            info!("Countdown stopped");
        }
        self.counting_down = false;
        self.done = true;
        self.machine.hide();
    }

    /// Clear the done latch so the next countdown period can auto-start
    pub fn rearm(&mut self) {
        if self.done {
            info!("Countdown re-armed");
            self.done = false;
        }
    }

    /// Raise the countdown above other windows; a no-op while it is closed
    pub fn activate(&mut self) {
        if !self.machine.state().is_open() {
            debug!("Countdown window closed, not activating");
            return;
        }
        if let Err(e) = self.machine.display_mut().activate() {
            error!("Could not activate countdown window: {}", e);
        }
    }
}

impl<D> Deref for CountdownMachine<D> {
    type Target = DisplayStateMachine<D>;

    fn deref(&self) -> &Self::Target {
        &self.machine
    }
}

impl<D> DerefMut for CountdownMachine<D> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.machine
    }
}
