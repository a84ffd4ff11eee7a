//! Owner task for the orchestrator

use tokio::{
    sync::mpsc,
    time::{sleep, sleep_until, Instant},
};
use tracing::info;

use crate::{
    display::{CountdownDisplay, TimerDisplay},
    orchestrator::{Event, Orchestrator},
    schedule::{Heartbeat, IntervalSchedule},
};

/// Run the orchestrator on the current task until it shuts down or every
/// [`OrchestratorHandle`](crate::orchestrator::OrchestratorHandle) is gone.
///
/// Events, heartbeat ticks and deferred actions are all handled here, one at
/// a time. In a non-interactive run the heartbeat is never started and the
/// timer window is not launched.
pub async fn orchestrator_task<T, C>(
    mut orchestrator: Orchestrator<T, C>,
    mut events: mpsc::Receiver<Event>,
    interactive: bool,
) where
    T: TimerDisplay,
    C: CountdownDisplay,
{
    info!(interactive, "Starting orchestrator task");

    let mut heartbeat = Heartbeat::new(IntervalSchedule::default());
    if interactive {
        orchestrator.launch();
        heartbeat.start();
    }

    loop {
        let tick_at = heartbeat.schedule().deadline();
        let deferred_in = orchestrator.time_until_next_deferred();

        tokio::select! {
            event = events.recv() => match event {
                Some(event) => orchestrator.handle(event),
                None => {
                    info!("All orchestrator handles dropped");
                    break;
                }
            },
            _ = sleep_until(tick_at.unwrap_or_else(Instant::now)), if tick_at.is_some() => {
                heartbeat.fire(&mut orchestrator);
            }
            _ = sleep(deferred_in.unwrap_or_default()), if deferred_in.is_some() => {
                orchestrator.run_due();
            }
        }

        if orchestrator.is_shut_down() {
            info!("Orchestrator shut down");
            break;
        }
    }
}
