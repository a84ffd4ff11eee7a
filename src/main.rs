//! Stage Clock - display orchestration for a presentation timer
//!
//! This is the main entry point for the stage-clock application.

use std::sync::Arc;
use tokio::{net::TcpListener, sync::broadcast};
use tracing::{info, warn};

use stage_clock::{
    api::create_router,
    clock::SystemClock,
    config::Config,
    orchestrator::{CloseOutcome, Collaborators, Orchestrator, OrchestratorHandle},
    schedule::TimeOfDayTrigger,
    services::{ConsoleDisplay, SharedTalkTimer},
    state::{AppState, Output},
    tasks::{notification_log_task, orchestrator_task},
    utils::ShutdownSignals,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("stage_clock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting stage-clock v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, headless={}",
          config.host, config.port, config.headless);

    let options = config.load_options()?;
    info!("Timer placement: {:?}, countdown placement: {:?}",
          options.timer_monitor, options.countdown_monitor);

    let talk_timer = Arc::new(SharedTalkTimer::new());
    let (notifications, _) = broadcast::channel(100);

    let orchestrator = Orchestrator::new(Collaborators {
        trigger: Box::new(TimeOfDayTrigger::from_options(&options)),
        options,
        timer_display: ConsoleDisplay::new(Output::Timer),
        countdown_display: ConsoleDisplay::new(Output::Countdown),
        clock: Arc::new(SystemClock),
        talk_timer: talk_timer.clone(),
        notifications: notifications.clone(),
    });

    let (handle, events) = OrchestratorHandle::channel(64);
    let state = Arc::new(AppState::new(handle, talk_timer, config.port, config.host.clone()));

    // Start the notification subscriber before anything can be broadcast
    let notification_state = Arc::clone(&state);
    let notification_rx = notifications.subscribe();
    tokio::spawn(async move {
        notification_log_task(notification_state, notification_rx).await;
    });

    // The orchestrator owns all display state on its own task
    let mut orchestrator_handle = tokio::spawn(orchestrator_task(orchestrator, events, config.interactive()));

    let app = create_router(Arc::clone(&state));
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Control API running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/start        - Start the talk timer");
    info!("  POST /timer/stop         - Stop the talk timer");
    info!("  POST /countdown/stop     - Stop the countdown");
    info!("  PUT  /monitors/:output   - Change timer or countdown placement");
    info!("  POST /zoom-alert         - Flash the zoom alert");
    info!("  POST /shutdown           - Close (refused while the timer runs)");
    info!("  GET  /status             - Display and timer status");
    info!("  GET  /health             - Health check");

    let mut signals = ShutdownSignals::new()?;
    let mut shutdown_rx = state.shutdown_tx.subscribe();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = shutdown_rx.wait_for(|closing| *closing).await;
    });
    let mut server = tokio::spawn(async move { server.await });

    loop {
        tokio::select! {
            result = &mut server => {
                match result {
                    Ok(Err(e)) => tracing::error!("Server error: {}", e),
                    Err(e) => tracing::error!("Server task failed: {}", e),
                    Ok(Ok(())) => {}
                }
                break;
            }
            _ = &mut orchestrator_handle => {
                info!("Orchestrator task finished");
                break;
            }
            signal = signals.recv() => {
                if signal.is_none() {
                    warn!("Signal stream ended");
                    break;
                }
                match state.request_shutdown().await {
                    Ok(CloseOutcome::Accepted) => {}
                    Ok(CloseOutcome::Vetoed) => warn!("Talk timer is running, not closing"),
                    Err(e) => {
                        warn!("Could not request close: {}", e);
                        break;
                    }
                }
            }
        }
    }

    info!("Shutdown complete");
    Ok(())
}
