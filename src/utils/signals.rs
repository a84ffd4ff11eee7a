//! Signal handling for graceful shutdown

use signal_hook_tokio::Signals;
use futures::stream::StreamExt;
use tracing::info;

/// Stream of shutdown signals (SIGTERM, SIGINT).
///
/// A signal is a request to close, not a guarantee: the caller may refuse
/// it and wait for the next one.
pub struct ShutdownSignals {
    signals: Signals,
}

impl ShutdownSignals {
    pub fn new() -> std::io::Result<Self> {
        let signals = Signals::new([
            signal_hook::consts::SIGTERM,
            signal_hook::consts::SIGINT,
        ])?;
        Ok(Self { signals })
    }

    /// Wait for the next shutdown signal
    pub async fn recv(&mut self) -> Option<i32> {
        let signal = self.signals.next().await;
        if let Some(signal) = signal {
            info!("Received signal: {}", signal);
        }
        signal
    }
}
