//! Signal handling for graceful shutdown

use futures::stream::StreamExt;
use signal_hook_tokio::Signals;
use tracing::info;

use crate::referee::RefereeHandle;

/// Wait for shutdown signals (SIGTERM, SIGINT)
pub async fn shutdown_signal() -> std::io::Result<()> {
    let mut signals = Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ])?;

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }
    Ok(())
}

/// Close the referee once a shutdown signal arrives
pub async fn close_on_signal(referee: RefereeHandle) {
    match shutdown_signal().await {
        Ok(()) => {
            if let Err(e) = referee.close() {
                info!("{}", e);
            }
        }
        Err(e) => tracing::error!("Failed to install signal handler: {}", e),
    }
}
