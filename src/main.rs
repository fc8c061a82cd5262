//! Dojo Referee - A countdown referee for timed coding dojo sessions
//!
//! This is the main entry point for the dojo-referee application.

use std::{fs::OpenOptions, sync::Mutex};

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dojo_referee::{
    api::create_router,
    config::{Config, INITIAL_TIME},
    services::SoundPlayer,
    state::{DisplayState, RemainingTime},
    ui,
    utils::close_on_signal,
    Referee,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(&config)?;

    info!("Starting dojo-referee v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: player={}, assets={}, listen={:?}, headless={}",
        config.sound_player,
        config.assets_dir.display(),
        config.listen,
        config.headless
    );

    let initial_time: RemainingTime = INITIAL_TIME.parse().map_err(anyhow::Error::msg)?;
    let sounds = SoundPlayer::new(config.sound_player.clone(), config.begin_sound(), config.finish_sound());
    let (referee, handle) = Referee::new(initial_time, sounds);
    let referee_task = tokio::spawn(referee.run());

    if let Some(addr) = &config.listen {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind remote control to {}", addr))?;
        let app = create_router(handle.clone());
        info!("Remote control on http://{}", addr);
        info!("  POST /start  - Start the countdown");
        info!("  POST /stop   - Stop the countdown");
        info!("  GET  /status - Current label");
        info!("  GET  /health - Health check");
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                error!("Server error: {}", e);
            }
        });
    }

    tokio::spawn(close_on_signal(handle.clone()));

    if config.headless {
        tokio::spawn(log_display(handle.subscribe()));
        info!("Running headless, send SIGINT to close");
        referee_task.await?;
    } else {
        let window_handle = handle.clone();
        let window = tokio::task::spawn_blocking(move || ui::run(window_handle)).await?;
        if window.is_err() {
            // Window died on its own; the referee is still running.
            let _ = handle.close();
        }
        referee_task.await?;
        window.context("Terminal window failed")?;
    }

    info!("Referee shutdown complete");
    Ok(())
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let directives = config.log_filter().map_err(anyhow::Error::msg)?;
    let filter = EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter '{}'", directives))?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.headless {
        builder.init();
    } else {
        // The window owns the terminal, so logs go to a file.
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)
            .with_context(|| format!("Failed to open log file {}", config.log_file.display()))?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    }
    Ok(())
}

async fn log_display(mut display: tokio::sync::watch::Receiver<DisplayState>) {
    while display.changed().await.is_ok() {
        let state = display.borrow_and_update().clone();
        info!(
            "Display: {:>5} phase={:?} alert={}",
            if state.text.is_empty() { "-" } else { state.text.as_str() },
            state.phase,
            state.alert
        );
    }
}
