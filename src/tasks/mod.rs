//! Background tasks module
//!
//! The countdown and blink loops run as tokio tasks. They never touch the
//! display themselves: each one sends generation-tagged [`TaskEvent`]s to the
//! referee, which owns the display and discards events from stale runs.

pub mod blink;
pub mod countdown;

use std::future::Future;

use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::warn;

use crate::state::RemainingTime;

// Re-export main functions
pub use blink::{blink_task, BLINK_INTERVAL};
pub use countdown::{countdown_task, TICK_INTERVAL};

/// Event produced by a background loop for the referee
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEvent {
    /// Countdown published a new remaining time
    Tick { generation: u64, remaining: RemainingTime },
    /// Blink loop toggled the label text
    Blink { generation: u64, text: String },
}

impl TaskEvent {
    pub fn generation(&self) -> u64 {
        match self {
            TaskEvent::Tick { generation, .. } | TaskEvent::Blink { generation, .. } => *generation,
        }
    }
}

pub type EventSender = mpsc::UnboundedSender<TaskEvent>;

/// Receiving side of a stop signal, handed to a background loop
pub type StopSignal = watch::Receiver<bool>;

/// Owned handle to a cancellable background loop
#[derive(Debug)]
pub struct TaskHandle {
    stop_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl TaskHandle {
    /// Spawn a loop that receives its own stop signal
    pub fn spawn<F, Fut>(task: F) -> Self
    where
        F: FnOnce(StopSignal) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (stop_tx, stop_rx) = watch::channel(false);
        let join = tokio::spawn(task(stop_rx));
        Self { stop_tx, join }
    }

    /// Signal the loop to stop and wait until it has exited
    pub async fn cancel(self) {
        // The loop may already be gone, in which case nobody is listening.
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.join.await {
            warn!("Background task ended abnormally: {}", e);
        }
    }
}

/// Resolve once the stop signal fires or its sender is dropped
pub(crate) async fn stopped(stop: &mut StopSignal) {
    while !*stop.borrow_and_update() {
        if stop.changed().await.is_err() {
            return;
        }
    }
}
