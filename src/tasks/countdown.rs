//! Countdown background task

use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use super::{stopped, EventSender, StopSignal, TaskEvent};
use crate::state::RemainingTime;

/// Time between two published values
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Publish `duration`, then every remaining second down to `00:00`
///
/// Runs until the countdown is exhausted, the stop signal fires, or the
/// referee stops listening. Publishes N+1 values for a duration of N seconds.
pub async fn countdown_task(
    duration: RemainingTime,
    generation: u64,
    events: EventSender,
    mut stop: StopSignal,
) {
    info!("Countdown started from {} (run {})", duration, generation);

    let mut ticker = interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut remaining = Some(duration);

    while let Some(current) = remaining {
        tokio::select! {
            biased;

            _ = stopped(&mut stop) => {
                debug!("Countdown run {} stopped at {}", generation, current);
                break;
            }

            _ = ticker.tick() => {
                if events.send(TaskEvent::Tick { generation, remaining: current }).is_err() {
                    debug!("Referee gone, abandoning countdown run {}", generation);
                    break;
                }
                remaining = current.pred();
            }
        }
    }

    info!("Countdown finished (run {})", generation);
}
