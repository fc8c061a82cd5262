//! Blinking label background task

use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use super::{stopped, EventSender, StopSignal, TaskEvent};

/// Half period of the blink
pub const BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// Alternate between blank and `text` every [`BLINK_INTERVAL`] until stopped
///
/// The label already shows `text` when blinking starts, so the first frame
/// published is the blank one.
pub async fn blink_task(text: String, generation: u64, events: EventSender, mut stop: StopSignal) {
    debug!("Blinking '{}' (run {})", text, generation);

    let mut ticker = interval_at(Instant::now() + BLINK_INTERVAL, BLINK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut visible = true;

    loop {
        tokio::select! {
            biased;

            _ = stopped(&mut stop) => break,

            _ = ticker.tick() => {
                visible = !visible;
                let frame = if visible { text.clone() } else { String::new() };
                if events.send(TaskEvent::Blink { generation, text: frame }).is_err() {
                    break;
                }
            }
        }
    }

    debug!("Blink stopped (run {})", generation);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::TaskHandle;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn alternates_blank_and_text_every_half_second() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let started = Instant::now();
        let handle = TaskHandle::spawn(move |stop| blink_task("00:00".to_string(), 3, tx, stop));

        let mut frames = Vec::new();
        for i in 1..=4u32 {
            match rx.recv().await.unwrap() {
                TaskEvent::Blink { generation, text } => {
                    assert_eq!(generation, 3);
                    assert_eq!(started.elapsed(), BLINK_INTERVAL * i);
                    frames.push(text);
                }
                other => panic!("unexpected event {:?}", other),
            }
        }
        assert_eq!(frames, ["", "00:00", "", "00:00"]);

        handle.cancel().await;
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_before_first_frame_publishes_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = TaskHandle::spawn(move |stop| blink_task("00:00".to_string(), 1, tx, stop));

        tokio::time::timeout(BLINK_INTERVAL, handle.cancel())
            .await
            .expect("blink ignored its stop signal");
        assert!(rx.recv().await.is_none());
    }
}
