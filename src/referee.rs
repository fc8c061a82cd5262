//! The referee: single owner of the countdown, blink loop, sounds and display
//!
//! [`Referee::run`] is the only writer of the [`DisplayState`]. Start, Stop and
//! Close arrive as [`Command`]s from any number of [`RefereeHandle`]s; the
//! countdown and blink loops report back through [`TaskEvent`]s tagged with
//! the generation of the run that spawned them. Every Start and Stop advances
//! the generation, so values from an abandoned run can never reach the label.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::{
    services::{Sound, SoundPlayer},
    state::{DisplayState, Phase, RemainingTime},
    tasks::{blink_task, countdown_task, EventSender, TaskEvent, TaskHandle},
};

/// Delay between Close and the referee shutting down
pub const CLOSE_GRACE: Duration = Duration::from_millis(200);

/// Operator actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Close,
}

/// Controller state machine driving one referee window
pub struct Referee {
    initial_time: RemainingTime,
    generation: u64,
    countdown: Option<TaskHandle>,
    blink: Option<TaskHandle>,
    sounds: SoundPlayer,
    display_tx: watch::Sender<DisplayState>,
    commands: mpsc::UnboundedReceiver<Command>,
    events_tx: EventSender,
    events: mpsc::UnboundedReceiver<TaskEvent>,
}

impl Referee {
    /// Create a referee counting down from `initial_time` and a handle to drive it
    pub fn new(initial_time: RemainingTime, sounds: SoundPlayer) -> (Self, RefereeHandle) {
        let (display_tx, display_rx) = watch::channel(DisplayState::idle(initial_time));
        let (commands_tx, commands) = mpsc::unbounded_channel();
        let (events_tx, events) = mpsc::unbounded_channel();

        let referee = Self {
            initial_time,
            generation: 0,
            countdown: None,
            blink: None,
            sounds,
            display_tx,
            commands,
            events_tx,
            events,
        };
        let handle = RefereeHandle {
            commands: commands_tx,
            display: display_rx,
        };

        (referee, handle)
    }

    /// Process commands and task events until Close, or until every handle is dropped
    pub async fn run(mut self) {
        info!("Referee ready at {}", self.initial_time);

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::Start) => self.start().await,
                    Some(Command::Stop) => self.stop().await,
                    Some(Command::Close) | None => {
                        self.close().await;
                        break;
                    }
                },
                Some(event) = self.events.recv() => self.handle_event(event),
            }
        }

        info!("Referee closed");
    }

    async fn start(&mut self) {
        self.cancel_tasks().await;
        self.generation += 1;
        info!("Starting countdown from {} (run {})", self.initial_time, self.generation);

        let initial = self.initial_time;
        self.display_tx.send_modify(|display| {
            display.set_text(initial.to_string());
            display.alert = false;
            display.phase = Phase::Running;
        });

        let generation = self.generation;
        let events = self.events_tx.clone();
        self.countdown = Some(TaskHandle::spawn(move |stop| {
            countdown_task(initial, generation, events, stop)
        }));

        self.sounds.play(Sound::Begin);
    }

    async fn stop(&mut self) {
        self.generation += 1;
        let had_countdown = self.countdown.is_some();
        self.cancel_tasks().await;
        self.sounds.stop();

        let initial = self.initial_time;
        self.display_tx.send_if_modified(|display| {
            let before = display.clone();
            display.alert = false;
            display.phase = Phase::Idle;
            if had_countdown {
                display.set_text(initial.to_string());
            }
            display.text != before.text || display.alert != before.alert || display.phase != before.phase
        });

        if had_countdown {
            info!("Countdown stopped");
        } else {
            debug!("Stop with no countdown running");
        }
    }

    async fn close(&mut self) {
        info!("Closing referee");
        self.stop().await;
        tokio::time::sleep(CLOSE_GRACE).await;
    }

    async fn cancel_tasks(&mut self) {
        if let Some(countdown) = self.countdown.take() {
            countdown.cancel().await;
        }
        if let Some(blink) = self.blink.take() {
            blink.cancel().await;
        }
    }

    fn handle_event(&mut self, event: TaskEvent) {
        if event.generation() != self.generation {
            debug!("Dropping event from stale run {}: {:?}", event.generation(), event);
            return;
        }

        match event {
            TaskEvent::Tick { remaining, .. } => self.update_remaining_time(remaining),
            TaskEvent::Blink { text, .. } => self.display_tx.send_modify(|display| display.set_text(text)),
        }
    }

    fn update_remaining_time(&mut self, remaining: RemainingTime) {
        let text = remaining.to_string();
        let expired = remaining.is_zero();

        if expired {
            self.zero_reached(&text);
        }

        self.display_tx.send_modify(|display| {
            display.set_text(text);
            if expired {
                display.alert = true;
                display.phase = Phase::Expired;
            }
        });
    }

    fn zero_reached(&mut self, text: &str) {
        info!("Time is up (run {})", self.generation);

        let generation = self.generation;
        let events = self.events_tx.clone();
        let text = text.to_string();
        self.blink = Some(TaskHandle::spawn(move |stop| blink_task(text, generation, events, stop)));

        self.sounds.play(Sound::Finish);
    }
}

/// Cloneable remote for a running [`Referee`]
#[derive(Debug, Clone)]
pub struct RefereeHandle {
    commands: mpsc::UnboundedSender<Command>,
    display: watch::Receiver<DisplayState>,
}

impl RefereeHandle {
    pub fn send(&self, command: Command) -> Result<(), String> {
        self.commands
            .send(command)
            .map_err(|e| format!("Referee is not running, cannot {:?}", e.0))
    }

    pub fn start(&self) -> Result<(), String> {
        self.send(Command::Start)
    }

    pub fn stop(&self) -> Result<(), String> {
        self.send(Command::Stop)
    }

    pub fn close(&self) -> Result<(), String> {
        self.send(Command::Close)
    }

    /// Current label contents
    pub fn snapshot(&self) -> DisplayState {
        self.display.borrow().clone()
    }

    /// Receiver notified on every display change; closed once the referee exits
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.display.clone()
    }

    /// Whether the referee loop has exited
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::{BLINK_INTERVAL, TICK_INTERVAL};
    use tokio::{task::JoinHandle, time::Instant};

    fn silent_player() -> SoundPlayer {
        SoundPlayer::new("/nonexistent/dojo-player", "begin.wav", "finish.wav")
    }

    fn spawn_referee(seconds: u32) -> (JoinHandle<()>, RefereeHandle) {
        let (referee, handle) = Referee::new(RemainingTime::from_secs(seconds), silent_player());
        (tokio::spawn(referee.run()), handle)
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_expires_into_blinking_alert() {
        let (task, handle) = spawn_referee(2);
        let mut display = handle.subscribe();
        let started = Instant::now();
        handle.start().unwrap();

        let expired = display.wait_for(|d| d.phase == Phase::Expired).await.unwrap().clone();
        assert_eq!(expired.text, "00:00");
        assert!(expired.alert);
        assert_eq!(started.elapsed(), TICK_INTERVAL * 2);

        display.wait_for(|d| d.text.is_empty()).await.unwrap();
        assert_eq!(started.elapsed(), TICK_INTERVAL * 2 + BLINK_INTERVAL);
        display.wait_for(|d| d.text == "00:00").await.unwrap();
        assert_eq!(started.elapsed(), TICK_INTERVAL * 2 + BLINK_INTERVAL * 2);

        handle.stop().unwrap();
        let idle = display.wait_for(|d| d.phase == Phase::Idle).await.unwrap().clone();
        assert_eq!(idle.text, "00:02");
        assert!(!idle.alert);

        handle.close().unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn stop_mid_countdown_resets_display() {
        let (task, handle) = spawn_referee(300);
        let mut display = handle.subscribe();
        handle.start().unwrap();

        display.wait_for(|d| d.text == "04:58").await.unwrap();
        handle.stop().unwrap();
        let idle = display.wait_for(|d| d.phase == Phase::Idle).await.unwrap().clone();
        assert_eq!(idle.text, "05:00");

        // Nothing keeps publishing after Stop.
        tokio::time::sleep(TICK_INTERVAL * 5).await;
        assert_eq!(handle.snapshot().text, "05:00");
        assert!(!display.has_changed().unwrap());

        handle.close().unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn stop_when_idle_is_a_no_op() {
        let (task, handle) = spawn_referee(300);
        let before = handle.snapshot();

        handle.stop().unwrap();
        handle.stop().unwrap();
        handle.close().unwrap();
        task.await.unwrap();

        assert_eq!(handle.snapshot(), before);
        assert!(handle.is_closed());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_never_interleaves_stale_values() {
        let (task, handle) = spawn_referee(5);
        let mut display = handle.subscribe();
        handle.start().unwrap();
        display.wait_for(|d| d.text == "00:03").await.unwrap();

        handle.start().unwrap();
        display.wait_for(|d| d.text == "00:05").await.unwrap();

        let mut seen = vec![display.borrow_and_update().remaining().unwrap()];
        while seen.last() != Some(&RemainingTime::ZERO) {
            display.changed().await.unwrap();
            let current = display.borrow_and_update().clone();
            if let Some(remaining) = current.remaining() {
                if seen.last() != Some(&remaining) {
                    seen.push(remaining);
                }
            }
        }

        let texts: Vec<String> = seen.iter().map(ToString::to_string).collect();
        assert_eq!(texts, ["00:05", "00:04", "00:03", "00:02", "00:01", "00:00"]);

        handle.close().unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn start_during_blink_resets_the_alert() {
        let (task, handle) = spawn_referee(1);
        let mut display = handle.subscribe();
        handle.start().unwrap();
        display.wait_for(|d| d.phase == Phase::Expired).await.unwrap();

        handle.start().unwrap();
        let running = display.wait_for(|d| d.phase == Phase::Running).await.unwrap().clone();
        assert_eq!(running.text, "00:01");
        assert!(!running.alert);

        // Blink frames from the first run would blank the label here.
        tokio::time::sleep(BLINK_INTERVAL / 2).await;
        assert_eq!(handle.snapshot().text, "00:01");

        handle.close().unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn close_stops_everything_after_grace_delay() {
        let (task, handle) = spawn_referee(1);
        let mut display = handle.subscribe();
        handle.start().unwrap();
        display.wait_for(|d| d.phase == Phase::Expired).await.unwrap();

        let closing = Instant::now();
        handle.close().unwrap();
        task.await.unwrap();
        assert!(closing.elapsed() >= CLOSE_GRACE);

        let last = handle.snapshot();
        assert_eq!(last.phase, Phase::Idle);
        assert_eq!(last.text, "00:01");
        assert!(handle.start().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_every_handle_closes_the_referee() {
        let (task, handle) = spawn_referee(10);
        drop(handle);
        task.await.unwrap();
    }

    /// Player whose cues are shell scripts appending their name to a log
    struct CueLog {
        dir: std::path::PathBuf,
    }

    impl CueLog {
        fn new(name: &str, begin_extra: &str) -> Self {
            let dir = std::env::temp_dir().join(format!("dojo-referee-{}-{}", std::process::id(), name));
            std::fs::create_dir_all(&dir).unwrap();
            let log = dir.join("cues.log");
            for (cue, extra) in [("begin", begin_extra), ("finish", "")] {
                let script = format!("echo {} >> '{}'\n{}\n", cue, log.display(), extra);
                std::fs::write(dir.join(format!("{}.sh", cue)), script).unwrap();
            }
            Self { dir }
        }

        fn player(&self) -> SoundPlayer {
            SoundPlayer::new("sh", self.dir.join("begin.sh"), self.dir.join("finish.sh"))
        }

        fn contents(&self) -> String {
            std::fs::read_to_string(self.dir.join("cues.log")).unwrap_or_default()
        }
    }

    impl Drop for CueLog {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.dir);
        }
    }

    // Real time: the cue processes run outside the tokio clock.
    #[tokio::test]
    async fn start_plays_begin_and_expiry_plays_finish_once() {
        let cues = CueLog::new("expiry", "");
        let (referee, handle) = Referee::new(RemainingTime::from_secs(1), cues.player());
        let task = tokio::spawn(referee.run());
        let mut display = handle.subscribe();

        handle.start().unwrap();
        display.wait_for(|d| d.phase == Phase::Expired).await.unwrap();
        // Two blink frames: ticks after 00:00 must not replay the finish cue.
        display.wait_for(|d| d.text.is_empty()).await.unwrap();
        display.wait_for(|d| d.text == "00:00").await.unwrap();

        handle.close().unwrap();
        task.await.unwrap();
        assert_eq!(cues.contents(), "begin\nfinish\n");
    }

    #[tokio::test]
    async fn stop_cuts_off_the_playing_cue() {
        let cues = CueLog::new("stop", "sleep 1\necho begin-done >> \"$(dirname \"$0\")/cues.log\"");
        let (referee, handle) = Referee::new(RemainingTime::from_secs(300), cues.player());
        let task = tokio::spawn(referee.run());

        handle.start().unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;
        handle.stop().unwrap();

        // Long enough for an uninterrupted cue to finish.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        handle.close().unwrap();
        task.await.unwrap();
        assert_eq!(cues.contents(), "begin\n");
    }
}
