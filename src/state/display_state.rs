//! What the referee window shows

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RemainingTime;

/// Lifecycle of a referee session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Waiting for Start; also the state after Stop and Close
    Idle,
    /// Countdown in progress
    Running,
    /// Countdown reached zero and the label is blinking
    Expired,
}

/// Snapshot of the countdown label published to every reader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayState {
    /// Label text; empty during the dark half of a blink
    pub text: String,
    /// Label is drawn in the alert colour
    pub alert: bool,
    pub phase: Phase,
    pub updated_at: DateTime<Utc>,
}

impl DisplayState {
    /// Idle display showing the given duration
    pub fn idle(initial: RemainingTime) -> Self {
        Self {
            text: initial.to_string(),
            alert: false,
            phase: Phase::Idle,
            updated_at: Utc::now(),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.updated_at = Utc::now();
    }

    /// Whether the label currently reads as a valid countdown value
    pub fn remaining(&self) -> Option<RemainingTime> {
        self.text.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_display_shows_initial_time() {
        let display = DisplayState::idle(RemainingTime::from_secs(300));
        assert_eq!(display.text, "05:00");
        assert!(!display.alert);
        assert_eq!(display.phase, Phase::Idle);
        assert_eq!(display.remaining(), Some(RemainingTime::from_secs(300)));
    }

    #[test]
    fn blank_blink_frame_has_no_remaining_time() {
        let mut display = DisplayState::idle(RemainingTime::ZERO);
        display.set_text("");
        assert_eq!(display.remaining(), None);
    }

    #[test]
    fn phase_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Phase::Expired).unwrap(), "\"expired\"");
    }
}
