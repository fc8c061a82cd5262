//! Dojo Referee - A countdown referee for timed coding dojo sessions
//!
//! This library provides the countdown, blinking expiry label and sound cues
//! of the referee, the controller tying them together, and the terminal
//! window and HTTP remote control that drive it.

pub mod api;
pub mod config;
pub mod referee;
pub mod services;
pub mod state;
pub mod tasks;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use referee::{Command, Referee, RefereeHandle};
pub use state::{DisplayState, Phase, RemainingTime};
pub use utils::signals::shutdown_signal;
