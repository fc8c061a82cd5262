//! State management module
//!
//! This module contains the countdown value and the display snapshot the
//! referee publishes to its readers.

pub mod display_state;
pub mod remaining_time;

// Re-export main types
pub use display_state::{DisplayState, Phase};
pub use remaining_time::RemainingTime;
