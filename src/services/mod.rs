//! External process management module
//!
//! The referee's only external collaborator is the audio player that plays
//! the begin and finish cues.

pub mod sound;

// Re-export main types
pub use sound::{Sound, SoundPlayer};
