//! Colours of the referee window

use ratatui::style::Color;

/// Referee window palette
pub const WINDOW_BG: Color = Color::White;
pub const LABEL_FG: Color = Color::Black;
pub const ALERT_FG: Color = Color::Red;
pub const BUTTON_FG: Color = Color::White;
pub const START_GREEN: Color = Color::Green;
pub const STOP_RED: Color = Color::Red;
pub const HINT_FG: Color = Color::DarkGray;
