//! Fixed-size referee window: countdown label plus Start and Stop buttons

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Clear, Paragraph, Widget},
};

use crate::{
    config::{APPLICATION_TITLE, WINDOW_HEIGHT, WINDOW_WIDTH},
    referee::Command,
    state::DisplayState,
};

use super::theme;

const BUTTON_WIDTH: u16 = 10;
const HINTS: &str = "s start  x stop  q quit";

/// Centre the window in the terminal; it never grows past its fixed size
pub fn window_area(screen: Rect) -> Rect {
    let width = WINDOW_WIDTH.min(screen.width);
    let height = WINDOW_HEIGHT.min(screen.height);
    Rect::new(
        screen.x + (screen.width - width) / 2,
        screen.y + (screen.height - height) / 2,
        width,
        height,
    )
}

/// Where each element of the window sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowLayout {
    pub label: Rect,
    pub start: Rect,
    pub stop: Rect,
    pub hints: Rect,
}

impl WindowLayout {
    pub fn new(window: Rect) -> Self {
        let x = window.x.saturating_add(2);
        let width = window.width.saturating_sub(4);
        let row = |offset: u16| window.y.saturating_add(offset);
        let button_width = BUTTON_WIDTH.min(width / 2);

        let label = Rect::new(x, row(2), width, 1);
        let start = Rect::new(x, row(4), button_width, 1);
        let stop = Rect::new(x + width - button_width, row(4), button_width, 1);
        let hints = Rect::new(x, row(window.height.saturating_sub(2)), width, 1);

        Self {
            label: label.intersection(window),
            start: start.intersection(window),
            stop: stop.intersection(window),
            hints: hints.intersection(window),
        }
    }

    /// Button under a mouse click, if any
    pub fn command_at(&self, column: u16, row: u16) -> Option<Command> {
        let hit = |rect: Rect| {
            column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
        };

        if hit(self.start) {
            Some(Command::Start)
        } else if hit(self.stop) {
            Some(Command::Stop)
        } else {
            None
        }
    }
}

pub struct RefereeWindow<'a> {
    display: &'a DisplayState,
}

impl<'a> RefereeWindow<'a> {
    pub fn new(display: &'a DisplayState) -> Self {
        Self { display }
    }
}

impl Widget for RefereeWindow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = WindowLayout::new(area);

        Clear.render(area, buf);
        Block::bordered()
            .title(APPLICATION_TITLE)
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(theme::WINDOW_BG).fg(theme::LABEL_FG))
            .render(area, buf);

        let label_fg = if self.display.alert { theme::ALERT_FG } else { theme::LABEL_FG };
        Paragraph::new(self.display.text.as_str())
            .style(Style::default().fg(label_fg).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .render(layout.label, buf);

        button("Start", theme::START_GREEN).render(layout.start, buf);
        button("Stop", theme::STOP_RED).render(layout.stop, buf);

        Paragraph::new(HINTS)
            .style(Style::default().fg(theme::HINT_FG))
            .alignment(Alignment::Center)
            .render(layout.hints, buf);
    }
}

fn button(text: &str, color: ratatui::style::Color) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(
            Style::default()
                .fg(theme::BUTTON_FG)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
}
