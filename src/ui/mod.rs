//! Terminal window module
//!
//! Draws the referee window and turns key presses and button clicks into
//! referee commands. Runs on a blocking thread; it only reads the display
//! through the referee's watch channel and exits once the referee is gone.

pub mod theme;
pub mod window;

use std::{
    io::{self, Stdout},
    time::Duration,
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing::{info, warn};

use crate::referee::{Command, RefereeHandle};

pub use window::{window_area, RefereeWindow, WindowLayout};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Show the window until the referee closes
pub fn run(handle: RefereeHandle) -> io::Result<()> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &handle);
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()
}

fn event_loop(terminal: &mut Term, handle: &RefereeHandle) -> io::Result<()> {
    let mut display = handle.subscribe();
    let mut layout = WindowLayout::new(Rect::default());

    loop {
        let state = display.borrow_and_update().clone();
        terminal.draw(|frame| {
            let area = window_area(frame.area());
            layout = WindowLayout::new(area);
            frame.render_widget(RefereeWindow::new(&state), area);
        })?;

        if display.has_changed().is_err() {
            info!("Referee closed, leaving the terminal");
            return Ok(());
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        let command = match event::read()? {
            Event::Key(key) => command_for_key(key),
            Event::Mouse(mouse) => command_for_click(&layout, mouse),
            _ => None,
        };

        if let Some(command) = command {
            if let Err(e) = handle.send(command) {
                warn!("{}", e);
                return Ok(());
            }
        }
    }
}

/// Keyboard shortcuts for the window's actions
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Close),
        KeyCode::Char('s') | KeyCode::Enter => Some(Command::Start),
        KeyCode::Char('x') | KeyCode::Char(' ') => Some(Command::Stop),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Close),
        _ => None,
    }
}

fn command_for_click(layout: &WindowLayout, mouse: MouseEvent) -> Option<Command> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => layout.command_at(mouse.column, mouse.row),
        _ => None,
    }
}
