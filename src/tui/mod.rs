//! Interactive terminal viewer.
//!
//! Typing edits the query and re-runs a full highlight pass on every
//! keystroke; Enter/Down step to the next match (Shift reverses), Up steps
//! back, and the viewport follows the current match.

mod app;
mod render;
mod ui;

pub use render::{RenderedDocument, render_document};

use crate::content::Document;
use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;

pub fn run(doc: Document, initial_query: Option<String>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(doc);
    if let Some(query) = initial_query {
        app.set_query(&query);
    }

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            // Only react to presses; Windows reports releases too.
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match (key.modifiers, key.code) {
                    (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('q')) => {
                        return Ok(());
                    }
                    (KeyModifiers::CONTROL, KeyCode::Char('w')) => app.delete_word(),
                    // Terminal-standard backspace alias
                    (KeyModifiers::CONTROL, KeyCode::Char('h')) => app.pop_char(),
                    (KeyModifiers::CONTROL, KeyCode::Down) => app.scroll_down(),
                    (KeyModifiers::CONTROL, KeyCode::Up) => app.scroll_up(),

                    // Forward with Enter/Down, the Shift modifier reverses.
                    (KeyModifiers::SHIFT, KeyCode::Enter | KeyCode::Down) => app.previous_match(),
                    (_, KeyCode::Enter | KeyCode::Down) => app.next_match(),
                    (_, KeyCode::Up) => app.previous_match(),

                    (_, KeyCode::Esc) => {
                        if app.query().is_empty() {
                            return Ok(());
                        }
                        app.clear_query();
                    }
                    (_, KeyCode::Backspace) => app.pop_char(),
                    (_, KeyCode::PageDown) => app.scroll_page_down(),
                    (_, KeyCode::PageUp) => app.scroll_page_up(),

                    (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                        app.push_char(c)
                    }
                    _ => {}
                }
            }
        }
    }
}
