//! Drawing.

use crate::tui::app::App;
use crate::tui::render::render_document;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Text,
    widgets::{Block, Borders, Paragraph},
};

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Query input + readout
            Constraint::Min(5),    // Document
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    draw_query_bar(f, app, chunks[0]);
    draw_content(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);
}

fn draw_query_bar(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Search (Enter/\u{2193}: next, Shift reverses, \u{2191}: prev, Esc: clear) ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let readout = app.readout();
    let readout_width = (readout.len() as u16 + 2).min(inner.width / 2);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(readout_width)])
        .split(inner);

    let input = Paragraph::new(app.query()).style(Style::default().fg(Color::Yellow));
    f.render_widget(input, chunks[0]);

    let readout_style = if app.search.total_matches() == 0 && !app.query().is_empty() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let readout = Paragraph::new(readout)
        .style(readout_style)
        .alignment(Alignment::Right);
    f.render_widget(readout, chunks[1]);

    // Cursor at the end of the query text.
    let cursor_x = chunks[0].x + (app.query().chars().count() as u16).min(chunks[0].width);
    f.set_cursor_position((cursor_x, chunks[0].y));
}

fn draw_content(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.doc.title));
    let inner = block.inner(area);

    let rendered = render_document(&app.doc, inner.width);
    let view_height = inner.height as usize;

    // Center the current match, then clamp to the document.
    if app.follow_current {
        if let Some(line) = rendered.current_line {
            app.scroll = line.saturating_sub(view_height / 2);
        }
        app.follow_current = false;
    }
    let max_scroll = rendered.lines.len().saturating_sub(view_height);
    app.scroll = app.scroll.min(max_scroll);

    let content = Paragraph::new(Text::from(rendered.lines))
        .block(block)
        .scroll((app.scroll as u16, 0));
    f.render_widget(content, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status = format!(
        "{}  \u{2014}  PgUp/PgDn: scroll, Ctrl+Q: quit",
        app.status_message
    );
    let bar = Paragraph::new(status).style(Style::default().fg(Color::Cyan));
    f.render_widget(bar, area);
}
