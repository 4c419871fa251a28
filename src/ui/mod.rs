//! Terminal UI components
//!
//! Built with ratatui. One view per screen plus the shared chrome
//! (header and status bar).

pub mod detail;
pub mod search;
pub mod theme;

pub use detail::DetailView;
pub use search::SearchView;
pub use theme::Theme;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{App, Screen, SearchFocus};

/// Render the whole app for one frame
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Theme::text()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Screen
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    match &app.screen {
        Screen::Search(state) => SearchView::new(state).render(frame, chunks[1]),
        Screen::Detail(state) => DetailView::new(state).render(frame, chunks[1]),
    }
    render_status_bar(frame, chunks[2], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled("MOVIE", Theme::title()),
        Span::styled("FINDER", Theme::accent()),
        Span::styled(format!("   {}", app.route()), Theme::dimmed()),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let hints: &[(&str, &str)] = match &app.screen {
        Screen::Search(state) if state.focus.is_text() => &[
            ("type", "edit"),
            ("Tab", "next field"),
            ("Esc", "results"),
            ("^N/^P", "page"),
        ],
        Screen::Search(state) if state.focus == SearchFocus::Type => &[
            ("←→", "type"),
            ("1-4", "pick"),
            ("Tab", "next field"),
            ("q", "quit"),
        ],
        Screen::Search(_) => &[
            ("↑↓", "select"),
            ("↵", "details"),
            ("n/p", "page"),
            ("/", "search"),
            ("Tab", "filters"),
            ("q", "quit"),
        ],
        Screen::Detail(_) => &[("Esc", "back"), ("q", "quit")],
    };

    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, desc) in hints {
        spans.push(Span::styled(format!(" {} ", key), Theme::keybind()));
        spans.push(Span::styled(format!("{} ", desc), Theme::dimmed()));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Theme::status_bar()),
        area,
    );
}
