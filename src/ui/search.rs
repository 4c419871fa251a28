//! Search screen
//!
//! Filter form (query, year, media type), result table and pagination bar.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::app::{SearchFocus, SearchState};
use crate::models::MediaType;
use crate::ui::Theme;

/// Height of the filter form
const FORM_HEIGHT: u16 = 3;

/// Renders a borrowed [`SearchState`]
pub struct SearchView<'a> {
    state: &'a SearchState,
}

impl<'a> SearchView<'a> {
    pub fn new(state: &'a SearchState) -> Self {
        Self { state }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(FORM_HEIGHT),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_form(frame, chunks[0]);
        self.render_results(frame, chunks[1]);
        self.render_pagination(frame, chunks[2]);
    }

    fn field_block(&self, title: &'static str, field: SearchFocus) -> Block<'static> {
        let border_style = if self.state.focus == field {
            Theme::border_focused()
        } else {
            Theme::border()
        };
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(title, Theme::title()))
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(20),
                Constraint::Length(10),
                Constraint::Length(48),
            ])
            .split(area);

        // Query
        let query_line = if self.state.focus == SearchFocus::Query {
            let (before, after) = self.state.query_split();
            Line::from(vec![
                Span::styled(format!("⌕ {}", before), Theme::input()),
                Span::styled("│", Theme::keybind()),
                Span::styled(after.to_string(), Theme::input()),
            ])
        } else if self.state.filters.query.is_empty() {
            Line::from(Span::styled("⌕ Search movies...", Theme::dimmed()))
        } else {
            Line::from(Span::styled(
                format!("⌕ {}", self.state.filters.query),
                Theme::input(),
            ))
        };
        frame.render_widget(
            Paragraph::new(query_line).block(self.field_block(" SEARCH ", SearchFocus::Query)),
            chunks[0],
        );

        // Year
        let year_line = match (self.state.year_input.is_empty(), self.state.focus) {
            (_, SearchFocus::Year) => Line::from(vec![
                Span::styled(self.state.year_input.clone(), Theme::input()),
                Span::styled("│", Theme::keybind()),
            ]),
            (true, _) => Line::from(Span::styled("Year", Theme::dimmed())),
            (false, _) => Line::from(Span::styled(self.state.year_input.clone(), Theme::input())),
        };
        frame.render_widget(
            Paragraph::new(year_line).block(self.field_block(" YEAR ", SearchFocus::Year)),
            chunks[1],
        );

        // Media type radio group
        let mut spans = Vec::new();
        for media_type in MediaType::ALL {
            let checked = media_type == self.state.filters.media_type;
            let (mark, style) = if checked {
                ("◉ ", Theme::accent())
            } else {
                ("○ ", Theme::dimmed())
            };
            spans.push(Span::styled(mark, style));
            spans.push(Span::styled(
                media_type.label(),
                if checked { Theme::text() } else { Theme::dimmed() },
            ));
            spans.push(Span::raw("  "));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).block(self.field_block(" TYPE ", SearchFocus::Type)),
            chunks[2],
        );
    }

    fn render_results(&self, frame: &mut Frame, area: Rect) {
        let loading = if self.state.loading.is_loading() {
            " ⟳"
        } else {
            ""
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.state.focus == SearchFocus::Results {
                Theme::border_focused()
            } else {
                Theme::border()
            })
            .title(Span::styled(
                format!(" RESULTS ({}){} ", self.state.results.len(), loading),
                Theme::title(),
            ));

        if self.state.results.is_empty() {
            let message = if self.state.loading.is_loading() {
                let msg = self.state.loading.message().unwrap_or("Searching...");
                Span::styled(format!("⟳ {}", msg), Theme::loading())
            } else if !self.state.filters.is_searchable() {
                Span::styled("Type a title to search", Theme::dimmed())
            } else {
                Span::styled("No results", Theme::dimmed())
            };
            let empty = Paragraph::new(Line::from(message))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let header = Row::new(vec!["Poster", "Name", "Release Date", "IMDb ID"])
            .style(Theme::title())
            .bottom_margin(1);

        let rows: Vec<Row> = self
            .state
            .results
            .iter()
            .map(|movie| {
                Row::new(vec![
                    Cell::from(Span::styled(movie.poster_url().to_string(), Theme::meta())),
                    Cell::from(Span::styled(movie.title.clone(), Theme::link())),
                    Cell::from(Span::styled(movie.year.clone(), Theme::year())),
                    Cell::from(Span::styled(movie.imdb_id.clone(), Theme::meta())),
                ])
            })
            .collect();

        let widths = [
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Length(12),
            Constraint::Length(11),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Theme::highlighted())
            .highlight_symbol("▸ ");

        let mut table_state = TableState::default().with_selected(Some(self.state.list.selected));
        frame.render_stateful_widget(table, area, &mut table_state);
    }

    fn render_pagination(&self, frame: &mut Frame, area: Rect) {
        let page = self.state.filters.page;
        let prev_style = if page == 1 {
            Theme::dimmed()
        } else {
            Theme::keybind()
        };

        let mut spans = vec![
            Span::styled(" ◂ Previous ", prev_style),
            Span::styled(format!(" Page {} ", page), Theme::text()),
            Span::styled(" Next ▸ ", Theme::keybind()),
        ];
        if self.state.end_reached {
            spans.push(Span::styled("  end of results", Theme::dimmed()));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
