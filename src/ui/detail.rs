//! Detail screen
//!
//! Loading indicator, API error, or the full record. The way back to the
//! movie list is shown in every state.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::app::{DetailState, RequestOutcome};
use crate::models::MovieDetail;
use crate::ui::Theme;

/// Label of the back affordance
pub const BACK_LABEL: &str = "◂ Back to Movie List";

/// Renders a borrowed [`DetailState`]
pub struct DetailView<'a> {
    state: &'a DetailState,
}

impl<'a> DetailView<'a> {
    pub fn new(state: &'a DetailState) -> Self {
        Self { state }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3)])
            .split(area);

        let back = Line::from(vec![
            Span::styled(BACK_LABEL, Theme::link()),
            Span::styled("  (Esc)", Theme::dimmed()),
        ]);
        frame.render_widget(Paragraph::new(back), chunks[0]);

        match &self.state.status {
            RequestOutcome::Loading => self.render_message(
                frame,
                chunks[1],
                Span::styled("Loading...", Theme::loading()),
            ),
            RequestOutcome::Failure(msg) => self.render_message(
                frame,
                chunks[1],
                Span::styled(msg.clone(), Theme::error()),
            ),
            RequestOutcome::Success(detail) => self.render_detail(frame, chunks[1], detail),
        }
    }

    fn block(&self, title: String) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border())
            .title(Span::styled(title, Theme::title()))
    }

    fn render_message(&self, frame: &mut Frame, area: Rect, message: Span<'static>) {
        let para = Paragraph::new(vec![Line::from(""), Line::from(message)])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(self.block(format!(" {} ", self.state.imdb_id)));
        frame.render_widget(para, area);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, detail: &MovieDetail) {
        let field = |label: &'static str, value: &str, style: Style| {
            Line::from(vec![
                Span::styled(format!("{:<13}", label), Theme::title()),
                Span::styled(value.to_string(), style),
            ])
        };

        let lines = vec![
            Line::from(Span::styled(
                detail.title.clone(),
                Theme::title().add_modifier(Modifier::UNDERLINED),
            )),
            Line::from(""),
            Line::from(Span::styled(detail.plot.clone(), Theme::text())),
            Line::from(""),
            field("Genre:", &detail.genre, Theme::text()),
            field("Director:", &detail.director, Theme::text()),
            field("Cast:", &detail.actors, Theme::text()),
            field(
                "IMDb Rating:",
                &detail.imdb_rating,
                Theme::rating(&detail.imdb_rating),
            ),
            Line::from(""),
            field("Poster:", detail.poster_url(), Theme::meta()),
        ];

        let para = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(self.block(format!(" {} ", self.state.imdb_id)));
        frame.render_widget(para, area);
    }
}
