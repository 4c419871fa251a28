//! UI rendering tests for MovieFinder
//!
//! Renders the whole app into a TestBackend and inspects the buffer.
//!
//! ## Test Cases
//! - Search screen: one row per result, poster placeholder, empty states,
//!   pagination bar
//! - Detail screen: loading, error and success are mutually exclusive and
//!   the back affordance is always present

use moviefinder::api::{ApiReply, OmdbError};
use moviefinder::app::{App, AppMessage, DETAIL_TRANSPORT_ERROR};
use moviefinder::models::{
    MovieDetail, MovieSummary, Route, SearchFilters, DETAIL_PLACEHOLDER, LIST_PLACEHOLDER,
};
use moviefinder::ui::{self, detail::BACK_LABEL};
use ratatui::{backend::TestBackend, Terminal};

// =============================================================================
// Helpers
// =============================================================================

fn render_lines(app: &App, width: u16, height: u16) -> Vec<String> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();

    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect()
}

fn screen_text(app: &App) -> String {
    render_lines(app, 140, 30).join("\n")
}

fn movie(title: &str, id: &str, poster: &str) -> MovieSummary {
    MovieSummary {
        title: title.into(),
        year: "1999".into(),
        imdb_id: id.into(),
        poster: poster.into(),
    }
}

/// App on the search screen with `rows` applied as the first page
fn search_app(rows: Vec<MovieSummary>) -> App {
    let mut app = App::new(SearchFilters::default(), true);
    let seq = app.take_requests()[0].seq();
    app.apply(AppMessage::SearchLoaded {
        seq,
        page: 1,
        result: Ok(ApiReply::Success(rows)),
    });
    app
}

fn detail_app(id: &str, result: Result<ApiReply<MovieDetail>, OmdbError>) -> App {
    let mut app = App::with_route(Route::Detail(id.into()), SearchFilters::default(), true);
    let seq = app.take_requests()[0].seq();
    app.apply(AppMessage::DetailLoaded {
        seq,
        imdb_id: id.into(),
        result,
    });
    app
}

fn batman() -> MovieDetail {
    MovieDetail {
        title: "Batman".into(),
        plot: "The Dark Knight of Gotham City begins his war on crime.".into(),
        genre: "Action, Adventure".into(),
        director: "Tim Burton".into(),
        actors: "Michael Keaton, Jack Nicholson".into(),
        imdb_rating: "7.5".into(),
        poster: "N/A".into(),
        response: "True".into(),
    }
}

// =============================================================================
// Search Screen
// =============================================================================

#[test]
fn test_one_row_per_result() {
    let app = search_app(vec![
        movie("Alpha", "tt0000001", "https://img.example/a.jpg"),
        movie("Bravo", "tt0000002", "https://img.example/b.jpg"),
        movie("Charlie", "tt0000003", "https://img.example/c.jpg"),
    ]);
    let lines = render_lines(&app, 140, 30);

    for (title, id) in [
        ("Alpha", "tt0000001"),
        ("Bravo", "tt0000002"),
        ("Charlie", "tt0000003"),
    ] {
        let matching: Vec<&String> = lines.iter().filter(|l| l.contains(id)).collect();
        assert_eq!(matching.len(), 1, "{} should appear on exactly one line", id);
        assert!(matching[0].contains(title), "{} row should show {}", id, title);
        assert!(matching[0].contains("1999"));
    }

    let text = lines.join("\n");
    assert!(text.contains("RESULTS (3)"));
    assert!(text.contains("Release Date"));
    assert!(text.contains("IMDb ID"));
}

#[test]
fn test_missing_poster_shows_placeholder() {
    let app = search_app(vec![movie("Alpha", "tt0000001", "N/A")]);
    let text = screen_text(&app);
    assert!(text.contains(LIST_PLACEHOLDER));
    assert!(!text.contains("N/A"));
}

#[test]
fn test_pending_search_shows_loading() {
    let app = App::new(SearchFilters::default(), true);
    let text = screen_text(&app);
    assert!(text.contains("Searching..."));
    assert!(text.contains("Page 1"));
}

#[test]
fn test_empty_query_prompts_for_title() {
    let filters = SearchFilters {
        query: String::new(),
        ..SearchFilters::default()
    };
    let app = App::new(filters, true);
    let text = screen_text(&app);
    assert!(text.contains("Type a title to search"));
    assert!(text.contains("Search movies..."));
}

#[test]
fn test_media_type_radio_marks_selection() {
    let app = search_app(vec![]);
    let text = screen_text(&app);
    assert!(text.contains("◉ Movies"));
    assert!(text.contains("○ All"));
    assert!(text.contains("○ TV Series"));
    assert!(text.contains("○ Episodes"));
}

#[test]
fn test_end_of_results_hint() {
    let mut app = search_app(vec![movie("Alpha", "tt0000001", "N/A")]);
    app.next_page();
    let seq = app.take_requests()[0].seq();
    app.apply(AppMessage::SearchLoaded {
        seq,
        page: 2,
        result: Ok(ApiReply::Failure(Some("Movie not found!".into()))),
    });

    let text = screen_text(&app);
    assert!(text.contains("Page 2"));
    assert!(text.contains("end of results"));
    assert!(text.contains("No results"));
}

#[test]
fn test_renders_at_minimum_size() {
    let app = search_app(vec![movie("Alpha", "tt0000001", "N/A")]);
    let lines = render_lines(&app, 80, 24);
    assert_eq!(lines.len(), 24);
    assert!(lines.iter().any(|l| l.contains("Alpha")));
}

// =============================================================================
// Detail Screen
// =============================================================================

#[test]
fn test_detail_loading_is_exclusive() {
    let app = App::with_route(
        Route::Detail("tt0096895".into()),
        SearchFilters::default(),
        true,
    );
    let text = screen_text(&app);
    assert!(text.contains("Loading..."));
    assert!(text.contains(BACK_LABEL));
    assert!(!text.contains("Genre:"));
}

#[test]
fn test_detail_api_error_shows_text_and_no_fields() {
    let app = detail_app(
        "tt9999999",
        Ok(ApiReply::Failure(Some("Incorrect IMDb ID.".into()))),
    );
    let text = screen_text(&app);
    assert!(text.contains("Incorrect IMDb ID."));
    assert!(text.contains(BACK_LABEL));
    assert!(!text.contains("Loading..."));
    assert!(!text.contains("Director:"));
}

#[test]
fn test_detail_transport_error_message() {
    let app = detail_app("tt0096895", Err(OmdbError::Status(503)));
    let text = screen_text(&app);
    assert!(text.contains(DETAIL_TRANSPORT_ERROR));
    assert!(text.contains(BACK_LABEL));
}

#[test]
fn test_detail_success_shows_fields() {
    let app = detail_app("tt0096895", Ok(ApiReply::Success(batman())));
    let text = screen_text(&app);
    assert!(text.contains("Batman"));
    assert!(text.contains("begins his war on crime"));
    assert!(text.contains("Action, Adventure"));
    assert!(text.contains("Tim Burton"));
    assert!(text.contains("Michael Keaton, Jack Nicholson"));
    assert!(text.contains("7.5"));
    assert!(text.contains(DETAIL_PLACEHOLDER));
    assert!(text.contains(BACK_LABEL));
    assert!(!text.contains("Loading..."));
}

#[test]
fn test_header_shows_route() {
    let app = detail_app("tt0096895", Ok(ApiReply::Success(batman())));
    let text = screen_text(&app);
    assert!(text.contains("/movie/tt0096895"));
}
