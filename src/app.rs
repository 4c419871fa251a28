//! App state and core application logic
//!
//! Owns the two screens, turns key presses into filter edits and
//! navigation, and applies fetch results that come back from the
//! background tasks. The app never performs I/O itself: it queues
//! [`Request`]s for the event loop to dispatch and receives
//! [`AppMessage`]s in return.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, error, warn};

use crate::api::{ApiReply, OmdbError};
use crate::models::*;

/// Shown when a lookup fails at the API level without an `Error` text
pub const DETAIL_FALLBACK_ERROR: &str = "Failed to fetch movie details.";

/// Shown when a lookup fails at the transport level
pub const DETAIL_TRANSPORT_ERROR: &str = "An error occurred while fetching movie details.";

/// Longest year the numeric field accepts
const YEAR_DIGITS: usize = 4;

// =============================================================================
// Requests & Messages
// =============================================================================

/// Fetch the app wants performed, tagged with its issue sequence number
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Search { seq: u64, filters: SearchFilters },
    Lookup { seq: u64, imdb_id: String },
}

impl Request {
    pub fn seq(&self) -> u64 {
        match self {
            Request::Search { seq, .. } | Request::Lookup { seq, .. } => *seq,
        }
    }
}

/// Completed fetch posted back to the event loop
#[derive(Debug)]
pub enum AppMessage {
    SearchLoaded {
        seq: u64,
        page: u32,
        result: Result<ApiReply<Vec<MovieSummary>>, OmdbError>,
    },
    DetailLoaded {
        seq: u64,
        imdb_id: String,
        result: Result<ApiReply<MovieDetail>, OmdbError>,
    },
}

// =============================================================================
// Loading State
// =============================================================================

/// Loading state for the search screen
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadingState {
    /// No request outstanding
    #[default]
    Idle,
    /// Loading with optional message
    Loading(Option<String>),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoadingState::Loading(Some(msg)) => Some(msg),
            _ => None,
        }
    }
}

/// Outcome of the detail screen's lookup
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome<T> {
    Loading,
    Success(T),
    Failure(String),
}

impl<T> RequestOutcome<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestOutcome::Loading)
    }
}

// =============================================================================
// Selection State
// =============================================================================

/// Selection state for the result table
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.len.saturating_sub(1);
    }

    /// Update length and clamp selection (e.g., when new results come in)
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

// =============================================================================
// Search Screen State
// =============================================================================

/// Which control of the search screen has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFocus {
    Query,
    Year,
    Type,
    #[default]
    Results,
}

impl SearchFocus {
    pub fn next(self) -> Self {
        match self {
            SearchFocus::Query => SearchFocus::Year,
            SearchFocus::Year => SearchFocus::Type,
            SearchFocus::Type => SearchFocus::Results,
            SearchFocus::Results => SearchFocus::Query,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            SearchFocus::Query => SearchFocus::Results,
            SearchFocus::Year => SearchFocus::Query,
            SearchFocus::Type => SearchFocus::Year,
            SearchFocus::Results => SearchFocus::Type,
        }
    }

    /// Whether keystrokes go into a text field
    pub fn is_text(self) -> bool {
        matches!(self, SearchFocus::Query | SearchFocus::Year)
    }
}

/// Search screen state
#[derive(Debug, Clone)]
pub struct SearchState {
    pub filters: SearchFilters,
    /// Cursor position in the query, in characters
    pub cursor: usize,
    /// Text of the year field (digits only, empty when unset)
    pub year_input: String,
    pub focus: SearchFocus,
    /// Rows of the most recently applied search
    pub results: Vec<MovieSummary>,
    pub list: ListState,
    pub loading: LoadingState,
    /// Set when a page past the first came back empty
    pub end_reached: bool,
    /// Sequence number of the latest search issued by this screen
    pub latest_seq: u64,
    /// First sequence number that can belong to this screen instance
    pub mounted_seq: u64,
}

impl SearchState {
    pub fn new(filters: SearchFilters) -> Self {
        let year_input = filters
            .effective_year()
            .map(|y| y.to_string())
            .unwrap_or_default();
        let cursor = filters.query.chars().count();

        Self {
            filters,
            cursor,
            year_input,
            focus: SearchFocus::default(),
            results: Vec::new(),
            list: ListState::new(0),
            loading: LoadingState::Idle,
            end_reached: false,
            latest_seq: 0,
            mounted_seq: 0,
        }
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.filters
            .query
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.filters.query.len())
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.filters.query.insert(idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index(self.cursor);
            self.filters.query.remove(idx);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.filters.query.chars().count() {
            let idx = self.byte_index(self.cursor);
            self.filters.query.remove(idx);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.filters.query.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.filters.query.chars().count();
    }

    /// Query split at the cursor, for rendering
    pub fn query_split(&self) -> (&str, &str) {
        self.filters.query.split_at(self.byte_index(self.cursor))
    }

    /// Append a digit to the year field. Non-digits are ignored.
    pub fn year_insert(&mut self, c: char) {
        if c.is_ascii_digit() && self.year_input.len() < YEAR_DIGITS {
            self.year_input.push(c);
            self.sync_year();
        }
    }

    pub fn year_backspace(&mut self) {
        self.year_input.pop();
        self.sync_year();
    }

    /// A blank or zero year clears the field
    fn sync_year(&mut self) {
        self.filters.year = self.year_input.parse::<u16>().ok().filter(|y| *y > 0);
        self.year_input = self
            .filters
            .year
            .map(|y| y.to_string())
            .unwrap_or_default();
    }

    /// Replace the rows wholesale
    pub fn set_results(&mut self, results: Vec<MovieSummary>) {
        self.list = ListState::new(results.len());
        self.results = results;
    }

    pub fn selected_result(&self) -> Option<&MovieSummary> {
        self.results.get(self.list.selected)
    }
}

// =============================================================================
// Detail Screen State
// =============================================================================

/// Detail screen state, scoped to one identifier
#[derive(Debug, Clone)]
pub struct DetailState {
    pub imdb_id: String,
    pub status: RequestOutcome<MovieDetail>,
    /// Sequence number of the latest lookup issued by this screen
    pub latest_seq: u64,
    /// First sequence number that can belong to this screen instance
    pub mounted_seq: u64,
}

impl DetailState {
    pub fn new(imdb_id: impl Into<String>) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            status: RequestOutcome::Loading,
            latest_seq: 0,
            mounted_seq: 0,
        }
    }

    pub fn detail(&self) -> Option<&MovieDetail> {
        match &self.status {
            RequestOutcome::Success(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            RequestOutcome::Failure(msg) => Some(msg),
            _ => None,
        }
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// The mounted screen. Unmounting drops its state.
#[derive(Debug, Clone)]
pub enum Screen {
    Search(SearchState),
    Detail(DetailState),
}

/// Main application state
#[derive(Debug)]
pub struct App {
    pub screen: Screen,
    /// Whether the app is running
    pub running: bool,
    /// Filters a freshly mounted search screen starts with
    pub initial_filters: SearchFilters,
    /// Discard responses that are not the latest issued for their screen
    pub stale_guard: bool,
    /// Last sequence number handed out
    seq: u64,
    /// Requests waiting for the event loop
    outbox: Vec<Request>,
}

impl App {
    /// Create an app on the search screen
    pub fn new(initial_filters: SearchFilters, stale_guard: bool) -> Self {
        Self::with_route(Route::Search, initial_filters, stale_guard)
    }

    /// Create an app mounted on `route`
    pub fn with_route(route: Route, initial_filters: SearchFilters, stale_guard: bool) -> Self {
        let mut app = Self {
            screen: Screen::Search(SearchState::new(initial_filters.clone())),
            running: true,
            initial_filters,
            stale_guard,
            seq: 0,
            outbox: Vec::new(),
        };
        app.mount(route);
        app
    }

    pub fn route(&self) -> Route {
        match &self.screen {
            Screen::Search(_) => Route::Search,
            Screen::Detail(detail) => Route::Detail(detail.imdb_id.clone()),
        }
    }

    pub fn search(&self) -> Option<&SearchState> {
        match &self.screen {
            Screen::Search(state) => Some(state),
            _ => None,
        }
    }

    pub fn search_mut(&mut self) -> Option<&mut SearchState> {
        match &mut self.screen {
            Screen::Search(state) => Some(state),
            _ => None,
        }
    }

    pub fn detail(&self) -> Option<&DetailState> {
        match &self.screen {
            Screen::Detail(state) => Some(state),
            _ => None,
        }
    }

    /// Drain queued requests for dispatch
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.outbox)
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Navigate to `route`. Re-entering the current route is a no-op.
    pub fn navigate(&mut self, route: Route) {
        if self.route() == route {
            return;
        }
        debug!(from = %self.route(), to = %route, "navigate");
        self.mount(route);
    }

    /// Replace the screen. Replies to requests issued before this point
    /// belong to an unmounted screen.
    fn mount(&mut self, route: Route) {
        let mounted_seq = self.seq + 1;
        match route {
            Route::Search => {
                let mut state = SearchState::new(self.initial_filters.clone());
                state.mounted_seq = mounted_seq;
                self.screen = Screen::Search(state);
                self.issue_search();
            }
            Route::Detail(imdb_id) => {
                let mut state = DetailState::new(imdb_id);
                state.mounted_seq = mounted_seq;
                self.screen = Screen::Detail(state);
                self.issue_lookup();
            }
        }
    }

    /// Issue a search for the current filters, unless the query is blank
    fn issue_search(&mut self) {
        let seq = self.seq + 1;
        let Screen::Search(state) = &mut self.screen else {
            return;
        };
        if !state.filters.is_searchable() {
            return;
        }

        state.latest_seq = seq;
        state.loading = LoadingState::Loading(Some("Searching...".into()));
        let filters = state.filters.clone();
        self.seq = seq;
        self.outbox.push(Request::Search { seq, filters });
    }

    fn issue_lookup(&mut self) {
        let seq = self.next_seq();
        let Screen::Detail(state) = &mut self.screen else {
            return;
        };

        state.latest_seq = seq;
        state.status = RequestOutcome::Loading;
        let imdb_id = state.imdb_id.clone();
        self.outbox.push(Request::Lookup { seq, imdb_id });
    }

    /// Apply an edit to the search filters and search again if they changed
    fn edit_filters(&mut self, edit: impl FnOnce(&mut SearchState)) {
        let Some(state) = self.search_mut() else {
            return;
        };
        let before = state.filters.clone();
        edit(state);
        if state.filters != before {
            self.issue_search();
        }
    }

    pub fn next_page(&mut self) {
        self.edit_filters(|s| s.filters.next_page());
    }

    pub fn prev_page(&mut self) {
        self.edit_filters(|s| {
            s.filters.prev_page();
        });
    }

    pub fn set_media_type(&mut self, media_type: MediaType) {
        self.edit_filters(|s| s.filters.media_type = media_type);
    }

    /// Open the detail screen for the selected row
    pub fn open_selected(&mut self) {
        if let Some(route) = self
            .search()
            .and_then(|s| s.selected_result())
            .map(|r| r.detail_route())
        {
            self.navigate(route);
        }
    }

    // -------------------------------------------------------------------------
    // Fetch Results
    // -------------------------------------------------------------------------

    /// Apply a completed fetch
    pub fn apply(&mut self, msg: AppMessage) {
        let guard = self.stale_guard;
        match msg {
            AppMessage::SearchLoaded { seq, page, result } => {
                let Some(state) = self.search_mut().filter(|s| seq >= s.mounted_seq) else {
                    debug!(seq, "search result for unmounted screen dropped");
                    return;
                };
                if guard && seq != state.latest_seq {
                    debug!(seq, latest = state.latest_seq, "stale search result dropped");
                    return;
                }
                if seq == state.latest_seq {
                    state.loading = LoadingState::Idle;
                }

                match result {
                    Ok(reply) => {
                        let rows = match reply {
                            ApiReply::Success(rows) => rows,
                            ApiReply::Failure(msg) => {
                                debug!(page, error = ?msg, "search reported no results");
                                Vec::new()
                            }
                        };
                        state.end_reached = page > 1 && rows.is_empty();
                        state.set_results(rows);
                    }
                    Err(e) => {
                        error!(error = %e, page, "Error fetching movies");
                    }
                }
            }
            AppMessage::DetailLoaded {
                seq,
                imdb_id,
                result,
            } => {
                let state = match &mut self.screen {
                    Screen::Detail(state)
                        if seq >= state.mounted_seq && imdb_id == state.imdb_id =>
                    {
                        state
                    }
                    _ => {
                        debug!(seq, id = %imdb_id, "lookup result for unmounted screen dropped");
                        return;
                    }
                };
                if guard && seq != state.latest_seq {
                    debug!(seq, id = %imdb_id, "stale lookup result dropped");
                    return;
                }

                state.status = match result {
                    Ok(reply) => match reply.into_result(DETAIL_FALLBACK_ERROR) {
                        Ok(detail) => RequestOutcome::Success(detail),
                        Err(msg) => {
                            warn!(id = %imdb_id, error = %msg, "lookup rejected by API");
                            RequestOutcome::Failure(msg)
                        }
                    },
                    Err(e) => {
                        error!(error = %e, id = %imdb_id, "Error fetching movie details");
                        RequestOutcome::Failure(DETAIL_TRANSPORT_ERROR.to_string())
                    }
                };
            }
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        match self.screen {
            Screen::Search(_) => self.handle_search_key(key),
            Screen::Detail(_) => self.handle_detail_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> bool {
        let Some(focus) = self.search().map(|s| s.focus) else {
            return false;
        };

        // Pagination works from any control
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('n') => {
                    self.next_page();
                    true
                }
                KeyCode::Char('p') => {
                    self.prev_page();
                    true
                }
                _ => false,
            };
        }

        match key.code {
            KeyCode::Tab => {
                if let Some(s) = self.search_mut() {
                    s.focus = s.focus.next();
                }
                return true;
            }
            KeyCode::BackTab => {
                if let Some(s) = self.search_mut() {
                    s.focus = s.focus.prev();
                }
                return true;
            }
            KeyCode::Esc if focus != SearchFocus::Results => {
                if let Some(s) = self.search_mut() {
                    s.focus = SearchFocus::Results;
                }
                return true;
            }
            _ => {}
        }

        match focus {
            SearchFocus::Query => self.handle_query_key(key),
            SearchFocus::Year => self.handle_year_key(key),
            SearchFocus::Type => self.handle_type_key(key),
            SearchFocus::Results => self.handle_results_key(key),
        }
    }

    fn handle_query_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => self.edit_filters(|s| s.insert(c)),
            KeyCode::Backspace => self.edit_filters(|s| s.backspace()),
            KeyCode::Delete => self.edit_filters(|s| s.delete()),
            KeyCode::Left => self.edit_filters(|s| s.cursor_left()),
            KeyCode::Right => self.edit_filters(|s| s.cursor_right()),
            KeyCode::Home => self.edit_filters(|s| s.cursor_home()),
            KeyCode::End => self.edit_filters(|s| s.cursor_end()),
            KeyCode::Enter => self.edit_filters(|s| s.focus = SearchFocus::Results),
            _ => return false,
        }
        true
    }

    fn handle_year_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => self.edit_filters(|s| s.year_insert(c)),
            KeyCode::Backspace => self.edit_filters(|s| s.year_backspace()),
            KeyCode::Enter => self.edit_filters(|s| s.focus = SearchFocus::Results),
            _ => return false,
        }
        true
    }

    fn handle_type_key(&mut self, key: KeyEvent) -> bool {
        let Some(current) = self.search().map(|s| s.filters.media_type) else {
            return false;
        };
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.set_media_type(current.prev()),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                self.set_media_type(current.next())
            }
            KeyCode::Char(c @ '1'..='4') => {
                let idx = (c as usize) - ('1' as usize);
                self.set_media_type(MediaType::ALL[idx]);
            }
            KeyCode::Char('q') => self.quit(),
            _ => return false,
        }
        true
    }

    fn handle_results_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('/') | KeyCode::Char('s') => {
                if let Some(s) = self.search_mut() {
                    s.focus = SearchFocus::Query;
                    s.cursor_end();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(s) = self.search_mut() {
                    s.list.up();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(s) = self.search_mut() {
                    s.list.down();
                }
            }
            KeyCode::Home | KeyCode::Char('g') => {
                if let Some(s) = self.search_mut() {
                    s.list.first();
                }
            }
            KeyCode::End | KeyCode::Char('G') => {
                if let Some(s) = self.search_mut() {
                    s.list.last();
                }
            }
            KeyCode::Enter => self.open_selected(),
            KeyCode::Right | KeyCode::Char('n') | KeyCode::PageDown => self.next_page(),
            KeyCode::Left | KeyCode::Char('p') | KeyCode::PageUp => self.prev_page(),
            _ => return false,
        }
        true
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') | KeyCode::Left => {
                self.navigate(Route::Search)
            }
            _ => return false,
        }
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
