//! Data structures for MovieFinder
//!
//! Shared models organized by screen:
//! - **Filters**: what the search screen sends upstream
//! - **Search**: rows of the result table
//! - **Detail**: a single looked-up title
//! - **Routes**: the two navigable locations

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value OMDb uses for "no poster available"
pub const POSTER_SENTINEL: &str = "N/A";

/// Placeholder shown in the result table
pub const LIST_PLACEHOLDER: &str = "https://via.placeholder.com/100";

/// Placeholder shown on the detail screen
pub const DETAIL_PLACEHOLDER: &str = "https://via.placeholder.com/300";

/// Resolve a poster value, substituting `placeholder` for the sentinel
pub fn poster_or<'a>(poster: &'a str, placeholder: &'a str) -> &'a str {
    if poster == POSTER_SENTINEL {
        placeholder
    } else {
        poster
    }
}

// =============================================================================
// Search Filters
// =============================================================================

/// Media type radio group. `All` sends no `type` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    All,
    #[default]
    Movie,
    Series,
    Episode,
}

impl MediaType {
    /// Radio group order
    pub const ALL: [MediaType; 4] = [
        MediaType::All,
        MediaType::Movie,
        MediaType::Series,
        MediaType::Episode,
    ];

    /// Query parameter value (empty for `All`)
    pub fn as_param(&self) -> &'static str {
        match self {
            MediaType::All => "",
            MediaType::Movie => "movie",
            MediaType::Series => "series",
            MediaType::Episode => "episode",
        }
    }

    /// Parse a parameter value; empty string is `All`
    pub fn from_param(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Some(MediaType::All),
            "movie" => Some(MediaType::Movie),
            "series" => Some(MediaType::Series),
            "episode" => Some(MediaType::Episode),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaType::All => "All",
            MediaType::Movie => "Movies",
            MediaType::Series => "TV Series",
            MediaType::Episode => "Episodes",
        }
    }

    /// Next option in the radio group (wraps)
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous option in the radio group (wraps)
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Filters owned by the search screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub query: String,
    /// `None` when the year field is blank or zero
    pub year: Option<u16>,
    pub media_type: MediaType,
    pub page: u32,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            query: "Pokemon".to_string(),
            year: None,
            media_type: MediaType::Movie,
            page: 1,
        }
    }
}

impl SearchFilters {
    /// A search is only issued for a non-blank query
    pub fn is_searchable(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Year as sent upstream; zero counts as unset
    pub fn effective_year(&self) -> Option<u16> {
        self.year.filter(|y| *y > 0)
    }

    /// Step back one page, floored at 1. Returns false at page 1.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }
}

// =============================================================================
// Search Models
// =============================================================================

/// One row of the search result table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    #[serde(rename = "Poster", default = "sentinel")]
    pub poster: String,
}

fn sentinel() -> String {
    POSTER_SENTINEL.to_string()
}

impl MovieSummary {
    /// Poster URL for the result table
    pub fn poster_url(&self) -> &str {
        poster_or(&self.poster, LIST_PLACEHOLDER)
    }

    /// Route the title links to
    pub fn detail_route(&self) -> Route {
        Route::Detail(self.imdb_id.clone())
    }
}

impl fmt::Display for MovieSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) [{}]", self.title, self.year, self.imdb_id)
    }
}

// =============================================================================
// Detail Models
// =============================================================================

/// Full record returned by a lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Plot", default)]
    pub plot: String,
    #[serde(rename = "Genre", default)]
    pub genre: String,
    #[serde(rename = "Director", default)]
    pub director: String,
    #[serde(rename = "Actors", default)]
    pub actors: String,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: String,
    #[serde(rename = "Poster", default = "sentinel")]
    pub poster: String,
    #[serde(rename = "Response", default)]
    pub response: String,
}

impl MovieDetail {
    /// Poster URL for the detail screen
    pub fn poster_url(&self) -> &str {
        poster_or(&self.poster, DETAIL_PLACEHOLDER)
    }
}

impl fmt::Display for MovieDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - ★ {}", self.title, self.genre, self.imdb_rating)
    }
}

// =============================================================================
// Routes
// =============================================================================

/// Navigable locations
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// `/` - the search screen
    #[default]
    Search,
    /// `/movie/<id>` - the detail screen
    Detail(String),
}

impl Route {
    /// Parse a path. Unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim();
        if path.is_empty() || path == "/" {
            return Some(Route::Search);
        }

        let rest = path.strip_prefix("/movie/")?;
        let segment = rest.trim_end_matches('/');
        if segment.is_empty() || segment.contains('/') {
            return None;
        }

        let id = urlencoding::decode(segment).ok()?.into_owned();
        Some(Route::Detail(id))
    }

    pub fn path(&self) -> String {
        match self {
            Route::Search => "/".to_string(),
            Route::Detail(id) => format!("/movie/{}", urlencoding::encode(id)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
