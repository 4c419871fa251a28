//! CLI Command Handlers
//!
//! Each handler takes its parsed arguments, a ready client and the Output,
//! and returns an ExitCode.

use tracing::error;

use crate::api::{ApiReply, OmdbClient};
use crate::app::DETAIL_FALLBACK_ERROR;
use crate::cli::{ExitCode, InfoCmd, Output, SearchCmd};
use crate::models::{MovieDetail, MovieSummary, SearchFilters};

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, client: &OmdbClient, output: &Output) -> ExitCode {
    let filters = SearchFilters {
        query: cmd.query,
        year: cmd.year.filter(|y| *y > 0),
        media_type: cmd.media_type.into(),
        page: cmd.page,
    };

    if !filters.is_searchable() {
        return output.error("Search query must not be empty", ExitCode::InvalidArgs);
    }

    output.info(format!(
        "Searching for: {} (page {})",
        filters.query.trim(),
        filters.page
    ));

    match client.search(&filters).await {
        Ok(ApiReply::Success(results)) => print_or_fail(output, &results, format_results),
        Ok(ApiReply::Failure(msg)) => output.error(
            msg.unwrap_or_else(|| "Search failed".into()),
            ExitCode::ApiError,
        ),
        Err(e) => {
            error!(error = %e, "Error fetching movies");
            output.error(format!("Search failed: {}", e), ExitCode::NetworkError)
        }
    }
}

// =============================================================================
// Info Command
// =============================================================================

pub async fn info_cmd(cmd: InfoCmd, client: &OmdbClient, output: &Output) -> ExitCode {
    let id = cmd.id.trim();
    if id.is_empty() {
        return output.error("IMDb id must not be empty", ExitCode::InvalidArgs);
    }

    match client.lookup(id).await {
        Ok(reply) => match reply.into_result(DETAIL_FALLBACK_ERROR) {
            Ok(detail) => print_or_fail(output, &detail, format_detail),
            Err(msg) => output.error(msg, ExitCode::ApiError),
        },
        Err(e) => {
            error!(error = %e, id, "Error fetching movie details");
            output.error(format!("Lookup failed: {}", e), ExitCode::NetworkError)
        }
    }
}

fn print_or_fail<T: serde::Serialize>(
    output: &Output,
    data: &T,
    text: impl FnOnce(&T) -> String,
) -> ExitCode {
    match output.print(data, text) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

// =============================================================================
// Text Formatting
// =============================================================================

/// One line per result: id, year, title, poster
pub fn format_results(results: &Vec<MovieSummary>) -> String {
    if results.is_empty() {
        return "No results".to_string();
    }

    results
        .iter()
        .map(|m| format!("{:<11} {:<9} {}  {}", m.imdb_id, m.year, m.title, m.poster_url()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_detail(detail: &MovieDetail) -> String {
    format!(
        "{}\n\n{}\n\nGenre:       {}\nDirector:    {}\nCast:        {}\nIMDb Rating: {}\nPoster:      {}",
        detail.title,
        detail.plot,
        detail.genre,
        detail.director,
        detail.actors,
        detail.imdb_rating,
        detail.poster_url()
    )
}
