//! OMDb (Open Movie Database) API client
//!
//! One GET endpoint, two parameter shapes: search (`s`) and lookup (`i`).
//! API docs: https://www.omdbapi.com/
//!
//! Callers see two failure channels. Transport problems (network, timeout,
//! non-2xx status, non-JSON body) come back as `Err(OmdbError)`. A well-formed
//! body with `"Response": "False"` comes back as `Ok(ApiReply::Failure(..))`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::models::{MovieDetail, MovieSummary, SearchFilters};

/// Public OMDb endpoint
pub const DEFAULT_BASE_URL: &str = "http://www.omdbapi.com/";

/// Transport-level failures
#[derive(Error, Debug)]
pub enum OmdbError {
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Application-level outcome of a well-formed response
#[derive(Debug, Clone, PartialEq)]
pub enum ApiReply<T> {
    /// `Response` was not `"False"`
    Success(T),
    /// `Response` was `"False"`, with the API's `Error` text if any
    Failure(Option<String>),
}

impl<T> ApiReply<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiReply::Success(_))
    }

    /// Convert to a `Result`, using `fallback` when the API gave no error text
    pub fn into_result(self, fallback: &str) -> Result<T, String> {
        match self {
            ApiReply::Success(value) => Ok(value),
            ApiReply::Failure(msg) => Err(msg.unwrap_or_else(|| fallback.to_string())),
        }
    }
}

/// OMDb API client
#[derive(Debug, Clone)]
pub struct OmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OmdbClient {
    /// Create a client for the public endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::with_timeout(api_key, base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET the endpoint with `apikey` plus `params`, parse the body as JSON
    async fn get<T: DeserializeOwned>(&self, params: &[(&'static str, String)]) -> Result<T, OmdbError> {
        debug!(url = %self.base_url, ?params, "OMDb request");

        let mut query: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
        query.push(("apikey", self.api_key.as_str()));
        query.extend(params.iter().map(|(k, v)| (*k, v.as_str())));

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OmdbError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| OmdbError::InvalidResponse(format!("JSON parse error: {}", e)))
    }

    /// Search titles with the given filters
    pub async fn search(
        &self,
        filters: &SearchFilters,
    ) -> Result<ApiReply<Vec<MovieSummary>>, OmdbError> {
        let response: SearchResponse = self.get(&search_params(filters)).await?;
        Ok(response.into_reply())
    }

    /// Look up a single title by its IMDb id
    pub async fn lookup(&self, imdb_id: &str) -> Result<ApiReply<MovieDetail>, OmdbError> {
        let response: LookupResponse = self.get(&lookup_params(imdb_id)).await?;
        Ok(response.into_reply())
    }
}

/// Search parameters, omitting `type` when All and `y` when blank or zero
pub fn search_params(filters: &SearchFilters) -> Vec<(&'static str, String)> {
    let mut params = vec![("s", filters.query.clone())];

    let media_type = filters.media_type.as_param();
    if !media_type.is_empty() {
        params.push(("type", media_type.to_string()));
    }
    if let Some(year) = filters.effective_year() {
        params.push(("y", year.to_string()));
    }
    params.push(("page", filters.page.to_string()));

    params
}

pub fn lookup_params(imdb_id: &str) -> Vec<(&'static str, String)> {
    vec![("i", imdb_id.to_string())]
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

fn is_negative(flag: Option<&str>) -> bool {
    flag == Some("False")
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Search")]
    search: Option<Vec<MovieSummary>>,
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

impl SearchResponse {
    fn into_reply(self) -> ApiReply<Vec<MovieSummary>> {
        if is_negative(self.response.as_deref()) {
            ApiReply::Failure(self.error)
        } else {
            ApiReply::Success(self.search.unwrap_or_default())
        }
    }
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(flatten)]
    detail: MovieDetail,
    #[serde(rename = "Error")]
    error: Option<String>,
}

impl LookupResponse {
    fn into_reply(self) -> ApiReply<MovieDetail> {
        if is_negative(Some(self.detail.response.as_str())) {
            ApiReply::Failure(self.error)
        } else {
            ApiReply::Success(self.detail)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaType;

    #[test]
    fn test_search_params_omit_blank_type_and_year() {
        let filters = SearchFilters {
            query: "Pokemon".into(),
            year: None,
            media_type: MediaType::All,
            page: 2,
        };
        let params = search_params(&filters);
        assert_eq!(
            params,
            vec![("s", "Pokemon".to_string()), ("page", "2".to_string())]
        );
    }

    #[test]
    fn test_search_params_include_type_and_year() {
        let filters = SearchFilters {
            query: "Alien".into(),
            year: Some(1979),
            media_type: MediaType::Movie,
            page: 1,
        };
        let params = search_params(&filters);
        assert!(params.contains(&("type", "movie".to_string())));
        assert!(params.contains(&("y", "1979".to_string())));
    }

    #[test]
    fn test_search_params_zero_year_omitted() {
        let filters = SearchFilters {
            year: Some(0),
            ..SearchFilters::default()
        };
        assert!(search_params(&filters).iter().all(|(k, _)| *k != "y"));
    }

    #[test]
    fn test_search_response_without_results_is_empty() {
        let raw: SearchResponse = serde_json::from_str(r#"{"Response":"True"}"#).unwrap();
        assert_eq!(raw.into_reply(), ApiReply::Success(vec![]));
    }

    #[test]
    fn test_search_response_negative_flag() {
        let raw: SearchResponse =
            serde_json::from_str(r#"{"Response":"False","Error":"Movie not found!"}"#).unwrap();
        assert_eq!(
            raw.into_reply(),
            ApiReply::Failure(Some("Movie not found!".into()))
        );
    }

    #[test]
    fn test_lookup_response_negative_flag_without_error() {
        let raw: LookupResponse = serde_json::from_str(r#"{"Response":"False"}"#).unwrap();
        let reply = raw.into_reply();
        assert!(!reply.is_success());
        assert_eq!(reply.into_result("fallback"), Err("fallback".to_string()));
    }
}
