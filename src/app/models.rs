//! Data models for movie search results and details
//!
//! Field names follow the upstream JSON (`Title`, `imdbID`, ...) through
//! serde renames. The upstream fills missing values with the `"N/A"`
//! sentinel rather than omitting them, and every field defaults to that
//! sentinel when a record is incomplete.

use serde::{Deserialize, Serialize};

use crate::constants::api::NOT_AVAILABLE;
use crate::errors::{ApiError, ApiResult, TransportError};

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// Check whether an upstream field carries a real value
pub fn is_available(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed != NOT_AVAILABLE
}

/// Parse the leading year out of a release-year string
///
/// Handles single years (`"2022"`) and ranges (`"1989-1992"`, `"2019–"`).
/// Anything without leading digits yields 0.
pub fn parse_year(year: &str) -> i32 {
    let digits: String = year
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Parse a numeric rating, treating unparsable values as 0
pub fn parse_rating(rating: &str) -> f64 {
    rating
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// A single entry of a search result page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchItem {
    /// Catalog identifier, stable across search and detail calls
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    /// Release year; may be a range
    #[serde(rename = "Year", default = "not_available")]
    pub year: String,
    #[serde(rename = "Type", default = "not_available")]
    pub item_type: String,
    /// Poster URI or `"N/A"`
    #[serde(rename = "Poster", default = "not_available")]
    pub poster: String,
}

impl SearchItem {
    /// Leading release year, 0 when unknown
    pub fn release_year(&self) -> i32 {
        parse_year(&self.year)
    }

    pub fn poster_url(&self) -> Option<&str> {
        is_available(&self.poster).then_some(self.poster.as_str())
    }
}

/// Extended attributes of a single catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDetail {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title", default = "not_available")]
    pub title: String,
    #[serde(rename = "Year", default = "not_available")]
    pub year: String,
    #[serde(rename = "Rated", default = "not_available")]
    pub rated: String,
    #[serde(rename = "Released", default = "not_available")]
    pub released: String,
    #[serde(rename = "Runtime", default = "not_available")]
    pub runtime: String,
    /// Comma-separated genre list
    #[serde(rename = "Genre", default = "not_available")]
    pub genre: String,
    #[serde(rename = "Director", default = "not_available")]
    pub director: String,
    #[serde(rename = "Writer", default = "not_available")]
    pub writer: String,
    #[serde(rename = "Actors", default = "not_available")]
    pub actors: String,
    #[serde(rename = "Plot", default = "not_available")]
    pub plot: String,
    #[serde(rename = "Language", default = "not_available")]
    pub language: String,
    #[serde(rename = "Country", default = "not_available")]
    pub country: String,
    #[serde(rename = "Awards", default = "not_available")]
    pub awards: String,
    #[serde(rename = "Poster", default = "not_available")]
    pub poster: String,
    /// Numeric rating as sent by the upstream, e.g. `"7.5"`
    #[serde(rename = "imdbRating", default = "not_available")]
    pub imdb_rating: String,
    /// Rating count as sent by the upstream, e.g. `"1,234,567"`
    #[serde(rename = "imdbVotes", default = "not_available")]
    pub imdb_votes: String,
    #[serde(rename = "Type", default = "not_available")]
    pub item_type: String,
    #[serde(rename = "BoxOffice", default = "not_available")]
    pub box_office: String,
}

impl ItemDetail {
    /// Rating as a number, 0 when unknown
    pub fn rating(&self) -> f64 {
        parse_rating(&self.imdb_rating)
    }

    /// Individual genres of the comma-separated list
    pub fn genres(&self) -> Vec<&str> {
        if !is_available(&self.genre) {
            return Vec::new();
        }
        self.genre
            .split(',')
            .map(str::trim)
            .filter(|genre| !genre.is_empty())
            .collect()
    }

    /// Case-insensitive substring match against the genre list
    pub fn matches_genre(&self, genre: &str) -> bool {
        genre.is_empty() || self.genre.to_lowercase().contains(&genre.to_lowercase())
    }

    /// Rating count without thousands separators
    pub fn vote_count(&self) -> Option<u64> {
        self.imdb_votes.replace(',', "").trim().parse().ok()
    }
}

/// Why a search produced no usable items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFailure {
    /// Query was empty; nothing was sent
    EmptyQuery,
    /// Upstream answered but matched nothing
    NoResults,
    Timeout,
    NetworkUnreachable,
    /// Upstream failed with a 5xx after retries
    ServiceUnavailable,
    /// Upstream rejected the request (4xx)
    InvalidRequest,
    Cancelled,
    /// Response could not be decoded
    MalformedResponse,
}

impl SearchFailure {
    /// User-facing explanation of the failure
    pub fn message(&self) -> &'static str {
        match self {
            SearchFailure::EmptyQuery => "Please enter a movie title to search.",
            SearchFailure::NoResults => "No movies found",
            SearchFailure::Timeout => "Request timed out. Please try again.",
            SearchFailure::NetworkUnreachable => {
                "Network connection failed. Please check your connection."
            }
            SearchFailure::ServiceUnavailable => {
                "The movie database is temporarily unavailable. Please try again later."
            }
            SearchFailure::InvalidRequest => "Invalid request sent to the movie database.",
            SearchFailure::Cancelled => "Search was cancelled.",
            SearchFailure::MalformedResponse => {
                "Received an unexpected response from the movie database."
            }
        }
    }

    /// Whether offering a retry to the user makes sense
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SearchFailure::Timeout
                | SearchFailure::NetworkUnreachable
                | SearchFailure::ServiceUnavailable
                | SearchFailure::Cancelled
        )
    }
}

impl From<&TransportError> for SearchFailure {
    fn from(error: &TransportError) -> Self {
        match error {
            TransportError::Timeout { .. } => SearchFailure::Timeout,
            TransportError::NetworkUnreachable { .. } => SearchFailure::NetworkUnreachable,
            TransportError::HttpServerError { .. } => SearchFailure::ServiceUnavailable,
            TransportError::HttpClientError { .. } | TransportError::InvalidUrl { .. } => {
                SearchFailure::InvalidRequest
            }
            TransportError::Cancelled => SearchFailure::Cancelled,
            TransportError::UnexpectedStatus { .. } => SearchFailure::MalformedResponse,
        }
    }
}

/// Typed outcome of a search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub items: Vec<SearchItem>,
    /// Total matches reported by the upstream across all pages
    pub total_count: u32,
    pub succeeded: bool,
    pub error_message: Option<String>,
    pub failure: Option<SearchFailure>,
}

impl SearchResult {
    /// A successful page of results
    pub fn success(items: Vec<SearchItem>, total_count: u32) -> Self {
        Self {
            items,
            total_count,
            succeeded: true,
            error_message: None,
            failure: None,
        }
    }

    /// A failed search with the default message for its kind
    pub fn failure(failure: SearchFailure) -> Self {
        Self::failure_with_message(failure, failure.message())
    }

    /// A failed search with an explicit message
    pub fn failure_with_message(failure: SearchFailure, message: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            succeeded: false,
            error_message: Some(message.into()),
            failure: Some(failure),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<ApiError> for SearchResult {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::UpstreamNoResults { message } => {
                SearchResult::failure_with_message(SearchFailure::NoResults, message)
            }
            ApiError::UpstreamNotFound { message } => {
                SearchResult::failure_with_message(SearchFailure::NoResults, message)
            }
            ApiError::MalformedResponse { .. } => {
                SearchResult::failure(SearchFailure::MalformedResponse)
            }
            ApiError::Transport(ref transport) => SearchResult::failure(transport.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<SearchItem>,
    #[serde(rename = "totalResults", default)]
    total_results: Option<String>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

fn is_true(response: &str) -> bool {
    response.eq_ignore_ascii_case("true")
}

/// Decode a search response body into items and total count
pub fn parse_search_response(body: &str) -> ApiResult<(Vec<SearchItem>, u32)> {
    let envelope: SearchEnvelope = serde_json::from_str(body)?;

    if !is_true(&envelope.response) {
        return Err(ApiError::UpstreamNoResults {
            message: envelope
                .error
                .unwrap_or_else(|| crate::constants::api::NO_RESULTS_MESSAGE.to_string()),
        });
    }

    let total = envelope
        .total_results
        .as_deref()
        .and_then(|total| total.trim().parse().ok())
        .unwrap_or(envelope.search.len() as u32);

    Ok((envelope.search, total))
}

/// Decode a detail response body
pub fn parse_detail_response(body: &str) -> ApiResult<ItemDetail> {
    let value: serde_json::Value = serde_json::from_str(body)?;

    let response = value
        .get("Response")
        .and_then(|response| response.as_str())
        .ok_or_else(|| ApiError::MalformedResponse {
            reason: "missing Response field".to_string(),
        })?;

    if !is_true(response) {
        let message = value
            .get("Error")
            .and_then(|error| error.as_str())
            .unwrap_or("Incorrect IMDb ID.")
            .to_string();
        return Err(ApiError::UpstreamNotFound { message });
    }

    Ok(serde_json::from_value(value)?)
}

/// Check that a body is a well-formed API envelope of either kind
pub fn is_api_envelope(body: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("Response").map(|r| r.is_string()))
        .unwrap_or(false)
}
